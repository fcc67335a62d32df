//! Headless party preview runner.
//!
//! Loads the character catalog, label tables and scenarios from RON files,
//! runs a full target resolution and renders the events. This enables:
//!
//! - **Balancing**: Check who targets whom without opening the game
//! - **CI verification**: Resolve shipped scenarios and compare state hashes
//! - **Data validation**: Catch dangling summon references early
//!
//! # Output
//!
//! - **stdout**: Event lines (plain text or one JSON object per line)
//! - **stderr**: Logs (human-readable)
//!
//! # Example
//!
//! ```bash
//! cargo run -p preview_headless -- resolve --scenario assets/scenarios/skirmish.ron
//! cargo run -p preview_headless -- validate
//! ```

pub mod config;
pub mod data_loader;
pub mod runner;
pub mod scenario;

pub use config::PreviewConfig;
pub use runner::{DataSources, OutputFormat, PreviewRunner, RunnerError};
pub use scenario::{Scenario, ScenarioError};
