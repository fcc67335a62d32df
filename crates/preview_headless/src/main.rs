//! Headless party preview runner.
//!
//! # Usage
//!
//! ```bash
//! # Resolve a scenario and print the attack lines
//! cargo run -p preview_headless -- resolve --scenario assets/scenarios/skirmish.ron
//!
//! # Same, as JSON lines
//! cargo run -p preview_headless -- resolve --scenario assets/scenarios/skirmish.ron --json
//!
//! # Check the catalog
//! cargo run -p preview_headless -- validate
//!
//! # Print the normalized party records of a scenario
//! cargo run -p preview_headless -- export --scenario assets/scenarios/skirmish.ron
//! ```
//!
//! Output goes to stdout, logs to stderr.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use preview_headless::runner::{load_scenario, render_events, RunnerResult};
use preview_headless::{DataSources, OutputFormat, PreviewRunner};

#[derive(Parser)]
#[command(name = "preview_headless")]
#[command(about = "Headless targeting preview for party layouts")]
#[command(version)]
struct Cli {
    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Data directory (defaults to PREVIEW_DATA_DIR or the shipped assets)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a scenario and print every attack
    Resolve {
        /// Scenario file to load
        #[arg(short, long)]
        scenario: PathBuf,

        /// Character catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Label file
        #[arg(long)]
        labels: Option<PathBuf>,

        /// Configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print one JSON object per event
        #[arg(long)]
        json: bool,
    },

    /// Check that the catalog loads and every summon resolves
    Validate {
        /// Character catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Print the normalized party records of a scenario
    Export {
        /// Scenario file to load
        #[arg(short, long)]
        scenario: PathBuf,

        /// Character catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging to stderr (stdout is for output)
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    let result = match cli.command {
        Commands::Resolve {
            scenario,
            catalog,
            labels,
            config,
            json,
        } => {
            let sources = DataSources {
                data_dir: cli.data_dir,
                catalog,
                labels,
                config,
            };
            let format = if json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            };
            run_resolve(&sources, &scenario, format)
        }
        Commands::Validate { catalog } => run_validate(&DataSources {
            data_dir: cli.data_dir,
            catalog,
            ..DataSources::default()
        }),
        Commands::Export { scenario, catalog } => run_export(
            &DataSources {
                data_dir: cli.data_dir,
                catalog,
                ..DataSources::default()
            },
            &scenario,
        ),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "Preview run failed");
        eprintln!("FATAL: {e}");
        std::process::exit(1);
    }
}

fn run_resolve(sources: &DataSources, scenario: &Path, format: OutputFormat) -> RunnerResult<()> {
    let runner = PreviewRunner::from_sources(sources)?;
    let scenario = load_scenario(scenario)?;
    let board = runner.resolve(&scenario)?;

    for line in render_events(board.resolution(), format)? {
        println!("{line}");
    }
    Ok(())
}

fn run_validate(sources: &DataSources) -> RunnerResult<()> {
    let catalog = sources.load_catalog()?;
    tracing::info!(characters = catalog.len(), "Catalog is valid");
    println!("OK: {} characters", catalog.len());
    Ok(())
}

fn run_export(sources: &DataSources, scenario: &Path) -> RunnerResult<()> {
    let runner = PreviewRunner::from_sources(sources)?;
    let scenario = load_scenario(scenario)?;
    let normalized = runner.export(&scenario)?;

    println!("good: {}", normalized.good);
    println!("evil: {}", normalized.evil);
    Ok(())
}
