//! Determinism testing utilities.
//!
//! Provides a harness for verifying that a full resolution produces
//! identical results given identical inputs.
//!
//! # Testing Strategy
//!
//! Targeting must be a pure function of the board. Sources of
//! non-determinism include:
//!
//! - **HashMap iteration order**: Rust's default hasher is randomized.
//!   The catalog and label tables use ordered maps.
//!
//! - **Floating-point ranking**: Candidates are ordered by exact integer
//!   squared distance; floats are only used for display.
//!
//! - **Unstable sorts**: Ties keep roster order via stable sorting.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Result of a determinism test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// Whether all runs produced identical results.
    pub is_deterministic: bool,
    /// Hashes from each run.
    pub hashes: Vec<u64>,
}

impl DeterminismResult {
    /// Get all unique hashes (should be 1 for a deterministic resolution).
    #[must_use]
    pub fn unique_hashes(&self) -> Vec<u64> {
        let mut unique: Vec<u64> = self.hashes.clone();
        unique.sort_unstable();
        unique.dedup();
        unique
    }

    /// Assert that the resolution was deterministic, with a detailed error message.
    ///
    /// # Panics
    ///
    /// Panics if the runs produced different hashes.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic {
            let unique = self.unique_hashes();
            panic!(
                "Resolution is non-deterministic!\n\
                 Runs: {}\n\
                 Unique hashes: {} (expected 1)\n\
                 All hashes: {:?}",
                self.hashes.len(),
                unique.len(),
                self.hashes
            );
        }
    }
}

/// Build a fresh state `runs` times, apply `step` once and compare hashes.
pub fn verify_determinism<S, Setup, Step, HashFn>(
    runs: usize,
    mut setup: Setup,
    mut step: Step,
    mut hash: HashFn,
) -> DeterminismResult
where
    Setup: FnMut() -> S,
    Step: FnMut(&mut S),
    HashFn: FnMut(&S) -> u64,
{
    let hashes: Vec<u64> = (0..runs)
        .map(|_| {
            let mut state = setup();
            step(&mut state);
            hash(&state)
        })
        .collect();

    let is_deterministic = hashes.windows(2).all(|w| w[0] == w[1]);
    if !is_deterministic {
        tracing::warn!(?hashes, "Determinism check diverged");
    }

    DeterminismResult {
        is_deterministic,
        hashes,
    }
}

/// Hash any hashable value with the std hasher.
pub fn compute_hash<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Proptest strategies for board layouts.
///
/// These strategies generate random but reproducible party records on the
/// default layout, using characters from
/// [`sample_catalog`](crate::fixtures::sample_catalog).
pub mod strategies {
    use preview_core::prelude::*;
    use proptest::prelude::*;

    use crate::fixtures::SAMPLE_IDS;

    /// Pick any character id from the sample catalog.
    pub fn arb_character_id() -> impl Strategy<Value = String> {
        proptest::sample::select(SAMPLE_IDS.to_vec()).prop_map(str::to_string)
    }

    /// A valid party record for `side`: up to four distinct slots of that
    /// side's zone, in random roster order, padded with placeholders.
    pub fn arb_party_record(side: Side) -> impl Strategy<Value = PartyRecord> {
        let slots: Vec<u32> = GridLayout::default().slots_of(side).map(|s| s.0).collect();
        (
            proptest::sample::subsequence(slots, 0..=PARTY_CAPACITY).prop_shuffle(),
            proptest::collection::vec(arb_character_id(), PARTY_CAPACITY),
        )
            .prop_map(|(slots, ids)| {
                let mut entries: Vec<(Option<u32>, Option<String>)> = slots
                    .into_iter()
                    .zip(ids)
                    .map(|(slot, id)| (Some(slot), Some(id)))
                    .collect();
                entries.resize(PARTY_CAPACITY, (None, None));
                PartyRecord(entries)
            })
    }

    /// Line display toggles.
    pub fn arb_lines() -> impl Strategy<Value = LinePreferences> {
        (any::<bool>(), any::<bool>()).prop_map(|(show_ally_lines, show_enemy_lines)| {
            LinePreferences {
                show_ally_lines,
                show_enemy_lines,
            }
        })
    }
}
