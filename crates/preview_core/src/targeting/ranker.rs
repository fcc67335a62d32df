//! Distance ordering of candidates.
//!
//! Candidates are ordered by exact squared grid distance, nearest first,
//! except for [`AiType::Ally`] which picks the farthest ally. The sort is
//! stable, so equal distances keep the filter's roster order.

use crate::character::AiType;
use crate::grid::{GridLayout, SlotId};

use super::Combatant;

/// An attacker/defender pairing with its distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetResolution<'a> {
    /// Attacking slot.
    pub attacker: SlotId,
    /// Candidate defender.
    pub target: Combatant<'a>,
    /// Squared grid distance, used for ordering.
    pub distance_squared: u32,
}

impl TargetResolution<'_> {
    /// Euclidean distance.
    #[must_use]
    pub fn distance(&self) -> f64 {
        f64::from(self.distance_squared).sqrt()
    }
}

/// Order every candidate by the archetype's tie-break policy.
#[must_use]
pub fn rank<'a>(
    layout: &GridLayout,
    attacker: SlotId,
    ai: AiType,
    candidates: &[Combatant<'a>],
) -> Vec<TargetResolution<'a>> {
    let origin = layout.coordinates(attacker);
    let mut ranked: Vec<TargetResolution<'a>> = candidates
        .iter()
        .map(|candidate| TargetResolution {
            attacker,
            target: *candidate,
            distance_squared: origin.distance_squared(layout.coordinates(candidate.slot)),
        })
        .collect();

    if ai == AiType::Ally {
        ranked.sort_by(|a, b| b.distance_squared.cmp(&a.distance_squared));
    } else {
        ranked.sort_by_key(|r| r.distance_squared);
    }
    ranked
}

/// The selected target: the first candidate after ranking.
#[must_use]
pub fn select<'a>(
    layout: &GridLayout,
    attacker: SlotId,
    ai: AiType,
    candidates: &[Combatant<'a>],
) -> Option<TargetResolution<'a>> {
    rank(layout, attacker, ai, candidates).into_iter().next()
}
