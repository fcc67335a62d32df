//! Candidate selection per AI archetype.
//!
//! Each archetype has its own rule function; [`candidates`] dispatches on
//! the [`AiType`] tag. Output order follows roster order and is only used
//! to break distance ties later.

use crate::character::AiType;
use crate::grid::SlotId;

use super::{ClaimedTargets, Combatant};

/// Inputs shared by every archetype rule.
#[derive(Debug, Clone, Copy)]
pub struct FilterInput<'r, 'a> {
    /// Slot of the acting attacker.
    pub attacker: SlotId,
    /// Occupied members of the attacker's own party, roster order.
    pub allies: &'r [Combatant<'a>],
    /// Occupied, playable defenders, roster order.
    pub defenders: &'r [Combatant<'a>],
    /// Claims made so far in this resolution.
    pub claimed: &'r ClaimedTargets,
}

/// Eligible candidates for one archetype. Empty means the caller should
/// escalate to the fallback archetype.
#[must_use]
pub fn candidates<'a>(input: &FilterInput<'_, 'a>, ai: AiType) -> Vec<Combatant<'a>> {
    match ai {
        AiType::Melee => melee(input),
        AiType::Ranged => ranged(input),
        AiType::Ally => ally(input),
        AiType::Assassin => assassin(input),
    }
}

/// Unclaimed defenders, or every defender once all are claimed.
fn melee<'a>(input: &FilterInput<'_, 'a>) -> Vec<Combatant<'a>> {
    let fresh = unclaimed(input.defenders, input.claimed);
    if fresh.is_empty() {
        input.defenders.to_vec()
    } else {
        fresh
    }
}

/// Every defender.
fn ranged<'a>(input: &FilterInput<'_, 'a>) -> Vec<Combatant<'a>> {
    input.defenders.to_vec()
}

/// Own party minus the attacker.
fn ally<'a>(input: &FilterInput<'_, 'a>) -> Vec<Combatant<'a>> {
    input
        .allies
        .iter()
        .copied()
        .filter(|c| c.slot != input.attacker)
        .collect()
}

/// Ranged defenders. With two or more, unclaimed ones are preferred; the
/// narrowing never empties the set.
fn assassin<'a>(input: &FilterInput<'_, 'a>) -> Vec<Combatant<'a>> {
    let ranged: Vec<Combatant<'a>> = input
        .defenders
        .iter()
        .copied()
        .filter(|c| c.character.is_ranged())
        .collect();

    if ranged.len() > 1 {
        let fresh = unclaimed(&ranged, input.claimed);
        if !fresh.is_empty() {
            return fresh;
        }
    }
    ranged
}

fn unclaimed<'a>(pool: &[Combatant<'a>], claimed: &ClaimedTargets) -> Vec<Combatant<'a>> {
    pool.iter()
        .copied()
        .filter(|c| !claimed.contains(c.slot))
        .collect()
}
