//! The fixed four-pass sequence.
//!
//! Evil targeting always sees good claims first and summon passes always
//! run after both primary passes. Evil summons do not account for good
//! summons spawned in pass three; the order is kept as is.

use crate::error::Result;
use crate::grid::Side;
use crate::party::Party;
use crate::tile::Tile;

use super::orchestrator::resolve_team;
use super::{ClaimedTargets, Pass, Resolution, ResolveContext};

/// Run all four passes, threading the claims from pass to pass.
///
/// `tiles` is mutated in place; callers wanting an all-or-nothing update
/// should pass a working copy (see [`Board::recompute`](crate::board::Board::recompute)).
pub fn resolve_all(
    ctx: &ResolveContext<'_>,
    tiles: &mut [Tile],
    good: &Party,
    evil: &Party,
) -> Result<Resolution> {
    let mut claimed = ClaimedTargets::new();
    let mut events = Vec::new();
    let party = |side: Side| match side {
        Side::Good => good,
        Side::Evil => evil,
    };

    for pass in Pass::ORDER {
        let side = pass.attacking_side();
        let outcome = resolve_team(
            ctx,
            tiles,
            party(side),
            party(side.opponent()),
            pass,
            claimed,
        )?;
        tracing::debug!(
            ?pass,
            events = outcome.events.len(),
            claimed = outcome.claimed.len(),
            "Resolution pass complete"
        );
        events.extend(outcome.events);
        claimed = outcome.claimed;
    }

    Ok(Resolution { events, claimed })
}
