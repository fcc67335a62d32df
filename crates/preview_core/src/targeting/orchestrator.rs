//! One attacking party against one defending party.

use crate::character::Character;
use crate::error::{PreviewError, Result};
use crate::grid::SlotId;
use crate::labels::{format_attack, Localizer};
use crate::party::Party;
use crate::tile::Tile;

use super::filter::{candidates, FilterInput};
use super::ranker::select;
use super::{ClaimedTargets, Combatant, Pass, ResolveContext, TargetEvent};

/// Events of one pass and the claims after it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PassOutcome {
    /// One event per resolved attacker, in roster order.
    pub events: Vec<TargetEvent>,
    /// The incoming claims extended with this pass's picks.
    pub claimed: ClaimedTargets,
}

/// Resolve a target for every eligible attacker of one pass.
///
/// For each roster member in order the tile's target field for this pass
/// kind is reset, the acting character (the occupant, or its summon in
/// summon passes) is resolved, the archetype filter runs with fallback
/// escalation, and the nearest (farthest for allies) candidate is picked.
/// The pick is always claimed; it is written into the tile only when the
/// pass's line colour is shown.
///
/// # Errors
///
/// Returns [`PreviewError::CharacterNotFound`] if an occupant or summon is
/// missing from the catalog and [`PreviewError::SlotOutOfRange`] if a
/// party references a slot outside the tile store.
pub fn resolve_team(
    ctx: &ResolveContext<'_>,
    tiles: &mut [Tile],
    attackers: &Party,
    defenders: &Party,
    pass: Pass,
    mut claimed: ClaimedTargets,
) -> Result<PassOutcome> {
    let summon_mode = pass.summon_mode();
    let line_colour = pass.line_colour();

    let allies = combatants(ctx, tiles, attackers)?;
    let enemies = combatants(ctx, tiles, defenders)?;
    let mut events = Vec::new();

    for member in attackers.members() {
        let Some(slot) = member.slot else {
            continue;
        };
        let tile = tile_mut(tiles, slot)?;
        tile.set_target(summon_mode, None);

        let Some(occupant) = allies.iter().find(|c| c.slot == slot) else {
            continue;
        };
        let actor: &Character = if summon_mode {
            match &occupant.character.summon_id {
                Some(summon) => ctx.catalog.get(summon)?,
                None => continue,
            }
        } else {
            occupant.character
        };

        let input = FilterInput {
            attacker: slot,
            allies: &allies,
            defenders: &enemies,
            claimed: &claimed,
        };
        let mut ai = actor.ai_type;
        let mut found = candidates(&input, ai);
        if found.is_empty() {
            if let Some(fallback) = actor.fallback_ai_type {
                tracing::trace!(attacker = %slot, from = ?ai, to = ?fallback, "falling back");
                ai = fallback;
                found = candidates(&input, ai);
            }
        }

        let Some(choice) = select(ctx.layout, slot, ai, &found) else {
            tracing::trace!(attacker = %slot, ?pass, "no eligible target");
            continue;
        };

        let target = choice.target;
        if ctx.lines.shows(line_colour) {
            let tile = tile_mut(tiles, slot)?;
            tile.set_target(summon_mode, Some(target.slot));
            tile.line_colour = Some(line_colour);
        }
        claimed.claim(target.slot);

        let distance = choice.distance();
        let message = format_attack(
            ctx.localizer,
            display_name(ctx.localizer, actor),
            display_name(ctx.localizer, target.character),
            distance,
        );
        tracing::trace!(attacker = %slot, target = %target.slot, ?ai, distance, "resolved");

        events.push(TargetEvent {
            pass,
            attacker: slot,
            target: target.slot,
            actor: actor.id.clone(),
            target_character: target.character.id.clone(),
            ai,
            distance_squared: choice.distance_squared,
            distance,
            line_colour,
            message,
        });
    }

    Ok(PassOutcome { events, claimed })
}

/// Occupied, playable members of a party with their catalog entries.
fn combatants<'a>(
    ctx: &ResolveContext<'a>,
    tiles: &[Tile],
    party: &Party,
) -> Result<Vec<Combatant<'a>>> {
    let mut found = Vec::with_capacity(party.members().len());
    for slot in party.members().iter().filter_map(|m| m.slot) {
        let tile = tiles
            .get(slot.index())
            .ok_or_else(|| out_of_range(slot, tiles))?;
        if !tile.is_occupied() {
            continue;
        }
        if let Some(id) = &tile.character {
            found.push(Combatant {
                slot,
                character: ctx.catalog.get(id)?,
            });
        }
    }
    Ok(found)
}

fn tile_mut(tiles: &mut [Tile], slot: SlotId) -> Result<&mut Tile> {
    let err = out_of_range(slot, tiles);
    tiles.get_mut(slot.index()).ok_or(err)
}

fn out_of_range(slot: SlotId, tiles: &[Tile]) -> PreviewError {
    PreviewError::SlotOutOfRange {
        slot: slot.0,
        len: u32::try_from(tiles.len()).unwrap_or(u32::MAX),
    }
}

fn display_name<'a>(localizer: &'a dyn Localizer, character: &'a Character) -> &'a str {
    localizer.label_or(&character.name, &character.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{GridLayout, Side};
    use crate::labels::NoLabels;
    use crate::targeting::test_support::{catalog, place, tiles};
    use crate::targeting::{LineColour, LinePreferences};

    fn ctx<'a>(
        layout: &'a GridLayout,
        catalog: &'a crate::catalog::CharacterCatalog,
        lines: LinePreferences,
    ) -> ResolveContext<'a> {
        ResolveContext {
            layout,
            catalog,
            localizer: &NoLabels,
            lines,
        }
    }

    #[test]
    fn test_melee_spreads_over_fresh_targets() {
        let layout = GridLayout::default();
        let catalog = catalog();
        let mut tiles = tiles(&layout);
        let good = place(&mut tiles, Side::Good, &[(3, "knight"), (17, "knight")]);
        let evil = place(&mut tiles, Side::Evil, &[(10, "archer"), (24, "archer")]);

        let ctx = ctx(&layout, &catalog, LinePreferences::default());
        let outcome = resolve_team(
            &ctx,
            &mut tiles,
            &good,
            &evil,
            Pass::GoodAttacks,
            ClaimedTargets::new(),
        )
        .unwrap();

        // Both knights would prefer slot 10; the second one sees it claimed
        assert_eq!(outcome.events.len(), 2);
        assert_eq!(outcome.events[0].target, SlotId(10));
        assert_eq!(outcome.events[1].target, SlotId(24));
        assert_eq!(outcome.claimed.as_slice(), &[SlotId(10), SlotId(24)]);
        assert_eq!(tiles[3].targets, Some(SlotId(10)));
        assert_eq!(tiles[3].line_colour, Some(LineColour::Ally));
        assert_eq!(
            outcome.events[0].message,
            "Knight targets Archer with distance 7.00"
        );
    }

    #[test]
    fn test_melee_attacks_claimed_target_when_no_fresh_one() {
        let layout = GridLayout::default();
        let catalog = catalog();
        let mut tiles = tiles(&layout);
        let good = place(&mut tiles, Side::Good, &[(3, "knight"), (17, "knight")]);
        let evil = place(&mut tiles, Side::Evil, &[(10, "archer")]);

        let ctx = ctx(&layout, &catalog, LinePreferences::default());
        let outcome = resolve_team(
            &ctx,
            &mut tiles,
            &good,
            &evil,
            Pass::GoodAttacks,
            ClaimedTargets::new(),
        )
        .unwrap();

        assert_eq!(outcome.events.len(), 2);
        assert_eq!(tiles[17].targets, Some(SlotId(10)));
        assert_eq!(outcome.claimed.len(), 2);
    }

    #[test]
    fn test_hidden_lines_still_claim() {
        let layout = GridLayout::default();
        let catalog = catalog();
        let mut tiles = tiles(&layout);
        let good = place(&mut tiles, Side::Good, &[(3, "knight")]);
        let evil = place(&mut tiles, Side::Evil, &[(10, "archer")]);

        let lines = LinePreferences {
            show_ally_lines: false,
            show_enemy_lines: true,
        };
        let ctx = ctx(&layout, &catalog, lines);
        let outcome = resolve_team(
            &ctx,
            &mut tiles,
            &good,
            &evil,
            Pass::GoodAttacks,
            ClaimedTargets::new(),
        )
        .unwrap();

        assert_eq!(tiles[3].targets, None);
        assert_eq!(tiles[3].line_colour, None);
        assert_eq!(outcome.claimed.as_slice(), &[SlotId(10)]);
        assert_eq!(outcome.events.len(), 1);
    }

    #[test]
    fn test_fallback_archetype() {
        let layout = GridLayout::default();
        let catalog = catalog();
        let mut tiles = tiles(&layout);
        let good = place(&mut tiles, Side::Good, &[(3, "rogue"), (0, "stalker")]);
        let evil = place(&mut tiles, Side::Evil, &[(10, "knight")]);

        let ctx = ctx(&layout, &catalog, LinePreferences::default());
        let outcome = resolve_team(
            &ctx,
            &mut tiles,
            &good,
            &evil,
            Pass::GoodAttacks,
            ClaimedTargets::new(),
        )
        .unwrap();

        // The rogue falls back to melee; the stalker has no fallback
        assert_eq!(outcome.events.len(), 1);
        assert_eq!(outcome.events[0].ai, crate::character::AiType::Melee);
        assert_eq!(outcome.events[0].attacker, SlotId(3));
        assert_eq!(tiles[0].targets, None);
    }

    #[test]
    fn test_exhausted_fallback_resolves_nothing() {
        let layout = GridLayout::default();
        let catalog = catalog();
        let mut tiles = tiles(&layout);
        let good = place(&mut tiles, Side::Good, &[(3, "priest")]);
        let evil = place(&mut tiles, Side::Evil, &[]);
        tiles[3].targets = Some(SlotId(10));
        let mut claimed = ClaimedTargets::new();
        claimed.claim(SlotId(24));

        let ctx = ctx(&layout, &catalog, LinePreferences::default());
        let outcome = resolve_team(
            &ctx,
            &mut tiles,
            &good,
            &evil,
            Pass::GoodAttacks,
            claimed.clone(),
        )
        .unwrap();

        // No friend for the ally archetype, no enemy for its ranged fallback
        assert!(outcome.events.is_empty());
        assert_eq!(tiles[3].targets, None);
        assert_eq!(tiles[3].line_colour, None);
        assert_eq!(outcome.claimed, claimed);
    }

    #[test]
    fn test_stale_target_is_reset() {
        let layout = GridLayout::default();
        let catalog = catalog();
        let mut tiles = tiles(&layout);
        let good = place(&mut tiles, Side::Good, &[(0, "stalker")]);
        let evil = place(&mut tiles, Side::Evil, &[(10, "knight")]);
        tiles[0].targets = Some(SlotId(10));

        let ctx = ctx(&layout, &catalog, LinePreferences::default());
        let outcome = resolve_team(
            &ctx,
            &mut tiles,
            &good,
            &evil,
            Pass::GoodAttacks,
            ClaimedTargets::new(),
        )
        .unwrap();

        assert!(outcome.events.is_empty());
        assert_eq!(tiles[0].targets, None);
    }

    #[test]
    fn test_summon_pass_uses_summoned_character() {
        let layout = GridLayout::default();
        let catalog = catalog();
        let mut tiles = tiles(&layout);
        let good = place(&mut tiles, Side::Good, &[(3, "tamer"), (2, "knight")]);
        let evil = place(&mut tiles, Side::Evil, &[(10, "archer")]);

        let ctx = ctx(&layout, &catalog, LinePreferences::default());
        let outcome = resolve_team(
            &ctx,
            &mut tiles,
            &good,
            &evil,
            Pass::GoodSummons,
            ClaimedTargets::new(),
        )
        .unwrap();

        assert_eq!(outcome.events.len(), 1);
        assert_eq!(outcome.events[0].actor.as_str(), "wolf");
        assert!(outcome.events[0].message.starts_with("Wolf targets Archer"));
        assert_eq!(tiles[3].summon_targets, Some(SlotId(10)));
        assert_eq!(tiles[3].targets, None);
        assert_eq!(tiles[2].summon_targets, None);
    }

    #[test]
    fn test_missing_summon_is_an_error() {
        let layout = GridLayout::default();
        let catalog = catalog();
        let mut tiles = tiles(&layout);
        let good = place(&mut tiles, Side::Good, &[(3, "necro")]);
        let evil = place(&mut tiles, Side::Evil, &[(10, "archer")]);

        let ctx = ctx(&layout, &catalog, LinePreferences::default());
        let err = resolve_team(
            &ctx,
            &mut tiles,
            &good,
            &evil,
            Pass::GoodSummons,
            ClaimedTargets::new(),
        )
        .unwrap_err();

        assert_eq!(err, PreviewError::CharacterNotFound("ghost".to_string()));
    }

    #[test]
    fn test_ally_targets_farthest_friend() {
        let layout = GridLayout::default();
        let catalog = catalog();
        let mut tiles = tiles(&layout);
        // Cleric at (1,1); knights at distance 1.0 and 3.0
        let good = place(
            &mut tiles,
            Side::Good,
            &[(0, "cleric"), (1, "knight"), (3, "knight")],
        );
        let evil = place(&mut tiles, Side::Evil, &[(10, "archer")]);

        let ctx = ctx(&layout, &catalog, LinePreferences::default());
        let outcome = resolve_team(
            &ctx,
            &mut tiles,
            &good,
            &evil,
            Pass::GoodAttacks,
            ClaimedTargets::new(),
        )
        .unwrap();

        assert_eq!(tiles[0].targets, Some(SlotId(3)));
        assert_eq!(
            outcome.events[0].message,
            "Cleric targets Knight with distance 3.00"
        );
    }
}
