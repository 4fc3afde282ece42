//! Casting spells and resolving the top of the stack.

use smallvec::SmallVec;

use super::object::StackObjectId;
use crate::core::error::EngineError;
use crate::core::{CardId, PlayerId};
use crate::effects::{get_valid_targets, request_targets, validate_targets, TargetingError};
use crate::game::Game;
use crate::zones::{Zone, ZonePosition};

/// Where a cast spell went.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CastOutcome {
    /// A creature, put straight onto the battlefield.
    Battlefield,
    /// Waiting on the stack.
    Stack(StackObjectId),
}

/// Cast `card` from `caster`'s hand.
///
/// Targets are settled before any mana is spent: given targets must be
/// legal; with none given the caster is asked when candidates exist, and
/// the spell is cast without targets when none do. Creatures enter the
/// battlefield directly. Anything else is pushed onto the stack.
pub fn cast_spell(
    game: &mut Game,
    caster: PlayerId,
    card: CardId,
    targets: &[CardId],
) -> Result<CastOutcome, EngineError> {
    let spell = game.state.expect_zone(card, Zone::Hand)?;
    let definition = spell.definition_arc();
    let name = definition.name.clone();

    let mut chosen: SmallVec<[CardId; 2]> = SmallVec::new();
    if let Some(requirement) = definition.target {
        if !targets.is_empty() {
            if targets.len() != requirement.count {
                return Err(TargetingError::WrongCount {
                    expected: requirement.count,
                    actual: targets.len(),
                }
                .into());
            }
            validate_targets(&game.state, caster, requirement.filter, targets)?;
            chosen.extend_from_slice(targets);
        } else if !get_valid_targets(&game.state, caster, requirement.filter).is_empty() {
            let picked = request_targets(
                &mut game.prompts,
                &game.state,
                caster,
                requirement.filter,
                requirement.count,
                &name,
            )?;
            chosen.extend(picked);
        }
    }

    game.state.pay_cost(caster, &definition.mana_cost)?;

    let who = game.state.player(caster).name.clone();
    if chosen.is_empty() {
        game.state.log_event(format!("{} casts {}", who, name));
    } else {
        let names: Vec<String> = chosen.iter().map(|&t| game.state.card_name(t)).collect();
        game.state
            .log_event(format!("{} casts {} targeting {}", who, name, names.join(", ")));
    }

    if definition.is_creature() {
        game.state
            .move_card(card, Zone::Battlefield, ZonePosition::Top)?;
        return Ok(CastOutcome::Battlefield);
    }

    game.state.move_card(card, Zone::Stack, ZonePosition::Top)?;
    let id = game.state.stack.push(card, caster, &chosen);
    tracing::debug!(%card, stack = %id, "spell on the stack");
    Ok(CastOutcome::Stack(id))
}

/// Pop and resolve the top stack object.
///
/// Runs the card's resolution routine, or the default: permanents enter
/// the battlefield, everything else goes to the graveyard. Returns
/// `false` on an empty stack, when the routine reports no effect, or when
/// it fails (the failure is logged). A card still on the stack afterwards
/// goes to its owner's graveyard.
pub fn resolve_top(game: &mut Game) -> bool {
    let Some(object) = game.state.stack.pop() else {
        return false;
    };
    let Some(definition) = game.state.card(object.card).map(|c| c.definition_arc()) else {
        tracing::warn!(card = %object.card, "stack object without a card");
        return false;
    };
    game.state
        .log_event(format!("{} resolves", definition.name));

    let outcome = match definition.resolve {
        Some(routine) => routine(game, &object),
        None => {
            let zone = if definition.is_permanent() {
                Zone::Battlefield
            } else {
                Zone::Graveyard
            };
            game.state
                .move_card(object.card, zone, ZonePosition::Top)
                .map(|_| true)
        }
    };

    let resolved = match outcome {
        Ok(resolved) => resolved,
        Err(err) => {
            tracing::warn!(card = %object.card, error = %err, "resolution failed");
            game.state
                .log_event(format!("{} failed to resolve: {}", definition.name, err));
            false
        }
    };

    if game
        .state
        .card(object.card)
        .is_some_and(|c| c.zone == Zone::Stack)
    {
        if let Err(err) = game
            .state
            .move_card(object.card, Zone::Graveyard, ZonePosition::Top)
        {
            tracing::warn!(card = %object.card, error = %err, "could not clear stack card");
        }
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{catalog, CounterKind, Keyword};
    use crate::prompt::ScriptedResponder;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    fn put(game: &mut Game, def: crate::cards::CardDefinition, owner: PlayerId, zone: Zone) -> CardId {
        game.state
            .create_card(std::sync::Arc::new(def), owner, zone, ZonePosition::Top)
    }

    fn with_plains(game: &mut Game, count: usize) {
        for _ in 0..count {
            put(game, catalog::plains(), P0, Zone::Battlefield);
        }
    }

    #[test]
    fn test_creature_enters_directly() {
        let mut game = Game::new_empty(1);
        with_plains(&mut game, 2);
        let drone = put(&mut game, catalog::dockworker_drone(), P0, Zone::Hand);

        let outcome = cast_spell(&mut game, P0, drone, &[]).unwrap();

        assert_eq!(outcome, CastOutcome::Battlefield);
        assert!(game.state.stack.is_empty());
        assert_eq!(game.state.card(drone).unwrap().zone, Zone::Battlefield);
        assert_eq!(game.state.triggers.len(), 1);
    }

    #[test]
    fn test_unpayable_cast_changes_nothing() {
        let mut game = Game::new_empty(1);
        with_plains(&mut game, 1);
        let drone = put(&mut game, catalog::dockworker_drone(), P0, Zone::Hand);

        assert!(matches!(
            cast_spell(&mut game, P0, drone, &[]),
            Err(EngineError::Mana(_))
        ));
        assert_eq!(game.state.card(drone).unwrap().zone, Zone::Hand);
        assert!(game.state.mana_sources(P0).len() == 1);
    }

    #[test]
    fn test_banishing_light_without_targets_goes_to_graveyard() {
        let mut game = Game::new_empty(1);
        with_plains(&mut game, 3);
        let light = put(&mut game, catalog::banishing_light(), P0, Zone::Hand);
        let responder = ScriptedResponder::new([]);
        let history = responder.history();
        game.prompts.register(P0, responder);

        cast_spell(&mut game, P0, light, &[]).unwrap();
        assert_eq!(game.state.card(light).unwrap().zone, Zone::Stack);
        assert!(!resolve_top(&mut game));

        assert_eq!(game.state.card(light).unwrap().zone, Zone::Graveyard);
        assert!(history.borrow().is_empty());
    }

    #[test]
    fn test_banishing_light_exiles_given_target() {
        let mut game = Game::new_empty(1);
        with_plains(&mut game, 3);
        let light = put(&mut game, catalog::banishing_light(), P0, Zone::Hand);
        let victim = put(&mut game, catalog::illvoi_galeblade(), P1, Zone::Battlefield);

        cast_spell(&mut game, P0, light, &[victim]).unwrap();
        assert!(resolve_top(&mut game));

        assert_eq!(game.state.card(light).unwrap().zone, Zone::Battlefield);
        assert_eq!(game.state.card(victim).unwrap().zone, Zone::Exile);
        assert_eq!(game.state.exiled.exiled_by(light), &[victim]);
    }

    #[test]
    fn test_illegal_given_target_rejects_cast() {
        let mut game = Game::new_empty(1);
        with_plains(&mut game, 3);
        let light = put(&mut game, catalog::banishing_light(), P0, Zone::Hand);
        let own = put(&mut game, catalog::illvoi_galeblade(), P0, Zone::Battlefield);

        assert!(matches!(
            cast_spell(&mut game, P0, light, &[own]),
            Err(EngineError::Targeting(TargetingError::InvalidTarget { .. }))
        ));
        assert_eq!(game.state.card(light).unwrap().zone, Zone::Hand);
        assert_eq!(game.state.mana_sources(P0).len(), 3);
    }

    #[test]
    fn test_dual_sun_grants_double_strike_and_draws() {
        let mut game = Game::new_empty(1);
        with_plains(&mut game, 2);
        put(&mut game, catalog::plains(), P0, Zone::Library);
        let technique = put(&mut game, catalog::dual_sun_technique(), P0, Zone::Hand);
        let bear = put(&mut game, catalog::dockworker_drone(), P0, Zone::Battlefield);
        game.state.get_card_mut(bear).unwrap().add_counter(CounterKind::PlusOne, 1);

        cast_spell(&mut game, P0, technique, &[bear]).unwrap();
        assert!(resolve_top(&mut game));

        let creature = game.state.card(bear).unwrap();
        assert!(creature.has_keyword(Keyword::DoubleStrike));
        assert_eq!(game.state.zone_size(P0, Zone::Hand), 1);
        assert_eq!(game.state.card(technique).unwrap().zone, Zone::Graveyard);
    }

    #[test]
    fn test_resolve_empty_stack() {
        let mut game = Game::new_empty(1);
        assert!(!resolve_top(&mut game));
    }
}
