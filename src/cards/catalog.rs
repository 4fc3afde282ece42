//! The core set: basic lands and the handful of playable spells.
//!
//! Each constructor builds a fresh `CardDefinition`. Unique behavior is
//! attached as plain function pointers (`ResolveFn` for spells,
//! `EffectAction` for abilities).

use super::definition::CardDefinition;
use super::registry::CardConstructor;
use super::types::{CounterKind, Keyword, Rarity};
use crate::core::error::EngineError;
use crate::core::CardId;
use crate::effects::{
    request_targets, validate_targets, Ability, ActivationCost, Effect, EffectAction, TargetFilter,
};
use crate::game::Game;
use crate::mana::{Color, ManaCost};
use crate::stack::StackObject;
use crate::triggers::TriggerCondition;
use crate::zones::{Zone, ZonePosition};

/// Every card `CardRegistry::with_core_set` knows.
pub const CORE_SET: &[CardConstructor] = &[
    plains,
    island,
    swamp,
    mountain,
    forest,
    banishing_light,
    dockworker_drone,
    dual_sun_technique,
    illvoi_galeblade,
];

fn basic_land(name: &str, color: Color) -> CardDefinition {
    CardDefinition::new(name, format!("Basic Land — {}", name))
        .with_text(format!("({{T}}: Add {{{}}}.)", color.symbol()))
        .with_ability(Ability::mana(color))
}

#[must_use]
pub fn plains() -> CardDefinition {
    basic_land("Plains", Color::White)
}

#[must_use]
pub fn island() -> CardDefinition {
    basic_land("Island", Color::Blue)
}

#[must_use]
pub fn swamp() -> CardDefinition {
    basic_land("Swamp", Color::Black)
}

#[must_use]
pub fn mountain() -> CardDefinition {
    basic_land("Mountain", Color::Red)
}

#[must_use]
pub fn forest() -> CardDefinition {
    basic_land("Forest", Color::Green)
}

// === Banishing Light ===

#[must_use]
pub fn banishing_light() -> CardDefinition {
    CardDefinition::new("Banishing Light", "Enchantment")
        .with_cost(ManaCost::generic(2).with_color(Color::White, 1))
        .with_colors(&[Color::White])
        .with_text(
            "When this enchantment enters, exile target nonland permanent an opponent \
             controls until this enchantment leaves the battlefield.",
        )
        .with_target(TargetFilter::NonlandPermanentOpponentControls, 1)
        .with_resolve(resolve_banishing_light)
}

/// Enter the battlefield and exile the target until this leaves.
///
/// With no legal target the card goes to the graveyard instead and the
/// resolution reports `false`.
fn resolve_banishing_light(game: &mut Game, object: &StackObject) -> Result<bool, EngineError> {
    let filter = TargetFilter::NonlandPermanentOpponentControls;
    let target = match chosen_or_requested(game, object, filter, "Banishing Light") {
        Some(target) => target,
        None => {
            game.state
                .move_card(object.card, Zone::Graveyard, ZonePosition::Top)?;
            game.state
                .log_event("Banishing Light has no valid targets and goes to the graveyard");
            return Ok(false);
        }
    };

    game.state
        .move_card(object.card, Zone::Battlefield, ZonePosition::Top)?;
    game.state.exile_until_leaves(object.card, target)?;
    Ok(true)
}

/// The spell's single target: cast-time choice if still legal, otherwise
/// asked for now. `None` when nothing legal can be found.
fn chosen_or_requested(
    game: &mut Game,
    object: &StackObject,
    filter: TargetFilter,
    title: &str,
) -> Option<CardId> {
    if let Some(&target) = object.targets.first() {
        return match validate_targets(&game.state, object.caster, filter, &[target]) {
            Ok(()) => Some(target),
            Err(err) => {
                tracing::info!(card = %object.card, error = %err, "target no longer legal");
                None
            }
        };
    }
    match request_targets(&mut game.prompts, &game.state, object.caster, filter, 1, title) {
        Ok(targets) => targets.first().copied(),
        Err(err) => {
            tracing::info!(card = %object.card, error = %err, "no target chosen");
            None
        }
    }
}

// === Dockworker Drone ===

#[must_use]
pub fn dockworker_drone() -> CardDefinition {
    CardDefinition::new("Dockworker Drone", "Artifact Creature — Robot")
        .with_cost(ManaCost::generic(1).with_color(Color::White, 1))
        .with_colors(&[Color::White])
        .with_stats(1, 1)
        .with_text(
            "This creature enters with a +1/+1 counter on it.\n\
             When this creature dies, put its counters on target creature you control.",
        )
        .with_ability(Ability::triggered(
            TriggerCondition::enters_battlefield(),
            Effect::add_counters(CounterKind::PlusOne, 1),
        ))
        .with_ability(Ability::triggered(
            TriggerCondition::dies(),
            Effect::new(
                "put its counters on target creature you control",
                EffectAction::MoveCountersToCreatureYouControl,
            ),
        ))
}

// === Dual-Sun Technique ===

#[must_use]
pub fn dual_sun_technique() -> CardDefinition {
    CardDefinition::new("Dual-Sun Technique", "Instant")
        .with_cost(ManaCost::generic(1).with_color(Color::White, 1))
        .with_colors(&[Color::White])
        .with_rarity(Rarity::Uncommon)
        .with_text(
            "Target creature you control gains double strike until end of turn. \
             If it has a +1/+1 counter on it, draw a card.",
        )
        .with_target(TargetFilter::CreatureYouControl, 1)
        .with_resolve(resolve_dual_sun_technique)
}

fn resolve_dual_sun_technique(game: &mut Game, object: &StackObject) -> Result<bool, EngineError> {
    let target = chosen_or_requested(game, object, TargetFilter::CreatureYouControl, "Dual-Sun Technique");
    game.state
        .move_card(object.card, Zone::Graveyard, ZonePosition::Top)?;
    let Some(target) = target else {
        return Ok(false);
    };

    let creature = game.state.get_card_mut(target)?;
    creature.grant_keyword(Keyword::DoubleStrike);
    let has_counter = creature.counter(CounterKind::PlusOne) > 0;
    let message = format!("{} gains double strike until end of turn", creature.name());
    game.state.log_event(message);

    if has_counter {
        game.state.draw_card(object.caster)?;
    }
    Ok(true)
}

// === Illvoi Galeblade ===

#[must_use]
pub fn illvoi_galeblade() -> CardDefinition {
    CardDefinition::new("Illvoi Galeblade", "Creature — Jellyfish Warrior")
        .with_cost(ManaCost::free().with_color(Color::Blue, 1))
        .with_colors(&[Color::Blue])
        .with_stats(1, 1)
        .with_keyword(Keyword::Flash)
        .with_keyword(Keyword::Flying)
        .with_text("Flash\nFlying\n{2}, Sacrifice this creature: Draw a card.")
        .with_ability(Ability::activated(
            ActivationCost::mana(ManaCost::generic(2)).with_sacrifice(),
            Effect::draw_cards(1),
        ))
}
