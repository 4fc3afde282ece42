//! Effect resolution - executing effects on game state.
//!
//! The `EffectResolver` applies an `Effect` for a given `EffectContext`.
//! Built-in actions are handled here; `EffectAction::Custom` routines are
//! called with the whole `Game` so they can prompt players.

use crate::cards::CounterKind;
use crate::core::error::EngineError;
use crate::core::CardId;
use crate::game::Game;
use crate::prompt::{card_choice_prompt, card_option, PromptResponse};

use super::{Effect, EffectAction, EffectContext};

/// Resolves effects on game state.
pub struct EffectResolver;

impl EffectResolver {
    /// Execute one effect.
    pub fn execute(game: &mut Game, effect: &Effect, context: &EffectContext) -> Result<(), EngineError> {
        match effect.action {
            EffectAction::AddMana(color) => {
                game.state
                    .player_mut(context.controller)
                    .mana_pool
                    .add(color, 1);
                Ok(())
            }

            EffectAction::AddCounters { kind, amount } => {
                let card = game.state.get_card_mut(context.source)?;
                card.add_counter(kind, amount);
                let message = format!("{} gets {} {} counter(s)", card.name(), amount, kind);
                game.state.log_event(message);
                Ok(())
            }

            EffectAction::DrawCards(count) => {
                game.state.draw_cards(context.controller, count)?;
                Ok(())
            }

            EffectAction::MoveCountersToCreatureYouControl => Self::move_counters(game, context),

            EffectAction::Custom(routine) => routine(game, context),
        }
    }

    /// Move every counter on the source to a creature its controller picks.
    fn move_counters(game: &mut Game, context: &EffectContext) -> Result<(), EngineError> {
        let source = game.state.get_card(context.source)?;
        let name = source.name().to_string();
        let total: u32 = source.counters().map(|(_, n)| n).sum();

        if total == 0 {
            game.state
                .log_event(format!("{} dies with no counters to move", name));
            return Ok(());
        }

        let candidates: Vec<CardId> = game
            .state
            .creatures_controlled(context.controller)
            .into_iter()
            .filter(|&id| id != context.source)
            .collect();
        let Some(&first) = candidates.first() else {
            game.state.log_event(format!(
                "{} dies but no valid targets for counter movement",
                name
            ));
            return Ok(());
        };

        let options = candidates
            .iter()
            .filter_map(|&id| game.state.card(id))
            .map(card_option)
            .collect();
        let request = card_choice_prompt(
            format!("Move counters from {} to a creature you control", name),
            options,
            1,
            1,
        )
        .with_default(PromptResponse::select_one(first.token()));

        let response = game
            .prompts
            .request(&game.state, context.controller, &request)?;
        let target = response
            .selected
            .first()
            .and_then(|token| CardId::parse_token(token))
            .filter(|id| candidates.contains(id))
            .unwrap_or(first);

        let moved = game.state.get_card_mut(context.source)?.take_counters();
        let target_card = game.state.get_card_mut(target)?;
        for (kind, amount) in moved {
            target_card.add_counter(kind, amount);
        }
        let target_name = target_card.name().to_string();

        game.state.log_event(format!(
            "{} dies, moving {} counters to {}",
            name, total, target_name
        ));
        Ok(())
    }

    /// Drain the pending-trigger queue in FIFO order.
    ///
    /// Triggers queued while draining are resolved in the same pass. A
    /// trigger that fails is logged and skipped. Returns how many
    /// triggers resolved.
    pub fn resolve_triggers(game: &mut Game) -> usize {
        let mut resolved = 0;
        while let Some(pending) = game.state.triggers.pop() {
            let Some(card) = game.state.card(pending.source) else {
                continue;
            };
            let Some(ability) = card.definition().abilities.get(pending.ability) else {
                continue;
            };
            let effect = ability.effect.clone();
            let name = card.name().to_string();

            game.state
                .log_event(format!("{} triggers: {}", name, effect.description));
            let context = EffectContext::new(pending.source, pending.controller).with_event(pending.event);
            match Self::execute(game, &effect, &context) {
                Ok(()) => resolved += 1,
                Err(err) => {
                    tracing::warn!(source = %pending.source, error = %err, "trigger failed");
                    game.state
                        .log_event(format!("{} trigger failed: {}", name, err));
                }
            }
        }
        resolved
    }

    /// Number of +1/+1 counters on a card, for effects that check them.
    #[must_use]
    pub fn plus_one_counters(game: &Game, card: CardId) -> u32 {
        game.state
            .card(card)
            .map_or(0, |c| c.counter(CounterKind::PlusOne))
    }
}
