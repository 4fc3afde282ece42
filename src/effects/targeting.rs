//! Target legality and selection.
//!
//! - `TargetFilter`: named legality predicates over battlefield permanents
//! - `get_valid_targets` / `validate_targets`: pure checks against state
//! - `request_targets`: asks the caster through the prompt protocol

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardType};
use crate::core::state::GameState;
use crate::core::{CardId, PlayerId};
use crate::prompt::{card_choice_prompt, card_option, target_prompt, PromptError, PromptManager};
use crate::zones::Zone;

/// Filters for valid targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetFilter {
    /// A nonland permanent controlled by an opponent of the caster.
    NonlandPermanentOpponentControls,
    /// A creature the caster controls.
    CreatureYouControl,
    /// Any creature on the battlefield.
    AnyCreature,
}

impl TargetFilter {
    /// Whether `card` is a legal target for `caster`.
    #[must_use]
    pub fn matches(self, _state: &GameState, caster: PlayerId, card: &Card) -> bool {
        if card.zone != Zone::Battlefield {
            return false;
        }
        match self {
            TargetFilter::NonlandPermanentOpponentControls => {
                card.controller != caster && !card.has_type(CardType::Land)
            }
            TargetFilter::CreatureYouControl => card.controller == caster && card.is_creature(),
            TargetFilter::AnyCreature => card.is_creature(),
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            TargetFilter::NonlandPermanentOpponentControls => {
                "nonland permanent an opponent controls"
            }
            TargetFilter::CreatureYouControl => "creature you control",
            TargetFilter::AnyCreature => "creature",
        }
    }
}

impl std::fmt::Display for TargetFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// Why targets could not be chosen.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TargetingError {
    #[error("no legal targets: {requirement}")]
    NoLegalTargets { requirement: String },

    #[error("{required} target(s) required but only {available} available")]
    NotEnoughTargets { required: usize, available: usize },

    #[error("no targets provided")]
    NoTargetsProvided,

    #[error("unknown target {0:?}")]
    UnknownTarget(String),

    #[error("{card} is not a valid target: requires {requirement}")]
    InvalidTarget { card: String, requirement: String },

    #[error("expected {expected} target(s), got {actual}")]
    WrongCount { expected: usize, actual: usize },

    #[error("target selection failed: {0}")]
    Prompt(#[from] PromptError),
}

/// Every permanent on every battlefield satisfying `filter`, player 0's
/// battlefield first, each in zone order.
#[must_use]
pub fn get_valid_targets(state: &GameState, caster: PlayerId, filter: TargetFilter) -> Vec<CardId> {
    state
        .battlefield_cards()
        .into_iter()
        .filter(|&id| {
            state
                .card(id)
                .is_some_and(|card| filter.matches(state, caster, card))
        })
        .collect()
}

/// Re-check chosen targets against `filter`.
pub fn validate_targets(
    state: &GameState,
    caster: PlayerId,
    filter: TargetFilter,
    targets: &[CardId],
) -> Result<(), TargetingError> {
    if targets.is_empty() {
        return Err(TargetingError::NoTargetsProvided);
    }
    for &id in targets {
        let card = state
            .card(id)
            .ok_or_else(|| TargetingError::UnknownTarget(id.token()))?;
        if !filter.matches(state, caster, card) {
            return Err(TargetingError::InvalidTarget {
                card: card.name().to_string(),
                requirement: filter.to_string(),
            });
        }
    }
    Ok(())
}

/// Ask `caster` to choose exactly `count` targets.
///
/// Fails without prompting when there are no candidates or too few.
pub fn request_targets(
    prompts: &mut PromptManager,
    state: &GameState,
    caster: PlayerId,
    filter: TargetFilter,
    count: usize,
    title: &str,
) -> Result<Vec<CardId>, TargetingError> {
    let candidates = get_valid_targets(state, caster, filter);
    if candidates.is_empty() {
        return Err(TargetingError::NoLegalTargets {
            requirement: filter.to_string(),
        });
    }
    if candidates.len() < count {
        return Err(TargetingError::NotEnoughTargets {
            required: count,
            available: candidates.len(),
        });
    }

    let options = candidates
        .iter()
        .filter_map(|&id| state.card(id))
        .map(card_option)
        .collect();
    let title = format!("{}: choose {}", title, filter);
    let request = if count == 1 {
        target_prompt(title, options)
    } else {
        card_choice_prompt(title, options, count, count)
    };

    let response = prompts.request(state, caster, &request)?;

    let mut chosen = Vec::with_capacity(response.selected.len());
    for token in &response.selected {
        let id = CardId::parse_token(token)
            .ok_or_else(|| TargetingError::UnknownTarget(token.clone()))?;
        chosen.push(id);
    }
    if chosen.len() != count {
        return Err(TargetingError::WrongCount {
            expected: count,
            actual: chosen.len(),
        });
    }
    validate_targets(state, caster, filter, &chosen)?;

    tracing::debug!(%caster, ?chosen, "targets chosen");
    Ok(chosen)
}
