//! Errors raised inside the engine while mutating state.
//!
//! Subsystem errors (`TargetingError`, `PromptError`, `ManaError`) live
//! next to their subsystems and convert into `EngineError` with `?`.
//! Nothing here is fatal: the orchestrator logs every error and reports
//! the failed operation as rejected.

use super::entity::CardId;
use super::phase::Phase;
use crate::effects::TargetingError;
use crate::mana::ManaError;
use crate::prompt::PromptError;
use crate::zones::Zone;

/// Errors surfaced by state mutation, effect routines and spell resolution.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("{0} does not exist")]
    UnknownCard(CardId),

    #[error("{card} is in {actual}, expected {expected}")]
    WrongZone {
        card: CardId,
        expected: Zone,
        actual: Zone,
    },

    #[error("no card named {0:?} is registered")]
    UnknownCardName(String),

    #[error("ability #{index} of {card} does not exist")]
    UnknownAbility { card: CardId, index: usize },

    #[error("{action} is not allowed during {phase}")]
    WrongPhase { action: &'static str, phase: Phase },

    #[error("targeting failed: {0}")]
    Targeting(#[from] TargetingError),

    #[error("prompt failed: {0}")]
    Prompt(#[from] PromptError),

    #[error("mana: {0}")]
    Mana(#[from] ManaError),

    #[error("invalid game setup: {0}")]
    InvalidSetup(String),

    #[error("snapshot encoding failed: {0}")]
    Encoding(String),
}

impl From<bincode::Error> for EngineError {
    fn from(err: bincode::Error) -> Self {
        EngineError::Encoding(err.to_string())
    }
}
