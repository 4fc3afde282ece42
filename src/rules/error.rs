//! Rejected actions.

use crate::core::error::EngineError;
use crate::core::PlayerId;

/// Why an action was not executed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("the game is over")]
    GameOver,

    #[error("{player} does not hold priority ({holder} does)")]
    NotPriorityHolder { player: PlayerId, holder: PlayerId },

    #[error("illegal action: {0}")]
    Illegal(String),

    #[error(transparent)]
    Engine(#[from] EngineError),
}
