//! Rules: actions, validation and the driver-facing engine trait.
//!
//! - `Action` / `ActionRecord`: what players do and the history of it
//! - `ActionGenerator` / `ActionValidator`: legality, from one rule set
//! - `RulesEngine`: the surface an external driver programs against

pub mod actions;
pub mod engine;
pub mod error;

pub use actions::{Action, ActionGenerator, ActionRecord, ActionValidator};
pub use engine::{GameResult, RulesEngine};
pub use error::ActionError;
