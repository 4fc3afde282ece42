//! Decision protocol between the engine and external decision sources.
//!
//! ## Key Types
//!
//! - [`PromptRequest`] / [`PromptResponse`]: the typed contract
//! - [`PromptManager`]: routes requests to each player's responder
//! - [`PromptResponder`]: a decision source (closures implement it)
//! - [`ScriptedResponder`]: queued answers for tests and replays
//!
//! Requests that the engine can live without carry a default, used when a
//! responder is missing, fails, or gives an answer that does not validate.

mod common;
mod display;
mod error;
mod manager;
mod request;

pub use common::{
    bottom_cards_prompt, card_choice_prompt, card_option, color_choice_prompt,
    creature_type_prompt, discard_prompt, mulligan_prompt, number_prompt, play_or_draw_prompt,
    scry_prompt, target_prompt, yes_no_prompt, DRAW, PLAY,
};
pub use display::format_prompt;
pub use error::PromptError;
pub use manager::{PromptManager, PromptResponder, ScriptedResponder};
pub use request::{PromptKind, PromptOption, PromptRequest, PromptResponse};
