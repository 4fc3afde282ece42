//! Core engine types: entities, players, phases, state, RNG, configuration.
//!
//! Everything else in the crate builds on these. `GameState` is the single
//! owner of mutable game data; the other types are small values it holds.

pub mod config;
pub mod entity;
pub mod error;
pub mod log;
pub mod phase;
pub mod player;
pub mod rng;
pub mod state;

pub use config::EngineConfig;
pub use entity::CardId;
pub use error::EngineError;
pub use log::{GameLog, LogEntry};
pub use phase::Phase;
pub use player::{Player, PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::GameRng;
pub use state::{CombatFlags, GameState};
