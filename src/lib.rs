//! # mtg-rules
//!
//! A rules engine for a two-player trading card game.
//!
//! ## Design Principles
//!
//! 1. **Arena + Ids**: Cards live in one arena keyed by `CardId`. Zones,
//!    the stack, actions and prompts only ever carry ids.
//!
//! 2. **Explicit Context**: A `Game` value owns the state, the prompt
//!    router and the configuration. Nothing is global, so several games
//!    can run side by side.
//!
//! 3. **Data-Driven Cards**: Definitions declare costs, keywords, target
//!    requirements and abilities; unusual behaviour is a plain function
//!    pointer.
//!
//! 4. **Typed Decisions**: Every choice a player makes goes through a
//!    `PromptRequest` / `PromptResponse` exchange with a validated
//!    fallback default.
//!
//! ## Modules
//!
//! - `core`: Ids, players, phases, configuration, RNG, log, game state
//! - `zones`: Ordered per-player zones and exile tracking
//! - `cards`: Definitions, instances, the card catalog and registry
//! - `mana`: Colors, costs, pools and payment planning
//! - `effects`: Abilities, effects, targeting and the effect resolver
//! - `triggers`: Game events and the pending-trigger queue
//! - `stack`: Casting spells and resolving the stack
//! - `combat`: Attacks, combat damage and state-based actions
//! - `prompt`: The decision protocol
//! - `rules`: Actions, legality and the `RulesEngine` trait
//! - `game`: The orchestrator, setup, scry and snapshots

pub mod cards;
pub mod combat;
pub mod core;
pub mod effects;
pub mod game;
pub mod mana;
pub mod prompt;
pub mod rules;
pub mod stack;
pub mod triggers;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    CardId, EngineConfig, EngineError, GameLog, GameRng, GameState, Phase, Player, PlayerId, PlayerMap,
};

pub use crate::zones::{Zone, ZonePosition};

pub use crate::cards::{Card, CardDefinition, CardRegistry, CardType, CounterKind, Keyword};

pub use crate::mana::{Color, ManaCost, ManaPool};

pub use crate::effects::{Ability, Effect, EffectContext, TargetFilter, TargetingError};

pub use crate::prompt::{PromptError, PromptKind, PromptOption, PromptRequest, PromptResponder, PromptResponse};

pub use crate::rules::{Action, ActionError, GameResult, RulesEngine};

pub use crate::game::{Game, GameBuilder, GameSnapshot};
