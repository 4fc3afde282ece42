//! Effect system for card abilities.
//!
//! - `Effect`: rules text plus the action it performs
//! - `Ability`: triggered, activated or static wrapper around an effect
//! - `TargetFilter`: which permanents a spell may target
//! - `EffectResolver`: executes effects and drains pending triggers

mod ability;
mod effect;
mod resolver;
mod targeting;

pub use ability::{Ability, AbilityKind, ActivationCost};
pub use effect::{Effect, EffectAction, EffectContext, EffectFn};
pub use resolver::EffectResolver;
pub use targeting::{get_valid_targets, request_targets, validate_targets, TargetFilter, TargetingError};
