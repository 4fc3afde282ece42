//! Stack and spell resolution.
//!
//! Spells other than creatures wait on a shared LIFO stack. When both
//! players pass in succession the top object resolves and priority goes
//! back to the active player. Activated abilities and triggers never use
//! the stack.

mod object;
mod spell;

pub use object::{Stack, StackObject, StackObjectId};
pub use spell::{cast_spell, resolve_top, CastOutcome};
