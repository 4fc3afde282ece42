//! Trigger system for event-driven abilities.
//!
//! ## Key Components
//!
//! - [`GameEvent`]: An event that occurred, with the card it is about
//! - [`TriggerCondition`]: Rules for when a triggered ability fires
//! - [`TriggerManager`]: FIFO queue of [`PendingTrigger`]s
//!
//! Triggered abilities live on card definitions. Nothing registers
//! triggers up front: every event scans the battlefield instead, so a
//! permanent's triggers are live exactly while it is on the battlefield.
//! The one exception is "when this dies", which is looked up on the
//! dying card in the graveyard.

mod condition;
mod event;
mod manager;

pub use condition::TriggerCondition;
pub use event::{EventKind, GameEvent};
pub use manager::{PendingTrigger, TriggerManager};
