//! Zone system for card locations.
//!
//! ## Key Types
//!
//! - `Zone`: library, hand, battlefield, graveyard, exile, stack
//! - `ZoneKey`: one player's zone, or the shared stack
//! - `ZoneManager`: Card location tracking and movement
//! - `ZonePosition`: Position specifier for insertion
//! - `ExileTracker`: cards exiled until their source leaves

pub mod exile;
pub mod manager;
pub mod zone;

pub use exile::ExileTracker;
pub use manager::{ZoneManager, ZonePosition};
pub use zone::{Zone, ZoneKey};
