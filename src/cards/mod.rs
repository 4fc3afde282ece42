//! Card system: definitions, instances, catalog and registry.
//!
//! ## Key Types
//!
//! - `CardDefinition`: static card data shared through an `Arc`
//! - `Card`: runtime card state (zone, controller, counters, flags)
//! - `CardRegistry`: display name to definition lookup
//! - `CardType` / `Keyword` / `CounterKind`: printed vocabulary

pub mod catalog;
pub mod definition;
pub mod instance;
pub mod registry;
pub mod types;

pub use definition::{CardDefinition, ResolveFn, TargetRequirement};
pub use instance::Card;
pub use registry::{CardConstructor, CardRegistry};
pub use types::{CardType, CounterKind, Keyword, Rarity};
