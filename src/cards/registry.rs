//! Card registry for definition lookup.
//!
//! The `CardRegistry` maps display names to shared card definitions and
//! turns decklists into definition lists for the game builder.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::catalog;
use super::definition::CardDefinition;
use crate::core::error::EngineError;

/// Builds a fresh definition.
pub type CardConstructor = fn() -> CardDefinition;

/// Registry of card definitions, keyed by display name.
///
/// ## Example
///
/// ```
/// use mtg_rules::cards::CardRegistry;
///
/// let registry = CardRegistry::with_core_set();
/// let deck = registry.build_deck(&[("Plains", 10), ("Dockworker Drone", 4)]).unwrap();
///
/// assert_eq!(deck.len(), 14);
/// assert_eq!(deck[0].name, "Plains");
/// assert!(registry.build_deck(&[("Black Lotus", 1)]).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<String, Arc<CardDefinition>>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the basic lands and every catalog card.
    #[must_use]
    pub fn with_core_set() -> Self {
        let mut registry = Self::new();
        for constructor in catalog::CORE_SET {
            registry.register(*constructor);
        }
        registry
    }

    /// Register a constructor under the name of the card it builds.
    ///
    /// A later registration with the same name replaces the earlier one.
    pub fn register(&mut self, constructor: CardConstructor) -> Arc<CardDefinition> {
        self.register_definition(constructor())
    }

    /// Register an already built definition.
    pub fn register_definition(&mut self, definition: CardDefinition) -> Arc<CardDefinition> {
        let definition = Arc::new(definition);
        self.cards
            .insert(definition.name.clone(), Arc::clone(&definition));
        definition
    }

    /// Look up a definition by display name.
    pub fn get(&self, name: &str) -> Result<Arc<CardDefinition>, EngineError> {
        self.cards
            .get(name)
            .cloned()
            .ok_or_else(|| EngineError::UnknownCardName(name.to_string()))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.cards.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.cards.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Expand `(name, count)` pairs into a decklist, in order.
    pub fn build_deck(&self, list: &[(&str, usize)]) -> Result<Vec<Arc<CardDefinition>>, EngineError> {
        let mut deck = Vec::with_capacity(list.iter().map(|(_, n)| n).sum());
        for &(name, count) in list {
            let definition = self.get(name)?;
            deck.extend(std::iter::repeat(definition).take(count));
        }
        Ok(deck)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goblin() -> CardDefinition {
        CardDefinition::new("Goblin", "Creature — Goblin").with_stats(1, 1)
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = CardRegistry::new();
        registry.register(goblin);

        assert_eq!(registry.get("Goblin").unwrap().name, "Goblin");
        assert_eq!(
            registry.get("Orc").unwrap_err(),
            EngineError::UnknownCardName("Orc".into())
        );
    }

    #[test]
    fn test_reregister_replaces() {
        let mut registry = CardRegistry::new();
        registry.register(goblin);
        registry.register_definition(CardDefinition::new("Goblin", "Creature — Goblin").with_stats(3, 3));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("Goblin").unwrap().power, Some(3));
    }

    #[test]
    fn test_core_set_names() {
        let registry = CardRegistry::with_core_set();
        assert_eq!(
            registry.names(),
            vec![
                "Banishing Light",
                "Dockworker Drone",
                "Dual-Sun Technique",
                "Forest",
                "Illvoi Galeblade",
                "Island",
                "Mountain",
                "Plains",
                "Swamp",
            ]
        );
    }

    #[test]
    fn test_build_deck_shares_definitions() {
        let registry = CardRegistry::with_core_set();
        let deck = registry.build_deck(&[("Island", 2), ("Illvoi Galeblade", 1)]).unwrap();

        assert_eq!(deck.len(), 3);
        assert!(Arc::ptr_eq(&deck[0], &deck[1]));
        assert_eq!(deck[2].name, "Illvoi Galeblade");
    }
}
