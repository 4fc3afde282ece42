//! Card instances - runtime card state.
//!
//! `Card` represents one physical card in a game. It shares its
//! definition and tracks mutable state: zone, controller, counters and
//! status flags. The owner is fixed at creation.

use std::collections::BTreeMap;
use std::sync::Arc;

use smallvec::SmallVec;

use super::definition::CardDefinition;
use super::types::{CardType, CounterKind, Keyword};
use crate::core::{CardId, PlayerId};
use crate::zones::Zone;

/// A card instance in a game.
#[derive(Clone, Debug)]
pub struct Card {
    pub id: CardId,

    definition: Arc<CardDefinition>,

    /// Who started the game with this card.
    owner: PlayerId,

    /// Who currently controls it. Equals `owner` outside the battlefield.
    pub controller: PlayerId,

    pub zone: Zone,

    /// Counter kind -> count. Never holds a zero entry.
    counters: BTreeMap<CounterKind, u32>,

    pub tapped: bool,
    pub attacking: bool,
    pub blocking: bool,
    pub summoning_sick: bool,

    /// Keywords granted until end of turn.
    pub granted_keywords: SmallVec<[Keyword; 2]>,

    /// Ability indices switched off for this instance.
    pub disabled_abilities: SmallVec<[usize; 2]>,
}

impl Card {
    /// Create a card instance in its owner's library.
    #[must_use]
    pub fn new(id: CardId, definition: Arc<CardDefinition>, owner: PlayerId) -> Self {
        Self {
            id,
            definition,
            owner,
            controller: owner,
            zone: Zone::Library,
            counters: BTreeMap::new(),
            tapped: false,
            attacking: false,
            blocking: false,
            summoning_sick: true,
            granted_keywords: SmallVec::new(),
            disabled_abilities: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn definition(&self) -> &CardDefinition {
        &self.definition
    }

    /// Shared handle to the definition.
    #[must_use]
    pub fn definition_arc(&self) -> Arc<CardDefinition> {
        Arc::clone(&self.definition)
    }

    #[must_use]
    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    #[must_use]
    pub fn has_type(&self, card_type: CardType) -> bool {
        self.definition.has_type(card_type)
    }

    #[must_use]
    pub fn is_creature(&self) -> bool {
        self.definition.is_creature()
    }

    #[must_use]
    pub fn is_land(&self) -> bool {
        self.definition.is_land()
    }

    /// Printed or granted keyword.
    #[must_use]
    pub fn has_keyword(&self, keyword: Keyword) -> bool {
        self.definition.has_keyword(keyword) || self.granted_keywords.contains(&keyword)
    }

    /// Grant a keyword until end of turn.
    pub fn grant_keyword(&mut self, keyword: Keyword) {
        if !self.granted_keywords.contains(&keyword) {
            self.granted_keywords.push(keyword);
        }
    }

    #[must_use]
    pub fn is_ability_disabled(&self, index: usize) -> bool {
        self.disabled_abilities.contains(&index)
    }

    pub fn disable_ability(&mut self, index: usize) {
        if !self.disabled_abilities.contains(&index) {
            self.disabled_abilities.push(index);
        }
    }

    // === Counters ===

    #[must_use]
    pub fn counter(&self, kind: CounterKind) -> u32 {
        self.counters.get(&kind).copied().unwrap_or(0)
    }

    pub fn counters(&self) -> impl Iterator<Item = (CounterKind, u32)> + '_ {
        self.counters.iter().map(|(&k, &v)| (k, v))
    }

    #[must_use]
    pub fn has_counters(&self) -> bool {
        !self.counters.is_empty()
    }

    pub fn add_counter(&mut self, kind: CounterKind, amount: u32) {
        if amount > 0 {
            let count = self.counters.entry(kind).or_insert(0);
            *count = count.saturating_add(amount);
        }
    }

    /// Remove up to `amount` counters, returning how many were removed.
    pub fn remove_counter(&mut self, kind: CounterKind, amount: u32) -> u32 {
        let Some(current) = self.counters.get_mut(&kind) else {
            return 0;
        };
        let removed = amount.min(*current);
        *current -= removed;
        if *current == 0 {
            self.counters.remove(&kind);
        }
        removed
    }

    /// Remove and return every counter.
    pub fn take_counters(&mut self) -> BTreeMap<CounterKind, u32> {
        std::mem::take(&mut self.counters)
    }

    // === Derived stats ===

    fn stat(&self, base: Option<i32>) -> i32 {
        if !self.is_creature() {
            return 0;
        }
        // Exact in i64, then clamped into [0, i32::MAX].
        let total = i64::from(base.unwrap_or(0)) + i64::from(self.counter(CounterKind::PlusOne))
            - i64::from(self.counter(CounterKind::MinusOne));
        i32::try_from(total.max(0)).unwrap_or(i32::MAX)
    }

    /// Current power: base plus +1/+1 minus -1/-1 counters, at least 0.
    #[must_use]
    pub fn power(&self) -> i32 {
        self.stat(self.definition.power)
    }

    /// Current toughness, computed like [`Card::power`].
    #[must_use]
    pub fn toughness(&self) -> i32 {
        self.stat(self.definition.toughness)
    }

    #[must_use]
    pub fn can_attack(&self) -> bool {
        self.is_creature()
            && self.zone == Zone::Battlefield
            && !self.tapped
            && (!self.summoning_sick || self.has_keyword(Keyword::Haste))
    }

    // === Zone entry rules ===

    /// Reset for a move into `zone`. Controller goes back to the owner.
    pub(crate) fn enter_zone(&mut self, zone: Zone) {
        let leaving_battlefield = self.zone == Zone::Battlefield && zone != Zone::Battlefield;
        self.zone = zone;
        self.controller = self.owner;

        if leaving_battlefield {
            self.tapped = false;
            self.attacking = false;
            self.blocking = false;
            self.summoning_sick = true;
            self.granted_keywords.clear();
        }

        if zone == Zone::Battlefield {
            self.tapped = false;
            self.attacking = false;
            self.blocking = false;
            self.summoning_sick = self.is_creature();
            self.counters.clear();
            self.granted_keywords.clear();
            self.disabled_abilities.clear();
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_creature() {
            write!(f, "{} ({}/{})", self.name(), self.power(), self.toughness())
        } else {
            f.write_str(self.name())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn creature(power: i32, toughness: i32) -> Card {
        let def = CardDefinition::new("Test Creature", "Creature — Test").with_stats(power, toughness);
        Card::new(CardId::new(1), Arc::new(def), PlayerId::new(0))
    }

    #[test]
    fn test_new_card() {
        let card = creature(2, 2);
        assert_eq!(card.owner(), PlayerId::new(0));
        assert_eq!(card.controller, PlayerId::new(0));
        assert_eq!(card.zone, Zone::Library);
        assert!(card.summoning_sick);
    }

    #[test]
    fn test_counters_modify_stats() {
        let mut card = creature(1, 1);
        card.add_counter(CounterKind::PlusOne, 2);
        assert_eq!(card.power(), 3);
        assert_eq!(card.toughness(), 3);

        card.add_counter(CounterKind::MinusOne, 5);
        assert_eq!(card.power(), 0);
        assert_eq!(card.toughness(), 0);
    }

    #[test]
    fn test_remove_counter_clamps_and_drops_key() {
        let mut card = creature(1, 1);
        card.add_counter(CounterKind::PlusOne, 2);

        assert_eq!(card.remove_counter(CounterKind::PlusOne, 5), 2);
        assert!(!card.has_counters());
        assert_eq!(card.remove_counter(CounterKind::Charge, 1), 0);
    }

    #[test]
    fn test_huge_counter_counts_saturate() {
        let mut card = creature(3, 3);
        card.add_counter(CounterKind::PlusOne, u32::MAX);
        card.add_counter(CounterKind::PlusOne, 10);
        assert_eq!(card.counter(CounterKind::PlusOne), u32::MAX);
        assert_eq!(card.power(), i32::MAX);

        card.add_counter(CounterKind::MinusOne, u32::MAX);
        assert_eq!(card.toughness(), 3);
    }

    #[test]
    fn test_non_creature_stats_are_zero() {
        let def = CardDefinition::new("Banishing Light", "Enchantment");
        let mut card = Card::new(CardId::new(2), Arc::new(def), PlayerId::new(1));
        card.add_counter(CounterKind::PlusOne, 1);
        assert_eq!(card.power(), 0);
        assert_eq!(card.toughness(), 0);
    }

    #[test]
    fn test_enter_battlefield_resets_state() {
        let mut card = creature(1, 1);
        card.tapped = true;
        card.add_counter(CounterKind::PlusOne, 1);
        card.controller = PlayerId::new(1);

        card.enter_zone(Zone::Battlefield);

        assert!(!card.tapped);
        assert!(card.summoning_sick);
        assert!(!card.has_counters());
        assert_eq!(card.controller, PlayerId::new(0));
    }

    #[test]
    fn test_leave_battlefield_keeps_counters() {
        let mut card = creature(1, 1);
        card.enter_zone(Zone::Battlefield);
        card.summoning_sick = false;
        card.tapped = true;
        card.attacking = true;
        card.add_counter(CounterKind::PlusOne, 1);

        card.enter_zone(Zone::Graveyard);

        assert!(!card.tapped);
        assert!(!card.attacking);
        assert!(card.summoning_sick);
        assert_eq!(card.counter(CounterKind::PlusOne), 1);
    }

    #[test]
    fn test_haste_ignores_summoning_sickness() {
        let def = CardDefinition::new("Hasty", "Creature — Goblin")
            .with_stats(1, 1)
            .with_keyword(Keyword::Haste);
        let mut card = Card::new(CardId::new(3), Arc::new(def), PlayerId::new(0));
        card.enter_zone(Zone::Battlefield);
        assert!(card.can_attack());
    }

    proptest! {
        /// Counts never go negative and empty entries never linger.
        #[test]
        fn prop_counter_clamping(ops in prop::collection::vec((any::<bool>(), 0u32..5), 0..30)) {
            let mut card = creature(1, 1);
            let mut expected: u32 = 0;
            for (add, amount) in ops {
                if add {
                    card.add_counter(CounterKind::PlusOne, amount);
                    expected += amount;
                } else {
                    let removed = card.remove_counter(CounterKind::PlusOne, amount);
                    prop_assert_eq!(removed, amount.min(expected));
                    expected -= removed;
                }
                prop_assert_eq!(card.counter(CounterKind::PlusOne), expected);
                prop_assert_eq!(card.has_counters(), expected > 0);
            }
        }
    }
}
