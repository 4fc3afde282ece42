//! Ordered card lists for every zone, plus a reverse location index.
//!
//! The `ZoneManager` tracks where cards are located and handles movement
//! between zones. Every zone list is ordered:
//! - Libraries: index 0 is the bottom, the last element is the top
//! - Battlefield, hand, graveyard, exile: insertion order ("zone order")
//! - Stack: the last element resolves first
//!
//! The manager only knows about ids and lists. Rules that apply when a
//! card changes zones live in `GameState::move_card`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::zone::ZoneKey;
use crate::core::entity::CardId;
use crate::core::rng::GameRng;

/// Position for inserting a card into a zone list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZonePosition {
    /// End of the list (top of library, top of stack).
    Top,
    /// Start of the list.
    Bottom,
    /// Insert at specific index (0 = bottom), clamped to the list length.
    Index(usize),
}

/// Where every card is, and in what order each zone holds them.
///
/// ## Usage
///
/// ```
/// use mtg_rules::core::{CardId, PlayerId};
/// use mtg_rules::zones::{Zone, ZoneKey, ZoneManager, ZonePosition};
///
/// let mut manager = ZoneManager::new();
/// let library = ZoneKey::of(PlayerId::new(0), Zone::Library);
///
/// manager.add(CardId(10), library, ZonePosition::Top);
/// manager.add(CardId(11), library, ZonePosition::Bottom);
///
/// assert_eq!(manager.cards(library), &[CardId(11), CardId(10)]);
/// assert_eq!(manager.top(library), Some(CardId(10)));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ZoneManager {
    /// Card locations: card -> zone list
    locations: FxHashMap<CardId, ZoneKey>,

    /// Ordered card lists.
    lists: FxHashMap<ZoneKey, Vec<CardId>>,
}

fn insert_at(list: &mut Vec<CardId>, card: CardId, position: ZonePosition) {
    match position {
        ZonePosition::Top => list.push(card),
        ZonePosition::Bottom => list.insert(0, card),
        ZonePosition::Index(i) => {
            let idx = i.min(list.len());
            list.insert(idx, card);
        }
    }
}

impl ZoneManager {
        #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new card to a zone.
    ///
    /// Returns `false` (and changes nothing) if the card is already tracked.
    pub fn add(&mut self, card: CardId, key: ZoneKey, position: ZonePosition) -> bool {
        if self.locations.contains_key(&card) {
            return false;
        }
        self.locations.insert(card, key);
        insert_at(self.lists.entry(key).or_default(), card, position);
        true
    }

    /// Move a card to another zone list.
    ///
    /// Returns the old location, or `None` if the card wasn't found.
    /// Moving a card to the list it is already in repositions it.
    pub fn move_to(
        &mut self,
        card: CardId,
        key: ZoneKey,
        position: ZonePosition,
    ) -> Option<ZoneKey> {
        let old = self.locations.get(&card).copied()?;

        if let Some(list) = self.lists.get_mut(&old) {
            list.retain(|&c| c != card);
        }

        self.locations.insert(card, key);
        insert_at(self.lists.entry(key).or_default(), card, position);

        Some(old)
    }

    /// Forget a card. Returns the zone it was in.
    pub fn remove(&mut self, card: CardId) -> Option<ZoneKey> {
        let key = self.locations.remove(&card)?;
        if let Some(list) = self.lists.get_mut(&key) {
            list.retain(|&c| c != card);
        }
        Some(key)
    }

    /// Where a card is.
    #[must_use]
    pub fn location(&self, card: CardId) -> Option<ZoneKey> {
        self.locations.get(&card).copied()
    }

    #[must_use]
    pub fn is_in(&self, card: CardId, key: ZoneKey) -> bool {
        self.locations.get(&card) == Some(&key)
    }

    /// Cards in a zone list, bottom first.
    #[must_use]
    pub fn cards(&self, key: ZoneKey) -> &[CardId] {
        self.lists.get(&key).map_or(&[], |v| v.as_slice())
    }

    #[must_use]
    pub fn size(&self, key: ZoneKey) -> usize {
        self.cards(key).len()
    }

    /// The top card (last in the list).
    #[must_use]
    pub fn top(&self, key: ZoneKey) -> Option<CardId> {
        self.cards(key).last().copied()
    }

    /// The top `n` cards, topmost first.
    #[must_use]
    pub fn top_n(&self, key: ZoneKey, n: usize) -> Vec<CardId> {
        self.cards(key).iter().rev().take(n).copied().collect()
    }

    /// Shuffle a zone list.
    pub fn shuffle(&mut self, key: ZoneKey, rng: &mut GameRng) {
        if let Some(list) = self.lists.get_mut(&key) {
            rng.shuffle(list);
        }
    }

    /// Cards across every zone.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.locations.len()
    }

    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.locations.contains_key(&card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::player::PlayerId;
    use crate::zones::Zone;

    fn library() -> ZoneKey {
        ZoneKey::of(PlayerId::new(0), Zone::Library)
    }

    fn hand() -> ZoneKey {
        ZoneKey::of(PlayerId::new(0), Zone::Hand)
    }

    #[test]
    fn test_add_and_locate() {
        let mut manager = ZoneManager::new();

        assert!(manager.add(CardId(10), hand(), ZonePosition::Top));
        assert!(manager.add(CardId(11), hand(), ZonePosition::Top));

        assert_eq!(manager.location(CardId(10)), Some(hand()));
        assert_eq!(manager.location(CardId(99)), None);
        assert!(manager.is_in(CardId(11), hand()));
    }

    #[test]
    fn test_duplicate_add_is_rejected() {
        let mut manager = ZoneManager::new();

        assert!(manager.add(CardId(10), hand(), ZonePosition::Top));
        assert!(!manager.add(CardId(10), library(), ZonePosition::Top));

        assert_eq!(manager.location(CardId(10)), Some(hand()));
        assert_eq!(manager.total_cards(), 1);
    }

    #[test]
    fn test_ordering() {
        let mut manager = ZoneManager::new();

        // 10 to top, 11 to bottom, 12 to top
        manager.add(CardId(10), library(), ZonePosition::Top);
        manager.add(CardId(11), library(), ZonePosition::Bottom);
        manager.add(CardId(12), library(), ZonePosition::Top);

        // Bottom to top: [11, 10, 12]
        assert_eq!(manager.cards(library()), &[CardId(11), CardId(10), CardId(12)]);
        assert_eq!(manager.top(library()), Some(CardId(12)));
        assert_eq!(manager.top_n(library(), 2), vec![CardId(12), CardId(10)]);
    }

    #[test]
    fn test_move_between_zones() {
        let mut manager = ZoneManager::new();
        manager.add(CardId(10), library(), ZonePosition::Top);

        let old = manager.move_to(CardId(10), hand(), ZonePosition::Top);

        assert_eq!(old, Some(library()));
        assert_eq!(manager.location(CardId(10)), Some(hand()));
        assert_eq!(manager.size(library()), 0);
        assert_eq!(manager.size(hand()), 1);
        assert_eq!(manager.move_to(CardId(99), hand(), ZonePosition::Top), None);
    }

    #[test]
    fn test_move_within_zone_repositions() {
        let mut manager = ZoneManager::new();
        manager.add(CardId(1), library(), ZonePosition::Top);
        manager.add(CardId(2), library(), ZonePosition::Top);

        manager.move_to(CardId(2), library(), ZonePosition::Bottom);

        assert_eq!(manager.cards(library()), &[CardId(2), CardId(1)]);
    }

    #[test]
    fn test_position_index_clamps() {
        let mut manager = ZoneManager::new();
        manager.add(CardId(10), library(), ZonePosition::Top);
        manager.add(CardId(11), library(), ZonePosition::Top);
        manager.add(CardId(12), library(), ZonePosition::Index(1));
        manager.add(CardId(13), library(), ZonePosition::Index(99));

        assert_eq!(
            manager.cards(library()),
            &[CardId(10), CardId(12), CardId(11), CardId(13)]
        );
    }

    #[test]
    fn test_remove() {
        let mut manager = ZoneManager::new();
        manager.add(CardId(10), library(), ZonePosition::Top);

        assert_eq!(manager.remove(CardId(10)), Some(library()));
        assert!(!manager.contains(CardId(10)));
        assert_eq!(manager.size(library()), 0);
    }

    #[test]
    fn test_shuffle_keeps_cards() {
        let mut manager = ZoneManager::new();
        for i in 0..20 {
            manager.add(CardId(i), library(), ZonePosition::Top);
        }

        let before = manager.cards(library()).to_vec();
        manager.shuffle(library(), &mut GameRng::new(42));
        let mut after = manager.cards(library()).to_vec();

        assert_ne!(before, after);
        after.sort();
        assert_eq!(before, after);
    }
}
