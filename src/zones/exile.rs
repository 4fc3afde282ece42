//! "Exile until this leaves the battlefield" bookkeeping.

use rustc_hash::FxHashMap;

use crate::core::CardId;

/// Tracks which cards each source has exiled.
///
/// When a source leaves the battlefield, `GameState::move_card` releases
/// its entries and returns every card still in exile to the battlefield.
#[derive(Clone, Debug, Default)]
pub struct ExileTracker {
    exiled: FxHashMap<CardId, Vec<CardId>>,
}

impl ExileTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `source` exiled `card`.
    pub fn track(&mut self, source: CardId, card: CardId) {
        let list = self.exiled.entry(source).or_default();
        if !list.contains(&card) {
            list.push(card);
        }
    }

    /// Cards currently held by `source`, in the order they were exiled.
    #[must_use]
    pub fn exiled_by(&self, source: CardId) -> &[CardId] {
        self.exiled.get(&source).map_or(&[], |v| v.as_slice())
    }

    /// Stop tracking `source`, returning what it held.
    pub fn release(&mut self, source: CardId) -> Vec<CardId> {
        self.exiled.remove(&source).unwrap_or_default()
    }

    /// Forget a card (it left exile some other way).
    pub fn forget(&mut self, card: CardId) {
        for list in self.exiled.values_mut() {
            list.retain(|&c| c != card);
        }
        self.exiled.retain(|_, list| !list.is_empty());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exiled.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_and_release() {
        let mut tracker = ExileTracker::new();
        tracker.track(CardId(1), CardId(10));
        tracker.track(CardId(1), CardId(11));
        tracker.track(CardId(1), CardId(10));

        assert_eq!(tracker.exiled_by(CardId(1)), &[CardId(10), CardId(11)]);
        assert_eq!(tracker.release(CardId(1)), vec![CardId(10), CardId(11)]);
        assert!(tracker.is_empty());
        assert!(tracker.release(CardId(1)).is_empty());
    }

    #[test]
    fn test_forget() {
        let mut tracker = ExileTracker::new();
        tracker.track(CardId(1), CardId(10));
        tracker.forget(CardId(10));
        assert!(tracker.exiled_by(CardId(1)).is_empty());
        assert!(tracker.is_empty());
    }
}
