//! Trigger conditions.

use serde::{Deserialize, Serialize};

use super::event::{EventKind, GameEvent};
use crate::core::CardId;

/// When a triggered ability fires.
///
/// ## Example
///
/// ```
/// use mtg_rules::core::{CardId, PlayerId};
/// use mtg_rules::triggers::{GameEvent, TriggerCondition};
///
/// let condition = TriggerCondition::dies();
/// let event = GameEvent::dies(CardId(4), PlayerId::new(0));
///
/// assert!(condition.matches(CardId(4), &event));
/// assert!(!condition.matches(CardId(5), &event));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TriggerCondition {
    /// Event kind to listen for.
    pub event: EventKind,

    /// Only fire when the event is about the ability's own card.
    pub self_only: bool,
}

impl TriggerCondition {
    /// "When this enters the battlefield".
    #[must_use]
    pub const fn enters_battlefield() -> Self {
        Self {
            event: EventKind::EntersBattlefield,
            self_only: true,
        }
    }

    /// "When this dies".
    #[must_use]
    pub const fn dies() -> Self {
        Self {
            event: EventKind::Dies,
            self_only: true,
        }
    }

    /// "Whenever any card ..." for the given event kind.
    #[must_use]
    pub const fn any(event: EventKind) -> Self {
        Self {
            event,
            self_only: false,
        }
    }

    #[must_use]
    pub fn matches(&self, source: CardId, event: &GameEvent) -> bool {
        self.event == event.kind && (!self.self_only || event.card == source)
    }
}

impl std::fmt::Display for TriggerCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let subject = if self.self_only { "When this" } else { "Whenever a card" };
        let verb = match self.event {
            EventKind::EntersBattlefield => "enters",
            EventKind::Dies => "dies",
        };
        write!(f, "{} {}", subject, verb)
    }
}
