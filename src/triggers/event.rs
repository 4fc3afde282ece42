//! Game events.
//!
//! Events are fired by zone transfers in `GameState::move_card` and are
//! matched against triggered abilities by the `TriggerManager`.

use serde::{Deserialize, Serialize};

use crate::core::{CardId, PlayerId};

/// Kinds of events triggered abilities can listen for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// A permanent entered the battlefield.
    EntersBattlefield,
    /// A creature was put into a graveyard from the battlefield.
    Dies,
}

impl EventKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            EventKind::EntersBattlefield => "enters_battlefield",
            EventKind::Dies => "dies",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A game event with the card it happened to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    pub kind: EventKind,

    /// The card the event is about.
    pub card: CardId,

    /// Who controlled the card when the event happened.
    pub player: PlayerId,
}

impl GameEvent {
    #[must_use]
    pub fn new(kind: EventKind, card: CardId, player: PlayerId) -> Self {
        Self { kind, card, player }
    }

    #[must_use]
    pub fn enters_battlefield(card: CardId, player: PlayerId) -> Self {
        Self::new(EventKind::EntersBattlefield, card, player)
    }

    #[must_use]
    pub fn dies(card: CardId, player: PlayerId) -> Self {
        Self::new(EventKind::Dies, card, player)
    }
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.card, self.kind)
    }
}
