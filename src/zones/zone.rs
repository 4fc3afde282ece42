//! Zone names and keys.

use serde::{Deserialize, Serialize};

use crate::core::player::PlayerId;

/// A named location a card can occupy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Zone {
    Library,
    Hand,
    Battlefield,
    Graveyard,
    Exile,
    Stack,
}

impl Zone {
    /// The per-player zones, in display order.
    pub const PLAYER_ZONES: [Zone; 5] = [
        Zone::Library,
        Zone::Hand,
        Zone::Battlefield,
        Zone::Graveyard,
        Zone::Exile,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Zone::Library => "library",
            Zone::Hand => "hand",
            Zone::Battlefield => "battlefield",
            Zone::Graveyard => "graveyard",
            Zone::Exile => "exile",
            Zone::Stack => "stack",
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A concrete zone list: one player's zone, or the shared stack.
///
/// Battlefield lists are keyed by controller; every other player zone is
/// keyed by owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ZoneKey {
    Player(PlayerId, Zone),
    Stack,
}

impl ZoneKey {
    /// Key for `zone` belonging to `player`. The stack is shared, so the
    /// player is ignored for it.
    #[must_use]
    pub const fn of(player: PlayerId, zone: Zone) -> Self {
        match zone {
            Zone::Stack => ZoneKey::Stack,
            _ => ZoneKey::Player(player, zone),
        }
    }

    #[must_use]
    pub const fn zone(self) -> Zone {
        match self {
            ZoneKey::Player(_, zone) => zone,
            ZoneKey::Stack => Zone::Stack,
        }
    }

    #[must_use]
    pub const fn player(self) -> Option<PlayerId> {
        match self {
            ZoneKey::Player(player, _) => Some(player),
            ZoneKey::Stack => None,
        }
    }
}

impl std::fmt::Display for ZoneKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ZoneKey::Player(player, zone) => write!(f, "{}'s {}", player, zone),
            ZoneKey::Stack => f.write_str("stack"),
        }
    }
}
