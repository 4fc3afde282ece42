//! Seats, per-seat storage and the player record.
//!
//! Zone contents are not stored here; the `ZoneManager` owns them so cards
//! stay addressable by id.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::mana::ManaPool;

/// Number of seats at the table.
pub const PLAYER_COUNT: usize = 2;

/// One of the two seats, 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// ```
    /// use mtg_rules::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(0).opponent(), PlayerId::new(1));
    /// assert_eq!(PlayerId::new(1).opponent(), PlayerId::new(0));
    /// ```
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }

    /// Both seats, first seat first.
    pub fn all() -> impl Iterator<Item = PlayerId> {
        [PlayerId(0), PlayerId(1)].into_iter()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// One value per seat, indexed by `PlayerId`.
///
/// ```
/// use mtg_rules::core::{PlayerId, PlayerMap};
///
/// let mut lands: PlayerMap<u32> = PlayerMap::with_default();
/// lands[PlayerId::new(1)] += 2;
/// assert_eq!(lands[PlayerId::new(0)], 0);
/// assert_eq!(lands[PlayerId::new(1)], 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    seats: [T; PLAYER_COUNT],
}

impl<T> PlayerMap<T> {
    pub fn new(mut factory: impl FnMut(PlayerId) -> T) -> Self {
        Self {
            seats: [factory(PlayerId(0)), factory(PlayerId(1))],
        }
    }

    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Values for the first and second seat.
    pub fn from_pair(first: T, second: T) -> Self {
        Self {
            seats: [first, second],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::all().zip(self.seats.iter())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &T {
        &self.seats[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.seats[player.index()]
    }
}

/// A seated player: name, life, floating mana and turn flags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Display name, also used in logs and snapshots.
    pub name: String,
    /// Signed; never clamped at zero.
    pub life: i32,
    pub mana_pool: ManaPool,
    pub land_played_this_turn: bool,
    /// Turns this player has started.
    pub turn_count: u32,
    /// Enforced during cleanup.
    pub max_hand_size: usize,
}

impl Player {
    #[must_use]
    pub fn new(name: impl Into<String>, life: i32, max_hand_size: usize) -> Self {
        Self {
            name: name.into(),
            life,
            mana_pool: ManaPool::new(),
            land_played_this_turn: false,
            turn_count: 0,
            max_hand_size,
        }
    }

    /// Turn-start bookkeeping for the player whose turn it is.
    pub fn start_turn(&mut self) {
        self.land_played_this_turn = false;
        self.turn_count += 1;
    }

    pub fn lose_life(&mut self, amount: i32) {
        self.life = self.life.saturating_sub(amount);
    }

    /// Still above zero life.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.life > 0
    }
}
