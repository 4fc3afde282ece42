//! Engine configuration.
//!
//! `EngineConfig` collects the numeric rules knobs a game is built with.
//! Defaults follow the standard constructed format: 20 life, 7-card
//! hands, no draw on the starting player's first turn.

use serde::{Deserialize, Serialize};

/// Mulligans allowed by default before a keep is forced.
pub const DEFAULT_MULLIGAN_LIMIT: u32 = 7;

/// Rules configuration for one game.
///
/// ## Example
///
/// ```
/// use mtg_rules::core::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_starting_life(30)
///     .with_turn_limit(50)
///     .with_seed(7);
///
/// assert_eq!(config.starting_life, 30);
/// assert_eq!(config.max_hand_size, 7);
/// assert_eq!(config.turn_limit, Some(50));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Life each player starts with.
    pub starting_life: i32,

    /// Hand size enforced during cleanup.
    pub max_hand_size: usize,

    /// Cards drawn for the opening hand and after each mulligan.
    pub opening_hand_size: usize,

    /// Whether the starting player skips the draw on turn 1.
    pub skip_first_draw: bool,

    /// Mulligans allowed before a keep is forced. `None` for unlimited,
    /// in which case a player who never keeps stalls setup.
    pub mulligan_limit: Option<u32>,

    /// Turn after which the game is declared a draw. `None` for no limit.
    pub turn_limit: Option<u32>,

    /// Seed for shuffles, coin flip and random defaults.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            starting_life: 20,
            max_hand_size: 7,
            opening_hand_size: 7,
            skip_first_draw: true,
            mulligan_limit: Some(DEFAULT_MULLIGAN_LIMIT),
            turn_limit: None,
            seed: 0,
        }
    }
}

impl EngineConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set starting life.
    #[must_use]
    pub fn with_starting_life(mut self, life: i32) -> Self {
        self.starting_life = life;
        self
    }

    /// Set the maximum hand size.
    #[must_use]
    pub fn with_max_hand_size(mut self, size: usize) -> Self {
        self.max_hand_size = size;
        self
    }

    /// Set the opening hand size.
    #[must_use]
    pub fn with_opening_hand_size(mut self, size: usize) -> Self {
        self.opening_hand_size = size;
        self
    }

    /// Choose whether the starting player draws on turn 1.
    #[must_use]
    pub fn with_skip_first_draw(mut self, skip: bool) -> Self {
        self.skip_first_draw = skip;
        self
    }

    /// Cap the number of mulligans per player.
    #[must_use]
    pub fn with_mulligan_limit(mut self, limit: u32) -> Self {
        self.mulligan_limit = Some(limit);
        self
    }

    /// Let players mulligan for as long as they keep asking.
    #[must_use]
    pub fn without_mulligan_limit(mut self) -> Self {
        self.mulligan_limit = None;
        self
    }

    /// End the game in a draw once this turn number is passed.
    #[must_use]
    pub fn with_turn_limit(mut self, turns: u32) -> Self {
        self.turn_limit = Some(turns);
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.starting_life, 20);
        assert_eq!(config.max_hand_size, 7);
        assert_eq!(config.opening_hand_size, 7);
        assert!(config.skip_first_draw);
        assert_eq!(config.mulligan_limit, Some(DEFAULT_MULLIGAN_LIMIT));
        assert_eq!(config.turn_limit, None);
        assert_eq!(config.without_mulligan_limit().mulligan_limit, None);
    }

    #[test]
    fn test_builder_chain() {
        let config = EngineConfig::new()
            .with_max_hand_size(5)
            .with_opening_hand_size(6)
            .with_skip_first_draw(false)
            .with_mulligan_limit(3);

        assert_eq!(config.max_hand_size, 5);
        assert_eq!(config.opening_hand_size, 6);
        assert!(!config.skip_first_draw);
        assert_eq!(config.mulligan_limit, Some(3));
    }

    #[test]
    fn test_config_serialization() {
        let config = EngineConfig::default().with_seed(11).with_turn_limit(3);
        let json = serde_json::to_string(&config).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
