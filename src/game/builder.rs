//! Game construction.

use std::sync::Arc;

use super::{setup, Game};
use crate::cards::CardDefinition;
use crate::core::error::EngineError;
use crate::core::state::GameState;
use crate::core::{EngineConfig, Player, PlayerId, PlayerMap, PLAYER_COUNT};
use crate::prompt::{PromptManager, PromptResponder};
use crate::zones::{Zone, ZonePosition};

/// Builder for a two-player game.
///
/// # Example
///
/// ```
/// use mtg_rules::cards::CardRegistry;
/// use mtg_rules::game::GameBuilder;
///
/// let registry = CardRegistry::with_core_set();
/// let deck = registry.build_deck(&[("Plains", 24), ("Dockworker Drone", 16)]).unwrap();
///
/// let game = GameBuilder::new()
///     .player("Alice", deck.clone())
///     .player("Bob", deck)
///     .seed(7)
///     .build()
///     .unwrap();
///
/// assert_eq!(game.state.turn_number, 1);
/// ```
pub struct GameBuilder {
    players: Vec<(String, Vec<Arc<CardDefinition>>)>,
    config: EngineConfig,
    starting_player: Option<PlayerId>,
    shuffle: bool,
    mulligans: bool,
    prompts: PromptManager,
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self {
            players: Vec::new(),
            config: EngineConfig::default(),
            starting_player: None,
            shuffle: true,
            mulligans: true,
            prompts: PromptManager::new(),
        }
    }
}

impl GameBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seat a player. The first deck entry ends up on top of the library
    /// when shuffling is off.
    #[must_use]
    pub fn player(mut self, name: impl Into<String>, deck: Vec<Arc<CardDefinition>>) -> Self {
        self.players.push((name.into(), deck));
        self
    }

    #[must_use]
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Skip the coin flip.
    #[must_use]
    pub fn starting_player(mut self, player: PlayerId) -> Self {
        self.starting_player = Some(player);
        self
    }

    #[must_use]
    pub fn shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    #[must_use]
    pub fn mulligans(mut self, mulligans: bool) -> Self {
        self.mulligans = mulligans;
        self
    }

    /// Decision source for `player`, installed before setup prompts run.
    #[must_use]
    pub fn responder(mut self, player: PlayerId, responder: impl PromptResponder + 'static) -> Self {
        self.prompts.register(player, responder);
        self
    }

    /// Build the game: libraries, shuffle, coin flip, opening hands,
    /// mulligans, then the first turn.
    pub fn build(self) -> Result<Game, EngineError> {
        if self.players.len() != PLAYER_COUNT {
            return Err(EngineError::InvalidSetup(format!(
                "expected {} players, got {}",
                PLAYER_COUNT,
                self.players.len()
            )));
        }

        let config = self.config;
        let mut seats = self.players.into_iter();
        let (first_name, first_deck) = seats.next().unwrap_or_default();
        let (second_name, second_deck) = seats.next().unwrap_or_default();

        let players = PlayerMap::from_pair(
            Player::new(first_name, config.starting_life, config.max_hand_size),
            Player::new(second_name, config.starting_life, config.max_hand_size),
        );
        let mut state = GameState::new(players, config.seed);

        for (player, deck) in PlayerId::all().zip([first_deck, second_deck]) {
            for definition in deck {
                state.create_card(definition, player, Zone::Library, ZonePosition::Bottom);
            }
            if self.shuffle {
                state.shuffle_library(player);
            }
        }

        let mut game = Game::new(state, config);
        game.prompts = self.prompts;

        let starting = match self.starting_player {
            Some(player) => player,
            None => setup::coin_flip(&mut game),
        };
        setup::draw_opening_hands(&mut game)?;
        if self.mulligans {
            setup::run_mulligans(&mut game)?;
        }

        let name = game.state.player(starting).name.clone();
        game.state
            .log_event(format!("Game begins, {} goes first", name));
        tracing::info!(starting = %starting, seed = game.config().seed, "game built");
        game.begin(starting);
        Ok(game)
    }
}
