//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Once};

use mtg_rules::cards::catalog;
use mtg_rules::{
    CardDefinition, CardId, Game, GameState, Phase, PlayerId, PromptRequest, PromptResponse, Zone, ZonePosition,
};

pub const P0: PlayerId = PlayerId::new(0);
pub const P1: PlayerId = PlayerId::new(1);

static TRACING: Once = Once::new();

/// Route engine logs to the test writer. Set `RUST_LOG` to see them.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A game on turn 2, first main phase, player 0 active with priority.
pub fn main_phase_game(seed: u64) -> Game {
    init_tracing();
    let mut game = Game::new_empty(seed);
    game.state.turn_number = 2;
    game.state.phase = Phase::Main1;
    game
}

pub fn put(game: &mut Game, definition: CardDefinition, owner: PlayerId, zone: Zone) -> CardId {
    game.state
        .create_card(Arc::new(definition), owner, zone, ZonePosition::Top)
}

/// `count` untapped Plains on `player`'s battlefield.
pub fn plains(game: &mut Game, player: PlayerId, count: usize) -> Vec<CardId> {
    (0..count)
        .map(|_| put(game, catalog::plains(), player, Zone::Battlefield))
        .collect()
}

/// A creature that can attack this turn.
pub fn ready_creature(game: &mut Game, player: PlayerId, power: i32, toughness: i32) -> CardId {
    let definition = CardDefinition::new("Grizzly Bears", "Creature — Bear").with_stats(power, toughness);
    let id = put(game, definition, player, Zone::Battlefield);
    if let Some(card) = game.state.card_mut(id) {
        card.summoning_sick = false;
    }
    id
}

/// A land in hand, so the active player still has a main-phase play and
/// automatic passing stops there.
pub fn land_in_hand(game: &mut Game, player: PlayerId) -> CardId {
    put(game, catalog::plains(), player, Zone::Hand)
}

/// Stock both libraries so nobody loses to an empty draw.
pub fn stock_libraries(game: &mut Game, count: usize) {
    for player in PlayerId::all() {
        for _ in 0..count {
            put(game, catalog::island(), player, Zone::Library);
        }
    }
}

/// Responder that takes the default when there is one and otherwise the
/// first options the request allows.
pub fn first_options(
    _state: &GameState,
    _player: PlayerId,
    request: &PromptRequest,
) -> Result<PromptResponse, String> {
    if let Some(default) = &request.default {
        return Ok(default.clone());
    }
    let ids = request
        .options
        .iter()
        .take(request.min_choices.max(1))
        .map(|o| o.id.clone());
    Ok(PromptResponse::select(ids))
}
