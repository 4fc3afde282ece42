//! Pre-game procedure: coin flip, opening hands and mulligans.

use rustc_hash::FxHashSet;

use super::Game;
use crate::core::error::EngineError;
use crate::core::{CardId, PlayerId, PlayerMap};
use crate::prompt::{bottom_cards_prompt, card_option, mulligan_prompt, play_or_draw_prompt, DRAW};
use crate::zones::{Zone, ZonePosition};

/// Flip for the first turn. The winner chooses to play or draw; returns
/// the starting player.
pub(crate) fn coin_flip(game: &mut Game) -> PlayerId {
    let winner = if game.state.rng.coin_flip() {
        PlayerId::new(0)
    } else {
        PlayerId::new(1)
    };
    let name = game.state.player(winner).name.clone();
    game.state
        .log_event(format!("Coin flip: {} wins the flip", name));

    let draws = game
        .prompts
        .request(&game.state, winner, &play_or_draw_prompt())
        .is_ok_and(|r| r.selected.first().is_some_and(|id| id == DRAW));

    if draws {
        game.state
            .log_event(format!("{} chooses to draw first", name));
        winner.opponent()
    } else {
        game.state
            .log_event(format!("{} chooses to play first", name));
        winner
    }
}

pub(crate) fn draw_opening_hands(game: &mut Game) -> Result<(), EngineError> {
    let size = game.config().opening_hand_size as u32;
    for player in PlayerId::all() {
        game.state.draw_cards(player, size)?;
    }
    Ok(())
}

/// Mulligan rounds. Every player still deciding is asked once per round;
/// a keep after `n` mulligans bottoms `n` cards.
pub(crate) fn run_mulligans(game: &mut Game) -> Result<(), EngineError> {
    let mut taken: PlayerMap<u32> = PlayerMap::with_default();
    let mut deciding: Vec<PlayerId> = PlayerId::all().collect();

    while !deciding.is_empty() {
        let mut still_deciding = Vec::new();
        for player in deciding {
            if wants_mulligan(game, player, taken[player]) {
                taken[player] += 1;
                mulligan(game, player, taken[player])?;
                still_deciding.push(player);
            } else {
                keep(game, player, taken[player])?;
            }
        }
        deciding = still_deciding;
    }
    Ok(())
}

fn wants_mulligan(game: &mut Game, player: PlayerId, taken: u32) -> bool {
    if game.config().mulligan_limit.is_some_and(|limit| taken >= limit) {
        return false;
    }

    let hand = game.state.zone_cards(player, Zone::Hand);
    let lands = hand
        .iter()
        .filter(|&&id| game.state.card(id).is_some_and(|c| c.is_land()))
        .count();
    let request = mulligan_prompt(taken, hand.len(), lands, hand.len() - lands);

    game.prompts
        .request(&game.state, player, &request)
        .is_ok_and(|r| r.confirmed == Some(true))
}

fn mulligan(game: &mut Game, player: PlayerId, number: u32) -> Result<(), EngineError> {
    for card in game.state.zone_cards(player, Zone::Hand).to_vec() {
        game.state.move_card(card, Zone::Library, ZonePosition::Top)?;
    }
    game.state.shuffle_library(player);

    let size = game.config().opening_hand_size;
    game.state.draw_cards(player, size as u32)?;

    let name = game.state.player(player).name.clone();
    game.state.log_event(format!(
        "{} mulligans (#{}) and draws {} cards",
        name, number, size
    ));
    Ok(())
}

fn keep(game: &mut Game, player: PlayerId, taken: u32) -> Result<(), EngineError> {
    let name = game.state.player(player).name.clone();
    let size = game.state.zone_size(player, Zone::Hand);
    game.state
        .log_event(format!("{} keeps {} cards", name, size));
    if taken > 0 {
        bottom_cards(game, player, taken as usize)?;
    }
    Ok(())
}

/// Put `count` cards from hand on the bottom of the library, chosen by
/// prompt. An unusable answer bottoms a random selection instead.
pub(crate) fn bottom_cards(game: &mut Game, player: PlayerId, count: usize) -> Result<(), EngineError> {
    let hand = game.state.zone_cards(player, Zone::Hand).to_vec();
    let count = count.min(hand.len());
    if count == 0 {
        return Ok(());
    }

    let options = hand
        .iter()
        .filter_map(|&id| game.state.card(id))
        .map(card_option)
        .collect();
    let request = bottom_cards_prompt(options, count);
    let chosen = game
        .prompts
        .request(&game.state, player, &request)
        .ok()
        .and_then(|response| parse_selection(&response.selected, &hand, count));

    let name = game.state.player(player).name.clone();
    let cards = match chosen {
        Some(cards) => cards,
        None => {
            game.state.log_event(format!(
                "{} made no valid choice, bottoming {} random card(s)",
                name, count
            ));
            game.state.rng.sample(&hand, count)
        }
    };

    for &card in &cards {
        game.state.move_card(card, Zone::Library, ZonePosition::Bottom)?;
    }
    game.state.log_event(format!(
        "{} puts {} card(s) on the bottom of their library",
        name,
        cards.len()
    ));
    Ok(())
}

/// Exactly `count` distinct cards, all from `hand`.
fn parse_selection(selected: &[String], hand: &[CardId], count: usize) -> Option<Vec<CardId>> {
    let cards: Vec<CardId> = selected
        .iter()
        .map(|token| CardId::parse_token(token))
        .collect::<Option<_>>()?;
    let distinct: FxHashSet<CardId> = cards.iter().copied().collect();
    let valid = cards.len() == count && distinct.len() == count && cards.iter().all(|c| hand.contains(c));
    valid.then_some(cards)
}
