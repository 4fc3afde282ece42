//! Combat: attack declaration, damage and state-based actions.
//!
//! Blocking is accepted only as the empty declaration, so every attacker
//! is unblocked and deals its damage to the defending player.

use crate::cards::Keyword;
use crate::core::error::EngineError;
use crate::core::state::GameState;
use crate::core::{CardId, PlayerId};
use crate::zones::{Zone, ZonePosition};

/// Mark `attackers` as attacking for `player`, replacing any earlier
/// declaration. Attackers tap unless they have vigilance.
pub fn declare_attackers(state: &mut GameState, player: PlayerId, attackers: &[CardId]) -> Result<(), EngineError> {
    for id in state.zone_cards(player, Zone::Battlefield).to_vec() {
        if let Some(card) = state.card_mut(id) {
            card.attacking = false;
        }
    }

    for &id in attackers {
        let card = state.expect_zone(id, Zone::Battlefield)?;
        let vigilant = card.has_keyword(Keyword::Vigilance);
        let card = state.get_card_mut(id)?;
        card.attacking = true;
        if !vigilant {
            card.tapped = true;
        }
    }
    state.combat.attackers_declared = true;

    let who = state.player(player).name.clone();
    if attackers.is_empty() {
        state.log_event(format!("{} declares no attackers", who));
    } else {
        let names: Vec<String> = attackers.iter().map(|&c| state.card_name(c)).collect();
        state.log_event(format!("{} attacks with {}", who, names.join(", ")));
    }
    Ok(())
}

/// Record that the defending player declared no blockers.
pub fn declare_no_blockers(state: &mut GameState, player: PlayerId) {
    state.combat.blockers_declared = true;
    let who = state.player(player).name.clone();
    state.log_event(format!("{} declares no blockers", who));
}

/// Creatures `player` has attacking, in zone order.
#[must_use]
pub fn attackers(state: &GameState, player: PlayerId) -> Vec<CardId> {
    state
        .zone_cards(player, Zone::Battlefield)
        .iter()
        .copied()
        .filter(|&id| state.card(id).is_some_and(|c| c.attacking))
        .collect()
}

/// Deal combat damage from the active player's attackers to the defender.
///
/// Double strike deals damage twice. Returns the total dealt.
pub fn deal_combat_damage(state: &mut GameState) -> i32 {
    let attacker = state.active_player;
    let defender = attacker.opponent();

    let mut total: i32 = 0;
    for id in attackers(state, attacker) {
        let Some(card) = state.card(id) else { continue };
        let strikes = if card.has_keyword(Keyword::DoubleStrike) { 2 } else { 1 };
        let damage = card.power().saturating_mul(strikes);
        if damage <= 0 {
            continue;
        }
        let message = format!(
            "{} deals {} damage to {}",
            card.name(),
            damage,
            state.player(defender).name
        );
        state.player_mut(defender).lose_life(damage);
        state.log_event(message);
        total = total.saturating_add(damage);
    }

    if total > 0 {
        tracing::debug!(%defender, total, life = state.player(defender).life, "combat damage");
    }
    total
}

/// Clear attacking and blocking marks on every permanent.
pub fn end_combat(state: &mut GameState) {
    for id in state.battlefield_cards() {
        if let Some(card) = state.card_mut(id) {
            card.attacking = false;
            card.blocking = false;
        }
    }
}

/// One state-based pass: every creature with toughness 0 or less goes to
/// its owner's graveyard. Returns how many died.
pub fn state_based_pass(state: &mut GameState) -> Result<usize, EngineError> {
    let doomed: Vec<CardId> = state
        .battlefield_cards()
        .into_iter()
        .filter(|&id| state.card(id).is_some_and(|c| c.is_creature() && c.toughness() <= 0))
        .collect();

    for &id in &doomed {
        let name = state.card_name(id);
        state.move_card(id, Zone::Graveyard, ZonePosition::Top)?;
        state.log_event(format!("{} dies", name));
    }
    Ok(doomed.len())
}
