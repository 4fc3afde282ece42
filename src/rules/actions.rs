//! Player actions: representation, enumeration and validation.
//!
//! `ActionGenerator` lists what the priority holder may do right now;
//! `ActionValidator` re-checks a submitted action against the same rules
//! immediately before it executes, so the two never disagree.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::error::ActionError;
use crate::cards::{Card, Keyword};
use crate::core::state::GameState;
use crate::core::{CardId, Phase, PlayerId};
use crate::effects::{validate_targets, AbilityKind};
use crate::mana::{can_pay, ManaSource};
use crate::zones::Zone;

/// Something a player can do when they hold priority.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    PassPriority,

    PlayLand {
        card: CardId,
    },

    /// Cast a spell from hand. Empty `targets` means the caster is
    /// asked during casting.
    CastSpell {
        card: CardId,
        targets: SmallVec<[CardId; 2]>,
    },

    ActivateAbility {
        card: CardId,
        ability: usize,
    },

    /// Declare attackers (possibly none).
    DeclareAttackers {
        attackers: SmallVec<[CardId; 4]>,
    },

    /// Declare blockers. Only the empty declaration is supported.
    DeclareBlockers {
        blockers: SmallVec<[(CardId, CardId); 2]>,
    },
}

impl Action {
    /// Cast with targets chosen during casting.
    #[must_use]
    pub fn cast(card: CardId) -> Self {
        Action::CastSpell {
            card,
            targets: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn cast_targeting(card: CardId, targets: &[CardId]) -> Self {
        Action::CastSpell {
            card,
            targets: SmallVec::from_slice(targets),
        }
    }

    #[must_use]
    pub fn attack(attackers: &[CardId]) -> Self {
        Action::DeclareAttackers {
            attackers: SmallVec::from_slice(attackers),
        }
    }

    #[must_use]
    pub fn no_blocks() -> Self {
        Action::DeclareBlockers {
            blockers: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Action::PassPriority)
    }

    /// Short name of the action kind.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Action::PassPriority => "pass priority",
            Action::PlayLand { .. } => "play land",
            Action::CastSpell { .. } => "cast spell",
            Action::ActivateAbility { .. } => "activate ability",
            Action::DeclareAttackers { .. } => "declare attackers",
            Action::DeclareBlockers { .. } => "declare blockers",
        }
    }

    /// Human-readable description using card names from `state`.
    #[must_use]
    pub fn describe(&self, state: &GameState) -> String {
        match self {
            Action::PassPriority => "Pass priority".to_string(),
            Action::PlayLand { card } => format!("Play {}", state.card_name(*card)),
            Action::CastSpell { card, targets } if targets.is_empty() => {
                format!("Cast {}", state.card_name(*card))
            }
            Action::CastSpell { card, targets } => format!(
                "Cast {} targeting {}",
                state.card_name(*card),
                names(state, targets)
            ),
            Action::ActivateAbility { card, ability } => {
                let text = state
                    .card(*card)
                    .and_then(|c| c.definition().abilities.get(*ability))
                    .map_or_else(String::new, |a| a.to_string());
                format!("Activate {}: {}", state.card_name(*card), text)
            }
            Action::DeclareAttackers { attackers } if attackers.is_empty() => {
                "Attack with nothing".to_string()
            }
            Action::DeclareAttackers { attackers } => {
                format!("Attack with {}", names(state, attackers))
            }
            Action::DeclareBlockers { blockers } if blockers.is_empty() => {
                "Declare no blockers".to_string()
            }
            Action::DeclareBlockers { blockers } => format!("Declare {} blocker(s)", blockers.len()),
        }
    }
}

fn names(state: &GameState, cards: &[CardId]) -> String {
    cards
        .iter()
        .map(|&c| state.card_name(c))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A recorded action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when action was taken.
    pub turn: u32,

    /// Position in the game's action history.
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}

// === Shared rule checks ===

fn sorcery_timing(state: &GameState, player: PlayerId) -> bool {
    player == state.active_player && state.phase.is_main() && state.stack.is_empty()
}

fn in_own_hand<'a>(state: &'a GameState, player: PlayerId, card: CardId) -> Option<&'a Card> {
    state
        .card(card)
        .filter(|c| c.zone == Zone::Hand && c.owner() == player)
}

fn spell_castable(state: &GameState, player: PlayerId, card: &Card) -> Result<(), String> {
    if card.is_land() {
        return Err(format!("{} is a land", card.name()));
    }
    let definition = card.definition();
    if !definition.is_instant_speed() && !sorcery_timing(state, player) {
        return Err(format!(
            "{} can only be cast in your main phase with an empty stack",
            card.name()
        ));
    }
    if !state.can_pay(player, &definition.mana_cost) {
        return Err(format!("cannot pay {} for {}", definition.mana_cost, card.name()));
    }
    Ok(())
}

/// Targets named in the action itself. An empty list is settled while
/// casting instead.
fn given_targets_legal(state: &GameState, player: PlayerId, spell: &Card, targets: &[CardId]) -> Result<(), String> {
    if targets.is_empty() {
        return Ok(());
    }
    let Some(requirement) = spell.definition().target else {
        return Err(format!("{} does not target", spell.name()));
    };
    if targets.len() != requirement.count {
        return Err(format!(
            "{} needs {} target(s), got {}",
            spell.name(),
            requirement.count,
            targets.len()
        ));
    }
    validate_targets(state, player, requirement.filter, targets).map_err(|err| err.to_string())
}

fn ability_activatable(state: &GameState, player: PlayerId, card: &Card, index: usize) -> Result<(), String> {
    if card.zone != Zone::Battlefield || card.controller != player {
        return Err(format!("you do not control {} on the battlefield", card.name()));
    }
    let Some(ability) = card.definition().abilities.get(index) else {
        return Err(format!("{} has no ability #{}", card.name(), index));
    };
    let AbilityKind::Activated(cost) = &ability.kind else {
        return Err(format!("ability #{} of {} is not activated", index, card.name()));
    };
    if card.is_ability_disabled(index) {
        return Err(format!("ability #{} of {} is disabled", index, card.name()));
    }
    if cost.tap {
        if card.tapped {
            return Err(format!("{} is tapped", card.name()));
        }
        if card.is_creature() && card.summoning_sick && !card.has_keyword(Keyword::Haste) {
            return Err(format!("{} has summoning sickness", card.name()));
        }
    }
    // A source that taps for its own cost cannot also pay mana with itself.
    let sources: Vec<ManaSource> = state
        .mana_sources(player)
        .into_iter()
        .filter(|s| !(cost.tap && s.card == card.id) && !(cost.sacrifice && s.card == card.id))
        .collect();
    if !can_pay(&state.player(player).mana_pool, &sources, &cost.mana) {
        return Err(format!("cannot pay {}", cost));
    }
    Ok(())
}

/// Enumerates legal actions.
pub struct ActionGenerator;

impl ActionGenerator {
    /// Every action `player` may take now. Empty unless they hold priority
    /// in a game that is still running; otherwise always includes a pass.
    #[must_use]
    pub fn legal_actions(state: &GameState, player: PlayerId) -> Vec<Action> {
        if state.game_over || player != state.priority_player {
            return Vec::new();
        }
        let mut actions = vec![Action::PassPriority];
        let hand = state.zone_cards(player, Zone::Hand);

        if sorcery_timing(state, player) {
            if !state.player(player).land_played_this_turn {
                for &id in hand {
                    if state.card(id).is_some_and(Card::is_land) {
                        actions.push(Action::PlayLand { card: id });
                    }
                }
            }
            for &id in hand {
                let Some(card) = state.card(id) else { continue };
                if !card.definition().is_instant_speed() && spell_castable(state, player, card).is_ok() {
                    actions.push(Action::cast(id));
                }
            }
        }

        if state.phase == Phase::DeclareAttackers
            && player == state.active_player
            && !state.combat.attackers_declared
        {
            let ready: Vec<CardId> = state
                .creatures_controlled(player)
                .into_iter()
                .filter(|&id| state.card(id).is_some_and(Card::can_attack))
                .collect();
            if !ready.is_empty() {
                actions.push(Action::attack(&ready));
            }
            if ready.len() > 1 {
                actions.extend(ready.iter().map(|&id| Action::attack(&[id])));
            }
            actions.push(Action::attack(&[]));
        }

        if state.phase == Phase::DeclareBlockers
            && player != state.active_player
            && !state.combat.blockers_declared
        {
            actions.push(Action::no_blocks());
        }

        for &id in state.zone_cards(player, Zone::Battlefield) {
            let Some(card) = state.card(id) else { continue };
            for index in 0..card.definition().abilities.len() {
                if ability_activatable(state, player, card, index).is_ok() {
                    actions.push(Action::ActivateAbility { card: id, ability: index });
                }
            }
        }

        for &id in hand {
            let Some(card) = state.card(id) else { continue };
            if card.definition().is_instant_speed() && spell_castable(state, player, card).is_ok() {
                actions.push(Action::cast(id));
            }
        }

        actions
    }
}

/// Re-checks actions before execution.
pub struct ActionValidator;

impl ActionValidator {
    pub fn validate(state: &GameState, player: PlayerId, action: &Action) -> Result<(), ActionError> {
        if state.game_over {
            return Err(ActionError::GameOver);
        }
        if player != state.priority_player {
            return Err(ActionError::NotPriorityHolder {
                player,
                holder: state.priority_player,
            });
        }

        match action {
            Action::PassPriority => Ok(()),

            Action::PlayLand { card } => {
                let land = in_own_hand(state, player, *card)
                    .ok_or_else(|| illegal(format!("{} is not in your hand", card)))?;
                if !land.is_land() {
                    return Err(illegal(format!("{} is not a land", land.name())));
                }
                if !sorcery_timing(state, player) {
                    return Err(illegal("lands can only be played in your main phase with an empty stack"));
                }
                if state.player(player).land_played_this_turn {
                    return Err(illegal("you already played a land this turn"));
                }
                Ok(())
            }

            Action::CastSpell { card, targets } => {
                let spell = in_own_hand(state, player, *card)
                    .ok_or_else(|| illegal(format!("{} is not in your hand", card)))?;
                spell_castable(state, player, spell).map_err(illegal)?;
                given_targets_legal(state, player, spell, targets).map_err(illegal)
            }

            Action::ActivateAbility { card, ability } => {
                let source = state
                    .card(*card)
                    .ok_or_else(|| illegal(format!("{} does not exist", card)))?;
                ability_activatable(state, player, source, *ability).map_err(illegal)
            }

            Action::DeclareAttackers { attackers } => {
                if state.phase != Phase::DeclareAttackers || player != state.active_player {
                    return Err(illegal("attackers are declared by the active player"));
                }
                if state.combat.attackers_declared {
                    return Err(illegal("attackers were already declared"));
                }
                for (i, id) in attackers.iter().enumerate() {
                    if attackers[..i].contains(id) {
                        return Err(illegal(format!("{} declared twice", id)));
                    }
                    let ok = state
                        .card(*id)
                        .is_some_and(|c| c.controller == player && c.can_attack());
                    if !ok {
                        return Err(illegal(format!("{} cannot attack", state.card_name(*id))));
                    }
                }
                Ok(())
            }

            Action::DeclareBlockers { blockers } => {
                if state.phase != Phase::DeclareBlockers || player == state.active_player {
                    return Err(illegal("blockers are declared by the defending player"));
                }
                if state.combat.blockers_declared {
                    return Err(illegal("blockers were already declared"));
                }
                if !blockers.is_empty() {
                    return Err(illegal("blocking is not supported"));
                }
                Ok(())
            }
        }
    }
}

fn illegal(reason: impl Into<String>) -> ActionError {
    ActionError::Illegal(reason.into())
}
