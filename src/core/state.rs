//! Game state: the card arena plus everything a turn needs.
//!
//! ## GameState
//!
//! - Card arena (`CardId -> Card`) and the `ZoneManager`
//! - Both players, the stack and the exile tracker
//! - Phase, active player, priority and the pass counter
//! - Pending triggers, outcome, RNG, log and action history
//!
//! Every zone transfer goes through [`GameState::move_card`], which applies
//! the destination's entry rules and reports events to the trigger queue.

use std::sync::Arc;

use im::Vector;
use rustc_hash::FxHashMap;

use super::entity::CardId;
use super::error::EngineError;
use super::log::GameLog;
use super::phase::Phase;
use super::player::{Player, PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::cards::{Card, CardDefinition};
use crate::mana::{can_pay, plan_payment, Color, ManaCost, ManaError, ManaSource, PaymentPlan};
use crate::rules::{ActionRecord, GameResult};
use crate::stack::Stack;
use crate::triggers::{GameEvent, TriggerManager};
use crate::zones::{ExileTracker, Zone, ZoneKey, ZoneManager, ZonePosition};

/// Attack and block declarations made this combat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CombatFlags {
    pub attackers_declared: bool,
    pub blockers_declared: bool,
}

/// Complete game state.
#[derive(Clone, Debug)]
pub struct GameState {
    cards: FxHashMap<CardId, Card>,
    next_card_id: u32,

    /// Card locations.
    pub zones: ZoneManager,

    pub players: PlayerMap<Player>,

    /// Spells waiting to resolve (LIFO).
    pub stack: Stack,

    pub exiled: ExileTracker,

    // === Turn structure ===
    pub phase: Phase,

    /// Turn number (starts at 1).
    pub turn_number: u32,

    /// Whose turn it is.
    pub active_player: PlayerId,

    /// Who may act next.
    pub priority_player: PlayerId,

    /// Passes in a row since the last action, resolution or phase change.
    pub consecutive_passes: u32,

    pub combat: CombatFlags,

    pub triggers: TriggerManager,

    // === Outcome ===
    pub game_over: bool,
    pub outcome: Option<GameResult>,

    pub rng: GameRng,
    pub log: GameLog,

    /// Executed actions, oldest first.
    pub history: Vector<ActionRecord>,
}

impl GameState {
    /// Create an empty state for two players.
    #[must_use]
    pub fn new(players: PlayerMap<Player>, seed: u64) -> Self {
        Self {
            cards: FxHashMap::default(),
            next_card_id: 1,
            zones: ZoneManager::new(),
            players,
            stack: Stack::new(),
            exiled: ExileTracker::new(),
            phase: Phase::Untap,
            turn_number: 0,
            active_player: PlayerId::new(0),
            priority_player: PlayerId::new(0),
            consecutive_passes: 0,
            combat: CombatFlags::default(),
            triggers: TriggerManager::new(),
            game_over: false,
            outcome: None,
            rng: GameRng::new(seed),
            log: GameLog::new(),
            history: Vector::new(),
        }
    }

    /// Record an event in the game log.
    pub fn log_event(&mut self, message: impl Into<String>) {
        self.log.record(self.turn_number, message);
    }

    // === Players ===

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &Player {
        &self.players[player]
    }

    pub fn player_mut(&mut self, player: PlayerId) -> &mut Player {
        &mut self.players[player]
    }

    // === Cards ===

    /// Create a card and place it without firing events.
    pub fn create_card(
        &mut self,
        definition: Arc<CardDefinition>,
        owner: PlayerId,
        zone: Zone,
        position: ZonePosition,
    ) -> CardId {
        let id = CardId::new(self.next_card_id);
        self.next_card_id += 1;

        let mut card = Card::new(id, definition, owner);
        card.zone = zone;
        card.summoning_sick = zone != Zone::Battlefield || card.is_creature();
        self.zones.add(id, ZoneKey::of(owner, zone), position);
        self.cards.insert(id, card);
        id
    }

    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    pub fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.get_mut(&id)
    }

    pub fn get_card(&self, id: CardId) -> Result<&Card, EngineError> {
        self.cards.get(&id).ok_or(EngineError::UnknownCard(id))
    }

    pub fn get_card_mut(&mut self, id: CardId) -> Result<&mut Card, EngineError> {
        self.cards.get_mut(&id).ok_or(EngineError::UnknownCard(id))
    }

    /// Name for log messages.
    #[must_use]
    pub fn card_name(&self, id: CardId) -> String {
        self.card(id)
            .map_or_else(|| id.to_string(), |c| c.name().to_string())
    }

    /// Total cards in the game.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn all_cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    /// Error unless `id` is in `expected`.
    pub fn expect_zone(&self, id: CardId, expected: Zone) -> Result<&Card, EngineError> {
        let card = self.get_card(id)?;
        if card.zone != expected {
            return Err(EngineError::WrongZone {
                card: id,
                expected,
                actual: card.zone,
            });
        }
        Ok(card)
    }

    // === Zone queries ===

    /// Cards in one of a player's zones, bottom first.
    ///
    /// The battlefield list holds what the player controls; every other
    /// zone holds what the player owns.
    #[must_use]
    pub fn zone_cards(&self, player: PlayerId, zone: Zone) -> &[CardId] {
        self.zones.cards(ZoneKey::of(player, zone))
    }

    #[must_use]
    pub fn zone_size(&self, player: PlayerId, zone: Zone) -> usize {
        self.zone_cards(player, zone).len()
    }

    /// Every permanent, player 0's battlefield first.
    #[must_use]
    pub fn battlefield_cards(&self) -> Vec<CardId> {
        PlayerId::all()
            .flat_map(|p| self.zone_cards(p, Zone::Battlefield).iter().copied())
            .collect()
    }

    /// Creatures `player` controls, in zone order.
    #[must_use]
    pub fn creatures_controlled(&self, player: PlayerId) -> Vec<CardId> {
        self.zone_cards(player, Zone::Battlefield)
            .iter()
            .copied()
            .filter(|&id| self.card(id).is_some_and(Card::is_creature))
            .collect()
    }

    // === Zone transfers ===

    /// Move a card to `zone` (its owner's list of that zone).
    ///
    /// Resets the controller to the owner and applies entry rules. Entering
    /// the battlefield fires an enters event; a creature going from the
    /// battlefield to the graveyard fires a dies event; any permanent
    /// leaving the battlefield returns the cards it exiled.
    ///
    /// Returns the zone the card came from.
    pub fn move_card(
        &mut self,
        id: CardId,
        zone: Zone,
        position: ZonePosition,
    ) -> Result<Zone, EngineError> {
        let card = self.get_card(id)?;
        let from = card.zone;
        let owner = card.owner();
        let controller = card.controller;
        let was_creature = card.is_creature();

        self.zones
            .move_to(id, ZoneKey::of(owner, zone), position)
            .ok_or(EngineError::UnknownCard(id))?;

        if from == zone {
            if let Some(card) = self.card_mut(id) {
                card.controller = owner;
            }
            return Ok(from);
        }

        self.get_card_mut(id)?.enter_zone(zone);
        tracing::debug!(card = %id, %from, to = %zone, "card moved");

        if from == Zone::Exile {
            self.exiled.forget(id);
        }

        if from == Zone::Battlefield {
            if was_creature && zone == Zone::Graveyard {
                self.fire(GameEvent::dies(id, controller));
            }
            self.return_exiled_by(id)?;
        }

        if zone == Zone::Battlefield {
            self.fire(GameEvent::enters_battlefield(id, owner));
        }

        Ok(from)
    }

    /// Move a permanent to another player's battlefield without a zone
    /// change. No events fire.
    pub fn gain_control(&mut self, id: CardId, player: PlayerId) -> Result<(), EngineError> {
        self.expect_zone(id, Zone::Battlefield)?;
        self.zones
            .move_to(id, ZoneKey::of(player, Zone::Battlefield), ZonePosition::Top);
        self.get_card_mut(id)?.controller = player;
        let name = self.card_name(id);
        let who = self.player(player).name.clone();
        self.log_event(format!("{} gains control of {}", who, name));
        Ok(())
    }

    /// Exile `target` until `source` leaves the battlefield.
    pub fn exile_until_leaves(&mut self, source: CardId, target: CardId) -> Result<(), EngineError> {
        self.move_card(target, Zone::Exile, ZonePosition::Top)?;
        self.exiled.track(source, target);
        let message = format!("{} exiles {}", self.card_name(source), self.card_name(target));
        self.log_event(message);
        Ok(())
    }

    fn return_exiled_by(&mut self, source: CardId) -> Result<(), EngineError> {
        let held = self.exiled.release(source);
        let mut returned = Vec::new();
        for card in held {
            if self.card(card).is_some_and(|c| c.zone == Zone::Exile) {
                self.move_card(card, Zone::Battlefield, ZonePosition::Top)?;
                returned.push(self.card_name(card));
            }
        }
        if !returned.is_empty() {
            let message = format!("{} returns: {}", self.card_name(source), returned.join(", "));
            self.log_event(message);
        }
        Ok(())
    }

    fn fire(&mut self, event: GameEvent) {
        let found = TriggerManager::collect(self, &event);
        if !found.is_empty() {
            tracing::debug!(%event, count = found.len(), "triggers queued");
        }
        self.triggers.enqueue(found);
    }

    /// Draw the top card of `player`'s library.
    ///
    /// Drawing from an empty library sets the player's life to 0.
    pub fn draw_card(&mut self, player: PlayerId) -> Result<Option<CardId>, EngineError> {
        let Some(top) = self.zones.top(ZoneKey::of(player, Zone::Library)) else {
            self.player_mut(player).life = 0;
            let name = self.player(player).name.clone();
            self.log_event(format!("{} cannot draw from an empty library", name));
            return Ok(None);
        };
        self.move_card(top, Zone::Hand, ZonePosition::Top)?;
        tracing::debug!(%player, card = %top, "card drawn");
        Ok(Some(top))
    }

    /// Draw `count` cards, stopping early on an empty library.
    pub fn draw_cards(&mut self, player: PlayerId, count: u32) -> Result<Vec<CardId>, EngineError> {
        let mut drawn = Vec::new();
        for _ in 0..count {
            match self.draw_card(player)? {
                Some(card) => drawn.push(card),
                None => break,
            }
        }
        Ok(drawn)
    }

    /// Shuffle a player's library.
    pub fn shuffle_library(&mut self, player: PlayerId) {
        self.zones
            .shuffle(ZoneKey::of(player, Zone::Library), &mut self.rng);
    }

    // === Mana ===

    /// Untapped lands `player` controls that produce mana, in zone order.
    #[must_use]
    pub fn mana_sources(&self, player: PlayerId) -> Vec<ManaSource> {
        self.zone_cards(player, Zone::Battlefield)
            .iter()
            .filter_map(|&id| {
                let card = self.card(id)?;
                if card.tapped || !card.is_land() {
                    return None;
                }
                card.definition()
                    .mana_color()
                    .map(|color| ManaSource::new(id, color))
            })
            .collect()
    }

    /// Whether `player` can pay `cost` from pool and untapped lands.
    #[must_use]
    pub fn can_pay(&self, player: PlayerId, cost: &ManaCost) -> bool {
        can_pay(&self.player(player).mana_pool, &self.mana_sources(player), cost)
    }

    /// Pay `cost`: spend floating mana and tap lands per the payment plan.
    ///
    /// Nothing changes when the cost cannot be met.
    pub fn pay_cost(&mut self, player: PlayerId, cost: &ManaCost) -> Result<PaymentPlan, EngineError> {
        let sources = self.mana_sources(player);
        let plan = plan_payment(&self.player(player).mana_pool, &sources, cost).ok_or_else(|| {
            ManaError::CannotPay {
                cost: cost.to_string(),
            }
        })?;

        let pool = &mut self.player_mut(player).mana_pool;
        for color in Color::ALL {
            pool.remove(color, plan.from_pool.get(color));
        }
        for &land in &plan.taps {
            self.get_card_mut(land)?.tapped = true;
        }

        tracing::debug!(%player, %cost, taps = plan.taps.len(), "mana paid");
        Ok(plan)
    }

    /// Untap every permanent `player` controls.
    pub fn untap_all(&mut self, player: PlayerId) {
        let permanents = self.zone_cards(player, Zone::Battlefield).to_vec();
        for id in permanents {
            if let Some(card) = self.card_mut(id) {
                card.tapped = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CounterKind;
    use crate::effects::{Ability, Effect};
    use crate::triggers::{EventKind, TriggerCondition};

    fn new_state() -> GameState {
        GameState::new(
            PlayerMap::from_pair(Player::new("Alice", 20, 7), Player::new("Bob", 20, 7)),
            7,
        )
    }

    fn bear() -> Arc<CardDefinition> {
        Arc::new(CardDefinition::new("Bear", "Creature — Bear").with_stats(2, 2))
    }

    fn land(name: &str) -> Arc<CardDefinition> {
        Arc::new(CardDefinition::new(name, "Basic Land"))
    }

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    #[test]
    fn test_create_and_move() {
        let mut state = new_state();
        let id = state.create_card(bear(), P0, Zone::Library, ZonePosition::Top);

        assert_eq!(state.zone_size(P0, Zone::Library), 1);
        let from = state.move_card(id, Zone::Hand, ZonePosition::Top).unwrap();

        assert_eq!(from, Zone::Library);
        assert_eq!(state.card(id).unwrap().zone, Zone::Hand);
        assert_eq!(state.zone_cards(P0, Zone::Hand), &[id]);
        assert!(state.zone_cards(P0, Zone::Library).is_empty());
    }

    #[test]
    fn test_move_unknown_card() {
        let mut state = new_state();
        let err = state.move_card(CardId(99), Zone::Hand, ZonePosition::Top).unwrap_err();
        assert_eq!(err, EngineError::UnknownCard(CardId(99)));
    }

    #[test]
    fn test_zone_change_resets_controller() {
        let mut state = new_state();
        let id = state.create_card(bear(), P0, Zone::Battlefield, ZonePosition::Top);

        state.gain_control(id, P1).unwrap();
        assert_eq!(state.card(id).unwrap().controller, P1);
        assert_eq!(state.zone_cards(P1, Zone::Battlefield), &[id]);
        assert!(state.zone_cards(P0, Zone::Battlefield).is_empty());

        state.move_card(id, Zone::Graveyard, ZonePosition::Top).unwrap();
        let card = state.card(id).unwrap();
        assert_eq!(card.controller, P0);
        assert_eq!(state.zone_cards(P0, Zone::Graveyard), &[id]);
    }

    #[test]
    fn test_gain_control_requires_battlefield() {
        let mut state = new_state();
        let id = state.create_card(bear(), P0, Zone::Hand, ZonePosition::Top);
        assert!(matches!(
            state.gain_control(id, P1),
            Err(EngineError::WrongZone { .. })
        ));
    }

    #[test]
    fn test_events_fire_on_enter_and_die() {
        let def = CardDefinition::new("Watcher", "Creature — Spirit")
            .with_stats(1, 1)
            .with_ability(Ability::triggered(
                TriggerCondition::enters_battlefield(),
                Effect::add_counters(CounterKind::PlusOne, 1),
            ))
            .with_ability(Ability::triggered(TriggerCondition::dies(), Effect::draw_cards(1)));
        let mut state = new_state();
        let id = state.create_card(Arc::new(def), P0, Zone::Hand, ZonePosition::Top);

        state.move_card(id, Zone::Battlefield, ZonePosition::Top).unwrap();
        assert_eq!(state.triggers.len(), 1);
        assert_eq!(state.triggers.pop().map(|t| t.event.kind), Some(EventKind::EntersBattlefield));

        state.move_card(id, Zone::Graveyard, ZonePosition::Top).unwrap();
        let dies = state.triggers.pop().unwrap();
        assert_eq!(dies.event.kind, EventKind::Dies);
        assert_eq!(dies.ability, 1);
        assert_eq!(dies.controller, P0);
    }

    #[test]
    fn test_exile_does_not_fire_dies() {
        let def = CardDefinition::new("Watcher", "Creature — Spirit")
            .with_stats(1, 1)
            .with_ability(Ability::triggered(TriggerCondition::dies(), Effect::draw_cards(1)));
        let mut state = new_state();
        let id = state.create_card(Arc::new(def), P0, Zone::Battlefield, ZonePosition::Top);

        state.move_card(id, Zone::Exile, ZonePosition::Top).unwrap();
        assert!(state.triggers.is_empty());
    }

    #[test]
    fn test_exiled_cards_return_when_source_leaves() {
        let mut state = new_state();
        let source = state.create_card(
            Arc::new(CardDefinition::new("Jailer", "Enchantment")),
            P0,
            Zone::Battlefield,
            ZonePosition::Top,
        );
        let prisoner = state.create_card(bear(), P1, Zone::Battlefield, ZonePosition::Top);

        state.exile_until_leaves(source, prisoner).unwrap();
        assert_eq!(state.card(prisoner).unwrap().zone, Zone::Exile);

        state.move_card(source, Zone::Graveyard, ZonePosition::Top).unwrap();
        assert_eq!(state.card(prisoner).unwrap().zone, Zone::Battlefield);
        assert_eq!(state.zone_cards(P1, Zone::Battlefield), &[prisoner]);
        assert!(state.log.contains("Jailer returns: Bear"));
    }

    #[test]
    fn test_draw_from_empty_library_sets_life_to_zero() {
        let mut state = new_state();
        assert_eq!(state.draw_card(P1).unwrap(), None);
        assert_eq!(state.player(P1).life, 0);
    }

    #[test]
    fn test_draw_takes_top() {
        let mut state = new_state();
        let bottom = state.create_card(bear(), P0, Zone::Library, ZonePosition::Top);
        let top = state.create_card(bear(), P0, Zone::Library, ZonePosition::Top);

        assert_eq!(state.draw_card(P0).unwrap(), Some(top));
        assert_eq!(state.zone_cards(P0, Zone::Library), &[bottom]);
    }

    #[test]
    fn test_pay_cost_taps_lands() {
        let mut state = new_state();
        let island = state.create_card(land("Island"), P0, Zone::Battlefield, ZonePosition::Top);
        let plains = state.create_card(land("Plains"), P0, Zone::Battlefield, ZonePosition::Top);
        let cost = ManaCost::parse("{1}{W}").unwrap();

        assert!(state.can_pay(P0, &cost));
        let plan = state.pay_cost(P0, &cost).unwrap();

        assert_eq!(plan.taps.as_slice(), &[plains, island]);
        assert!(state.card(island).unwrap().tapped);
        assert!(state.card(plains).unwrap().tapped);
        assert!(state.mana_sources(P0).is_empty());
    }

    #[test]
    fn test_failed_payment_changes_nothing() {
        let mut state = new_state();
        let island = state.create_card(land("Island"), P0, Zone::Battlefield, ZonePosition::Top);
        state.player_mut(P0).mana_pool.add(Color::Red, 1);
        let cost = ManaCost::parse("{1}{W}").unwrap();

        assert!(!state.can_pay(P0, &cost));
        assert!(state.pay_cost(P0, &cost).is_err());
        assert!(!state.card(island).unwrap().tapped);
        assert_eq!(state.player(P0).mana_pool.get(Color::Red), 1);
    }
}
