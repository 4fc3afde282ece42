//! The game orchestrator.
//!
//! `Game` owns the state, the prompt router and the configuration. It
//! validates and executes actions, runs the priority round and the turn
//! structure, and settles the state after every action: pending triggers
//! resolve, state-based actions run to a fixed point, the game-over check
//! runs, and a priority holder with nothing to do but pass is passed for
//! automatically.

mod builder;
mod scry;
mod setup;
mod snapshot;

pub use builder::GameBuilder;
pub use snapshot::{GameSnapshot, PlayerSnapshot};

use crate::combat;
use crate::core::error::EngineError;
use crate::core::{CardId, EngineConfig, Phase, Player, PlayerId, PlayerMap};
use crate::core::state::{CombatFlags, GameState};
use crate::effects::{AbilityKind, EffectContext, EffectResolver};
use crate::prompt::{card_option, discard_prompt, PromptManager, PromptResponder};
use crate::rules::{Action, ActionError, ActionGenerator, ActionRecord, ActionValidator, GameResult, RulesEngine};
use crate::stack;
use crate::zones::{Zone, ZonePosition};

/// Upper bound on automatic passes in one settle.
const AUTO_PASS_LIMIT: usize = 1_000;

/// A running game.
#[derive(Debug)]
pub struct Game {
    pub state: GameState,
    pub prompts: PromptManager,
    config: EngineConfig,
}

impl Game {
    /// Wrap an existing state.
    #[must_use]
    pub fn new(state: GameState, config: EngineConfig) -> Self {
        Self {
            state,
            prompts: PromptManager::new(),
            config,
        }
    }

    /// Two players with empty zones and no turn started.
    #[must_use]
    pub fn new_empty(seed: u64) -> Self {
        let config = EngineConfig::default().with_seed(seed);
        let players = PlayerMap::new(|p| {
            Player::new(
                format!("Player {}", p.index() + 1),
                config.starting_life,
                config.max_hand_size,
            )
        });
        Self::new(GameState::new(players, seed), config)
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Install the decision source for `player`.
    pub fn register_prompt_callback(&mut self, player: PlayerId, responder: impl PromptResponder + 'static) {
        self.prompts.register(player, responder);
    }

    // === Driver surface ===

    /// Legal actions for `player`, after settling any automatic passes.
    pub fn get_legal_actions(&mut self, player: PlayerId) -> Vec<Action> {
        self.settle();
        ActionGenerator::legal_actions(&self.state, player)
    }

    /// Execute an action. Rejections and failures are logged and reported
    /// as `false`.
    pub fn execute_action(&mut self, player: PlayerId, action: &Action) -> bool {
        match self.try_execute(player, action) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(%player, action = action.name(), error = %err, "action rejected");
                let who = self.state.player(player).name.clone();
                self.state
                    .log_event(format!("{} could not {}: {}", who, action.name(), err));
                false
            }
        }
    }

    /// Validate and execute an action, returning why it was rejected.
    pub fn try_execute(&mut self, player: PlayerId, action: &Action) -> Result<(), ActionError> {
        ActionValidator::validate(&self.state, player, action)?;
        let turn = self.state.turn_number;

        if action.is_pass() {
            self.pass_priority();
        } else {
            self.dispatch(player, action)?;
            self.state.consecutive_passes = 0;
            self.state.priority_player = player;
        }

        // Only actions that took effect are recorded.
        let sequence = self.state.history.len() as u32;
        self.state
            .history
            .push_back(ActionRecord::new(player, action.clone(), turn, sequence));

        self.settle();
        Ok(())
    }

    fn dispatch(&mut self, player: PlayerId, action: &Action) -> Result<(), EngineError> {
        match action {
            Action::PassPriority => Ok(()),
            Action::PlayLand { card } => self.play_land(player, *card),
            Action::CastSpell { card, targets } => {
                stack::cast_spell(self, player, *card, targets)?;
                Ok(())
            }
            Action::ActivateAbility { card, ability } => self.activate_ability(player, *card, *ability),
            Action::DeclareAttackers { attackers } => {
                combat::declare_attackers(&mut self.state, player, attackers)
            }
            Action::DeclareBlockers { .. } => {
                combat::declare_no_blockers(&mut self.state, player);
                Ok(())
            }
        }
    }

    fn play_land(&mut self, player: PlayerId, card: CardId) -> Result<(), EngineError> {
        self.state.move_card(card, Zone::Battlefield, ZonePosition::Top)?;
        self.state.player_mut(player).land_played_this_turn = true;
        let message = format!("{} plays {}", self.state.player(player).name, self.state.card_name(card));
        self.state.log_event(message);
        Ok(())
    }

    /// Pay an activated ability's cost and apply its effect at once.
    ///
    /// The source is marked tapped before mana is paid so it never pays
    /// for itself; a failed payment untaps it again.
    fn activate_ability(&mut self, player: PlayerId, card: CardId, index: usize) -> Result<(), EngineError> {
        let source = self.state.expect_zone(card, Zone::Battlefield)?;
        let ability = source
            .definition()
            .abilities
            .get(index)
            .cloned()
            .ok_or(EngineError::UnknownAbility { card, index })?;
        let AbilityKind::Activated(cost) = ability.kind else {
            return Err(EngineError::UnknownAbility { card, index });
        };
        let name = source.name().to_string();
        let was_tapped = source.tapped;

        if cost.tap || cost.sacrifice {
            self.state.get_card_mut(card)?.tapped = true;
        }
        if let Err(err) = self.state.pay_cost(player, &cost.mana) {
            self.state.get_card_mut(card)?.tapped = was_tapped;
            return Err(err);
        }
        if cost.sacrifice {
            self.state.move_card(card, Zone::Graveyard, ZonePosition::Top)?;
        }

        if ability.effect.produced_color().is_none() {
            let who = self.state.player(player).name.clone();
            self.state
                .log_event(format!("{} activates {}: {}", who, name, ability.effect.description));
        }
        EffectResolver::execute(self, &ability.effect, &EffectContext::new(card, player))
    }

    // === Priority and turn structure ===

    /// Record a pass by the priority holder.
    ///
    /// The second pass in a row resolves the top of the stack (priority
    /// returns to the active player) or, with an empty stack, advances the
    /// phase. A single pass hands priority to the opponent.
    pub fn pass_priority(&mut self) {
        if self.state.game_over {
            return;
        }
        self.state.consecutive_passes += 1;
        if self.state.consecutive_passes < 2 {
            self.state.priority_player = self.state.priority_player.opponent();
            tracing::debug!(priority = %self.state.priority_player, "priority passed");
            return;
        }

        self.state.consecutive_passes = 0;
        if self.state.stack.is_empty() {
            self.advance_phase();
        } else {
            stack::resolve_top(self);
            self.state.priority_player = self.state.active_player;
        }
    }

    /// Move to the next phase, running automatic phases through. Leaving
    /// cleanup starts the opponent's turn.
    pub fn advance_phase(&mut self) {
        while !self.state.game_over {
            let next = match self.state.phase.next() {
                Some(next) => next,
                None => {
                    let next_player = self.state.active_player.opponent();
                    self.start_turn(next_player);
                    Phase::Untap
                }
            };
            if !self.enter_phase(next) {
                break;
            }
        }
    }

    /// Begin the game with `player`'s first turn.
    pub(crate) fn begin(&mut self, player: PlayerId) {
        self.start_turn(player);
        if self.enter_phase(Phase::Untap) {
            self.advance_phase();
        }
        self.settle();
    }

    fn start_turn(&mut self, player: PlayerId) {
        self.state.turn_number += 1;
        self.state.active_player = player;
        self.state.priority_player = player;
        self.state.player_mut(player).start_turn();

        for id in self.state.zone_cards(player, Zone::Battlefield).to_vec() {
            if let Some(card) = self.state.card_mut(id) {
                card.summoning_sick = false;
            }
        }

        let message = format!("Turn {}: {}", self.state.turn_number, self.state.player(player).name);
        self.state.log_event(message);
    }

    /// Enter `phase` and run its entry action. Returns whether the phase
    /// is automatic, i.e. the caller should advance again.
    fn enter_phase(&mut self, phase: Phase) -> bool {
        let active = self.state.active_player;
        self.state.phase = phase;
        self.state.consecutive_passes = 0;
        self.state.priority_player = if phase == Phase::DeclareBlockers {
            active.opponent()
        } else {
            active
        };
        tracing::debug!(%phase, turn = self.state.turn_number, %active, "phase entered");

        match phase {
            Phase::Untap => self.state.untap_all(active),
            Phase::Draw => self.draw_step(),
            Phase::CombatBegin => self.state.combat = CombatFlags::default(),
            Phase::CombatDamage => {
                combat::deal_combat_damage(&mut self.state);
            }
            Phase::CombatEnd => combat::end_combat(&mut self.state),
            Phase::Cleanup => self.cleanup(),
            _ => {}
        }

        if phase.is_automatic() {
            self.check_state();
        }
        phase.is_automatic()
    }

    fn draw_step(&mut self) {
        let active = self.state.active_player;
        if self.config.skip_first_draw && self.state.turn_number == 1 {
            let message = format!("{} skips the first draw", self.state.player(active).name);
            self.state.log_event(message);
            return;
        }
        if let Err(err) = self.state.draw_card(active) {
            tracing::warn!(player = %active, error = %err, "draw failed");
        }
    }

    fn cleanup(&mut self) {
        let active = self.state.active_player;
        if let Err(err) = self.discard_to_hand_size(active) {
            tracing::warn!(player = %active, error = %err, "cleanup discard failed");
        }

        for player in PlayerId::all() {
            self.state.player_mut(player).mana_pool.empty();
        }
        for id in self.state.battlefield_cards() {
            if let Some(card) = self.state.card_mut(id) {
                card.granted_keywords.clear();
            }
        }
    }

    /// Discard down to the maximum hand size. The default discards a
    /// random selection.
    fn discard_to_hand_size(&mut self, player: PlayerId) -> Result<(), EngineError> {
        let hand = self.state.zone_cards(player, Zone::Hand).to_vec();
        let limit = self.state.player(player).max_hand_size;
        if hand.len() <= limit {
            return Ok(());
        }
        let excess = hand.len() - limit;

        let default: Vec<String> = self
            .state
            .rng
            .sample(&hand, excess)
            .into_iter()
            .map(CardId::token)
            .collect();
        let options = hand
            .iter()
            .filter_map(|&id| self.state.card(id))
            .map(card_option)
            .collect();
        let request = discard_prompt(options, excess, default);
        let response = self.prompts.request(&self.state, player, &request)?;

        let mut names = Vec::new();
        for card in response.selected.iter().filter_map(|t| CardId::parse_token(t)) {
            names.push(self.state.card_name(card));
            self.state.move_card(card, Zone::Graveyard, ZonePosition::Top)?;
        }
        let who = self.state.player(player).name.clone();
        self.state.log_event(format!("{} discards {}", who, names.join(", ")));
        Ok(())
    }

    // === Settling ===

    /// Bring the state to rest, then pass for a priority holder whose only
    /// legal action is to pass.
    pub fn settle(&mut self) {
        self.check_state();
        for _ in 0..AUTO_PASS_LIMIT {
            if self.state.game_over {
                return;
            }
            let holder = self.state.priority_player;
            let actions = ActionGenerator::legal_actions(&self.state, holder);
            if !(actions.len() == 1 && actions[0].is_pass()) {
                return;
            }
            self.pass_priority();
            self.check_state();
        }
        tracing::warn!(turn = self.state.turn_number, "automatic passing did not settle");
    }

    /// Resolve triggers and state-based actions to a fixed point, then
    /// check whether the game has ended.
    pub fn check_state(&mut self) {
        loop {
            EffectResolver::resolve_triggers(self);
            match combat::state_based_pass(&mut self.state) {
                Ok(0) => break,
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(error = %err, "state-based actions failed");
                    break;
                }
            }
        }
        self.check_game_over();
    }

    fn check_game_over(&mut self) {
        if self.state.game_over {
            return;
        }

        let losers: Vec<PlayerId> = PlayerId::all()
            .filter(|&p| !self.state.player(p).is_alive())
            .collect();
        let result = match losers.as_slice() {
            [] => match self.config.turn_limit {
                Some(limit) if self.state.turn_number > limit => {
                    self.state
                        .log_event(format!("Turn limit of {} reached", limit));
                    Some(GameResult::Draw)
                }
                _ => None,
            },
            [loser] => Some(GameResult::Winner(loser.opponent())),
            _ => Some(GameResult::Draw),
        };

        let Some(result) = result else { return };
        self.state.game_over = true;
        self.state.outcome = Some(result);
        match result {
            GameResult::Winner(winner) => {
                let name = self.state.player(winner).name.clone();
                self.state.log_event(format!("{} wins the game", name));
            }
            GameResult::Draw => self.state.log_event("The game is a draw"),
        }
        tracing::info!(?result, turn = self.state.turn_number, "game over");
    }

    // === Outcome ===

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state.game_over
    }

    /// The winner, or `None` while running or after a draw.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.state.outcome.and_then(|r| r.winner())
    }

    #[must_use]
    pub fn outcome(&self) -> Option<GameResult> {
        self.state.outcome
    }

    /// A serializable summary of the public state.
    #[must_use]
    pub fn save_state(&self) -> GameSnapshot {
        GameSnapshot::capture(&self.state)
    }
}

impl RulesEngine for Game {
    fn priority_player(&self) -> PlayerId {
        self.state.priority_player
    }

    fn legal_actions(&mut self, player: PlayerId) -> Vec<Action> {
        self.get_legal_actions(player)
    }

    fn apply_action(&mut self, player: PlayerId, action: &Action) -> Result<(), ActionError> {
        self.try_execute(player, action)
    }

    fn result(&self) -> Option<GameResult> {
        self.outcome()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cards::{catalog, CardDefinition};
    use crate::prompt::{PromptResponse, ScriptedResponder};

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    fn put(game: &mut Game, def: CardDefinition, owner: PlayerId, zone: Zone) -> CardId {
        game.state.create_card(Arc::new(def), owner, zone, ZonePosition::Top)
    }

    fn main_phase_game() -> Game {
        let mut game = Game::new_empty(3);
        game.state.turn_number = 2;
        game.state.phase = Phase::Main1;
        game
    }

    #[test]
    fn test_single_pass_flips_priority() {
        let mut game = main_phase_game();
        game.pass_priority();
        assert_eq!(game.state.priority_player, P1);
        assert_eq!(game.state.consecutive_passes, 1);
        assert_eq!(game.state.phase, Phase::Main1);
    }

    #[test]
    fn test_two_passes_advance_one_phase() {
        let mut game = main_phase_game();
        game.pass_priority();
        game.pass_priority();
        assert_eq!(game.state.phase, Phase::CombatBegin);
        assert_eq!(game.state.priority_player, P0);
        assert_eq!(game.state.consecutive_passes, 0);
    }

    #[test]
    fn test_two_passes_resolve_stack_top() {
        let mut game = main_phase_game();
        for _ in 0..3 {
            put(&mut game, catalog::plains(), P0, Zone::Battlefield);
        }
        let light = put(&mut game, catalog::banishing_light(), P0, Zone::Hand);
        let victim = put(&mut game, catalog::illvoi_galeblade(), P1, Zone::Battlefield);

        stack::cast_spell(&mut game, P0, light, &[victim]).unwrap();
        assert_eq!(game.state.stack.len(), 1);

        game.pass_priority();
        game.pass_priority();
        assert!(game.state.stack.is_empty());
        assert_eq!(game.state.card(victim).unwrap().zone, Zone::Exile);
        assert_eq!(game.state.phase, Phase::Main1);
        assert_eq!(game.state.priority_player, P0);
    }

    #[test]
    fn test_cleanup_ends_turn() {
        let mut game = main_phase_game();
        game.state.phase = Phase::End;
        put(&mut game, catalog::forest(), P1, Zone::Library);
        game.state.player_mut(P0).mana_pool.add(crate::mana::Color::Red, 2);

        game.pass_priority();
        game.pass_priority();

        assert_eq!(game.state.turn_number, 3);
        assert_eq!(game.state.active_player, P1);
        assert_eq!(game.state.phase, Phase::Upkeep);
        assert!(game.state.player(P0).mana_pool.is_empty());
        assert_eq!(game.state.player(P1).turn_count, 1);
    }

    #[test]
    fn test_draw_step_draws_after_first_turn() {
        let mut game = main_phase_game();
        game.state.phase = Phase::Upkeep;
        put(&mut game, catalog::island(), P0, Zone::Library);

        game.pass_priority();
        game.pass_priority();
        assert_eq!(game.state.phase, Phase::Main1);
        assert_eq!(game.state.zone_size(P0, Zone::Hand), 1);
    }

    #[test]
    fn test_begin_skips_first_draw() {
        let mut game = Game::new_empty(3);
        put(&mut game, catalog::island(), P0, Zone::Library);
        put(&mut game, catalog::plains(), P0, Zone::Hand);

        game.begin(P0);
        assert_eq!(game.state.turn_number, 1);
        assert_eq!(game.state.zone_size(P0, Zone::Library), 1);
        assert!(game.state.log.contains("skips the first draw"));
    }

    #[test]
    fn test_discard_to_hand_size_uses_prompt() {
        let mut game = main_phase_game();
        game.state.player_mut(P0).max_hand_size = 1;
        let keep = put(&mut game, catalog::plains(), P0, Zone::Hand);
        let toss = put(&mut game, catalog::island(), P0, Zone::Hand);
        game.register_prompt_callback(P0, ScriptedResponder::new([PromptResponse::select_one(toss.token())]));

        game.discard_to_hand_size(P0).unwrap();
        assert_eq!(game.state.card(keep).unwrap().zone, Zone::Hand);
        assert_eq!(game.state.card(toss).unwrap().zone, Zone::Graveyard);
    }

    #[test]
    fn test_discard_default_is_random_selection() {
        let mut game = main_phase_game();
        game.state.player_mut(P0).max_hand_size = 2;
        for _ in 0..5 {
            put(&mut game, catalog::swamp(), P0, Zone::Hand);
        }

        game.discard_to_hand_size(P0).unwrap();
        assert_eq!(game.state.zone_size(P0, Zone::Hand), 2);
        assert_eq!(game.state.zone_size(P0, Zone::Graveyard), 3);
    }

    #[test]
    fn test_rejected_action_reports_false() {
        let mut game = main_phase_game();
        let land = put(&mut game, catalog::plains(), P0, Zone::Hand);

        assert!(!game.execute_action(P1, &Action::PlayLand { card: land }));
        assert!(matches!(
            game.try_execute(P1, &Action::PassPriority),
            Err(ActionError::NotPriorityHolder { .. })
        ));
        assert!(game.state.history.is_empty());
    }

    #[test]
    fn test_action_keeps_priority_and_resets_passes() {
        let mut game = main_phase_game();
        let land = put(&mut game, catalog::plains(), P0, Zone::Hand);
        game.state.consecutive_passes = 1;

        assert!(game.execute_action(P0, &Action::PlayLand { card: land }));
        assert_eq!(game.state.priority_player, P0);
        assert_eq!(game.state.consecutive_passes, 0);
        assert!(game.state.player(P0).land_played_this_turn);
        assert_eq!(game.state.history.len(), 1);
    }

    #[test]
    fn test_sacrifice_ability_draws() {
        let mut game = main_phase_game();
        put(&mut game, catalog::island(), P0, Zone::Battlefield);
        put(&mut game, catalog::island(), P0, Zone::Battlefield);
        put(&mut game, catalog::plains(), P0, Zone::Library);
        let blade = put(&mut game, catalog::illvoi_galeblade(), P0, Zone::Battlefield);
        let index = game.state.card(blade).unwrap().definition().abilities.len() - 1;

        assert!(game.execute_action(P0, &Action::ActivateAbility { card: blade, ability: index }));
        assert_eq!(game.state.card(blade).unwrap().zone, Zone::Graveyard);
        assert_eq!(game.state.zone_size(P0, Zone::Hand), 1);
    }

    #[test]
    fn test_both_players_dead_is_draw() {
        let mut game = main_phase_game();
        game.state.player_mut(P0).life = 0;
        game.state.player_mut(P1).life = -3;
        game.check_state();
        assert_eq!(game.outcome(), Some(GameResult::Draw));
        assert_eq!(game.winner(), None);
        assert!(game.get_legal_actions(P0).is_empty());
    }

    #[test]
    fn test_turn_limit_is_draw() {
        let config = EngineConfig::default().with_turn_limit(1);
        let mut game = Game::new(Game::new_empty(1).state, config);
        game.state.turn_number = 2;
        game.check_state();
        assert_eq!(game.outcome(), Some(GameResult::Draw));
    }
}
