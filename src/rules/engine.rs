//! Driver-facing rules surface.
//!
//! A driver only needs `RulesEngine`: list the priority holder's legal
//! actions, submit one, and stop once a result exists.

use serde::{Deserialize, Serialize};

use super::actions::Action;
use super::error::ActionError;
use crate::core::player::PlayerId;

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Both players lost at once, or the turn limit ran out.
    Draw,
}

impl GameResult {
    /// Whether `player` is the sole winner.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            GameResult::Winner(p) => Some(*p),
            GameResult::Draw => None,
        }
    }
}

/// What a driver needs to play a game to completion.
///
/// `legal_actions` is empty for anyone but the priority holder, and a
/// rejected `apply_action` leaves the game unchanged.
pub trait RulesEngine {
    /// Player who may act next.
    fn priority_player(&self) -> PlayerId;

    /// Legal actions for `player`. May advance automatic phases first.
    fn legal_actions(&mut self, player: PlayerId) -> Vec<Action>;

    /// Validate and execute an action.
    fn apply_action(&mut self, player: PlayerId, action: &Action) -> Result<(), ActionError>;

    /// The outcome, once the game has ended.
    fn result(&self) -> Option<GameResult>;

    fn is_terminal(&self) -> bool {
        self.result().is_some()
    }

    /// Drive the game with `choose` picking among the priority holder's
    /// legal actions, for at most `max_steps` actions.
    ///
    /// Returns the result if the game ended.
    fn run_with<F>(&mut self, max_steps: usize, mut choose: F) -> Option<GameResult>
    where
        Self: Sized,
        F: FnMut(&Self, PlayerId, &[Action]) -> usize,
    {
        for _ in 0..max_steps {
            if self.is_terminal() {
                break;
            }
            let player = self.priority_player();
            let actions = self.legal_actions(player);
            if actions.is_empty() {
                break;
            }
            let index = choose(self, player, &actions).min(actions.len() - 1);
            if self.apply_action(player, &actions[index]).is_err() {
                break;
            }
        }
        self.result()
    }
}
