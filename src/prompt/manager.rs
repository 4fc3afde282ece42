//! Prompt routing.
//!
//! The `PromptManager` maps each seat to a decision source. A request goes
//! to that player's responder; when there is no responder, the responder
//! fails, or its answer does not validate, the request's default is used
//! instead. Only when there is no default does the caller see an error.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::error::PromptError;
use super::request::{PromptRequest, PromptResponse};
use crate::core::state::GameState;
use crate::core::{PlayerId, PlayerMap};

/// A decision source for one player.
///
/// Implemented for any `FnMut(&GameState, PlayerId, &PromptRequest)`
/// closure returning a response or an error message.
pub trait PromptResponder {
    fn respond(
        &mut self,
        state: &GameState,
        player: PlayerId,
        request: &PromptRequest,
    ) -> Result<PromptResponse, String>;
}

impl<F> PromptResponder for F
where
    F: FnMut(&GameState, PlayerId, &PromptRequest) -> Result<PromptResponse, String>,
{
    fn respond(
        &mut self,
        state: &GameState,
        player: PlayerId,
        request: &PromptRequest,
    ) -> Result<PromptResponse, String> {
        self(state, player, request)
    }
}

/// Plays back queued responses in order and records every request.
///
/// Once the queue runs dry it fails, so requests fall back to their
/// defaults.
///
/// ```
/// use mtg_rules::prompt::{PromptResponse, ScriptedResponder};
///
/// let responder = ScriptedResponder::new([PromptResponse::yes_no(true)]);
/// let seen = responder.history();
/// assert!(seen.borrow().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct ScriptedResponder {
    responses: VecDeque<PromptResponse>,
    history: Rc<RefCell<Vec<PromptRequest>>>,
}

impl ScriptedResponder {
    #[must_use]
    pub fn new(responses: impl IntoIterator<Item = PromptResponse>) -> Self {
        Self {
            responses: responses.into_iter().collect(),
            history: Rc::default(),
        }
    }

    /// Shared handle to the requests seen so far.
    #[must_use]
    pub fn history(&self) -> Rc<RefCell<Vec<PromptRequest>>> {
        Rc::clone(&self.history)
    }
}

impl PromptResponder for ScriptedResponder {
    fn respond(
        &mut self,
        _state: &GameState,
        _player: PlayerId,
        request: &PromptRequest,
    ) -> Result<PromptResponse, String> {
        self.history.borrow_mut().push(request.clone());
        self.responses
            .pop_front()
            .ok_or_else(|| "no scripted response left".to_string())
    }
}

/// Routes prompts to each player's responder.
pub struct PromptManager {
    responders: PlayerMap<Option<Box<dyn PromptResponder>>>,
}

impl Default for PromptManager {
    fn default() -> Self {
        Self {
            responders: PlayerMap::new(|_| None),
        }
    }
}

impl std::fmt::Debug for PromptManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registered: Vec<PlayerId> = self
            .responders
            .iter()
            .filter(|(_, r)| r.is_some())
            .map(|(p, _)| p)
            .collect();
        f.debug_struct("PromptManager")
            .field("registered", &registered)
            .finish()
    }
}

impl PromptManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a player's responder.
    pub fn register(&mut self, player: PlayerId, responder: impl PromptResponder + 'static) {
        self.responders[player] = Some(Box::new(responder));
    }

    #[must_use]
    pub fn has_responder(&self, player: PlayerId) -> bool {
        self.responders[player].is_some()
    }

    /// Ask `player` to decide `request`.
    pub fn request(
        &mut self,
        state: &GameState,
        player: PlayerId,
        request: &PromptRequest,
    ) -> Result<PromptResponse, PromptError> {
        let Some(responder) = self.responders[player].as_mut() else {
            tracing::debug!(%player, title = %request.title, "no responder, using default");
            return request.default.clone().ok_or_else(|| PromptError::NoResponder {
                title: request.title.clone(),
            });
        };

        let error = match responder.respond(state, player, request) {
            Ok(response) => match request.validate(&response) {
                Ok(()) => return Ok(response),
                Err(err) => err,
            },
            Err(message) => PromptError::ResponderFailed(message),
        };

        tracing::warn!(%player, title = %request.title, %error, "prompt failed");
        request.default.clone().ok_or(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Player;
    use crate::prompt::PromptKind;

    fn state() -> GameState {
        GameState::new(
            PlayerMap::from_pair(Player::new("Alice", 20, 7), Player::new("Bob", 20, 7)),
            1,
        )
    }

    fn yes_no(default: Option<bool>) -> PromptRequest {
        let request = PromptRequest::new(PromptKind::YesNo, "Continue?");
        match default {
            Some(value) => request.with_default(PromptResponse::yes_no(value)),
            None => request,
        }
    }

    #[test]
    fn test_no_responder_uses_default() {
        let mut manager = PromptManager::new();
        let response = manager
            .request(&state(), PlayerId::new(0), &yes_no(Some(true)))
            .unwrap();
        assert_eq!(response.confirmed, Some(true));
    }

    #[test]
    fn test_no_responder_without_default_fails() {
        let mut manager = PromptManager::new();
        let err = manager
            .request(&state(), PlayerId::new(0), &yes_no(None))
            .unwrap_err();
        assert!(matches!(err, PromptError::NoResponder { .. }));
    }

    #[test]
    fn test_closure_responder() {
        let mut manager = PromptManager::new();
        manager.register(
            PlayerId::new(1),
            |_: &GameState, _: PlayerId, _: &PromptRequest| -> Result<PromptResponse, String> {
                Ok(PromptResponse::yes_no(false))
            },
        );

        let response = manager
            .request(&state(), PlayerId::new(1), &yes_no(Some(true)))
            .unwrap();
        assert_eq!(response.confirmed, Some(false));
        assert!(!manager.has_responder(PlayerId::new(0)));
    }

    #[test]
    fn test_failing_responder_falls_back() {
        let mut manager = PromptManager::new();
        manager.register(
            PlayerId::new(0),
            |_: &GameState, _: PlayerId, _: &PromptRequest| -> Result<PromptResponse, String> {
                Err("agent crashed".to_string())
            },
        );

        let response = manager
            .request(&state(), PlayerId::new(0), &yes_no(Some(true)))
            .unwrap();
        assert_eq!(response.confirmed, Some(true));

        let err = manager
            .request(&state(), PlayerId::new(0), &yes_no(None))
            .unwrap_err();
        assert_eq!(err, PromptError::ResponderFailed("agent crashed".into()));
    }

    #[test]
    fn test_invalid_response_without_default_is_an_error() {
        let mut manager = PromptManager::new();
        manager.register(PlayerId::new(0), ScriptedResponder::new([PromptResponse::text("yes")]));

        let err = manager
            .request(&state(), PlayerId::new(0), &yes_no(None))
            .unwrap_err();
        assert!(matches!(err, PromptError::InvalidResponse(_)));
    }

    #[test]
    fn test_scripted_responder_records_requests() {
        let responder = ScriptedResponder::new([PromptResponse::yes_no(true)]);
        let history = responder.history();
        let mut manager = PromptManager::new();
        manager.register(PlayerId::new(0), responder);

        manager.request(&state(), PlayerId::new(0), &yes_no(Some(false))).unwrap();
        let second = manager
            .request(&state(), PlayerId::new(0), &yes_no(Some(false)))
            .unwrap();

        // Queue exhausted on the second request, so the default applies.
        assert_eq!(second.confirmed, Some(false));
        assert_eq!(history.borrow().len(), 2);
    }
}
