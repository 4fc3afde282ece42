//! Pending-trigger queue.
//!
//! The `TriggerManager` is owned by `GameState`. Zone transfers report
//! each event through [`TriggerManager::collect`], which scans every
//! permanent on both battlefields for matching triggered abilities and
//! queues them. The orchestrator then drains the queue strictly FIFO,
//! including triggers queued while earlier ones resolve.

use std::collections::VecDeque;

use super::event::{EventKind, GameEvent};
use crate::core::state::GameState;
use crate::core::{CardId, PlayerId};
use crate::zones::Zone;

/// A triggered ability waiting to resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingTrigger {
    /// The card the ability belongs to.
    pub source: CardId,
    /// Index into the source definition's ability list.
    pub ability: usize,
    /// Player who controls the trigger.
    pub controller: PlayerId,
    pub event: GameEvent,
}

/// FIFO queue of pending triggers.
#[derive(Clone, Debug, Default)]
pub struct TriggerManager {
    queue: VecDeque<PendingTrigger>,
}

impl TriggerManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Find every triggered ability that fires for `event`.
    ///
    /// Scans player 0's battlefield then player 1's, each in zone order.
    /// For a dies event the dying card itself is also checked, since it is
    /// already in the graveyard when the event is fired.
    #[must_use]
    pub fn collect(state: &GameState, event: &GameEvent) -> Vec<PendingTrigger> {
        let mut sources: Vec<(CardId, PlayerId)> = Vec::new();
        for player in PlayerId::all() {
            for &card in state.zone_cards(player, Zone::Battlefield) {
                if let Some(instance) = state.card(card) {
                    sources.push((card, instance.controller));
                }
            }
        }
        if event.kind == EventKind::Dies && !sources.iter().any(|(c, _)| *c == event.card) {
            sources.push((event.card, event.player));
        }

        let mut found = Vec::new();
        for (source, controller) in sources {
            let Some(card) = state.card(source) else {
                continue;
            };
            for (index, ability) in card.definition().abilities.iter().enumerate() {
                let fires = ability
                    .trigger_condition()
                    .is_some_and(|condition| condition.matches(source, event));
                if fires && !card.is_ability_disabled(index) {
                    found.push(PendingTrigger {
                        source,
                        ability: index,
                        controller,
                        event: *event,
                    });
                }
            }
        }
        found
    }

    /// Queue triggers in order.
    pub fn enqueue(&mut self, triggers: impl IntoIterator<Item = PendingTrigger>) {
        self.queue.extend(triggers);
    }

    /// Take the oldest pending trigger.
    pub fn pop(&mut self) -> Option<PendingTrigger> {
        self.queue.pop_front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingTrigger> {
        self.queue.iter()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
