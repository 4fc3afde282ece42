//! Serializable summaries of the public game state.

use serde::{Deserialize, Serialize};

use crate::core::error::EngineError;
use crate::core::state::GameState;
use crate::core::{Phase, PlayerId};
use crate::mana::ManaPool;
use crate::zones::Zone;

/// One player's public counts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub name: String,
    pub life: i32,
    pub hand_size: usize,
    pub battlefield_size: usize,
    pub library_size: usize,
    pub graveyard_size: usize,
    pub exile_size: usize,
    pub mana_pool: ManaPool,
}

/// The state a driver needs to display or log a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub turn: u32,
    pub active_player: String,
    pub priority_player: String,
    pub phase: Phase,
    pub players: Vec<PlayerSnapshot>,
    pub stack_size: usize,
    pub game_over: bool,
    /// `None` while running or after a draw.
    pub winner: Option<String>,
}

impl GameSnapshot {
    #[must_use]
    pub fn capture(state: &GameState) -> Self {
        let players = PlayerId::all()
            .map(|p| {
                let player = state.player(p);
                PlayerSnapshot {
                    name: player.name.clone(),
                    life: player.life,
                    hand_size: state.zone_size(p, Zone::Hand),
                    battlefield_size: state.zone_size(p, Zone::Battlefield),
                    library_size: state.zone_size(p, Zone::Library),
                    graveyard_size: state.zone_size(p, Zone::Graveyard),
                    exile_size: state.zone_size(p, Zone::Exile),
                    mana_pool: player.mana_pool,
                }
            })
            .collect();

        Self {
            turn: state.turn_number,
            active_player: state.player(state.active_player).name.clone(),
            priority_player: state.player(state.priority_player).name.clone(),
            phase: state.phase,
            players,
            stack_size: state.stack.len(),
            game_over: state.game_over,
            winner: state
                .outcome
                .and_then(|r| r.winner())
                .map(|p| state.player(p).name.clone()),
        }
    }

    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, EngineError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EngineError> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// The snapshot of the player named `name`.
    #[must_use]
    pub fn player(&self, name: &str) -> Option<&PlayerSnapshot> {
        self.players.iter().find(|p| p.name == name)
    }
}
