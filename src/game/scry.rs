use super::Game;
use crate::core::error::EngineError;
use crate::core::{CardId, PlayerId};
use crate::prompt::{card_option, scry_prompt};
use crate::zones::{Zone, ZoneKey, ZonePosition};

impl Game {
    /// Look at the top `n` cards of `player`'s library and put any number
    /// of them on the bottom. The rest stay on top in their original
    /// order, which is also the outcome of an invalid answer.
    ///
    /// Returns how many cards went to the bottom.
    pub fn scry(&mut self, player: PlayerId, n: usize) -> Result<usize, EngineError> {
        let looked = self.state.zones.top_n(ZoneKey::of(player, Zone::Library), n);
        if looked.is_empty() {
            return Ok(0);
        }

        let options = looked
            .iter()
            .filter_map(|&id| self.state.card(id))
            .map(card_option)
            .collect();
        let request = scry_prompt(options);
        let bottomed: Vec<CardId> = match self.prompts.request(&self.state, player, &request) {
            Ok(response) => looked
                .iter()
                .copied()
                .filter(|id| response.selected.contains(&id.token()))
                .collect(),
            Err(err) => {
                tracing::debug!(%player, error = %err, "scry answer unusable, keeping all on top");
                Vec::new()
            }
        };

        for &card in &bottomed {
            self.state.move_card(card, Zone::Library, ZonePosition::Bottom)?;
        }

        let name = self.state.player(player).name.clone();
        self.state.log_event(format!(
            "{} scries {}, putting {} on the bottom",
            name,
            looked.len(),
            bottomed.len()
        ));
        Ok(bottomed.len())
    }
}
