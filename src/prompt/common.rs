//! Prompt factories for the decisions the engine asks for.
//!
//! Every factory fills in option ids (card tokens) and, where the engine
//! can continue without an answer, a default response.

use super::request::{PromptKind, PromptOption, PromptRequest, PromptResponse};
use crate::cards::Card;
use crate::mana::Color;

/// Option for a card: its token as id, name and stats as label.
#[must_use]
pub fn card_option(card: &Card) -> PromptOption {
    let label = if card.is_creature() {
        format!("{} ({}/{})", card.name(), card.power(), card.toughness())
    } else {
        card.name().to_string()
    };
    PromptOption::new(card.id.token(), label)
}

/// Choose one target among `candidates`.
#[must_use]
pub fn target_prompt(title: impl Into<String>, candidates: Vec<PromptOption>) -> PromptRequest {
    PromptRequest::new(PromptKind::Target, title)
        .with_description("Choose a target")
        .with_options(candidates)
}

/// Choose `min..=max` cards. Single-card picks use `CardChoice`.
#[must_use]
pub fn card_choice_prompt(
    title: impl Into<String>,
    candidates: Vec<PromptOption>,
    min: usize,
    max: usize,
) -> PromptRequest {
    let kind = if max > 1 {
        PromptKind::MultiChoice
    } else {
        PromptKind::CardChoice
    };
    PromptRequest::new(kind, title)
        .with_options(candidates)
        .with_choices(min, max)
}

/// Keep or mulligan. Defaults to keeping.
#[must_use]
pub fn mulligan_prompt(mulligan_count: u32, hand_size: usize, lands: usize, spells: usize) -> PromptRequest {
    PromptRequest::new(PromptKind::YesNo, "Mulligan?")
        .with_description(format!(
            "Your hand has {} cards ({} lands, {} spells). Mulligan?",
            hand_size, lands, spells
        ))
        .with_default(PromptResponse::yes_no(false))
        .with_context("mulligan_count", i64::from(mulligan_count))
        .with_context("hand_size", hand_size as i64)
        .with_context("lands", lands as i64)
        .with_context("spells", spells as i64)
}

/// Put exactly `count` cards from hand on the bottom of the library.
#[must_use]
pub fn bottom_cards_prompt(hand: Vec<PromptOption>, count: usize) -> PromptRequest {
    PromptRequest::new(PromptKind::MultiChoice, "Choose cards to put on the bottom")
        .with_description(format!(
            "You kept after {} mulligan(s). Put {} card(s) on the bottom of your library.",
            count, count
        ))
        .with_options(hand)
        .with_choices(count, count)
        .with_context("count", count as i64)
}

/// Discard down to hand size.
#[must_use]
pub fn discard_prompt(hand: Vec<PromptOption>, count: usize, default: Vec<String>) -> PromptRequest {
    PromptRequest::new(PromptKind::MultiChoice, "Discard to hand size")
        .with_description(format!("Discard {} card(s).", count))
        .with_options(hand)
        .with_choices(count, count)
        .with_default(PromptResponse::select(default))
        .with_context("count", count as i64)
}

/// Scry: choose which of the looked-at cards go to the bottom.
#[must_use]
pub fn scry_prompt(cards: Vec<PromptOption>) -> PromptRequest {
    let count = cards.len();
    PromptRequest::new(PromptKind::MultiChoice, format!("Scry {}", count))
        .with_description("Choose cards to put on the bottom. The rest stay on top in order.")
        .with_options(cards)
        .with_choices(0, count)
        .with_default(PromptResponse::none())
}

/// Name a creature type.
#[must_use]
pub fn creature_type_prompt() -> PromptRequest {
    PromptRequest::new(PromptKind::Text, "Choose a creature type")
        .with_default(PromptResponse::text("Human"))
}

/// Choose one color among `colors`. Defaults to the first.
#[must_use]
pub fn color_choice_prompt(colors: &[Color]) -> PromptRequest {
    let mut request = PromptRequest::new(PromptKind::Choice, "Choose a color").with_options(
        colors
            .iter()
            .map(|c| PromptOption::new(c.name(), c.symbol().to_string())),
    );
    if let Some(first) = colors.first() {
        request = request.with_default(PromptResponse::select_one(first.name()));
    }
    request
}

/// Choose a number in `min..=max`. Defaults to `min`.
#[must_use]
pub fn number_prompt(title: impl Into<String>, min: i64, max: i64) -> PromptRequest {
    PromptRequest::new(PromptKind::Number, title)
        .with_bounds(min, max)
        .with_default(PromptResponse::number(min))
}

#[must_use]
pub fn yes_no_prompt(title: impl Into<String>, default: bool) -> PromptRequest {
    PromptRequest::new(PromptKind::YesNo, title).with_default(PromptResponse::yes_no(default))
}

/// Option ids for [`play_or_draw_prompt`].
pub const PLAY: &str = "play";
pub const DRAW: &str = "draw";

/// Coin-flip winner chooses to play first or draw. Defaults to play.
#[must_use]
pub fn play_or_draw_prompt() -> PromptRequest {
    PromptRequest::new(PromptKind::Choice, "You won the coin flip")
        .with_description("Play first or draw first?")
        .with_option(PLAY, "Play first")
        .with_option(DRAW, "Draw first")
        .with_default(PromptResponse::select_one(PLAY))
}
