//! Card instance identification.
//!
//! Every physical card in a game gets a `CardId` when it is created at
//! deck-construction time. Ids are allocated sequentially by the
//! `GameState` arena and are never reused within a game.
//!
//! ## Usage
//!
//! ```
//! use mtg_rules::core::CardId;
//!
//! let id = CardId::new(7);
//! assert_eq!(id.raw(), 7);
//! assert_eq!(id.to_string(), "Card(7)");
//! assert_eq!(CardId::parse_token(&id.token()), Some(id));
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance.
///
/// Cards are addressed by id everywhere: zone lists, the stack, prompt
/// options and actions all carry `CardId`s rather than references.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Opaque token used for this card in prompt options.
    ///
    /// Decision sources only ever see tokens, never engine types.
    #[must_use]
    pub fn token(self) -> String {
        format!("card-{}", self.0)
    }

    /// Parse a token produced by [`CardId::token`].
    #[must_use]
    pub fn parse_token(token: &str) -> Option<Self> {
        token
            .strip_prefix("card-")
            .and_then(|raw| raw.parse::<u32>().ok())
            .map(Self)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id_basics() {
        let id = CardId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Card(42)");
    }

    #[test]
    fn test_token_round_trip() {
        let id = CardId::new(1234);
        assert_eq!(id.token(), "card-1234");
        assert_eq!(CardId::parse_token("card-1234"), Some(id));
    }

    #[test]
    fn test_parse_token_rejects_garbage() {
        assert_eq!(CardId::parse_token("1234"), None);
        assert_eq!(CardId::parse_token("card-"), None);
        assert_eq!(CardId::parse_token("card-x1"), None);
        assert_eq!(CardId::parse_token("player-1"), None);
    }

    #[test]
    fn test_ordering() {
        assert!(CardId::new(1) < CardId::new(2));
    }

    #[test]
    fn test_serialization() {
        let id = CardId::new(9);
        let json = serde_json::to_string(&id).unwrap();
        let back: CardId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
