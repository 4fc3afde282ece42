//! Card types, rarities, keywords and counters.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A card type parsed from the type line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CardType {
    Land,
    Creature,
    Artifact,
    Enchantment,
    Instant,
    Sorcery,
    Planeswalker,
}

impl CardType {
    pub const ALL: [CardType; 7] = [
        CardType::Land,
        CardType::Creature,
        CardType::Artifact,
        CardType::Enchantment,
        CardType::Instant,
        CardType::Sorcery,
        CardType::Planeswalker,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CardType::Land => "land",
            CardType::Creature => "creature",
            CardType::Artifact => "artifact",
            CardType::Enchantment => "enchantment",
            CardType::Instant => "instant",
            CardType::Sorcery => "sorcery",
            CardType::Planeswalker => "planeswalker",
        }
    }

    /// Types named in the part of a type line before the subtype dash.
    ///
    /// ```
    /// use mtg_rules::cards::CardType;
    ///
    /// let types = CardType::parse_type_line("Artifact Creature — Robot");
    /// assert_eq!(types.as_slice(), &[CardType::Creature, CardType::Artifact]);
    /// ```
    #[must_use]
    pub fn parse_type_line(type_line: &str) -> SmallVec<[CardType; 2]> {
        let supertypes = type_line
            .split(['—', '-'])
            .next()
            .unwrap_or_default()
            .to_lowercase();
        let words: Vec<&str> = supertypes.split_whitespace().collect();

        Self::ALL
            .into_iter()
            .filter(|t| words.contains(&t.name()))
            .collect()
    }

    /// Whether cards of this type stay on the battlefield.
    #[must_use]
    pub const fn is_permanent(self) -> bool {
        !matches!(self, CardType::Instant | CardType::Sorcery)
    }
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Mythic,
}

impl Rarity {
    /// Parse a rarity name, case-insensitively.
    #[must_use]
    pub fn parse(name: &str) -> Option<Rarity> {
        match name.to_ascii_lowercase().as_str() {
            "common" => Some(Rarity::Common),
            "uncommon" => Some(Rarity::Uncommon),
            "rare" => Some(Rarity::Rare),
            "mythic" | "mythic rare" => Some(Rarity::Mythic),
            _ => None,
        }
    }
}

/// Keyword abilities the engine knows about.
///
/// Only `Flash`, `Haste`, `Vigilance` and `DoubleStrike` change rules
/// behavior; the rest are carried for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    Flash,
    Flying,
    DoubleStrike,
    Haste,
    Vigilance,
    Reach,
    Trample,
}

impl Keyword {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Keyword::Flash => "flash",
            Keyword::Flying => "flying",
            Keyword::DoubleStrike => "double strike",
            Keyword::Haste => "haste",
            Keyword::Vigilance => "vigilance",
            Keyword::Reach => "reach",
            Keyword::Trample => "trample",
        }
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Counter kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CounterKind {
    PlusOne,
    MinusOne,
    Charge,
    Loyalty,
}

impl CounterKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CounterKind::PlusOne => "+1/+1",
            CounterKind::MinusOne => "-1/-1",
            CounterKind::Charge => "charge",
            CounterKind::Loyalty => "loyalty",
        }
    }
}

impl std::fmt::Display for CounterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
