//! Mana colors.

use serde::{Deserialize, Serialize};

/// A mana color. `Colorless` is a real mana type ({C}), distinct from
/// generic costs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Blue,
    Black,
    Red,
    Green,
    Colorless,
}

impl Color {
    /// WUBRGC order, used for display and for paying generic costs.
    pub const ALL: [Color; 6] = [
        Color::White,
        Color::Blue,
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Colorless,
    ];

    /// Position in [`Color::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Single-letter symbol.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Color::White => 'W',
            Color::Blue => 'U',
            Color::Black => 'B',
            Color::Red => 'R',
            Color::Green => 'G',
            Color::Colorless => 'C',
        }
    }

    /// Parse a single-letter symbol.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Color> {
        match symbol {
            "W" => Some(Color::White),
            "U" => Some(Color::Blue),
            "B" => Some(Color::Black),
            "R" => Some(Color::Red),
            "G" => Some(Color::Green),
            "C" => Some(Color::Colorless),
            _ => None,
        }
    }

    /// Color produced by a basic land, matched on its display name.
    ///
    /// Only a fallback for permanents that do not declare a mana ability.
    #[must_use]
    pub fn from_basic_land_name(name: &str) -> Option<Color> {
        [
            ("Plains", Color::White),
            ("Island", Color::Blue),
            ("Swamp", Color::Black),
            ("Mountain", Color::Red),
            ("Forest", Color::Green),
        ]
        .into_iter()
        .find(|(land, _)| name.contains(land))
        .map(|(_, color)| color)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Blue => "blue",
            Color::Black => "black",
            Color::Red => "red",
            Color::Green => "green",
            Color::Colorless => "colorless",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
