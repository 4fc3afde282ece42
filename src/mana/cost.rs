//! Mana costs.
//!
//! A `ManaCost` is a generic requirement plus one count per color. Costs
//! are parsed once from their printed form (`{2}{W}`) when a card
//! definition is built and never change afterwards.

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::ManaError;

/// A parsed mana cost.
///
/// ```
/// use mtg_rules::mana::{Color, ManaCost};
///
/// let cost = ManaCost::parse("{2}{W}{W}").unwrap();
/// assert_eq!(cost.generic, 2);
/// assert_eq!(cost.colored(Color::White), 2);
/// assert_eq!(cost.total_cmc(), 4);
/// assert_eq!(cost.to_string(), "{2}{W}{W}");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManaCost {
    /// Mana of any type.
    pub generic: u32,
    /// Per-color requirements, indexed by [`Color::index`].
    colored: [u32; 6],
}

impl ManaCost {
    /// The empty cost, `{0}`.
    #[must_use]
    pub const fn free() -> Self {
        Self {
            generic: 0,
            colored: [0; 6],
        }
    }

    /// A purely generic cost.
    #[must_use]
    pub const fn generic(amount: u32) -> Self {
        Self {
            generic: amount,
            colored: [0; 6],
        }
    }

    /// Add colored pips (builder pattern).
    #[must_use]
    pub fn with_color(mut self, color: Color, amount: u32) -> Self {
        self.colored[color.index()] += amount;
        self
    }

    /// Parse a printed cost such as `{1}{U}{U}`.
    ///
    /// Numeric symbols add to the generic part; `W U B R G C` add one pip
    /// of that color. An empty string is the free cost.
    pub fn parse(text: &str) -> Result<Self, ManaError> {
        let mut cost = Self::free();
        let mut rest = text.trim();

        while !rest.is_empty() {
            let Some(body) = rest.strip_prefix('{') else {
                return Err(ManaError::InvalidCost(text.to_string()));
            };
            let Some(end) = body.find('}') else {
                return Err(ManaError::InvalidCost(text.to_string()));
            };

            let symbol = &body[..end];
            if let Ok(amount) = symbol.parse::<u32>() {
                cost.generic += amount;
            } else if let Some(color) = Color::from_symbol(symbol) {
                cost.colored[color.index()] += 1;
            } else {
                return Err(ManaError::UnknownSymbol(symbol.to_string()));
            }

            rest = body[end + 1..].trim_start();
        }

        Ok(cost)
    }

    /// Required pips of one color.
    #[must_use]
    pub fn colored(&self, color: Color) -> u32 {
        self.colored[color.index()]
    }

    /// Sum of colored requirements.
    #[must_use]
    pub fn colored_total(&self) -> u32 {
        self.colored.iter().sum()
    }

    /// Converted mana cost: generic plus every colored pip.
    #[must_use]
    pub fn total_cmc(&self) -> u32 {
        self.generic + self.colored_total()
    }

    #[must_use]
    pub fn is_free(&self) -> bool {
        self.total_cmc() == 0
    }
}

impl std::fmt::Display for ManaCost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_free() {
            return f.write_str("{0}");
        }
        if self.generic > 0 {
            write!(f, "{{{}}}", self.generic)?;
        }
        for color in Color::ALL {
            for _ in 0..self.colored(color) {
                write!(f, "{{{}}}", color.symbol())?;
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for ManaCost {
    type Err = ManaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
