//! Floating mana.

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::cost::ManaCost;
use super::ManaError;

/// A player's mana pool: one non-negative count per color.
///
/// Emptied during cleanup. Spending follows the pool-only rules in
/// [`ManaPool::can_pay`]; payments that also tap lands go through
/// [`super::plan_payment`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManaPool {
    amounts: [u32; 6],
}

impl ManaPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add mana of one color.
    pub fn add(&mut self, color: Color, amount: u32) {
        self.amounts[color.index()] += amount;
    }

    /// Remove up to `amount` mana of one color, returning how much was
    /// actually removed.
    pub fn remove(&mut self, color: Color, amount: u32) -> u32 {
        let slot = &mut self.amounts[color.index()];
        let removed = amount.min(*slot);
        *slot -= removed;
        removed
    }

    #[must_use]
    pub fn get(&self, color: Color) -> u32 {
        self.amounts[color.index()]
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.amounts.iter().sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Drain every color.
    pub fn empty(&mut self) {
        self.amounts = [0; 6];
    }

    /// Whether the pool alone covers `cost`: each colored pip from its own
    /// color, then whatever is left covers the generic part.
    #[must_use]
    pub fn can_pay(&self, cost: &ManaCost) -> bool {
        let mut leftover = 0;
        for color in Color::ALL {
            let have = self.get(color);
            let need = cost.colored(color);
            if have < need {
                return false;
            }
            leftover += have - need;
        }
        leftover >= cost.generic
    }

    /// Pay `cost` from the pool. Generic mana is taken in WUBRGC order.
    ///
    /// Nothing is removed when the pool cannot cover the cost.
    pub fn pay(&mut self, cost: &ManaCost) -> Result<(), ManaError> {
        if !self.can_pay(cost) {
            return Err(ManaError::CannotPay {
                cost: cost.to_string(),
            });
        }

        for color in Color::ALL {
            self.remove(color, cost.colored(color));
        }

        let mut generic = cost.generic;
        for color in Color::ALL {
            if generic == 0 {
                break;
            }
            generic -= self.remove(color, generic);
        }

        Ok(())
    }
}

impl std::fmt::Display for ManaPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return f.write_str("empty");
        }
        let mut first = true;
        for color in Color::ALL {
            let amount = self.get(color);
            if amount == 0 {
                continue;
            }
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{}:{}", color.symbol(), amount)?;
            first = false;
        }
        Ok(())
    }
}
