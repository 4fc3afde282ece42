//! Payment planning across the pool and untapped lands.
//!
//! Planning is pure: `plan_payment` looks at the pool and a list of
//! producers and either returns the complete set of withdrawals and taps,
//! or nothing. The caller applies a plan in one go, so a failed payment
//! never leaves a land tapped or pool mana spent.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::color::Color;
use super::cost::ManaCost;
use super::pool::ManaPool;
use crate::core::entity::CardId;

/// An untapped permanent that can produce one mana of `color`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManaSource {
    pub card: CardId,
    pub color: Color,
}

impl ManaSource {
    #[must_use]
    pub fn new(card: CardId, color: Color) -> Self {
        Self { card, color }
    }
}

/// A complete payment: mana drawn from the pool plus lands to tap.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentPlan {
    /// Floating mana spent, per color.
    pub from_pool: ManaPool,
    /// Producers to tap, in the order they were chosen.
    pub taps: SmallVec<[CardId; 4]>,
}

impl PaymentPlan {
    /// Total mana this plan provides.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.from_pool.total() + self.taps.len() as u32
    }
}

/// Work out how to pay `cost`.
///
/// Floating mana is used first. Colored pips the pool cannot cover reserve
/// the first matching producers in `sources` order; the generic remainder
/// takes leftover floating mana (WUBRGC) and then the first producers not
/// already reserved. Returns `None` when the cost cannot be met.
#[must_use]
pub fn plan_payment(pool: &ManaPool, sources: &[ManaSource], cost: &ManaCost) -> Option<PaymentPlan> {
    let mut remaining = *pool;
    let mut plan = PaymentPlan::default();
    let mut reserved = vec![false; sources.len()];

    for color in Color::ALL {
        let need = cost.colored(color);
        let floating = remaining.remove(color, need);
        plan.from_pool.add(color, floating);

        let mut short = need - floating;
        for (i, source) in sources.iter().enumerate() {
            if short == 0 {
                break;
            }
            if !reserved[i] && source.color == color {
                reserved[i] = true;
                plan.taps.push(source.card);
                short -= 1;
            }
        }
        if short > 0 {
            return None;
        }
    }

    let mut generic = cost.generic;
    for color in Color::ALL {
        if generic == 0 {
            break;
        }
        let floating = remaining.remove(color, generic);
        plan.from_pool.add(color, floating);
        generic -= floating;
    }

    for (i, source) in sources.iter().enumerate() {
        if generic == 0 {
            break;
        }
        if !reserved[i] {
            reserved[i] = true;
            plan.taps.push(source.card);
            generic -= 1;
        }
    }

    (generic == 0).then_some(plan)
}

/// Feasibility check with the same rules as [`plan_payment`].
///
/// Availability per color is floating mana plus producers of that color;
/// each colored requirement must fit inside its own availability and the
/// leftovers must reach the generic requirement.
#[must_use]
pub fn can_pay(pool: &ManaPool, sources: &[ManaSource], cost: &ManaCost) -> bool {
    let mut leftover = 0;
    for color in Color::ALL {
        let produced = sources.iter().filter(|s| s.color == color).count() as u32;
        let available = pool.get(color) + produced;
        let need = cost.colored(color);
        if need > available {
            return false;
        }
        leftover += available - need;
    }
    leftover >= cost.generic
}
