//! Mana: colors, costs, pools and payment.
//!
//! ## Key Types
//!
//! - `Color`: the five colors plus colorless
//! - `ManaCost`: parsed cost value (`{2}{W}`)
//! - `ManaPool`: per-player floating mana
//! - `PaymentPlan`: the withdrawals and taps that pay a cost

pub mod color;
pub mod cost;
pub mod payment;
pub mod pool;

pub use color::Color;
pub use cost::ManaCost;
pub use payment::{can_pay, plan_payment, ManaSource, PaymentPlan};
pub use pool::ManaPool;

/// Mana cost parsing and payment failures.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ManaError {
    #[error("invalid mana cost {0:?}")]
    InvalidCost(String),

    #[error("unknown mana symbol {{{0}}}")]
    UnknownSymbol(String),

    #[error("cannot pay {cost}")]
    CannotPay { cost: String },
}
