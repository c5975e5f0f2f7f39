//! Monthly and annual cost calculation.

mod calculator;

pub use calculator::{CostCalculator, compute_costs};

use rust_decimal::{Decimal, RoundingStrategy};

/// Commercial markup added to every band's PUN rate, in €/kWh.
pub const PUN_MARKUP: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Billing months per year.
pub const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Round a monetary amount to cents, halves away from zero.
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
