//! Pricing
//!
//! Cart totals are pure functions of the cart and are recomputed on every
//! read. Amounts stay unrounded; rounding happens only when an amount is
//! prepared for display.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso};
use thiserror::Error;

use crate::cart::CartItem;

/// Tax applied to the subtotal (5%).
pub const TAX_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Service charge applied to the subtotal (2%).
pub const SERVICE_CHARGE_RATE: Decimal = Decimal::from_parts(2, 0, 0, false, 2);

/// Decimal places shown to customers.
const DISPLAY_SCALE: u32 = 2;

/// Errors that can occur while preparing an amount for display.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// The amount does not fit in minor currency units.
    #[error("amount {0} is out of range for display")]
    OutOfRange(Decimal),
}

/// Derived cart totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartTotals {
    /// Sum of unit price times quantity.
    pub subtotal: Decimal,

    /// Tax on the subtotal.
    pub tax: Decimal,

    /// Service charge on the subtotal.
    pub service_charge: Decimal,

    /// Amount payable.
    pub total: Decimal,
}

impl CartTotals {
    /// Every amount rounded to two decimal places, half away from zero.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            subtotal: round_for_display(self.subtotal),
            tax: round_for_display(self.tax),
            service_charge: round_for_display(self.service_charge),
            total: round_for_display(self.total),
        }
    }
}

/// Calculates subtotal, tax, service charge and total for a cart.
///
/// Sums saturate at the largest [`Decimal`] rather than overflow.
pub fn cart_totals(items: &[CartItem]) -> CartTotals {
    let subtotal = items
        .iter()
        .map(CartItem::line_total)
        .fold(Decimal::ZERO, Decimal::saturating_add);
    let tax = subtotal.saturating_mul(TAX_RATE);
    let service_charge = subtotal.saturating_mul(SERVICE_CHARGE_RATE);

    CartTotals {
        subtotal,
        tax,
        service_charge,
        total: subtotal.saturating_add(tax).saturating_add(service_charge),
    }
}

/// Total number of units across all cart lines.
pub fn cart_item_count(items: &[CartItem]) -> u64 {
    items.iter().map(|item| u64::from(item.quantity)).sum()
}

/// Round an amount to two decimal places for display.
pub fn round_for_display(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount in rupees, e.g. `₹181.90`.
///
/// # Errors
///
/// Returns [`PricingError::OutOfRange`] if the rounded amount cannot be
/// represented in paise.
pub fn format_amount(amount: Decimal) -> Result<String, PricingError> {
    let minor = (round_for_display(amount) * Decimal::ONE_HUNDRED)
        .to_i64()
        .ok_or(PricingError::OutOfRange(amount))?;

    Ok(format!("{}", Money::from_minor(minor, iso::INR)))
}
