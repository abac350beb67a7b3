//! Order Models

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cart::CartItem,
    orders::status::{OrderStatus, PaymentStatus},
    uuids::TypedUuid,
};

/// Pickup counter used when checkout doesn't name one.
pub const DEFAULT_PICKUP_LOCATION: &str = "Main Counter";

/// Minutes until pickup used when checkout doesn't ask for a time.
pub const DEFAULT_PICKUP_MINUTES: u32 = 30;

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// Order Model
///
/// Write-once apart from `status`, `payment_status` and `updated_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderUuid,

    /// Human-readable number shown at the counter, e.g. `ORD-482913`.
    pub order_number: String,

    /// Cart lines at placement time.
    pub items: Vec<CartItem>,

    /// Amount payable, tax and service charge included.
    pub total_amount: Decimal,

    /// Kitchen progress.
    pub status: OrderStatus,

    /// Payment progress.
    pub payment_status: PaymentStatus,

    /// How the customer intends to pay.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,

    /// Note for the kitchen covering the whole order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,

    /// Counter the order will be collected from.
    pub pickup_location: String,

    /// When the order should be ready.
    pub estimated_pickup_time: Timestamp,

    /// Placement time.
    pub created_at: Timestamp,

    /// Last status change.
    pub updated_at: Timestamp,
}

impl Order {
    /// Number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        crate::pricing::cart_item_count(&self.items)
    }
}

/// Payment Method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// UPI transfer.
    Upi,

    /// Debit or credit card.
    Card,

    /// Mobile wallet.
    Wallet,

    /// Campus ID card balance.
    CampusCard,
}

impl PaymentMethod {
    /// Every payment method.
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Upi,
        PaymentMethod::Card,
        PaymentMethod::Wallet,
        PaymentMethod::CampusCard,
    ];

    /// Wire name, e.g. `campus_card`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upi => "upi",
            Self::Card => "card",
            Self::Wallet => "wallet",
            Self::CampusCard => "campus_card",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a payment method name is not recognised.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown payment method: {0}")]
pub struct ParsePaymentMethodError(String);

impl FromStr for PaymentMethod {
    type Err = ParsePaymentMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| ParsePaymentMethodError(s.to_string()))
    }
}

/// Details collected by the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutDetails {
    /// Pickup counter; defaults to [`DEFAULT_PICKUP_LOCATION`].
    pub pickup_location: Option<String>,

    /// Minutes from now until pickup; defaults to [`DEFAULT_PICKUP_MINUTES`].
    pub pickup_in_minutes: Option<u32>,

    /// Note for the kitchen.
    pub special_instructions: Option<String>,

    /// How the customer intends to pay.
    pub payment_method: Option<PaymentMethod>,
}

/// Counter number derived from the placement time: `ORD-` and the last
/// six digits of the millisecond timestamp.
pub fn order_number(placed_at: Timestamp) -> String {
    format!("ORD-{:06}", placed_at.as_millisecond().rem_euclid(1_000_000))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn order_number_uses_last_six_millisecond_digits() -> TestResult {
        let placed_at = Timestamp::from_millisecond(1_729_000_012_345)?;

        assert_eq!(order_number(placed_at), "ORD-012345");

        Ok(())
    }

    #[test]
    fn payment_method_round_trips_names() {
        for method in PaymentMethod::ALL {
            assert_eq!(method.as_str().parse(), Ok(method));
        }

        assert!("cash".parse::<PaymentMethod>().is_err());
    }
}
