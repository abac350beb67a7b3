//! Order and payment status lifecycles.
//!
//! The kitchen drives an order along the happy path
//! `Pending -> Confirmed -> InProgress -> ReadyForPickup -> Completed`.
//! `Cancelled` is reachable from any non-terminal state. `Completed` and
//! `Cancelled` are terminal.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned when a status name is not recognised.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order status: {0}")]
pub struct ParseOrderStatusError(String);

/// Order Status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Received, not yet accepted by the kitchen.
    Pending,

    /// Accepted by the kitchen.
    Confirmed,

    /// Being prepared.
    InProgress,

    /// Waiting at the counter.
    ReadyForPickup,

    /// Collected.
    Completed,

    /// Abandoned before completion.
    Cancelled,
}

/// Happy-path order, used for progress display.
pub const HAPPY_PATH: [OrderStatus; 5] = [
    OrderStatus::Pending,
    OrderStatus::Confirmed,
    OrderStatus::InProgress,
    OrderStatus::ReadyForPickup,
    OrderStatus::Completed,
];

impl OrderStatus {
    /// Every status, happy path first.
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::InProgress,
        OrderStatus::ReadyForPickup,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    /// No transitions lead out of a terminal status.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Position on the happy path; `None` once cancelled.
    #[must_use]
    pub fn progress(self) -> Option<usize> {
        HAPPY_PATH.iter().position(|status| *status == self)
    }

    /// The next status on the happy path, if any.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        if self.is_terminal() {
            return None;
        }

        self.progress()
            .and_then(|index| HAPPY_PATH.get(index + 1))
            .copied()
    }

    /// Whether moving from `self` to `next` is a legal lifecycle step.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        if self.is_terminal() {
            return false;
        }

        next == Self::Cancelled || self.next() == Some(next)
    }

    /// Short customer-facing label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Order Placed",
            Self::Confirmed => "Order Confirmed",
            Self::InProgress => "In Progress",
            Self::ReadyForPickup => "Ready for Pickup",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// One-line explanation shown on the tracking view.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Pending => "Your order has been received and is being processed",
            Self::Confirmed => "Kitchen has accepted your order and started preparation",
            Self::InProgress => "Your food is being prepared in the kitchen",
            Self::ReadyForPickup => "Your order is ready! Please collect from the counter",
            Self::Completed => "Order has been completed successfully",
            Self::Cancelled => "Order has been cancelled",
        }
    }

    /// Wire name, e.g. `ready_for_pickup`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::InProgress => "in_progress",
            Self::ReadyForPickup => "ready_for_pickup",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ParseOrderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseOrderStatusError(s.to_string()))
    }
}

/// Payment Status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Not yet attempted.
    Pending,

    /// Awaiting the payment provider.
    Processing,

    /// Paid.
    Success,

    /// Declined or errored.
    Failed,

    /// Abandoned by the customer.
    Cancelled,

    /// Money returned.
    Refunded,
}

impl PaymentStatus {
    /// Wire name, e.g. `success`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::Refunded => "refunded",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
