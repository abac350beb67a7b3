//! Order status polling.

use std::{fmt, sync::Arc};

use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::{
    facades::calls::{CallError, CallPolicy, CancelSignal, guarded},
    orders::{OrderService, OrderServiceError, models::OrderUuid, status::OrderStatus},
    store::Store,
};

const REFRESH_STATUS_FAILED: &str = "Failed to refresh order status";

/// Errors returned by [`Tracking`].
#[derive(Debug, Error)]
pub enum TrackingError {
    /// The order service call failed.
    #[error("order service call failed: {0}")]
    Order(#[from] CallError<OrderServiceError>),
}

/// Brings known orders up to date with the kitchen.
pub struct Tracking {
    store: Arc<Store>,
    orders: Arc<dyn OrderService>,
    policy: CallPolicy,
}

impl fmt::Debug for Tracking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracking")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl Tracking {
    /// Create a tracking facade.
    pub fn new(store: Arc<Store>, orders: Arc<dyn OrderService>, policy: CallPolicy) -> Self {
        Self {
            store,
            orders,
            policy,
        }
    }

    /// Ask the order service for the latest status of `order_id` and
    /// record it if it changed.
    ///
    /// Returns `None` without calling the service when the store doesn't
    /// know the order.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::Order`] when the service call fails.
    #[instrument(skip(self, cancel))]
    pub async fn refresh_order_status(
        &self,
        order_id: OrderUuid,
        cancel: &CancelSignal,
    ) -> Result<Option<OrderStatus>, TrackingError> {
        let Some(known) = self.store.state().order(order_id).map(|order| order.status) else {
            debug!("order not tracked");

            return Ok(None);
        };

        let status = match guarded(self.policy, cancel, self.orders.order_status(order_id)).await {
            Ok(status) => status,
            Err(error) => {
                warn!(error = %error, "status refresh failed");
                self.store.set_error(Some(REFRESH_STATUS_FAILED.to_string()));

                return Err(error.into());
            }
        };

        if status != known {
            self.store.update_order_status(order_id, status);
        }

        Ok(Some(status))
    }
}
