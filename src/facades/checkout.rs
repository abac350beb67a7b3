//! Order placement.

use std::{fmt, sync::Arc};

use jiff::{SignedDuration, Timestamp};
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::{
    cart::CartItem,
    facades::calls::{CallError, CallPolicy, CancelSignal, guarded},
    orders::{
        OrderService, OrderServiceError,
        models::{
            CheckoutDetails, DEFAULT_PICKUP_LOCATION, DEFAULT_PICKUP_MINUTES, Order, OrderUuid,
            order_number,
        },
        status::{OrderStatus, PaymentStatus},
    },
    pricing,
    store::{Action, Store},
};

const PLACE_ORDER_FAILED: &str = "Failed to place order";

/// Errors returned by [`Checkout`].
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing to order.
    #[error("Your cart is empty")]
    EmptyCart,

    /// The requested pickup time can't be represented.
    #[error("pickup time is out of range")]
    PickupTime(#[source] jiff::Error),

    /// The order service call failed.
    #[error("order service call failed: {0}")]
    Order(#[from] CallError<OrderServiceError>),
}

/// Turns the cart into an order.
pub struct Checkout {
    store: Arc<Store>,
    orders: Arc<dyn OrderService>,
    policy: CallPolicy,
}

impl fmt::Debug for Checkout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checkout")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl Checkout {
    /// Create a checkout facade.
    pub fn new(store: Arc<Store>, orders: Arc<dyn OrderService>, policy: CallPolicy) -> Self {
        Self {
            store,
            orders,
            policy,
        }
    }

    /// Place an order for the current cart.
    ///
    /// On success the order is recorded and the cart emptied in a single
    /// transition. On failure the cart is left as it was.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] when there is nothing to order
    /// and [`CheckoutError::Order`] when the order service call fails.
    #[instrument(skip_all)]
    pub async fn place_order(
        &self,
        details: CheckoutDetails,
        cancel: &CancelSignal,
    ) -> Result<Order, CheckoutError> {
        let snapshot = self.store.state();

        if snapshot.cart.is_empty() {
            return Err(self.reject(CheckoutError::EmptyCart));
        }

        let order = match build_order(&snapshot.cart, details, Timestamp::now()) {
            Ok(order) => order,
            Err(error) => return Err(self.reject(error)),
        };

        self.store.set_loading(true);
        self.store.set_error(None);

        let result = guarded(self.policy, cancel, self.orders.create_order(order)).await;

        let outcome = match result {
            Ok(placed) => {
                info!(
                    order_id = %placed.id,
                    order_number = %placed.order_number,
                    total = %placed.total_amount,
                    "order placed"
                );

                self.store.dispatch(Action::OrderPlaced(placed.clone()));

                Ok(placed)
            }
            Err(error) => {
                warn!(error = %error, "order placement failed");
                self.store.set_error(Some(PLACE_ORDER_FAILED.to_string()));

                Err(error.into())
            }
        };

        self.store.set_loading(false);

        outcome
    }

    fn reject(&self, error: CheckoutError) -> CheckoutError {
        self.store.set_error(Some(error.to_string()));

        error
    }
}

/// Build a new pending order from cart lines.
///
/// # Errors
///
/// Returns [`CheckoutError::PickupTime`] if the pickup time overflows.
pub fn build_order(
    cart: &[CartItem],
    details: CheckoutDetails,
    now: Timestamp,
) -> Result<Order, CheckoutError> {
    let minutes = details.pickup_in_minutes.unwrap_or(DEFAULT_PICKUP_MINUTES);

    let estimated_pickup_time = now
        .checked_add(SignedDuration::from_mins(i64::from(minutes)))
        .map_err(CheckoutError::PickupTime)?;

    let pickup_location = details
        .pickup_location
        .map(|location| location.trim().to_string())
        .filter(|location| !location.is_empty())
        .unwrap_or_else(|| DEFAULT_PICKUP_LOCATION.to_string());

    Ok(Order {
        id: OrderUuid::new(),
        order_number: order_number(now),
        items: cart.to_vec(),
        total_amount: pricing::cart_totals(cart).total,
        status: OrderStatus::Pending,
        payment_status: PaymentStatus::Pending,
        payment_method: details.payment_method,
        special_instructions: details.special_instructions,
        pickup_location,
        estimated_pickup_time,
        created_at: now,
        updated_at: now,
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        menu::fixtures::{COFFEE, MASALA_DOSA, VEG_THALI},
        orders::{InMemoryOrderService, MockOrderService, models::PaymentMethod},
        store::MemoryStorage,
        testing::line,
    };

    use super::*;

    fn checkout(orders: impl OrderService + 'static) -> TestResult<(Arc<Store>, Checkout)> {
        let store = Arc::new(Store::new(Arc::new(MemoryStorage::new())));

        store.set_cart(vec![line(MASALA_DOSA, 2)?, line(VEG_THALI, 1)?]);

        let checkout = Checkout::new(store.clone(), Arc::new(orders), CallPolicy::default());

        Ok((store, checkout))
    }

    #[test]
    fn build_order_fills_defaults() -> TestResult {
        let now = Timestamp::now();
        let cart = vec![line(MASALA_DOSA, 2)?, line(VEG_THALI, 1)?];

        let order = build_order(&cart, CheckoutDetails::default(), now)?;

        assert_eq!(order.total_amount, Decimal::new(1819, 1));
        assert_eq!(order.pickup_location, DEFAULT_PICKUP_LOCATION);
        assert_eq!(order.estimated_pickup_time, now + SignedDuration::from_mins(30));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_status, PaymentStatus::Pending);
        assert_eq!(order.items, cart);
        assert!(order.order_number.starts_with("ORD-"));

        Ok(())
    }

    #[test]
    fn build_order_uses_requested_details() -> TestResult {
        let now = Timestamp::now();

        let details = CheckoutDetails {
            pickup_location: Some("Library Kiosk".to_string()),
            pickup_in_minutes: Some(15),
            special_instructions: Some("less spicy".to_string()),
            payment_method: Some(PaymentMethod::Upi),
        };

        let order = build_order(&[line(COFFEE, 1)?], details, now)?;

        assert_eq!(order.pickup_location, "Library Kiosk");
        assert_eq!(order.estimated_pickup_time, now + SignedDuration::from_mins(15));
        assert_eq!(order.payment_method, Some(PaymentMethod::Upi));
        assert_eq!(order.special_instructions.as_deref(), Some("less spicy"));

        Ok(())
    }

    #[test]
    fn absurd_pickup_time_is_rejected() -> TestResult {
        let details = CheckoutDetails {
            pickup_in_minutes: Some(u32::MAX),
            ..CheckoutDetails::default()
        };

        let result = build_order(&[line(COFFEE, 1)?], details, Timestamp::now());

        assert!(matches!(result, Err(CheckoutError::PickupTime(_))));

        Ok(())
    }

    #[tokio::test]
    async fn placed_order_clears_cart() -> TestResult {
        let (store, checkout) = checkout(InMemoryOrderService::default())?;

        let order = checkout
            .place_order(CheckoutDetails::default(), &CancelSignal::never())
            .await?;

        let state = store.state();

        assert!(state.cart.is_empty());
        assert_eq!(state.orders.first(), Some(&order));
        assert_eq!(order.total_amount, Decimal::new(1819, 1));
        assert_eq!(order.item_count(), 3);
        assert!(!state.is_loading);
        assert_eq!(state.error, None);

        Ok(())
    }

    #[tokio::test]
    async fn empty_cart_is_rejected() -> TestResult {
        let mut orders = MockOrderService::new();

        orders.expect_create_order().never();

        let (store, checkout) = checkout(orders)?;

        store.clear_cart();

        let result = checkout
            .place_order(CheckoutDetails::default(), &CancelSignal::never())
            .await;

        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
        assert_eq!(store.state().error.as_deref(), Some("Your cart is empty"));
        assert!(store.state().orders.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn failed_placement_keeps_cart() -> TestResult {
        let mut orders = MockOrderService::new();

        orders
            .expect_create_order()
            .times(1)
            .returning(|_| Err(OrderServiceError::Unavailable));

        let (store, checkout) = checkout(orders)?;
        let cart_before = store.state().cart.clone();

        let result = checkout
            .place_order(CheckoutDetails::default(), &CancelSignal::never())
            .await;

        let state = store.state();

        assert!(matches!(
            result,
            Err(CheckoutError::Order(CallError::Service(
                OrderServiceError::Unavailable
            )))
        ));
        assert_eq!(state.cart, cart_before);
        assert!(state.orders.is_empty());
        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some(PLACE_ORDER_FAILED));

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn timed_out_placement_keeps_cart() -> TestResult {
        let (store, checkout) = checkout(InMemoryOrderService::new(Duration::from_secs(30)))?;
        let cart_before = store.state().cart.clone();

        let result = checkout
            .place_order(CheckoutDetails::default(), &CancelSignal::never())
            .await;

        assert!(matches!(
            result,
            Err(CheckoutError::Order(CallError::TimedOut(_)))
        ));
        assert_eq!(store.state().cart, cart_before);
        assert!(store.state().orders.is_empty());

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_placement_keeps_cart() -> TestResult {
        let (store, checkout) = checkout(InMemoryOrderService::new(Duration::from_secs(2)))?;
        let cart_before = store.state().cart.clone();
        let (canceller, signal) = crate::facades::calls::cancellation();

        let place = checkout.place_order(CheckoutDetails::default(), &signal);

        let (result, ()) = tokio::join!(place, async { canceller.cancel() });

        assert!(matches!(
            result,
            Err(CheckoutError::Order(CallError::Cancelled))
        ));
        assert_eq!(store.state().cart, cart_before);
        assert!(store.state().orders.is_empty());
        assert!(!store.state().is_loading);

        Ok(())
    }
}
