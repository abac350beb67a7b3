//! End-to-end ordering: sign in, fill the cart from the menu, place an order
//! and follow it through the kitchen.

use std::{sync::Arc, time::Duration};

use rust_decimal::Decimal;
use testresult::TestResult;

use canteen::{
    auth::{Credentials, DEMO_EMAIL, DEMO_PASSWORD},
    context::{AppContext, Services},
    facades::{CallError, CallPolicy, CancelSignal, CheckoutError},
    menu::fixtures::{MASALA_DOSA, VEG_THALI},
    orders::{
        InMemoryOrderService,
        models::{CheckoutDetails, PaymentMethod},
        status::OrderStatus,
    },
    store::{MemoryStorage, Storage},
};

fn context_with(orders: Arc<InMemoryOrderService>, storage: Arc<dyn Storage>) -> AppContext {
    let services = Services {
        orders,
        ..Services::in_memory(Duration::ZERO)
    };

    AppContext::new(storage, services, CallPolicy::default())
}

async fn fill_cart(context: &AppContext) -> TestResult {
    let never = CancelSignal::never();

    context
        .session
        .login(Credentials::new(DEMO_EMAIL, DEMO_PASSWORD), &never)
        .await?;
    context.catalog.load_menu(&never).await?;

    let state = context.store.state();

    for (id, quantity) in [(MASALA_DOSA, 2), (VEG_THALI, 1)] {
        let item = state
            .menu_items
            .iter()
            .find(|item| item.id == id)
            .ok_or("fixture missing from menu")?;

        context.store.add_to_cart(item, quantity, None);
    }

    Ok(())
}

#[tokio::test]
async fn order_is_placed_and_tracked() -> TestResult {
    let kitchen = Arc::new(InMemoryOrderService::default());
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    let context = context_with(kitchen.clone(), storage.clone());
    let never = CancelSignal::never();

    fill_cart(&context).await?;

    let totals = context.store.state().cart_totals().rounded();

    assert_eq!(totals.subtotal, Decimal::from(170));
    assert_eq!(totals.tax, Decimal::new(850, 2));
    assert_eq!(totals.service_charge, Decimal::new(340, 2));
    assert_eq!(totals.total, Decimal::new(18190, 2));

    let order = context
        .checkout
        .place_order(
            CheckoutDetails {
                payment_method: Some(PaymentMethod::CampusCard),
                ..CheckoutDetails::default()
            },
            &never,
        )
        .await?;

    assert_eq!(order.total_amount, Decimal::new(1819, 1));
    assert!(context.store.state().cart.is_empty());
    assert_eq!(context.store.state().orders.first().map(|o| o.id), Some(order.id));

    kitchen.advance(order.id).await?;
    kitchen.advance(order.id).await?;

    let status = context
        .tracking
        .refresh_order_status(order.id, &never)
        .await?;

    assert_eq!(status, Some(OrderStatus::InProgress));

    let restarted = context_with(kitchen, storage);

    assert_eq!(
        restarted.store.state().order(order.id).map(|o| o.status),
        Some(OrderStatus::InProgress)
    );
    assert!(restarted.store.state().cart.is_empty());

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn slow_kitchen_times_out_and_keeps_cart() -> TestResult {
    let kitchen = Arc::new(InMemoryOrderService::new(Duration::from_secs(60)));
    let context = context_with(kitchen, Arc::new(MemoryStorage::new()));

    fill_cart(&context).await?;

    let cart_before = context.store.state().cart.clone();

    let result = context
        .checkout
        .place_order(CheckoutDetails::default(), &CancelSignal::never())
        .await;

    let state = context.store.state();

    assert!(matches!(
        result,
        Err(CheckoutError::Order(CallError::TimedOut(_)))
    ));
    assert_eq!(state.cart, cart_before);
    assert!(state.orders.is_empty());
    assert_eq!(state.error.as_deref(), Some("Failed to place order"));
    assert!(!state.is_loading);

    Ok(())
}
