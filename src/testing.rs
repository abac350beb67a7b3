//! Shared builders for unit tests.

use jiff::{SignedDuration, Timestamp};
use testresult::TestResult;

use crate::{
    auth::{Role, User, UserUuid},
    cart::CartItem,
    menu::{fixtures, models::MenuItemUuid},
    orders::{
        models::{DEFAULT_PICKUP_LOCATION, Order, OrderUuid, order_number},
        status::{OrderStatus, PaymentStatus},
    },
    pricing,
};

pub(crate) fn user() -> User {
    User {
        id: UserUuid::new(),
        email: "asha@licet.ac.in".to_string(),
        first_name: "Asha".to_string(),
        last_name: "Raman".to_string(),
        student_id: Some("STU042".to_string()),
        phone: None,
        role: Role::Student,
        is_active: true,
    }
}

pub(crate) fn line(id: MenuItemUuid, quantity: u32) -> TestResult<CartItem> {
    let item = fixtures::menu_item(id).ok_or("unknown fixture item")?;

    Ok(CartItem::new(&item, quantity, None))
}

pub(crate) fn order(items: Vec<CartItem>) -> Order {
    let now = Timestamp::now();

    Order {
        id: OrderUuid::new(),
        order_number: order_number(now),
        total_amount: pricing::cart_totals(&items).total,
        items,
        status: OrderStatus::Pending,
        payment_status: PaymentStatus::Pending,
        payment_method: None,
        special_instructions: None,
        pickup_location: DEFAULT_PICKUP_LOCATION.to_string(),
        estimated_pickup_time: now + SignedDuration::from_mins(30),
        created_at: now,
        updated_at: now,
    }
}
