//! Application state snapshot.

use crate::{
    auth::User,
    cart::CartItem,
    menu::models::{Category, MenuItem},
    orders::models::{Order, OrderUuid},
    pricing::{self, CartTotals},
};

/// Single snapshot of everything the client knows.
///
/// Snapshots are immutable once published; transitions produce a new one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// Signed-in user, if any.
    pub user: Option<User>,

    /// A session token is held.
    pub is_authenticated: bool,

    /// Cart lines, at most one per menu item.
    pub cart: Vec<CartItem>,

    /// Placed orders, most recent first.
    pub orders: Vec<Order>,

    /// Menu catalogue as last fetched.
    pub menu_items: Vec<MenuItem>,

    /// Menu categories as last fetched.
    pub categories: Vec<Category>,

    /// A facade call is in flight.
    pub is_loading: bool,

    /// Last user-facing failure.
    pub error: Option<String>,
}

impl AppState {
    /// Totals derived from the current cart.
    #[must_use]
    pub fn cart_totals(&self) -> CartTotals {
        pricing::cart_totals(&self.cart)
    }

    /// Units in the cart.
    #[must_use]
    pub fn cart_item_count(&self) -> u64 {
        pricing::cart_item_count(&self.cart)
    }

    /// Look up an order by id.
    #[must_use]
    pub fn order(&self, id: OrderUuid) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == id)
    }
}
