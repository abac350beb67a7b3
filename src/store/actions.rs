//! State transitions.

use jiff::Timestamp;

use crate::{
    auth::User,
    cart::CartItem,
    menu::models::{Category, MenuItem, MenuItemUuid},
    orders::{
        models::{Order, OrderUuid},
        status::OrderStatus,
    },
};

/// Every transition the store accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace the signed-in user.
    SetUser(User),

    /// Set the authenticated flag.
    SetAuthenticated(bool),

    /// Forget the user, the cart and the orders.
    Logout,

    /// Replace the cart.
    SetCart(Vec<CartItem>),

    /// Add a line, merging with an existing line for the same item.
    AddToCart(CartItem),

    /// Drop the line for an item.
    RemoveFromCart(MenuItemUuid),

    /// Set a line's quantity; zero removes it.
    UpdateCartItemQuantity {
        /// Menu item of the line.
        item_id: MenuItemUuid,

        /// New quantity.
        quantity: u32,
    },

    /// Empty the cart.
    ClearCart,

    /// Replace the order list.
    SetOrders(Vec<Order>),

    /// Record a new order at the head of the list.
    AddOrder(Order),

    /// Record a status change for one order.
    UpdateOrderStatus {
        /// Order being updated.
        order_id: OrderUuid,

        /// Status reported for it.
        status: OrderStatus,

        /// Time of the change.
        at: Timestamp,
    },

    /// Record a placed order and empty the cart together.
    OrderPlaced(Order),

    /// Replace the menu catalogue.
    SetMenuItems(Vec<MenuItem>),

    /// Replace the menu categories.
    SetCategories(Vec<Category>),

    /// Set the loading flag.
    SetLoading(bool),

    /// Set or clear the user-facing error.
    SetError(Option<String>),
}

impl Action {
    /// Short name used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetUser(_) => "set_user",
            Self::SetAuthenticated(_) => "set_authenticated",
            Self::Logout => "logout",
            Self::SetCart(_) => "set_cart",
            Self::AddToCart(_) => "add_to_cart",
            Self::RemoveFromCart(_) => "remove_from_cart",
            Self::UpdateCartItemQuantity { .. } => "update_cart_item_quantity",
            Self::ClearCart => "clear_cart",
            Self::SetOrders(_) => "set_orders",
            Self::AddOrder(_) => "add_order",
            Self::UpdateOrderStatus { .. } => "update_order_status",
            Self::OrderPlaced(_) => "order_placed",
            Self::SetMenuItems(_) => "set_menu_items",
            Self::SetCategories(_) => "set_categories",
            Self::SetLoading(_) => "set_loading",
            Self::SetError(_) => "set_error",
        }
    }
}
