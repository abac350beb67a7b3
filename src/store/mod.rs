//! Application state store.
//!
//! A [`Store`] owns the current [`AppState`] snapshot. Every change goes
//! through [`Store::dispatch`], which applies the pure [`reduce`] function,
//! publishes the new snapshot to subscribers and then writes the cart and
//! order records to durable storage when they changed.

use std::{
    fmt,
    sync::{Arc, Mutex, PoisonError},
};

use jiff::Timestamp;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::{
    auth::User,
    cart::CartItem,
    menu::models::{Category, MenuItem, MenuItemUuid},
    orders::{
        models::{Order, OrderUuid},
        status::OrderStatus,
    },
};

pub mod actions;
pub mod persistence;
pub mod reducer;
pub mod state;
pub mod storage;

pub use actions::Action;
pub use reducer::reduce;
pub use state::AppState;
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};

/// Holder of the application state.
pub struct Store {
    state: watch::Sender<Arc<AppState>>,
    storage: Arc<dyn Storage>,
    commit: Mutex<()>,
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl Store {
    /// Create a store with default state.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self::with_state(storage, AppState::default())
    }

    /// Create a store from whatever `storage` holds. Unreadable records are
    /// logged and replaced by defaults, so this never fails.
    pub fn hydrate(storage: Arc<dyn Storage>) -> Self {
        let persisted = persistence::load(storage.as_ref());

        let state = AppState {
            user: persisted.user,
            is_authenticated: persisted.is_authenticated,
            cart: persisted.cart,
            orders: persisted.orders,
            ..AppState::default()
        };

        Self::with_state(storage, state)
    }

    fn with_state(storage: Arc<dyn Storage>, state: AppState) -> Self {
        let (state, _) = watch::channel(Arc::new(state));

        Self {
            state,
            storage,
            commit: Mutex::new(()),
        }
    }

    /// Current snapshot.
    #[must_use]
    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&self.state.borrow())
    }

    /// Receiver notified with every committed snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<AppState>> {
        self.state.subscribe()
    }

    /// Durable storage backing this store.
    #[must_use]
    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    /// Apply `action` and persist the cart and orders if they changed.
    pub fn dispatch(&self, action: Action) {
        let _commit = self.commit.lock().unwrap_or_else(PoisonError::into_inner);

        let name = action.name();
        let mut previous = None;

        let changed = self.state.send_if_modified(|current| {
            let next = reduce(current, action);

            if next == **current {
                return false;
            }

            previous = Some(std::mem::replace(current, Arc::new(next)));

            true
        });

        debug!(action = name, changed, "dispatched");

        if let Some(previous) = previous {
            self.persist(&previous, &self.state());
        }
    }

    fn persist(&self, previous: &AppState, current: &AppState) {
        if previous.cart != current.cart
            && let Err(error) = persistence::save_cart(self.storage(), &current.cart)
        {
            warn!(error = %error, "failed to persist cart");
        }

        if previous.orders != current.orders
            && let Err(error) = persistence::save_orders(self.storage(), &current.orders)
        {
            warn!(error = %error, "failed to persist orders");
        }
    }

    /// Replace the signed-in user.
    pub fn set_user(&self, user: User) {
        self.dispatch(Action::SetUser(user));
    }

    /// Set the authenticated flag.
    pub fn set_authenticated(&self, is_authenticated: bool) {
        self.dispatch(Action::SetAuthenticated(is_authenticated));
    }

    /// Forget the user, the cart and the orders.
    pub fn logout(&self) {
        self.dispatch(Action::Logout);
    }

    /// Replace the cart.
    pub fn set_cart(&self, cart: Vec<CartItem>) {
        self.dispatch(Action::SetCart(cart));
    }

    /// Add `quantity` of `item`, merging with an existing line.
    pub fn add_to_cart(
        &self,
        item: &MenuItem,
        quantity: u32,
        special_instructions: Option<String>,
    ) {
        self.dispatch(Action::AddToCart(CartItem::new(
            item,
            quantity,
            special_instructions,
        )));
    }

    /// Drop the line for `item_id`.
    pub fn remove_from_cart(&self, item_id: MenuItemUuid) {
        self.dispatch(Action::RemoveFromCart(item_id));
    }

    /// Set the quantity of a line; zero removes it.
    pub fn update_cart_item_quantity(&self, item_id: MenuItemUuid, quantity: u32) {
        self.dispatch(Action::UpdateCartItemQuantity { item_id, quantity });
    }

    /// Empty the cart.
    pub fn clear_cart(&self) {
        self.dispatch(Action::ClearCart);
    }

    /// Replace the order list.
    pub fn set_orders(&self, orders: Vec<Order>) {
        self.dispatch(Action::SetOrders(orders));
    }

    /// Record a new order.
    pub fn add_order(&self, order: Order) {
        self.dispatch(Action::AddOrder(order));
    }

    /// Record the latest status of an order, stamped with the current time.
    ///
    /// Any status is recorded; changes the lifecycle doesn't allow are
    /// logged.
    pub fn update_order_status(&self, order_id: OrderUuid, status: OrderStatus) {
        let known = self.state().order(order_id).map(|order| order.status);

        match known {
            Some(current) if current != status && !current.can_transition_to(status) => {
                warn!(%order_id, from = %current, to = %status, "recording out-of-lifecycle status change");
            }
            None => debug!(%order_id, "status update for unknown order ignored"),
            _ => {}
        }

        self.dispatch(Action::UpdateOrderStatus {
            order_id,
            status,
            at: Timestamp::now(),
        });
    }

    /// Replace the menu catalogue.
    pub fn set_menu_items(&self, items: Vec<MenuItem>) {
        self.dispatch(Action::SetMenuItems(items));
    }

    /// Replace the menu categories.
    pub fn set_categories(&self, categories: Vec<Category>) {
        self.dispatch(Action::SetCategories(categories));
    }

    /// Set the loading flag.
    pub fn set_loading(&self, is_loading: bool) {
        self.dispatch(Action::SetLoading(is_loading));
    }

    /// Set or clear the user-facing error.
    pub fn set_error(&self, error: Option<String>) {
        self.dispatch(Action::SetError(error));
    }
}
