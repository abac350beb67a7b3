//! App Context

use std::{sync::Arc, time::Duration};

use crate::{
    auth::{IdentityService, InMemoryIdentityService},
    facades::{CallPolicy, Catalog, Checkout, Session, Tracking},
    menu::{FixtureMenuService, MenuService},
    orders::{InMemoryOrderService, OrderService},
    store::{Storage, Store},
};

/// External services the facades talk to.
#[derive(Clone)]
pub struct Services {
    /// Authentication backend.
    pub identity: Arc<dyn IdentityService>,

    /// Menu source.
    pub menu: Arc<dyn MenuService>,

    /// Order backend.
    pub orders: Arc<dyn OrderService>,
}

impl Services {
    /// In-memory services seeded with the demo account and the fixture
    /// menu, each answering after `latency`.
    #[must_use]
    pub fn in_memory(latency: Duration) -> Self {
        Self {
            identity: Arc::new(InMemoryIdentityService::with_demo_account(latency)),
            menu: Arc::new(FixtureMenuService::new(latency)),
            orders: Arc::new(InMemoryOrderService::new(latency)),
        }
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}

/// The store plus every facade, wired to one set of services.
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Application state.
    pub store: Arc<Store>,

    /// Sign-in and sign-out.
    pub session: Arc<Session>,

    /// Order placement.
    pub checkout: Arc<Checkout>,

    /// Menu loading.
    pub catalog: Arc<Catalog>,

    /// Order status polling.
    pub tracking: Arc<Tracking>,
}

impl AppContext {
    /// Build a context, rehydrating the store from `storage`.
    pub fn new(storage: Arc<dyn Storage>, services: Services, policy: CallPolicy) -> Self {
        let store = Arc::new(Store::hydrate(storage));

        Self {
            session: Arc::new(Session::new(store.clone(), services.identity, policy)),
            checkout: Arc::new(Checkout::new(
                store.clone(),
                services.orders.clone(),
                policy,
            )),
            catalog: Arc::new(Catalog::new(store.clone(), services.menu, policy)),
            tracking: Arc::new(Tracking::new(store.clone(), services.orders, policy)),
            store,
        }
    }
}
