//! Menu loading.

use std::{fmt, sync::Arc};

use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::{
    facades::calls::{CallError, CallPolicy, CancelSignal, guarded},
    menu::{MenuService, MenuServiceError},
    store::Store,
};

const FETCH_MENU_FAILED: &str = "Failed to fetch menu data";

/// Errors returned by [`Catalog`].
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The menu service call failed.
    #[error("menu service call failed: {0}")]
    Menu(#[from] CallError<MenuServiceError>),
}

/// Keeps the store's copy of the menu fresh.
pub struct Catalog {
    store: Arc<Store>,
    menu: Arc<dyn MenuService>,
    policy: CallPolicy,
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl Catalog {
    /// Create a catalog facade.
    pub fn new(store: Arc<Store>, menu: Arc<dyn MenuService>, policy: CallPolicy) -> Self {
        Self {
            store,
            menu,
            policy,
        }
    }

    /// Fetch menu items and categories and replace both in the store.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Menu`] when either fetch fails; the store
    /// keeps its previous menu.
    #[instrument(skip_all)]
    pub async fn load_menu(&self, cancel: &CancelSignal) -> Result<(), CatalogError> {
        self.store.set_loading(true);
        self.store.set_error(None);

        let fetch = async {
            tokio::try_join!(self.menu.list_menu_items(), self.menu.list_categories())
        };

        let outcome = match guarded(self.policy, cancel, fetch).await {
            Ok((items, categories)) => {
                debug!(items = items.len(), categories = categories.len(), "menu loaded");

                self.store.set_menu_items(items);
                self.store.set_categories(categories);

                Ok(())
            }
            Err(error) => {
                warn!(error = %error, "menu fetch failed");
                self.store.set_error(Some(FETCH_MENU_FAILED.to_string()));

                Err(error.into())
            }
        };

        self.store.set_loading(false);

        outcome
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use testresult::TestResult;

    use crate::{
        menu::{FixtureMenuService, MockMenuService, fixtures},
        store::MemoryStorage,
    };

    use super::*;

    fn catalog(menu: impl MenuService + 'static) -> (Arc<Store>, Catalog) {
        let store = Arc::new(Store::new(Arc::new(MemoryStorage::new())));
        let catalog = Catalog::new(store.clone(), Arc::new(menu), CallPolicy::default());

        (store, catalog)
    }

    #[tokio::test]
    async fn load_menu_fills_store() -> TestResult {
        let (store, catalog) = catalog(FixtureMenuService::default());

        catalog.load_menu(&CancelSignal::never()).await?;

        let state = store.state();

        assert_eq!(state.menu_items, fixtures::menu_items());
        assert_eq!(state.categories, fixtures::categories());
        assert!(!state.is_loading);
        assert_eq!(state.error, None);

        Ok(())
    }

    #[tokio::test]
    async fn failed_fetch_keeps_previous_menu() {
        let mut menu = MockMenuService::new();

        menu.expect_list_menu_items()
            .returning(|| Err(MenuServiceError::Unavailable));
        menu.expect_list_categories()
            .returning(|| Ok(fixtures::categories()));

        let (store, catalog) = catalog(menu);

        store.set_menu_items(fixtures::menu_items());

        let result = catalog.load_menu(&CancelSignal::never()).await;

        let state = store.state();

        assert!(matches!(
            result,
            Err(CatalogError::Menu(CallError::Service(MenuServiceError::Unavailable)))
        ));
        assert_eq!(state.menu_items.len(), 6);
        assert!(state.categories.is_empty());
        assert_eq!(state.error.as_deref(), Some(FETCH_MENU_FAILED));
        assert!(!state.is_loading);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_menu_times_out() {
        let menu = FixtureMenuService::new(Duration::from_secs(11));
        let (store, catalog) = catalog(menu);

        let result = catalog.load_menu(&CancelSignal::never()).await;

        assert!(matches!(result, Err(CatalogError::Menu(CallError::TimedOut(_)))));
        assert!(store.state().menu_items.is_empty());
    }
}
