//! Menu service.

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;

use crate::menu::{
    errors::MenuServiceError,
    fixtures,
    models::{Category, MenuItem},
};

/// Menu service answering from the canteen's fixed menu after a simulated
/// network delay.
#[derive(Debug, Clone, Default)]
pub struct FixtureMenuService {
    latency: Duration,
}

impl FixtureMenuService {
    /// Create a service that waits `latency` before every answer.
    #[must_use]
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl MenuService for FixtureMenuService {
    async fn list_menu_items(&self) -> Result<Vec<MenuItem>, MenuServiceError> {
        tokio::time::sleep(self.latency).await;

        Ok(fixtures::menu_items())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, MenuServiceError> {
        tokio::time::sleep(self.latency).await;

        Ok(fixtures::categories())
    }
}

/// Source of the menu catalogue.
#[automock]
#[async_trait]
pub trait MenuService: Send + Sync {
    /// Retrieves every menu item.
    async fn list_menu_items(&self) -> Result<Vec<MenuItem>, MenuServiceError>;

    /// Retrieves the menu categories.
    async fn list_categories(&self) -> Result<Vec<Category>, MenuServiceError>;
}
