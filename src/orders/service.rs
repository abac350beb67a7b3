//! Orders service.

use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tokio::sync::RwLock;
use tracing::info;

use crate::orders::{
    errors::OrderServiceError,
    models::{Order, OrderUuid},
    status::OrderStatus,
};

/// Order service keeping accepted orders in memory.
///
/// Stands in for the kitchen: [`advance`](Self::advance) and
/// [`cancel`](Self::cancel) move orders through their lifecycle the way
/// kitchen staff would.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderService {
    latency: Duration,
    orders: Arc<RwLock<HashMap<OrderUuid, Order>>>,
}

impl InMemoryOrderService {
    /// Create a service that waits `latency` before every answer.
    #[must_use]
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            orders: Arc::default(),
        }
    }

    /// Move an order one step along the happy path.
    ///
    /// # Errors
    ///
    /// Returns [`OrderServiceError::NotFound`] for unknown orders and
    /// [`OrderServiceError::Rejected`] when the order is already terminal.
    pub async fn advance(&self, id: OrderUuid) -> Result<OrderStatus, OrderServiceError> {
        self.transition(id, |status| status.next()).await
    }

    /// Cancel an order that hasn't finished yet.
    ///
    /// # Errors
    ///
    /// Returns [`OrderServiceError::NotFound`] for unknown orders and
    /// [`OrderServiceError::Rejected`] when the order is already terminal.
    pub async fn cancel(&self, id: OrderUuid) -> Result<OrderStatus, OrderServiceError> {
        self.transition(id, |status| {
            status
                .can_transition_to(OrderStatus::Cancelled)
                .then_some(OrderStatus::Cancelled)
        })
        .await
    }

    async fn transition(
        &self,
        id: OrderUuid,
        step: impl FnOnce(OrderStatus) -> Option<OrderStatus>,
    ) -> Result<OrderStatus, OrderServiceError> {
        let mut orders = self.orders.write().await;

        let order = orders.get_mut(&id).ok_or(OrderServiceError::NotFound)?;

        let next = step(order.status).ok_or_else(|| {
            OrderServiceError::Rejected(format!("order is already {}", order.status))
        })?;

        order.status = next;
        order.updated_at = Timestamp::now();

        info!(order_id = %id, status = %next, "kitchen updated order");

        Ok(next)
    }
}

#[async_trait]
impl OrderService for InMemoryOrderService {
    async fn create_order(&self, order: Order) -> Result<Order, OrderServiceError> {
        tokio::time::sleep(self.latency).await;

        let mut orders = self.orders.write().await;

        if orders.contains_key(&order.id) {
            return Err(OrderServiceError::AlreadyExists);
        }

        orders.insert(order.id, order.clone());

        Ok(order)
    }

    async fn order_status(&self, id: OrderUuid) -> Result<OrderStatus, OrderServiceError> {
        tokio::time::sleep(self.latency).await;

        self.orders
            .read()
            .await
            .get(&id)
            .map(|order| order.status)
            .ok_or(OrderServiceError::NotFound)
    }
}

/// Order management backend.
#[automock]
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Persist a newly placed order, returning the stored copy.
    async fn create_order(&self, order: Order) -> Result<Order, OrderServiceError>;

    /// Current kitchen status of an order.
    async fn order_status(&self, id: OrderUuid) -> Result<OrderStatus, OrderServiceError>;
}
