//! Native client implementation - wraps domain service for in-process calls

use crate::contract::{
    Category, CommerceApi, CommerceError, NewCategory, NewOrder, Order, OrderPatch,
};
use crate::domain::Service;
use async_trait::async_trait;
use std::sync::Arc;

/// Native client implementation that directly calls the domain service
///
/// This client is used for in-process communication without HTTP overhead.
#[derive(Clone)]
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    /// Create a new native client
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl CommerceApi for NativeClient {
    async fn list_categories(&self) -> Result<Vec<Category>, CommerceError> {
        self.service.list_categories().await
    }

    async fn get_category(&self, id: i64) -> Result<Category, CommerceError> {
        self.service.get_category(id).await
    }

    async fn create_category(&self, category: NewCategory) -> Result<Category, CommerceError> {
        self.service.create_category(category).await
    }

    async fn update_category(
        &self,
        id: i64,
        category: NewCategory,
    ) -> Result<Category, CommerceError> {
        self.service.update_category(id, category).await
    }

    async fn delete_category(&self, id: i64) -> Result<(), CommerceError> {
        self.service.delete_category(id).await
    }

    async fn list_orders(&self) -> Result<Vec<Order>, CommerceError> {
        self.service.list_orders().await
    }

    async fn get_order(&self, id: i64) -> Result<Order, CommerceError> {
        self.service.get_order(id).await
    }

    async fn insert_order(&self, order: NewOrder) -> Result<Order, CommerceError> {
        self.service.insert_order(order).await
    }

    async fn update_order(&self, id: i64, patch: OrderPatch) -> Result<Order, CommerceError> {
        self.service.update_order(id, patch).await
    }

    async fn delete_order(&self, id: i64) -> Result<(), CommerceError> {
        self.service.delete_order(id).await
    }
}
