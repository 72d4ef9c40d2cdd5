//! Native client trait for inter-module communication
//!
//! Other modules use this trait to place and inspect orders without going
//! through HTTP.

use super::{
    error::CommerceError,
    model::{Category, NewCategory, NewOrder, Order, OrderPatch},
};
use async_trait::async_trait;

/// Commerce service API for inter-module communication
#[async_trait]
pub trait CommerceApi: Send + Sync {
    // ===== Category Operations =====

    /// List all categories
    async fn list_categories(&self) -> Result<Vec<Category>, CommerceError>;

    /// Get a category by id
    async fn get_category(&self, id: i64) -> Result<Category, CommerceError>;

    /// Create a category
    async fn create_category(&self, category: NewCategory) -> Result<Category, CommerceError>;

    /// Rename a category
    async fn update_category(
        &self,
        id: i64,
        category: NewCategory,
    ) -> Result<Category, CommerceError>;

    /// Delete a category
    async fn delete_category(&self, id: i64) -> Result<(), CommerceError>;

    // ===== Order Operations =====

    /// List all orders
    async fn list_orders(&self) -> Result<Vec<Order>, CommerceError>;

    /// Get an order by id
    async fn get_order(&self, id: i64) -> Result<Order, CommerceError>;

    /// Place a new order
    async fn insert_order(&self, order: NewOrder) -> Result<Order, CommerceError>;

    /// Replace an order's header fields and payment
    async fn update_order(&self, id: i64, patch: OrderPatch) -> Result<Order, CommerceError>;

    /// Delete an order
    async fn delete_order(&self, id: i64) -> Result<(), CommerceError>;
}
