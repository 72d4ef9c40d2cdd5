//! Repository traits for data access
//!
//! These traits define the persistence gateway consumed by the domain service.
//! Implementations are in infra/storage/repositories.rs

use crate::contract::{Category, Order, OrderItem, OrderStatus, Payment, Product, User};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Persistence gateway failure
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A referential or uniqueness constraint rejected the write
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    /// Any other backend failure
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Order header columns, without the owned payment and items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderHeader {
    pub id: i64,
    pub moment: DateTime<Utc>,
    pub status: OrderStatus,
    pub client_id: i64,
}

/// Order header to be inserted; the store assigns the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderHeader {
    pub moment: DateTime<Utc>,
    pub status: OrderStatus,
    pub client_id: i64,
}

/// Repository for categories
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// List all categories ordered by id
    async fn list_all(&self) -> StoreResult<Vec<Category>>;

    /// Find a category by id
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Category>>;

    /// Insert a category and return it with its assigned id
    async fn insert(&self, name: &str) -> StoreResult<Category>;

    /// Overwrite an existing category; `None` if it does not exist
    async fn update(&self, category: &Category) -> StoreResult<Option<Category>>;

    /// Delete a category; `false` if nothing was deleted
    async fn delete(&self, id: i64) -> StoreResult<bool>;
}

/// Gateway for orders and the entities an order references
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// List all orders, fully resolved
    async fn list_orders(&self) -> StoreResult<Vec<Order>>;

    /// Find an order by id, fully resolved
    async fn find_order(&self, id: i64) -> StoreResult<Option<Order>>;

    /// Delete an order row; `false` if nothing was deleted
    async fn delete_order(&self, id: i64) -> StoreResult<bool>;

    /// Open a transactional scope
    async fn begin(&self) -> StoreResult<Box<dyn OrderTransaction>>;
}

/// All-or-nothing unit of work over the order tables.
///
/// Writes become visible only after [`OrderTransaction::commit`]. Dropping the
/// transaction without committing rolls every write back.
#[async_trait]
pub trait OrderTransaction: Send + Sync {
    async fn find_user(&self, id: i64) -> StoreResult<Option<User>>;

    async fn find_product(&self, id: i64) -> StoreResult<Option<Product>>;

    async fn find_order_header(&self, id: i64) -> StoreResult<Option<OrderHeader>>;

    async fn find_order(&self, id: i64) -> StoreResult<Option<Order>>;

    /// Insert an order header and return the assigned id
    async fn insert_order(&self, header: &NewOrderHeader) -> StoreResult<i64>;

    async fn update_order(&self, header: &OrderHeader) -> StoreResult<()>;

    /// Insert or replace the payment of `payment.order_id`
    async fn save_payment(&self, payment: &Payment) -> StoreResult<Payment>;

    async fn delete_payment(&self, order_id: i64) -> StoreResult<()>;

    async fn insert_order_item(&self, item: &OrderItem) -> StoreResult<OrderItem>;

    async fn commit(self: Box<Self>) -> StoreResult<()>;
}
