//! Commerce Service Module
//!
//! Product categories and customer orders with their items and payments.
//! Orders are assembled from resolved clients and products inside a single
//! database transaction.

// Public exports
pub mod contract;
pub use contract::{
    client::CommerceApi, error::CommerceError, Category, NewCategory, NewOrder, NewOrderItem,
    NewPayment, Order, OrderItem, OrderPatch, OrderStatus, Payment, Product, User,
};

pub mod module;
pub use module::CommerceServiceModule;

pub mod config;
pub use config::Config;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
