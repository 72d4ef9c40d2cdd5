//! Contract layer - public API for inter-module communication
//!
//! This layer contains transport-agnostic models and the native client trait.
//! NO serde derives on models - these are pure domain types.

pub mod client;
pub mod error;
pub mod model;

pub use client::CommerceApi;
pub use error::CommerceError;
pub use model::{
    Category, NewCategory, NewOrder, NewOrderItem, NewPayment, Order, OrderItem, OrderPatch,
    OrderStatus, Payment, Product, User,
};
