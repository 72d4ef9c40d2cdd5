//! Domain layer - business logic and services

pub mod repository;
pub mod service;
pub mod validation;

pub use repository::{CategoryRepository, OrderStore, OrderTransaction, StoreError};
pub use service::Service;
