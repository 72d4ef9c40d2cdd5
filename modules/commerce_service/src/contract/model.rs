//! Contract models for the commerce service
//!
//! These models are transport-agnostic and used for inter-module communication.
//! NO serde derives - these are pure domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Registered customer. Orders reference users by id only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Catalog product; its price is the snapshot source for new order items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub img_url: String,
}

/// Product category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Order lifecycle state, persisted as its integer code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderStatus {
    #[default]
    WaitingPayment,
    Paid,
    Shipped,
    Delivered,
    Canceled,
}

impl OrderStatus {
    pub fn code(self) -> i32 {
        match self {
            OrderStatus::WaitingPayment => 1,
            OrderStatus::Paid => 2,
            OrderStatus::Shipped => 3,
            OrderStatus::Delivered => 4,
            OrderStatus::Canceled => 5,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(OrderStatus::WaitingPayment),
            2 => Some(OrderStatus::Paid),
            3 => Some(OrderStatus::Shipped),
            4 => Some(OrderStatus::Delivered),
            5 => Some(OrderStatus::Canceled),
            _ => None,
        }
    }
}

/// Payment owned by exactly one order; shares the order's identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    /// Id of the owning order
    pub order_id: i64,
    pub moment: DateTime<Utc>,
}

/// Order line with the unit price captured when the order was placed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub order_id: i64,
    pub product: Product,
    pub quantity: i32,
    /// Unit price snapshot; later product price changes do not affect it
    pub price: Decimal,
}

impl OrderItem {
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Fully resolved order: client, payment and items are loaded values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: i64,
    pub moment: DateTime<Utc>,
    pub status: OrderStatus,
    pub client: User,
    pub payment: Option<Payment>,
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Sum of all item subtotals
    pub fn total(&self) -> Decimal {
        self.items.iter().map(OrderItem::subtotal).sum()
    }
}

// ===== Requests =====

/// Category create/update payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
}

/// Order creation request. References are ids that the service resolves.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewOrder {
    pub client_id: Option<i64>,
    pub moment: Option<DateTime<Utc>>,
    pub status: Option<OrderStatus>,
    pub payment: Option<NewPayment>,
    pub items: Vec<NewOrderItem>,
}

/// Payment part of an order request; `moment` defaults to now
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewPayment {
    pub moment: Option<DateTime<Utc>>,
}

/// Requested order line; `price` defaults to the product's current price
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderItem {
    pub product_id: Option<i64>,
    pub quantity: i32,
    pub price: Option<Decimal>,
}

/// Replacement values for an existing order header. Items are not touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderPatch {
    pub moment: DateTime<Utc>,
    pub status: OrderStatus,
    pub client_id: i64,
    /// `None` removes the order's payment
    pub payment: Option<NewPayment>,
}
