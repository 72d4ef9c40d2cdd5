//! REST DTOs with serde derives for HTTP API

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ===== Catalog DTOs =====

/// Category response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryDto {
    pub id: i64,

    #[schema(example = "Books")]
    pub name: String,
}

/// Category create/update request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CategoryRequest {
    #[schema(example = "Books")]
    pub name: String,
}

/// Order client
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Product as seen from an order line
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i64,
    pub name: String,
    pub description: String,

    /// Current catalog price
    #[schema(value_type = String, example = "19.90")]
    pub price: Decimal,

    pub img_url: String,
}

// ===== Order DTOs =====

/// Order lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatusDto {
    WaitingPayment,
    Paid,
    Shipped,
    Delivered,
    Canceled,
}

/// Payment response DTO; `id` is the owning order's id
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentDto {
    pub id: i64,
    pub moment: DateTime<Utc>,
}

/// Order line response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItemDto {
    pub product: ProductDto,

    pub quantity: i32,

    /// Unit price captured when the order was placed
    #[schema(value_type = String, example = "19.90")]
    pub price: Decimal,

    #[schema(value_type = String, example = "39.80")]
    pub subtotal: Decimal,
}

/// Order response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub id: i64,

    pub moment: DateTime<Utc>,

    pub order_status: OrderStatusDto,

    pub client: UserDto,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentDto>,

    pub items: Vec<OrderItemDto>,

    #[schema(value_type = String, example = "49.79")]
    pub total: Decimal,
}

/// Reference to an existing entity by id
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct EntityRef {
    pub id: Option<i64>,
}

/// Payment part of an order request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PaymentRequest {
    /// Defaults to the time the request is processed
    #[serde(default)]
    pub moment: Option<DateTime<Utc>>,
}

/// Requested order line
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OrderItemRequest {
    pub product: Option<EntityRef>,

    pub quantity: i32,

    /// Defaults to the product's current price
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "9.99")]
    pub price: Option<Decimal>,
}

/// Order creation request
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub client: Option<EntityRef>,

    /// Defaults to the time the request is processed
    #[serde(default)]
    pub moment: Option<DateTime<Utc>>,

    /// Defaults to WAITING_PAYMENT
    #[serde(default)]
    pub order_status: Option<OrderStatusDto>,

    #[serde(default)]
    pub payment: Option<PaymentRequest>,

    #[serde(default)]
    pub items: Vec<OrderItemRequest>,
}

/// Order update request; replaces header fields and payment
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    pub moment: DateTime<Utc>,

    pub order_status: OrderStatusDto,

    pub client: EntityRef,

    /// Omitting the payment removes it from the order
    #[serde(default)]
    pub payment: Option<PaymentRequest>,
}

// Note: Conversion implementations live in mapper.rs
