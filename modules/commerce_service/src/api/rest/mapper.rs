//! Mapper implementations for converting between DTOs and contract models
//!
//! This module contains all From/Into implementations for bidirectional
//! conversion between REST DTOs and transport-agnostic contract models.

use super::dto::*;
use crate::contract::{self, CommerceError};

// ===== Catalog conversions =====

impl From<contract::Category> for CategoryDto {
    fn from(category: contract::Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}

impl From<CategoryRequest> for contract::NewCategory {
    fn from(req: CategoryRequest) -> Self {
        Self { name: req.name }
    }
}

impl From<contract::User> for UserDto {
    fn from(user: contract::User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
        }
    }
}

impl From<contract::Product> for ProductDto {
    fn from(product: contract::Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            img_url: product.img_url,
        }
    }
}

// ===== Order conversions =====

impl From<contract::OrderStatus> for OrderStatusDto {
    fn from(status: contract::OrderStatus) -> Self {
        match status {
            contract::OrderStatus::WaitingPayment => Self::WaitingPayment,
            contract::OrderStatus::Paid => Self::Paid,
            contract::OrderStatus::Shipped => Self::Shipped,
            contract::OrderStatus::Delivered => Self::Delivered,
            contract::OrderStatus::Canceled => Self::Canceled,
        }
    }
}

impl From<OrderStatusDto> for contract::OrderStatus {
    fn from(status: OrderStatusDto) -> Self {
        match status {
            OrderStatusDto::WaitingPayment => Self::WaitingPayment,
            OrderStatusDto::Paid => Self::Paid,
            OrderStatusDto::Shipped => Self::Shipped,
            OrderStatusDto::Delivered => Self::Delivered,
            OrderStatusDto::Canceled => Self::Canceled,
        }
    }
}

impl From<contract::Order> for OrderDto {
    fn from(order: contract::Order) -> Self {
        let total = order.total();
        Self {
            id: order.id,
            moment: order.moment,
            order_status: order.status.into(),
            client: order.client.into(),
            payment: order.payment.map(|p| PaymentDto {
                id: p.order_id,
                moment: p.moment,
            }),
            items: order
                .items
                .into_iter()
                .map(|item| {
                    let subtotal = item.subtotal();
                    OrderItemDto {
                        product: item.product.into(),
                        quantity: item.quantity,
                        price: item.price,
                        subtotal,
                    }
                })
                .collect(),
            total,
        }
    }
}

impl From<PaymentRequest> for contract::NewPayment {
    fn from(req: PaymentRequest) -> Self {
        Self {
            moment: req.moment,
        }
    }
}

impl From<CreateOrderRequest> for contract::NewOrder {
    fn from(req: CreateOrderRequest) -> Self {
        Self {
            client_id: req.client.and_then(|c| c.id),
            moment: req.moment,
            status: req.order_status.map(Into::into),
            payment: req.payment.map(Into::into),
            items: req
                .items
                .into_iter()
                .map(|item| contract::NewOrderItem {
                    product_id: item.product.and_then(|p| p.id),
                    quantity: item.quantity,
                    price: item.price,
                })
                .collect(),
        }
    }
}

impl TryFrom<UpdateOrderRequest> for contract::OrderPatch {
    type Error = CommerceError;

    fn try_from(req: UpdateOrderRequest) -> Result<Self, Self::Error> {
        let client_id = req
            .client
            .id
            .ok_or_else(|| CommerceError::invalid_argument("client id is required"))?;

        Ok(Self {
            moment: req.moment,
            status: req.order_status.into(),
            client_id,
            payment: req.payment.map(Into::into),
        })
    }
}
