//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models

use super::entity::{category, order, order_item, payment, product, user};
use crate::contract::{Category, OrderItem, OrderStatus, Payment, Product, User};
use crate::domain::repository::{NewOrderHeader, OrderHeader};
use anyhow::anyhow;

// ===== Catalog Conversions =====

impl From<user::Model> for User {
    fn from(entity: user::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            email: entity.email,
            phone: entity.phone,
        }
    }
}

impl From<product::Model> for Product {
    fn from(entity: product::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            price: entity.price,
            img_url: entity.img_url,
        }
    }
}

impl From<category::Model> for Category {
    fn from(entity: category::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
        }
    }
}

impl From<&Category> for category::ActiveModel {
    fn from(model: &Category) -> Self {
        use sea_orm::ActiveValue::*;

        Self {
            id: Unchanged(model.id),
            name: Set(model.name.clone()),
        }
    }
}

// ===== Order Conversions =====

impl TryFrom<order::Model> for OrderHeader {
    type Error = anyhow::Error;

    fn try_from(entity: order::Model) -> Result<Self, Self::Error> {
        let status = OrderStatus::from_code(entity.order_status).ok_or_else(|| {
            anyhow!(
                "order {} has unknown status code {}",
                entity.id,
                entity.order_status
            )
        })?;

        Ok(Self {
            id: entity.id,
            moment: entity.moment,
            status,
            client_id: entity.client_id,
        })
    }
}

impl From<&NewOrderHeader> for order::ActiveModel {
    fn from(header: &NewOrderHeader) -> Self {
        use sea_orm::ActiveValue::*;

        Self {
            id: NotSet,
            moment: Set(header.moment),
            order_status: Set(header.status.code()),
            client_id: Set(header.client_id),
        }
    }
}

impl From<&OrderHeader> for order::ActiveModel {
    fn from(header: &OrderHeader) -> Self {
        use sea_orm::ActiveValue::*;

        Self {
            id: Unchanged(header.id),
            moment: Set(header.moment),
            order_status: Set(header.status.code()),
            client_id: Set(header.client_id),
        }
    }
}

impl From<payment::Model> for Payment {
    fn from(entity: payment::Model) -> Self {
        Self {
            order_id: entity.order_id,
            moment: entity.moment,
        }
    }
}

impl From<&Payment> for payment::ActiveModel {
    fn from(model: &Payment) -> Self {
        use sea_orm::ActiveValue::*;

        Self {
            order_id: Set(model.order_id),
            moment: Set(model.moment),
        }
    }
}

impl From<&OrderItem> for order_item::ActiveModel {
    fn from(model: &OrderItem) -> Self {
        use sea_orm::ActiveValue::*;

        Self {
            order_id: Set(model.order_id),
            product_id: Set(model.product.id),
            quantity: Set(model.quantity),
            price: Set(model.price),
        }
    }
}

/// Join an item row with its already loaded product
pub fn order_item_from_parts(entity: order_item::Model, product: Product) -> OrderItem {
    OrderItem {
        order_id: entity.order_id,
        product,
        quantity: entity.quantity,
        price: entity.price,
    }
}
