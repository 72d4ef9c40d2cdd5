//! Structural validation of incoming requests
//!
//! Everything here runs before a transaction is opened, so a rejected request
//! never reaches the store.

use crate::contract::{CommerceError, NewCategory, NewOrder};
use rust_decimal::Decimal;

/// Order line with every required reference present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRequest {
    pub product_id: i64,
    pub quantity: i32,
    pub price: Option<Decimal>,
}

/// Validate an order request and return the client id plus a private copy of
/// the requested items.
pub fn validate_new_order(
    order: &NewOrder,
    max_items: usize,
) -> Result<(i64, Vec<ItemRequest>), CommerceError> {
    let client_id = order
        .client_id
        .ok_or_else(|| CommerceError::invalid_argument("client id is required"))?;

    if order.items.len() > max_items {
        return Err(CommerceError::invalid_argument(format!(
            "an order may contain at most {} items, got {}",
            max_items,
            order.items.len()
        )));
    }

    let mut items = Vec::with_capacity(order.items.len());
    for item in &order.items {
        let product_id = item
            .product_id
            .ok_or_else(|| CommerceError::invalid_argument("product id is required"))?;

        if item.quantity <= 0 {
            return Err(CommerceError::invalid_argument(format!(
                "quantity must be positive for product {}, got {}",
                product_id, item.quantity
            )));
        }

        if let Some(price) = item.price {
            if price.is_sign_negative() {
                return Err(CommerceError::invalid_argument(format!(
                    "price must not be negative for product {}",
                    product_id
                )));
            }
        }

        items.push(ItemRequest {
            product_id,
            quantity: item.quantity,
            price: item.price,
        });
    }

    Ok((client_id, items))
}

/// Validate a category payload and return the trimmed name
pub fn validate_category(category: &NewCategory) -> Result<String, CommerceError> {
    let name = category.name.trim();
    if name.is_empty() {
        return Err(CommerceError::invalid_argument("category name is required"));
    }
    Ok(name.to_string())
}
