//! Domain service - business logic orchestration

use super::repository::{
    CategoryRepository, NewOrderHeader, OrderStore, OrderTransaction, StoreError,
};
use super::validation::{validate_category, validate_new_order};
use crate::config::Config;
use crate::contract::{
    Category, CommerceError, NewCategory, NewOrder, Order, OrderItem, OrderPatch, Payment, User,
};
use chrono::Utc;
use std::sync::Arc;

/// Domain service for categories and orders
pub struct Service {
    category_repo: Arc<dyn CategoryRepository>,
    order_store: Arc<dyn OrderStore>,
    max_items_per_order: usize,
}

impl Service {
    /// Create a new service instance
    pub fn new(
        category_repo: Arc<dyn CategoryRepository>,
        order_store: Arc<dyn OrderStore>,
        config: &Config,
    ) -> Self {
        Self {
            category_repo,
            order_store,
            max_items_per_order: config.max_items_per_order,
        }
    }

    // ===== Category Operations =====

    pub async fn list_categories(&self) -> Result<Vec<Category>, CommerceError> {
        self.category_repo.list_all().await.map_err(map_store_error)
    }

    pub async fn get_category(&self, id: i64) -> Result<Category, CommerceError> {
        self.category_repo
            .find_by_id(id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| CommerceError::not_found("category", id))
    }

    #[tracing::instrument(skip(self))]
    pub async fn create_category(&self, category: NewCategory) -> Result<Category, CommerceError> {
        let name = validate_category(&category)?;
        let created = self
            .category_repo
            .insert(&name)
            .await
            .map_err(map_store_error)?;
        tracing::info!(category_id = created.id, "category created");
        Ok(created)
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_category(
        &self,
        id: i64,
        category: NewCategory,
    ) -> Result<Category, CommerceError> {
        let name = validate_category(&category)?;
        self.category_repo
            .update(&Category { id, name })
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| CommerceError::not_found("category", id))
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_category(&self, id: i64) -> Result<(), CommerceError> {
        let deleted = self
            .category_repo
            .delete(id)
            .await
            .map_err(map_store_error)?;
        if !deleted {
            return Err(CommerceError::not_found("category", id));
        }
        tracing::info!(category_id = id, "category deleted");
        Ok(())
    }

    // ===== Order Operations =====

    pub async fn list_orders(&self) -> Result<Vec<Order>, CommerceError> {
        self.order_store.list_orders().await.map_err(map_store_error)
    }

    pub async fn get_order(&self, id: i64) -> Result<Order, CommerceError> {
        self.order_store
            .find_order(id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| CommerceError::not_found("order", id))
    }

    /// Place a new order.
    ///
    /// The client and every product are resolved inside a single transaction
    /// together with the header, payment and item writes. Any failure drops the
    /// transaction before commit, so nothing from this call is persisted.
    #[tracing::instrument(
        skip(self, request),
        fields(client_id = ?request.client_id, items = request.items.len())
    )]
    pub async fn insert_order(&self, request: NewOrder) -> Result<Order, CommerceError> {
        let (client_id, requested_items) =
            validate_new_order(&request, self.max_items_per_order)?;

        let tx = self.order_store.begin().await.map_err(map_store_error)?;
        let client = resolve_user(tx.as_ref(), client_id).await?;

        let now = Utc::now();
        let header = NewOrderHeader {
            moment: request.moment.unwrap_or(now),
            status: request.status.unwrap_or_default(),
            client_id: client.id,
        };
        let order_id = tx.insert_order(&header).await.map_err(map_store_error)?;
        tracing::debug!(order_id, "order header written");

        let payment = match &request.payment {
            Some(requested) => {
                let payment = Payment {
                    order_id,
                    moment: requested.moment.unwrap_or(now),
                };
                Some(tx.save_payment(&payment).await.map_err(map_store_error)?)
            }
            None => None,
        };

        let mut items = Vec::with_capacity(requested_items.len());
        for requested in requested_items {
            let product = tx
                .find_product(requested.product_id)
                .await
                .map_err(map_store_error)?
                .ok_or_else(|| {
                    tracing::warn!(product_id = requested.product_id, "product not found");
                    CommerceError::not_found("product", requested.product_id)
                })?;

            let price = requested.price.unwrap_or(product.price);
            let item = OrderItem {
                order_id,
                product,
                quantity: requested.quantity,
                price,
            };
            items.push(tx.insert_order_item(&item).await.map_err(map_store_error)?);
        }

        tx.commit().await.map_err(map_store_error)?;
        tracing::info!(order_id, items = items.len(), "order placed");

        Ok(Order {
            id: order_id,
            moment: header.moment,
            status: header.status,
            client,
            payment,
            items,
        })
    }

    /// Replace moment, status, client and payment of an existing order.
    /// Items are left untouched.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_order(&self, id: i64, patch: OrderPatch) -> Result<Order, CommerceError> {
        let tx = self.order_store.begin().await.map_err(map_store_error)?;

        let mut header = tx
            .find_order_header(id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| CommerceError::not_found("order", id))?;
        let client = resolve_user(tx.as_ref(), patch.client_id).await?;

        header.moment = patch.moment;
        header.status = patch.status;
        header.client_id = client.id;
        tx.update_order(&header).await.map_err(map_store_error)?;

        match patch.payment {
            Some(requested) => {
                let payment = Payment {
                    order_id: id,
                    moment: requested.moment.unwrap_or_else(Utc::now),
                };
                tx.save_payment(&payment).await.map_err(map_store_error)?;
            }
            None => tx.delete_payment(id).await.map_err(map_store_error)?,
        }

        let order = tx
            .find_order(id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| CommerceError::not_found("order", id))?;

        tx.commit().await.map_err(map_store_error)?;
        tracing::info!(order_id = id, "order updated");
        Ok(order)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_order(&self, id: i64) -> Result<(), CommerceError> {
        let deleted = self
            .order_store
            .delete_order(id)
            .await
            .map_err(map_store_error)?;
        if !deleted {
            return Err(CommerceError::not_found("order", id));
        }
        tracing::info!(order_id = id, "order deleted");
        Ok(())
    }
}

// ===== Helper Functions =====

async fn resolve_user(tx: &dyn OrderTransaction, id: i64) -> Result<User, CommerceError> {
    tx.find_user(id)
        .await
        .map_err(map_store_error)?
        .ok_or_else(|| {
            tracing::warn!(user_id = id, "client not found");
            CommerceError::not_found("user", id)
        })
}

/// Collapse a gateway failure into the contract taxonomy
fn map_store_error(err: StoreError) -> CommerceError {
    match err {
        StoreError::ConstraintViolation(message) => {
            tracing::warn!(%message, "constraint violation");
            CommerceError::ConstraintViolation { message }
        }
        StoreError::Backend(err) => {
            tracing::error!(error = ?err, "store failure");
            CommerceError::Internal
        }
    }
}
