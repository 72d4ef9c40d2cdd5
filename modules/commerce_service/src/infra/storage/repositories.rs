//! SeaORM repository implementations

use crate::contract::{Category, Order, OrderItem, Payment, Product, User};
use crate::domain::repository::{
    CategoryRepository, NewOrderHeader, OrderHeader, OrderStore, OrderTransaction, StoreError,
    StoreResult,
};
use anyhow::anyhow;
use async_trait::async_trait;
use sea_orm::sqlx::{error::ErrorKind, sqlite::SqliteError};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    DbErr, EntityTrait, QueryFilter, QueryOrder, RuntimeErr, Select, SqlErr, TransactionTrait,
};
use std::collections::HashMap;
use std::sync::Arc;

use super::entity::{category, order, order_item, payment, product, user};
use super::mapper::order_item_from_parts;

/// Primary result code shared by every SQLite constraint failure
const SQLITE_CONSTRAINT: i32 = 19;

/// Ids bound per `IN (...)` list, below SQLite's host parameter limit
const IN_LIST_CHUNK: usize = 500;

/// Classify a database error for the domain layer
pub fn map_db_err(err: DbErr) -> StoreError {
    if let Some(SqlErr::UniqueConstraintViolation(message))
    | Some(SqlErr::ForeignKeyConstraintViolation(message)) = err.sql_err()
    {
        return StoreError::ConstraintViolation(message);
    }
    if let Some(message) = constraint_message(&err) {
        return StoreError::ConstraintViolation(message);
    }
    StoreError::Backend(anyhow::Error::new(err))
}

/// Constraint failures that `sql_err` leaves unclassified, e.g. SQLite's
/// `SQLITE_CONSTRAINT_TRIGGER` (1811) raised by `ON DELETE RESTRICT`.
fn constraint_message(err: &DbErr) -> Option<String> {
    let (DbErr::Exec(RuntimeErr::SqlxError(e)) | DbErr::Query(RuntimeErr::SqlxError(e))) = err
    else {
        return None;
    };
    let db = e.as_database_error()?;

    let is_constraint = match db.kind() {
        ErrorKind::UniqueViolation
        | ErrorKind::ForeignKeyViolation
        | ErrorKind::NotNullViolation
        | ErrorKind::CheckViolation => true,
        _ => {
            db.try_downcast_ref::<SqliteError>().is_some()
                && db
                    .code()
                    .and_then(|code| code.parse::<i32>().ok())
                    .is_some_and(|code| code & 0xff == SQLITE_CONSTRAINT)
        }
    };

    is_constraint.then(|| db.message().to_string())
}

// ===== Category Repository =====

pub struct SeaOrmCategoryRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmCategoryRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepository for SeaOrmCategoryRepository {
    async fn list_all(&self) -> StoreResult<Vec<Category>> {
        let results = category::Entity::find()
            .order_by_asc(category::Column::Id)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Category>> {
        let result = category::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, name: &str) -> StoreResult<Category> {
        use sea_orm::ActiveValue::{NotSet, Set};

        let active = category::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
        };
        let model = active.insert(&*self.db).await.map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn update(&self, category: &Category) -> StoreResult<Option<Category>> {
        let existing = category::Entity::find_by_id(category.id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;
        if existing.is_none() {
            return Ok(None);
        }

        let active: category::ActiveModel = category.into();
        let model = active.update(&*self.db).await.map_err(map_db_err)?;

        Ok(Some(model.into()))
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let result = category::Entity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected > 0)
    }
}

// ===== Order Store =====

pub struct SeaOrmOrderStore {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmOrderStore {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderStore for SeaOrmOrderStore {
    async fn list_orders(&self) -> StoreResult<Vec<Order>> {
        let headers = order::Entity::find()
            .order_by_asc(order::Column::Id)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        resolve_orders(&*self.db, headers).await
    }

    async fn find_order(&self, id: i64) -> StoreResult<Option<Order>> {
        find_order_on(&*self.db, id).await
    }

    async fn delete_order(&self, id: i64) -> StoreResult<bool> {
        let result = order::Entity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn begin(&self) -> StoreResult<Box<dyn OrderTransaction>> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        Ok(Box::new(SeaOrmOrderTransaction { txn }))
    }
}

/// Order unit of work backed by a database transaction.
/// SeaORM rolls the transaction back when it is dropped uncommitted.
pub struct SeaOrmOrderTransaction {
    txn: DatabaseTransaction,
}

#[async_trait]
impl OrderTransaction for SeaOrmOrderTransaction {
    async fn find_user(&self, id: i64) -> StoreResult<Option<User>> {
        let result = user::Entity::find_by_id(id)
            .one(&self.txn)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_product(&self, id: i64) -> StoreResult<Option<Product>> {
        let result = product::Entity::find_by_id(id)
            .one(&self.txn)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_order_header(&self, id: i64) -> StoreResult<Option<OrderHeader>> {
        let result = order::Entity::find_by_id(id)
            .one(&self.txn)
            .await
            .map_err(map_db_err)?;

        match result {
            Some(entity) => Ok(Some(entity.try_into()?)),
            None => Ok(None),
        }
    }

    async fn find_order(&self, id: i64) -> StoreResult<Option<Order>> {
        find_order_on(&self.txn, id).await
    }

    async fn insert_order(&self, header: &NewOrderHeader) -> StoreResult<i64> {
        let active: order::ActiveModel = header.into();
        let model = active.insert(&self.txn).await.map_err(map_db_err)?;

        Ok(model.id)
    }

    async fn update_order(&self, header: &OrderHeader) -> StoreResult<()> {
        let active: order::ActiveModel = header.into();
        active.update(&self.txn).await.map_err(map_db_err)?;

        Ok(())
    }

    async fn save_payment(&self, payment: &Payment) -> StoreResult<Payment> {
        let existing = payment::Entity::find_by_id(payment.order_id)
            .one(&self.txn)
            .await
            .map_err(map_db_err)?;

        let active: payment::ActiveModel = payment.into();
        let model = if existing.is_some() {
            active.update(&self.txn).await
        } else {
            active.insert(&self.txn).await
        }
        .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn delete_payment(&self, order_id: i64) -> StoreResult<()> {
        payment::Entity::delete_by_id(order_id)
            .exec(&self.txn)
            .await
            .map_err(map_db_err)?;

        Ok(())
    }

    async fn insert_order_item(&self, item: &OrderItem) -> StoreResult<OrderItem> {
        let active: order_item::ActiveModel = item.into();
        let model = active.insert(&self.txn).await.map_err(map_db_err)?;

        Ok(order_item_from_parts(model, item.product.clone()))
    }

    async fn commit(self: Box<Self>) -> StoreResult<()> {
        self.txn.commit().await.map_err(map_db_err)
    }
}

// ===== Order Resolution =====

async fn find_order_on<C: ConnectionTrait>(conn: &C, id: i64) -> StoreResult<Option<Order>> {
    let header = order::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(map_db_err)?;

    match header {
        Some(header) => Ok(resolve_orders(conn, vec![header]).await?.pop()),
        None => Ok(None),
    }
}

/// Eagerly load clients, payments, items and products for a batch of order rows
async fn resolve_orders<C: ConnectionTrait>(
    conn: &C,
    headers: Vec<order::Model>,
) -> StoreResult<Vec<Order>> {
    if headers.is_empty() {
        return Ok(Vec::new());
    }

    let order_ids: Vec<i64> = headers.iter().map(|o| o.id).collect();
    let mut client_ids: Vec<i64> = headers.iter().map(|o| o.client_id).collect();
    client_ids.sort_unstable();
    client_ids.dedup();

    let clients: HashMap<i64, User> = load_in_chunks(conn, &client_ids, |ids| {
        user::Entity::find().filter(user::Column::Id.is_in(ids))
    })
    .await?
    .into_iter()
    .map(|u| (u.id, User::from(u)))
    .collect();

    let mut payments: HashMap<i64, Payment> = load_in_chunks(conn, &order_ids, |ids| {
        payment::Entity::find().filter(payment::Column::OrderId.is_in(ids))
    })
    .await?
    .into_iter()
    .map(|p| (p.order_id, Payment::from(p)))
    .collect();

    let item_rows = load_in_chunks(conn, &order_ids, |ids| {
        order_item::Entity::find()
            .filter(order_item::Column::OrderId.is_in(ids))
            .order_by_asc(order_item::Column::OrderId)
            .order_by_asc(order_item::Column::ProductId)
    })
    .await?;

    let mut product_ids: Vec<i64> = item_rows.iter().map(|i| i.product_id).collect();
    product_ids.sort_unstable();
    product_ids.dedup();

    let products: HashMap<i64, Product> = load_in_chunks(conn, &product_ids, |ids| {
        product::Entity::find().filter(product::Column::Id.is_in(ids))
    })
    .await?
    .into_iter()
    .map(|p| (p.id, Product::from(p)))
    .collect();

    let mut items: HashMap<i64, Vec<OrderItem>> = HashMap::new();
    for row in item_rows {
        let product = products.get(&row.product_id).cloned().ok_or_else(|| {
            anyhow!(
                "order item ({}, {}) references missing product",
                row.order_id,
                row.product_id
            )
        })?;
        items
            .entry(row.order_id)
            .or_default()
            .push(order_item_from_parts(row, product));
    }

    let mut orders = Vec::with_capacity(headers.len());
    for entity in headers {
        let header = OrderHeader::try_from(entity)?;
        let client = clients.get(&header.client_id).cloned().ok_or_else(|| {
            anyhow!(
                "order {} references missing user {}",
                header.id,
                header.client_id
            )
        })?;

        orders.push(Order {
            id: header.id,
            moment: header.moment,
            status: header.status,
            client,
            payment: payments.remove(&header.id),
            items: items.remove(&header.id).unwrap_or_default(),
        });
    }

    Ok(orders)
}

/// Run `select` once per chunk of `ids` and concatenate the rows
async fn load_in_chunks<C, E, F>(conn: &C, ids: &[i64], select: F) -> StoreResult<Vec<E::Model>>
where
    C: ConnectionTrait,
    E: EntityTrait,
    F: Fn(Vec<i64>) -> Select<E> + Sync,
{
    let mut rows = Vec::new();
    for chunk in ids.chunks(IN_LIST_CHUNK) {
        rows.extend(select(chunk.to_vec()).all(conn).await.map_err(map_db_err)?);
    }
    Ok(rows)
}
