//! Common test utilities: an in-memory transactional store and a small catalog

#![allow(dead_code)]

use async_trait::async_trait;
use commerce_service::contract::*;
use commerce_service::domain::repository::{
    CategoryRepository, NewOrderHeader, OrderHeader, OrderStore, OrderTransaction, StoreError,
    StoreResult,
};
use commerce_service::domain::Service;
use commerce_service::Config;
use parking_lot::{Mutex, RwLock};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

pub const CLIENT_ID: i64 = 7;
pub const OTHER_CLIENT_ID: i64 = 8;
pub const BOOK_ID: i64 = 3;
pub const LAMP_ID: i64 = 5;
pub const CATEGORY_WITH_PRODUCTS: i64 = 1;

const FK_FAILED: &str = "FOREIGN KEY constraint failed";

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn print_test_header(test_name: &str, purpose: &[&str]) {
    println!("\n🧪 TEST: {}", test_name);
    if let Some(first) = purpose.first() {
        println!("📋 PURPOSE: {}", first);
    }
    for line in purpose.iter().skip(1) {
        println!("   {}", line);
    }
}

#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub users: BTreeMap<i64, User>,
    pub products: BTreeMap<i64, Product>,
    pub categories: BTreeMap<i64, Category>,
    /// (product_id, category_id)
    pub product_categories: Vec<(i64, i64)>,
    pub orders: BTreeMap<i64, OrderHeader>,
    pub payments: BTreeMap<i64, Payment>,
    /// (order_id, product_id) -> (quantity, price)
    pub items: BTreeMap<(i64, i64), (i32, Decimal)>,
}

impl Tables {
    fn resolve(&self, header: &OrderHeader) -> StoreResult<Order> {
        let client = self
            .users
            .get(&header.client_id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("dangling client {}", header.client_id))?;

        let mut items = Vec::new();
        for ((order_id, product_id), (quantity, price)) in self.items.range((header.id, i64::MIN)..)
        {
            if *order_id != header.id {
                break;
            }
            let product = self
                .products
                .get(product_id)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("dangling product {}", product_id))?;
            items.push(OrderItem {
                order_id: *order_id,
                product,
                quantity: *quantity,
                price: *price,
            });
        }

        Ok(Order {
            id: header.id,
            moment: header.moment,
            status: header.status,
            client,
            payment: self.payments.get(&header.id).cloned(),
            items,
        })
    }

    fn apply(&mut self, op: &Write) -> StoreResult<()> {
        match op {
            Write::UpsertOrder(header) => {
                if !self.users.contains_key(&header.client_id) {
                    return Err(StoreError::ConstraintViolation(FK_FAILED.to_string()));
                }
                self.orders.insert(header.id, header.clone());
            }
            Write::SavePayment(payment) => {
                if !self.orders.contains_key(&payment.order_id) {
                    return Err(StoreError::ConstraintViolation(FK_FAILED.to_string()));
                }
                self.payments.insert(payment.order_id, payment.clone());
            }
            Write::DeletePayment(order_id) => {
                self.payments.remove(order_id);
            }
            Write::InsertItem {
                order_id,
                product_id,
                quantity,
                price,
            } => {
                if !self.orders.contains_key(order_id) || !self.products.contains_key(product_id)
                {
                    return Err(StoreError::ConstraintViolation(FK_FAILED.to_string()));
                }
                let key = (*order_id, *product_id);
                if self.items.contains_key(&key) {
                    return Err(StoreError::ConstraintViolation(
                        "UNIQUE constraint failed: tb_order_item.order_id, tb_order_item.product_id"
                            .to_string(),
                    ));
                }
                self.items.insert(key, (*quantity, *price));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum Write {
    UpsertOrder(OrderHeader),
    SavePayment(Payment),
    DeletePayment(i64),
    InsertItem {
        order_id: i64,
        product_id: i64,
        quantity: i32,
        price: Decimal,
    },
}

/// Store whose transactions buffer writes and apply them only on commit
#[derive(Clone)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
    next_order_id: Arc<AtomicI64>,
    next_category_id: Arc<AtomicI64>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables::default())),
            next_order_id: Arc::new(AtomicI64::new(1)),
            next_category_id: Arc::new(AtomicI64::new(100)),
        }
    }

    /// Store pre-populated with two users, two products and a category
    pub fn with_catalog() -> Self {
        let store = Self::new();
        {
            let mut t = store.tables.write();
            for (id, name) in [(CLIENT_ID, "Maria Brown"), (OTHER_CLIENT_ID, "Alex Green")] {
                t.users.insert(
                    id,
                    User {
                        id,
                        name: name.to_string(),
                        email: format!("user{}@example.com", id),
                        phone: "988888888".to_string(),
                    },
                );
            }
            t.products.insert(
                BOOK_ID,
                Product {
                    id: BOOK_ID,
                    name: "The Lord of the Rings".to_string(),
                    description: "Fantasy novel".to_string(),
                    price: dec("19.90"),
                    img_url: String::new(),
                },
            );
            t.products.insert(
                LAMP_ID,
                Product {
                    id: LAMP_ID,
                    name: "Desk Lamp".to_string(),
                    description: "LED lamp".to_string(),
                    price: dec("12.00"),
                    img_url: String::new(),
                },
            );
            t.categories.insert(
                CATEGORY_WITH_PRODUCTS,
                Category {
                    id: CATEGORY_WITH_PRODUCTS,
                    name: "Books".to_string(),
                },
            );
            t.product_categories.push((BOOK_ID, CATEGORY_WITH_PRODUCTS));
        }
        store
    }

    pub fn snapshot(&self) -> Tables {
        self.tables.read().clone()
    }

    pub fn order_count(&self) -> usize {
        self.tables.read().orders.len()
    }

    pub fn payment_count(&self) -> usize {
        self.tables.read().payments.len()
    }

    pub fn item_count(&self) -> usize {
        self.tables.read().items.len()
    }

    pub fn set_product_price(&self, product_id: i64, price: Decimal) {
        if let Some(product) = self.tables.write().products.get_mut(&product_id) {
            product.price = price;
        }
    }

    /// Print verbose information about store state
    pub fn print_state(&self, context: &str) {
        let t = self.tables.read();
        println!("\n========== Store State: {} ==========", context);
        println!(
            "Orders: {}  Payments: {}  Items: {}",
            t.orders.len(),
            t.payments.len(),
            t.items.len()
        );
        for header in t.orders.values() {
            println!(
                "  Order {} client={} status={:?} moment={}",
                header.id, header.client_id, header.status, header.moment
            );
        }
        for ((order_id, product_id), (quantity, price)) in &t.items {
            println!(
                "    Item order={} product={} qty={} price={}",
                order_id, product_id, quantity, price
            );
        }
        println!("==========================================\n");
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn list_all(&self) -> StoreResult<Vec<Category>> {
        Ok(self.tables.read().categories.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Category>> {
        Ok(self.tables.read().categories.get(&id).cloned())
    }

    async fn insert(&self, name: &str) -> StoreResult<Category> {
        let id = self.next_category_id.fetch_add(1, Ordering::SeqCst);
        let category = Category {
            id,
            name: name.to_string(),
        };
        self.tables.write().categories.insert(id, category.clone());
        Ok(category)
    }

    async fn update(&self, category: &Category) -> StoreResult<Option<Category>> {
        let mut t = self.tables.write();
        match t.categories.get_mut(&category.id) {
            Some(existing) => {
                *existing = category.clone();
                Ok(Some(category.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let mut t = self.tables.write();
        if !t.categories.contains_key(&id) {
            return Ok(false);
        }
        t.product_categories.retain(|(_, c)| *c != id);
        t.categories.remove(&id);
        Ok(true)
    }
}

#[async_trait]
impl OrderStore for InMemoryStore {
    async fn list_orders(&self) -> StoreResult<Vec<Order>> {
        let t = self.tables.read();
        t.orders.values().map(|h| t.resolve(h)).collect()
    }

    async fn find_order(&self, id: i64) -> StoreResult<Option<Order>> {
        let t = self.tables.read();
        t.orders.get(&id).map(|h| t.resolve(h)).transpose()
    }

    async fn delete_order(&self, id: i64) -> StoreResult<bool> {
        let mut t = self.tables.write();
        if !t.orders.contains_key(&id) {
            return Ok(false);
        }
        if t.items.keys().any(|(order_id, _)| *order_id == id) {
            return Err(StoreError::ConstraintViolation(FK_FAILED.to_string()));
        }
        t.orders.remove(&id);
        t.payments.remove(&id);
        Ok(true)
    }

    async fn begin(&self) -> StoreResult<Box<dyn OrderTransaction>> {
        Ok(Box::new(InMemoryTransaction {
            store: self.clone(),
            view: Mutex::new(self.snapshot()),
            writes: Mutex::new(Vec::new()),
        }))
    }
}

/// Reads see the snapshot taken at `begin` plus this transaction's own writes
pub struct InMemoryTransaction {
    store: InMemoryStore,
    view: Mutex<Tables>,
    writes: Mutex<Vec<Write>>,
}

impl InMemoryTransaction {
    fn record(&self, op: Write) -> StoreResult<()> {
        self.view.lock().apply(&op)?;
        self.writes.lock().push(op);
        Ok(())
    }
}

#[async_trait]
impl OrderTransaction for InMemoryTransaction {
    async fn find_user(&self, id: i64) -> StoreResult<Option<User>> {
        Ok(self.view.lock().users.get(&id).cloned())
    }

    async fn find_product(&self, id: i64) -> StoreResult<Option<Product>> {
        Ok(self.view.lock().products.get(&id).cloned())
    }

    async fn find_order_header(&self, id: i64) -> StoreResult<Option<OrderHeader>> {
        Ok(self.view.lock().orders.get(&id).cloned())
    }

    async fn find_order(&self, id: i64) -> StoreResult<Option<Order>> {
        let view = self.view.lock();
        view.orders.get(&id).map(|h| view.resolve(h)).transpose()
    }

    async fn insert_order(&self, header: &NewOrderHeader) -> StoreResult<i64> {
        let id = self.store.next_order_id.fetch_add(1, Ordering::SeqCst);
        self.record(Write::UpsertOrder(OrderHeader {
            id,
            moment: header.moment,
            status: header.status,
            client_id: header.client_id,
        }))?;
        Ok(id)
    }

    async fn update_order(&self, header: &OrderHeader) -> StoreResult<()> {
        self.record(Write::UpsertOrder(header.clone()))
    }

    async fn save_payment(&self, payment: &Payment) -> StoreResult<Payment> {
        self.record(Write::SavePayment(payment.clone()))?;
        Ok(payment.clone())
    }

    async fn delete_payment(&self, order_id: i64) -> StoreResult<()> {
        self.record(Write::DeletePayment(order_id))
    }

    async fn insert_order_item(&self, item: &OrderItem) -> StoreResult<OrderItem> {
        self.record(Write::InsertItem {
            order_id: item.order_id,
            product_id: item.product.id,
            quantity: item.quantity,
            price: item.price,
        })?;
        Ok(item.clone())
    }

    async fn commit(self: Box<Self>) -> StoreResult<()> {
        let writes = self.writes.into_inner();
        let mut tables = self.store.tables.write();
        let mut next = tables.clone();
        for op in &writes {
            next.apply(op)?;
        }
        *tables = next;
        Ok(())
    }
}

pub fn create_test_service(store: &InMemoryStore) -> Service {
    create_test_service_with_config(store, &Config::default())
}

pub fn create_test_service_with_config(store: &InMemoryStore, config: &Config) -> Service {
    Service::new(Arc::new(store.clone()), Arc::new(store.clone()), config)
}

pub fn item(product_id: i64, quantity: i32, price: Option<&str>) -> NewOrderItem {
    NewOrderItem {
        product_id: Some(product_id),
        quantity,
        price: price.map(dec),
    }
}
