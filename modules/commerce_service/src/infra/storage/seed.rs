//! Demo catalog for local runs

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, DatabaseConnection, EntityTrait,
    PaginatorTrait, TransactionTrait,
};

use super::entity::{category, product, product_category, user};

const USERS: &[(&str, &str, &str)] = &[
    ("Maria Brown", "maria@gmail.com", "988888888"),
    ("Alex Green", "alex@gmail.com", "977777777"),
];

const CATEGORIES: &[&str] = &["Electronics", "Books", "Computers"];

/// (name, description, price in cents, category names)
const PRODUCTS: &[(&str, &str, i64, &[&str])] = &[
    (
        "The Lord of the Rings",
        "A fantasy novel in three volumes.",
        9050,
        &["Books"],
    ),
    ("Smart TV", "55 inch 4K television.", 219000, &["Electronics", "Computers"]),
    ("Macbook Pro", "14 inch laptop.", 125000, &["Computers"]),
    ("PC Gamer", "Desktop with a dedicated GPU.", 120000, &["Computers"]),
    ("Rails for Dummies", "Introductory web development book.", 10099, &["Books"]),
];

/// Insert the demo catalog when the user table is empty.
///
/// Returns `true` if data was inserted.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<bool> {
    let existing = user::Entity::find()
        .count(db)
        .await
        .context("failed to count users")?;
    if existing > 0 {
        tracing::debug!(existing, "database already populated, skipping seed");
        return Ok(false);
    }

    let txn = db.begin().await?;

    for (name, email, phone) in USERS {
        user::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            phone: Set(phone.to_string()),
        }
        .insert(&txn)
        .await
        .with_context(|| format!("failed to seed user {name}"))?;
    }

    let mut category_ids = Vec::with_capacity(CATEGORIES.len());
    for name in CATEGORIES {
        let model = category::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
        }
        .insert(&txn)
        .await
        .with_context(|| format!("failed to seed category {name}"))?;
        category_ids.push((*name, model.id));
    }

    for (name, description, cents, categories) in PRODUCTS {
        let model = product::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
            description: Set(description.to_string()),
            price: Set(Decimal::new(*cents, 2)),
            img_url: Set(String::new()),
        }
        .insert(&txn)
        .await
        .with_context(|| format!("failed to seed product {name}"))?;

        for category_name in categories.iter() {
            let Some((_, category_id)) = category_ids.iter().find(|(n, _)| n == category_name)
            else {
                continue;
            };
            product_category::ActiveModel {
                product_id: Set(model.id),
                category_id: Set(*category_id),
            }
            .insert(&txn)
            .await?;
        }
    }

    txn.commit().await?;
    tracing::info!(
        users = USERS.len(),
        categories = CATEGORIES.len(),
        products = PRODUCTS.len(),
        "demo data seeded"
    );
    Ok(true)
}
