//! Module declaration and lifecycle wiring

use crate::api::native::NativeClient;
use crate::config::Config;
use crate::contract::CommerceApi;
use crate::domain::Service;
use crate::infra::storage::repositories::{SeaOrmCategoryRepository, SeaOrmOrderStore};
use anyhow::Result;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Commerce service module: owns the domain service built over the database
pub struct CommerceServiceModule {
    config: Config,
    service: Arc<Service>,
}

impl CommerceServiceModule {
    /// Build repositories and the domain service over an open connection
    pub fn init(db: DatabaseConnection, config: Config) -> Self {
        let conn = Arc::new(db);

        // Build repositories
        let category_repo = Arc::new(SeaOrmCategoryRepository::new(conn.clone()));
        let order_store = Arc::new(SeaOrmOrderStore::new(conn));

        let service = Arc::new(Service::new(category_repo, order_store, &config));

        tracing::info!(
            max_items_per_order = config.max_items_per_order,
            "Commerce service initialized"
        );
        Self { config, service }
    }

    /// Apply pending migrations, then seed demo data if configured
    pub async fn migrate(db: &DatabaseConnection, config: &Config) -> Result<()> {
        use crate::infra::storage::migrations::Migrator;
        use sea_orm_migration::MigratorTrait;

        Migrator::up(db, None).await?;
        tracing::info!("Commerce service migrations completed");

        if config.seed_demo_data {
            crate::infra::storage::seed::seed_demo_data(db).await?;
        }
        Ok(())
    }

    /// Register the REST routes on `router`
    pub fn register_rest(&self, router: axum::Router) -> axum::Router {
        tracing::info!("Registering commerce service REST routes");
        crate::api::rest::routes::register_routes(router, self.service.clone())
    }

    /// In-process client for other modules
    pub fn client(&self) -> Arc<dyn CommerceApi> {
        Arc::new(NativeClient::new(self.service.clone()))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
