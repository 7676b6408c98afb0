use sqlx::{postgres::PgPoolOptions, PgPool};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::{DatabaseConfig, StorageKind};
use crate::database::memory::{MemoryProductRepository, MemoryUserRepository};
use crate::database::postgres::{PgProductRepository, PgUserRepository};
use crate::database::repository::{ProductRepository, UserRepository};

/// Errors from the storage layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate value for {0}")]
    Duplicate(String),

    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Owns the connection pool (when there is one) and hands out the
/// repositories built on top of it.
pub struct DatabaseManager {
    pool: Option<PgPool>,
    products: Arc<dyn ProductRepository>,
    users: Arc<dyn UserRepository>,
}

impl DatabaseManager {
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        match config.storage {
            StorageKind::Memory => {
                info!("Using in-memory storage");
                Ok(Self::in_memory())
            }
            StorageKind::Postgres => Self::connect(config).await,
        }
    }

    pub fn in_memory() -> Self {
        Self {
            pool: None,
            products: Arc::new(MemoryProductRepository::new()),
            users: Arc::new(MemoryUserRepository::new()),
        }
    }

    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let url = config
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        info!("Connected to database at {}", Self::redacted(url)?);

        if config.run_migrations {
            sqlx::migrate!("./migrations").run(&pool).await?;
            info!("Database migrations applied");
        }

        Ok(Self {
            products: Arc::new(PgProductRepository::new(pool.clone())),
            users: Arc::new(PgUserRepository::new(pool.clone())),
            pool: Some(pool),
        })
    }

    /// Connection string with the password stripped, for logs.
    fn redacted(database_url: &str) -> Result<String, DatabaseError> {
        let mut url = url::Url::parse(database_url).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        if url.password().is_some() {
            url.set_password(Some("***"))
                .map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        }
        Ok(url.into())
    }

    pub fn products(&self) -> Arc<dyn ProductRepository> {
        self.products.clone()
    }

    pub fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    pub fn storage(&self) -> StorageKind {
        if self.pool.is_some() {
            StorageKind::Postgres
        } else {
            StorageKind::Memory
        }
    }

    /// Pings the pool to ensure connectivity. Always healthy in memory.
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        if let Some(pool) = &self.pool {
            sqlx::query("SELECT 1").execute(pool).await?;
        }
        Ok(())
    }

    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
            info!("Database pool closed");
        }
    }
}
