use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::DatabaseManager;
use crate::services::{ProductService, TokenService, UserService};

/// Shared by every handler. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub database: Arc<DatabaseManager>,
    pub products: ProductService,
    pub users: UserService,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, database: Arc<DatabaseManager>) -> Self {
        let security = Arc::new(config.security.clone());
        Self {
            products: ProductService::new(database.products()),
            users: UserService::new(database.users()),
            tokens: TokenService::new(database.users(), security),
            config,
            database,
        }
    }
}
