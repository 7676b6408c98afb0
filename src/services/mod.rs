pub mod product_service;
pub mod token_service;
pub mod user_service;

pub use product_service::{ProductService, PRODUIT_NON_TROUVE};
pub use token_service::TokenService;
pub use user_service::{UserService, UTILISATEUR_NON_TROUVE};

use crate::auth::{PasswordError, TokenError};
use crate::database::DatabaseError;
use crate::models::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(&'static str),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error(transparent)]
    PasswordHash(#[from] PasswordError),
}

impl ServiceError {
    /// Storage NotFound becomes the resource's fixed not-found message.
    fn not_found_as(message: &'static str) -> impl FnOnce(DatabaseError) -> ServiceError {
        move |err| match err {
            DatabaseError::NotFound(_) => ServiceError::NotFound(message),
            other => ServiceError::Database(other),
        }
    }
}
