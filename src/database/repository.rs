use async_trait::async_trait;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::filter::ProductFilter;
use crate::models::{Product, User};

/// Storage for the `produits` collection.
///
/// `update` and `delete` fail with [`DatabaseError::NotFound`] when no
/// record carries the given id. Unique-code collisions surface as
/// [`DatabaseError::Duplicate`].
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn get_one(&self, id: Uuid) -> Result<Option<Product>, DatabaseError>;

    async fn get_all(&self) -> Result<Vec<Product>, DatabaseError>;

    async fn add(&self, product: &Product) -> Result<(), DatabaseError>;

    async fn update(&self, product: &Product) -> Result<(), DatabaseError>;

    async fn delete(&self, id: Uuid) -> Result<(), DatabaseError>;

    async fn get_with_filters(&self, filter: &ProductFilter) -> Result<Vec<Product>, DatabaseError>;
}

/// Storage for the `utilisateurs` collection. Emails are unique.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_one(&self, id: Uuid) -> Result<Option<User>, DatabaseError>;

    async fn get_all(&self) -> Result<Vec<User>, DatabaseError>;

    async fn add(&self, user: &User) -> Result<(), DatabaseError>;

    async fn update(&self, user: &User) -> Result<(), DatabaseError>;

    async fn delete(&self, id: Uuid) -> Result<(), DatabaseError>;
}
