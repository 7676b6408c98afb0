use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::repository::{ProductRepository, UserRepository};
use crate::filter::ProductFilter;
use crate::models::{Product, User};

/// Process-local product store. Insertion order is kept so listings read
/// the same as the Postgres `ORDER BY date_ajout`.
#[derive(Default)]
pub struct MemoryProductRepository {
    products: RwLock<Vec<Product>>,
}

impl MemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for MemoryProductRepository {
    async fn get_one(&self, id: Uuid) -> Result<Option<Product>, DatabaseError> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Product>, DatabaseError> {
        Ok(self.products.read().await.clone())
    }

    async fn add(&self, product: &Product) -> Result<(), DatabaseError> {
        let mut products = self.products.write().await;
        if products.iter().any(|p| p.code == product.code) {
            return Err(DatabaseError::Duplicate("code".to_string()));
        }
        products.push(product.clone());
        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<(), DatabaseError> {
        let mut products = self.products.write().await;
        if products
            .iter()
            .any(|p| p.id != product.id && p.code == product.code)
        {
            return Err(DatabaseError::Duplicate("code".to_string()));
        }
        let slot = products
            .iter_mut()
            .find(|p| p.id == product.id)
            .ok_or_else(|| DatabaseError::NotFound(format!("produit {}", product.id)))?;
        *slot = product.clone();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let mut products = self.products.write().await;
        let index = products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| DatabaseError::NotFound(format!("produit {}", id)))?;
        products.remove(index);
        Ok(())
    }

    async fn get_with_filters(&self, filter: &ProductFilter) -> Result<Vec<Product>, DatabaseError> {
        let products = self.products.read().await;
        Ok(products.iter().filter(|p| filter.matches(p)).cloned().collect())
    }
}

#[derive(Default)]
pub struct MemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn get_one(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<User>, DatabaseError> {
        Ok(self.users.read().await.clone())
    }

    async fn add(&self, user: &User) -> Result<(), DatabaseError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.courriel == user.courriel) {
            return Err(DatabaseError::Duplicate("courriel".to_string()));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), DatabaseError> {
        let mut users = self.users.write().await;
        if users
            .iter()
            .any(|u| u.id != user.id && u.courriel == user.courriel)
        {
            return Err(DatabaseError::Duplicate("courriel".to_string()));
        }
        let slot = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| DatabaseError::NotFound(format!("utilisateur {}", user.id)))?;
        *slot = user.clone();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let mut users = self.users.write().await;
        let index = users
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| DatabaseError::NotFound(format!("utilisateur {}", id)))?;
        users.remove(index);
        Ok(())
    }
}
