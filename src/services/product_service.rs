use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use super::ServiceError;
use crate::database::ProductRepository;
use crate::filter::ProductFilter;
use crate::models::{Product, ProductDraft};

pub const PRODUIT_NON_TROUVE: &str = "Produit non trouvé";

#[derive(Clone)]
pub struct ProductService {
    repo: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_all(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(self.repo.get_all().await?)
    }

    pub async fn get_one(&self, id: Uuid) -> Result<Option<Product>, ServiceError> {
        Ok(self.repo.get_one(id).await?)
    }

    /// Stores a new product with a fresh id and both timestamps set to now.
    pub async fn add(&self, draft: ProductDraft) -> Result<Product, ServiceError> {
        let product = Product::new(draft, Utc::now());
        self.repo.add(&product).await?;
        info!("Produit {} ajouté ({})", product.id, product.code);
        Ok(product)
    }

    pub async fn update(&self, id: Uuid, draft: ProductDraft) -> Result<Product, ServiceError> {
        let mut product = self
            .repo
            .get_one(id)
            .await?
            .ok_or(ServiceError::NotFound(PRODUIT_NON_TROUVE))?;

        product.apply(draft, Utc::now());
        self.repo
            .update(&product)
            .await
            .map_err(ServiceError::not_found_as(PRODUIT_NON_TROUVE))?;
        info!("Produit {} mis à jour", product.id);
        Ok(product)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if self.repo.get_one(id).await?.is_none() {
            return Err(ServiceError::NotFound(PRODUIT_NON_TROUVE));
        }
        self.repo
            .delete(id)
            .await
            .map_err(ServiceError::not_found_as(PRODUIT_NON_TROUVE))?;
        info!("Produit {} supprimé", id);
        Ok(())
    }

    pub async fn get_with_filters(&self, filter: &ProductFilter) -> Result<Vec<Product>, ServiceError> {
        Ok(self.repo.get_with_filters(filter).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryProductRepository;
    use crate::models::product::validate;
    use crate::testing::product_input;

    fn service() -> ProductService {
        ProductService::new(Arc::new(MemoryProductRepository::new()))
    }

    fn draft(code: &str) -> ProductDraft {
        validate(product_input(code, "Chaussures")).unwrap()
    }

    #[tokio::test]
    async fn add_assigns_id_and_timestamps() {
        let service = service();
        let product = service.add(draft("CHA001")).await.unwrap();

        assert_eq!(product.date_ajout, product.date_mise_a_jour);
        assert_eq!(service.get_one(product.id).await.unwrap(), Some(product));
    }

    #[tokio::test]
    async fn update_keeps_creation_fields_and_refreshes_modified() {
        let service = service();
        let created = service.add(draft("CHA001")).await.unwrap();

        let mut changed = draft("CHA001");
        changed.quantite = 3;
        changed.tags = vec!["promo".to_string()];
        changed.ajoute_par = Uuid::new_v4();
        let updated = service.update(created.id, changed).await.unwrap();

        assert_eq!(updated.quantite, 3);
        assert_eq!(updated.tags, vec!["promo".to_string()]);
        assert_eq!(updated.ajoute_par, created.ajoute_par);
        assert_eq!(updated.date_ajout, created.date_ajout);
        assert!(updated.date_mise_a_jour >= created.date_mise_a_jour);
    }

    #[tokio::test]
    async fn update_and_delete_missing_product_are_not_found() {
        let service = service();
        let id = Uuid::new_v4();

        assert!(matches!(
            service.update(id, draft("CHA001")).await,
            Err(ServiceError::NotFound(PRODUIT_NON_TROUVE))
        ));
        assert!(matches!(
            service.delete(id).await,
            Err(ServiceError::NotFound(PRODUIT_NON_TROUVE))
        ));
    }

    #[tokio::test]
    async fn delete_removes_product() {
        let service = service();
        let product = service.add(draft("CHA001")).await.unwrap();

        service.delete(product.id).await.unwrap();
        assert_eq!(service.get_one(product.id).await.unwrap(), None);
        assert!(service.get_all().await.unwrap().is_empty());
    }
}
