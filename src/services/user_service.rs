use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use super::ServiceError;
use crate::auth::{self, PasswordError};
use crate::database::UserRepository;
use crate::models::user::{self, Role, UserInput};
use crate::models::{User, UserDraft};

pub const UTILISATEUR_NON_TROUVE: &str = "Utilisateur non trouvé";

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

/// Argon2 is CPU-bound; keep it off the async workers.
pub(crate) async fn hash_blocking(password: String) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || auth::hash_password(&password))
        .await
        .map_err(|e| PasswordError::Hash(e.to_string()))?
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_all(&self) -> Result<Vec<User>, ServiceError> {
        Ok(self.repo.get_all().await?)
    }

    pub async fn get_one(&self, id: Uuid) -> Result<Option<User>, ServiceError> {
        Ok(self.repo.get_one(id).await?)
    }

    pub async fn add(&self, draft: UserDraft) -> Result<User, ServiceError> {
        let hash = hash_blocking(draft.mot_de_passe.clone()).await?;
        let user = User::new(draft, hash, Utc::now());
        self.repo.add(&user).await?;
        info!("Utilisateur {} créé ({})", user.id, user.role);
        Ok(user)
    }

    pub async fn update(&self, id: Uuid, draft: UserDraft) -> Result<User, ServiceError> {
        let mut user = self
            .repo
            .get_one(id)
            .await?
            .ok_or(ServiceError::NotFound(UTILISATEUR_NON_TROUVE))?;

        let hash = hash_blocking(draft.mot_de_passe.clone()).await?;
        user.apply(draft, hash);
        self.repo
            .update(&user)
            .await
            .map_err(ServiceError::not_found_as(UTILISATEUR_NON_TROUVE))?;
        info!("Utilisateur {} mis à jour", user.id);
        Ok(user)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if self.repo.get_one(id).await?.is_none() {
            return Err(ServiceError::NotFound(UTILISATEUR_NON_TROUVE));
        }
        self.repo
            .delete(id)
            .await
            .map_err(ServiceError::not_found_as(UTILISATEUR_NON_TROUVE))?;
        info!("Utilisateur {} supprimé", id);
        Ok(())
    }

    /// Creates an `admin` account when no user exists yet. Returns the
    /// created user, or `None` when the store was already populated.
    pub async fn ensure_admin(&self, courriel: &str, mot_de_passe: &str) -> Result<Option<User>, ServiceError> {
        if !self.repo.get_all().await?.is_empty() {
            return Ok(None);
        }

        let draft = user::validate(UserInput {
            nom: Some("Administrateur".to_string()),
            prenom: Some("SilverPresta".to_string()),
            courriel: Some(courriel.to_string()),
            mot_de_passe: Some(mot_de_passe.to_string()),
            role: Some(Role::Admin.as_str().to_string()),
            ..Default::default()
        })?;

        let admin = self.add(draft).await?;
        info!("Compte administrateur initial créé pour {}", admin.courriel);
        Ok(Some(admin))
    }
}
