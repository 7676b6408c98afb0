use std::sync::Arc;
use tracing::{debug, warn};

use super::ServiceError;
use crate::auth::{self, Claims, PasswordError};
use crate::config::SecurityConfig;
use crate::database::UserRepository;
use crate::models::user::normalize_email;
use crate::models::Credentials;

/// Exchanges email/password for a signed session token.
#[derive(Clone)]
pub struct TokenService {
    users: Arc<dyn UserRepository>,
    security: Arc<SecurityConfig>,
}

impl TokenService {
    pub fn new(users: Arc<dyn UserRepository>, security: Arc<SecurityConfig>) -> Self {
        Self { users, security }
    }

    /// Signed token on a match, empty string on any credential mismatch.
    /// Only storage or signing failures are errors.
    pub async fn generate_token(&self, credentials: &Credentials) -> Result<String, ServiceError> {
        let courriel = normalize_email(&credentials.courriel);

        let users = self.users.get_all().await?;
        let Some(user) = users.into_iter().find(|u| u.courriel == courriel) else {
            debug!("Échec de connexion: courriel inconnu");
            return Ok(String::new());
        };

        let stored = user.mot_de_passe.clone();
        let password = credentials.mot_de_passe.clone();
        let verified = tokio::task::spawn_blocking(move || auth::verify_password(&stored, &password))
            .await
            .map_err(|e| PasswordError::Hash(e.to_string()))?;

        match verified {
            Ok(true) => {}
            Ok(false) => {
                debug!("Échec de connexion pour {}: mot de passe incorrect", courriel);
                return Ok(String::new());
            }
            Err(e) => {
                warn!("Hash illisible pour l'utilisateur {}: {}", user.id, e);
                return Ok(String::new());
            }
        }

        let claims = Claims::new(user.courriel, self.security.jwt_expiry_hours);
        Ok(auth::generate_jwt(&claims, &self.security.jwt_secret)?)
    }
}
