use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    Hash(String),

    #[error("Invalid stored password hash: {0}")]
    InvalidHash(String),
}

/// Argon2id PHC string for `password` with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

/// `Ok(false)` on a wrong password; `Err` only when the stored hash
/// cannot be parsed or verification itself breaks.
pub fn verify_password(stored_hash: &str, password: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| PasswordError::InvalidHash(e.to_string()))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::Hash(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_only_the_original_password() {
        let hash = hash_password("Secret123!").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password(&hash, "Secret123!").unwrap());
        assert!(!verify_password(&hash, "secret123!").unwrap());
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        assert_ne!(hash_password("Secret123!").unwrap(), hash_password("Secret123!").unwrap());
    }

    #[test]
    fn plaintext_stored_value_is_an_invalid_hash() {
        assert!(matches!(
            verify_password("Secret123!", "Secret123!"),
            Err(PasswordError::InvalidHash(_))
        ));
    }
}
