use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum FilterError {
    #[error("Le paramètre actif doit valoir true ou false (reçu: {0})")]
    InvalidActive(String),

    #[error("Le paramètre quantite doit être un entier positif (reçu: {0})")]
    InvalidQuantity(String),
}
