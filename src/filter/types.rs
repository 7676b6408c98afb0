use serde::{Deserialize, Serialize};

/// Raw `?categorie&actif&quantite` query string, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductFilterQuery {
    pub categorie: Option<String>,
    pub actif: Option<String>,
    pub quantite: Option<String>,
}

/// A typed bind parameter for a generated statement.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Text(String),
    Bool(bool),
    Int(i32),
}

#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<SqlParam>,
}
