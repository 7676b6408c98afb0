use super::error::FilterError;
use super::types::{ProductFilterQuery, SqlParam, SqlResult};
use crate::models::Product;

/// Product search criteria. Every field is optional; set fields are
/// combined with AND and an empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub active: Option<bool>,
    pub min_quantity: Option<i32>,
}

impl ProductFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn min_quantity(mut self, quantity: i32) -> Self {
        self.min_quantity = Some(quantity);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.active.is_none() && self.min_quantity.is_none()
    }

    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category {
            if &product.categorie != category {
                return false;
            }
        }
        if let Some(active) = self.active {
            if product.actif != active {
                return false;
            }
        }
        if let Some(min) = self.min_quantity {
            if product.quantite < min {
                return false;
            }
        }
        true
    }

    /// SELECT over `table` with one positional parameter per set criterion.
    pub fn to_sql(&self, table: &str, columns: &str) -> SqlResult {
        let mut conditions = Vec::new();
        let mut params = Vec::new();

        if let Some(category) = &self.category {
            params.push(SqlParam::Text(category.clone()));
            conditions.push(format!("categorie = ${}", params.len()));
        }
        if let Some(active) = self.active {
            params.push(SqlParam::Bool(active));
            conditions.push(format!("actif = ${}", params.len()));
        }
        if let Some(min) = self.min_quantity {
            params.push(SqlParam::Int(min));
            conditions.push(format!("quantite >= ${}", params.len()));
        }

        let mut query = format!("SELECT {} FROM \"{}\"", columns, table);
        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY date_ajout, id");

        SqlResult { query, params }
    }
}

impl TryFrom<ProductFilterQuery> for ProductFilter {
    type Error = FilterError;

    fn try_from(query: ProductFilterQuery) -> Result<Self, Self::Error> {
        let category = query.categorie.filter(|c| !c.is_empty());

        let active = match query.actif.as_deref() {
            None => None,
            Some("true") => Some(true),
            Some("false") => Some(false),
            Some(other) => return Err(FilterError::InvalidActive(other.to_string())),
        };

        let min_quantity = match query.quantite.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match raw.parse::<i32>() {
                Ok(n) if n >= 0 => Some(n),
                _ => return Err(FilterError::InvalidQuantity(raw.to_string())),
            },
        };

        Ok(Self {
            category,
            active,
            min_quantity,
        })
    }
}
