use async_trait::async_trait;
use sqlx::{postgres::PgArguments, FromRow, PgPool};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::repository::{ProductRepository, UserRepository};
use crate::filter::{ProductFilter, SqlParam};
use crate::models::{Product, User};

const PRODUCT_TABLE: &str = "produits";
const PRODUCT_COLUMNS: &str = "id, nom, code, categorie, description, quantite, \
    seuil_reapprovisionnement, prix_vente, prix_achat, fournisseur, ajoute_par, \
    mis_a_jour_par, url_image, actif, tags, date_ajout, date_mise_a_jour";

const USER_TABLE: &str = "utilisateurs";
const USER_COLUMNS: &str = "id, nom, prenom, courriel, mot_de_passe, role, actif, date_creation";

/// Maps a unique-constraint violation (SQLSTATE 23505) to `Duplicate`,
/// naming the offending field.
fn map_unique_violation(error: sqlx::Error, field: &str) -> DatabaseError {
    if let sqlx::Error::Database(db) = &error {
        if db.code().as_deref() == Some("23505") {
            return DatabaseError::Duplicate(field.to_string());
        }
    }
    DatabaseError::Sqlx(error)
}

fn bind_param_query_as<'q, O>(
    q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>,
    param: SqlParam,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, sqlx::postgres::PgRow>,
{
    match param {
        SqlParam::Text(s) => q.bind(s),
        SqlParam::Bool(b) => q.bind(b),
        SqlParam::Int(i) => q.bind(i),
    }
}

fn expect_one_row(rows_affected: u64, what: &str, id: Uuid) -> Result<(), DatabaseError> {
    if rows_affected == 0 {
        return Err(DatabaseError::NotFound(format!("{} {}", what, id)));
    }
    Ok(())
}

pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn get_one(&self, id: Uuid) -> Result<Option<Product>, DatabaseError> {
        let query = format!("SELECT {} FROM {} WHERE id = $1", PRODUCT_COLUMNS, PRODUCT_TABLE);
        let product = sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    async fn get_all(&self) -> Result<Vec<Product>, DatabaseError> {
        self.get_with_filters(&ProductFilter::default()).await
    }

    async fn add(&self, product: &Product) -> Result<(), DatabaseError> {
        let query = format!(
            "INSERT INTO {} ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)",
            PRODUCT_TABLE, PRODUCT_COLUMNS
        );
        sqlx::query(&query)
            .bind(product.id)
            .bind(&product.nom)
            .bind(&product.code)
            .bind(&product.categorie)
            .bind(&product.description)
            .bind(product.quantite)
            .bind(product.seuil_reapprovisionnement)
            .bind(product.prix_vente)
            .bind(product.prix_achat)
            .bind(&product.fournisseur)
            .bind(product.ajoute_par)
            .bind(product.mis_a_jour_par)
            .bind(&product.url_image)
            .bind(product.actif)
            .bind(&product.tags)
            .bind(product.date_ajout)
            .bind(product.date_mise_a_jour)
            .execute(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, "code"))?;
        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<(), DatabaseError> {
        let query = format!(
            "UPDATE {} SET nom = $2, code = $3, categorie = $4, description = $5, quantite = $6, \
             seuil_reapprovisionnement = $7, prix_vente = $8, prix_achat = $9, fournisseur = $10, \
             mis_a_jour_par = $11, url_image = $12, actif = $13, tags = $14, date_mise_a_jour = $15 \
             WHERE id = $1",
            PRODUCT_TABLE
        );
        let result = sqlx::query(&query)
            .bind(product.id)
            .bind(&product.nom)
            .bind(&product.code)
            .bind(&product.categorie)
            .bind(&product.description)
            .bind(product.quantite)
            .bind(product.seuil_reapprovisionnement)
            .bind(product.prix_vente)
            .bind(product.prix_achat)
            .bind(&product.fournisseur)
            .bind(product.mis_a_jour_par)
            .bind(&product.url_image)
            .bind(product.actif)
            .bind(&product.tags)
            .bind(product.date_mise_a_jour)
            .execute(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, "code"))?;
        expect_one_row(result.rows_affected(), "produit", product.id)
    }

    async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let query = format!("DELETE FROM {} WHERE id = $1", PRODUCT_TABLE);
        let result = sqlx::query(&query).bind(id).execute(&self.pool).await?;
        expect_one_row(result.rows_affected(), "produit", id)
    }

    async fn get_with_filters(&self, filter: &ProductFilter) -> Result<Vec<Product>, DatabaseError> {
        let sql = filter.to_sql(PRODUCT_TABLE, PRODUCT_COLUMNS);
        let mut q = sqlx::query_as::<_, Product>(&sql.query);
        for param in sql.params {
            q = bind_param_query_as(q, param);
        }
        let rows = q.fetch_all(&self.pool).await?;
        Ok(rows)
    }
}

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn get_one(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let query = format!("SELECT {} FROM {} WHERE id = $1", USER_COLUMNS, USER_TABLE);
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn get_all(&self) -> Result<Vec<User>, DatabaseError> {
        let query = format!(
            "SELECT {} FROM {} ORDER BY date_creation, id",
            USER_COLUMNS, USER_TABLE
        );
        let users = sqlx::query_as::<_, User>(&query).fetch_all(&self.pool).await?;
        Ok(users)
    }

    async fn add(&self, user: &User) -> Result<(), DatabaseError> {
        let query = format!(
            "INSERT INTO {} ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            USER_TABLE, USER_COLUMNS
        );
        sqlx::query(&query)
            .bind(user.id)
            .bind(&user.nom)
            .bind(&user.prenom)
            .bind(&user.courriel)
            .bind(&user.mot_de_passe)
            .bind(user.role.as_str())
            .bind(user.actif)
            .bind(user.date_creation)
            .execute(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, "courriel"))?;
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), DatabaseError> {
        let query = format!(
            "UPDATE {} SET nom = $2, prenom = $3, courriel = $4, mot_de_passe = $5, role = $6, actif = $7 \
             WHERE id = $1",
            USER_TABLE
        );
        let result = sqlx::query(&query)
            .bind(user.id)
            .bind(&user.nom)
            .bind(&user.prenom)
            .bind(&user.courriel)
            .bind(&user.mot_de_passe)
            .bind(user.role.as_str())
            .bind(user.actif)
            .execute(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, "courriel"))?;
        expect_one_row(result.rows_affected(), "utilisateur", user.id)
    }

    async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let query = format!("DELETE FROM {} WHERE id = $1", USER_TABLE);
        let result = sqlx::query(&query).bind(id).execute(&self.pool).await?;
        expect_one_row(result.rows_affected(), "utilisateur", id)
    }
}
