// handlers/protected/produits.rs - /api/produits/* handlers

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Extension, Json,
};
use serde_json::Value;
use tracing::info;

use crate::filter::{ProductFilter, ProductFilterQuery};
use crate::handlers::utils::{extract_record, parse_id};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::models::product::{self, Product, ProductInput};
use crate::models::validation::{field_error, ValidationErrors};
use crate::state::AppState;

const PRODUIT_REQUIS: &str = "Produit requis";

/// GET /api/produits/all
pub async fn get_all(State(state): State<AppState>) -> ApiResult<Vec<Product>> {
    let produits = state.products.get_all().await?;
    Ok(ApiResponse::success("produits", produits))
}

/// GET /api/produits/:id - an unknown id answers 200 `{"produit": null}`
pub async fn get_one(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Option<Product>> {
    let id = parse_id(&id)?;
    let produit = state.products.get_one(id).await?;
    Ok(ApiResponse::success("produit", produit))
}

/// POST /api/produits/add - 201, empty body
pub async fn add(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<()> {
    let input: ProductInput = extract_record(body, "produit", PRODUIT_REQUIS)?;
    let draft = product::validate(input)?;

    let produit = state.products.add(draft).await?;
    info!(by = %user.courriel, "POST produit {}", produit.code);
    Ok(ApiResponse::created())
}

/// PUT /api/produits/update - the target id comes from the record itself
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<()> {
    let input: ProductInput = extract_record(body, "produit", PRODUIT_REQUIS)?;
    let Some(id) = input.id else {
        let mut errors = ValidationErrors::new();
        errors.add("id", field_error("required", "L'identifiant du produit est requis."));
        return Err(errors.into());
    };
    let draft = product::validate(input)?;

    state.products.update(id, draft).await?;
    info!(by = %user.courriel, "PUT produit {}", id);
    Ok(ApiResponse::ok())
}

/// DELETE /api/produits/delete/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_id(&id)?;
    state.products.delete(id).await?;
    info!(by = %user.courriel, "DELETE produit {}", id);
    Ok(ApiResponse::ok())
}

/// GET /api/produits/filtres?categorie=..&actif=..&quantite=..
pub async fn get_with_filters(
    State(state): State<AppState>,
    Query(query): Query<ProductFilterQuery>,
) -> ApiResult<Vec<Product>> {
    let filter = ProductFilter::try_from(query)?;
    let produits = state.products.get_with_filters(&filter).await?;
    Ok(ApiResponse::success("produits", produits))
}
