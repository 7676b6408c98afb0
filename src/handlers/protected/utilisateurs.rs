// handlers/protected/utilisateurs.rs - /api/utilisateurs/* handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use serde_json::Value;
use tracing::info;

use crate::error::ApiError;
use crate::handlers::utils::{extract_record, parse_id};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::models::user::{self, User, UserInput};
use crate::models::validation::{field_error, ValidationErrors};
use crate::services::UTILISATEUR_NON_TROUVE;
use crate::state::AppState;

const UTILISATEUR_REQUIS: &str = "Utilisateur requis";

/// GET /api/utilisateurs/all
pub async fn get_all(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    let utilisateurs = state.users.get_all().await?;
    Ok(ApiResponse::success("utilisateurs", utilisateurs))
}

/// GET /api/utilisateurs/:id
pub async fn get_one(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<User> {
    let id = parse_id(&id)?;
    let utilisateur = state
        .users
        .get_one(id)
        .await?
        .ok_or_else(|| ApiError::not_found(UTILISATEUR_NON_TROUVE))?;
    Ok(ApiResponse::success("utilisateur", utilisateur))
}

/// POST /api/utilisateurs/add
pub async fn add(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<()> {
    let input: UserInput = extract_record(body, "utilisateur", UTILISATEUR_REQUIS)?;
    let draft = user::validate(input)?;

    let utilisateur = state.users.add(draft).await?;
    info!(by = %caller.courriel, "POST utilisateur {}", utilisateur.id);
    Ok(ApiResponse::created())
}

/// PUT /api/utilisateurs/update
pub async fn update(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<()> {
    let input: UserInput = extract_record(body, "utilisateur", UTILISATEUR_REQUIS)?;
    let Some(id) = input.id else {
        let mut errors = ValidationErrors::new();
        errors.add("id", field_error("required", "L'identifiant de l'utilisateur est requis."));
        return Err(errors.into());
    };
    let draft = user::validate(input)?;

    state.users.update(id, draft).await?;
    info!(by = %caller.courriel, "PUT utilisateur {}", id);
    Ok(ApiResponse::ok())
}

/// DELETE /api/utilisateurs/delete/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_id(&id)?;
    state.users.delete(id).await?;
    info!(by = %caller.courriel, "DELETE utilisateur {}", id);
    Ok(ApiResponse::ok())
}
