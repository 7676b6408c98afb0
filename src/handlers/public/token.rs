// handlers/public/token.rs - POST /api/generatetoken handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::LoginRequest;
use crate::state::AppState;

/// Exchange `{courriel, mot_de_passe}` (or `{userLogin: {...}}`) for a
/// signed token. A wrong email or password answers 200 with an empty
/// `token`, which the client treats as a failed login.
pub async fn generate_token(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<String> {
    let Json(body) = body.map_err(|rejection| ApiError::invalid_json(rejection.body_text()))?;
    let request: LoginRequest =
        serde_json::from_value(body).map_err(|_| ApiError::bad_request("Courriel et mot de passe requis"))?;

    let token = state.tokens.generate_token(&request.into_credentials()).await?;
    Ok(ApiResponse::success("token", token))
}
