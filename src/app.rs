use axum::{
    extract::{DefaultBodyLimit, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    response::{IntoResponse, Json},
    routing::{delete, get, post, put},
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::warn;

use crate::config::AppConfig;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

/// Full router: public index/health/login plus the JWT-protected
/// resource routes, with CORS, body limit and optional tracing and
/// security headers.
pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    let mut router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(token_routes())
        // Protected API
        .merge(
            Router::new()
                .merge(produits_routes())
                .merge(utilisateurs_routes())
                .route_layer(middleware::from_fn_with_state(state.clone(), jwt_auth_middleware)),
        )
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .layer(cors_layer(&config));

    if config.api.enable_security_headers {
        router = router
            .layer(SetResponseHeaderLayer::if_not_present(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::X_FRAME_OPTIONS,
                HeaderValue::from_static("SAMEORIGIN"),
            ));
    }

    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if config.security.cors_origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}

fn token_routes() -> Router<AppState> {
    Router::new().route("/api/generatetoken", post(public::token::generate_token))
}

fn produits_routes() -> Router<AppState> {
    use protected::produits;

    Router::new()
        .route("/api/produits/all", get(produits::get_all))
        .route("/api/produits/filtres", get(produits::get_with_filters))
        .route("/api/produits/add", post(produits::add))
        .route("/api/produits/update", put(produits::update))
        .route("/api/produits/delete/:id", delete(produits::delete))
        .route("/api/produits/:id", get(produits::get_one))
}

fn utilisateurs_routes() -> Router<AppState> {
    use protected::utilisateurs;

    Router::new()
        .route("/api/utilisateurs/all", get(utilisateurs::get_all))
        .route("/api/utilisateurs/add", post(utilisateurs::add))
        .route("/api/utilisateurs/update", put(utilisateurs::update))
        .route("/api/utilisateurs/delete/:id", delete(utilisateurs::delete))
        .route("/api/utilisateurs/:id", get(utilisateurs::get_one))
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "SilverPresta API",
        "version": version,
        "description": "Gestion d'inventaire: produits et utilisateurs",
        "endpoints": {
            "home": "/ (public)",
            "health": "/health (public)",
            "token": "POST /api/generatetoken (public - token acquisition)",
            "produits": "/api/produits/{all,filtres,add,update,delete/:id,:id} (protected)",
            "utilisateurs": "/api/utilisateurs/{all,add,update,delete/:id,:id} (protected)",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.database.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "storage": state.database.storage(),
                "database": "ok"
            })),
        ),
        Err(e) => {
            warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "storage": state.database.storage(),
                    "error": "database unavailable"
                })),
            )
        }
    }
}
