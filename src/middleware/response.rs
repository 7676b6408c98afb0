use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Successful response. Data is wrapped under its resource key
/// (`{"produits": [...]}`); responses without data have an empty body.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub key: Option<&'static str>,
    pub data: T,
    pub status_code: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 with `data` under `key`
    pub fn success(key: &'static str, data: T) -> Self {
        Self::with_status(key, data, StatusCode::OK)
    }

    pub fn with_status(key: &'static str, data: T, status_code: StatusCode) -> Self {
        Self {
            key: Some(key),
            data,
            status_code,
        }
    }
}

impl ApiResponse<()> {
    /// Status only, no body
    pub fn empty(status_code: StatusCode) -> Self {
        Self {
            key: None,
            data: (),
            status_code,
        }
    }

    pub fn ok() -> Self {
        Self::empty(StatusCode::OK)
    }

    pub fn created() -> Self {
        Self::empty(StatusCode::CREATED)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let Some(key) = self.key else {
            return self.status_code.into_response();
        };

        let data_value = match serde_json::to_value(&self.data) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to serialize response data" })),
                )
                    .into_response();
            }
        };

        let mut envelope = Map::new();
        envelope.insert(key.to_string(), data_value);
        (self.status_code, Json(Value::Object(envelope))).into_response()
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;
