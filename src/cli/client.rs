use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Not logged in. Run `silverpresta login <courriel>` first.")]
    NotLoggedIn,

    #[error("Session rejected by the server ({0}). Run `silverpresta login` again.")]
    SessionRejected(StatusCode),

    #[error("{message} (HTTP {status})")]
    Api { status: StatusCode, message: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Thin wrapper over the REST routes. Responses come back as the raw
/// JSON envelope; callers pick the resource key they expect.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            token,
        })
    }

    /// Empty string when the credentials do not match.
    pub async fn generate_token(&self, courriel: &str, mot_de_passe: &str) -> Result<String, ClientError> {
        let body = json!({ "courriel": courriel, "mot_de_passe": mot_de_passe });
        let value = self.send(Method::POST, "/api/generatetoken", Some(&body), false).await?;
        Ok(value
            .get("token")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string())
    }

    pub async fn health(&self) -> Result<Value, ClientError> {
        self.send::<Value>(Method::GET, "/health", None, false).await
    }

    pub async fn get(&self, path: &str) -> Result<Value, ClientError> {
        self.send::<Value>(Method::GET, path, None, true).await
    }

    pub async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ClientError> {
        self.send(Method::POST, path, Some(body), true).await.map(|_| ())
    }

    pub async fn put<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ClientError> {
        self.send(Method::PUT, path, Some(body), true).await.map(|_| ())
    }

    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        self.send::<Value>(Method::DELETE, path, None, true).await.map(|_| ())
    }

    async fn send<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        authenticated: bool,
    ) -> Result<Value, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method, &url);

        if authenticated {
            let token = self.token.as_deref().ok_or(ClientError::NotLoggedIn)?;
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ClientError::SessionRejected(status));
        }
        if !status.is_success() {
            return Err(ClientError::Api {
                status,
                message: error_message(&text),
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }
}

/// `error` plus any per-field messages from an API error body.
pub fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return body.trim().to_string();
    };

    let mut message = value
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or("Erreur inconnue")
        .to_string();

    if let Some(fields) = value.get("errors").and_then(Value::as_object) {
        for (field, detail) in fields {
            if let Some(detail) = detail.as_str() {
                message.push_str(&format!("\n  - {}: {}", field, detail));
            }
        }
    }
    message
}
