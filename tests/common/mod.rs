#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use silverpresta_api::app::app;
use silverpresta_api::auth::{generate_jwt, Claims};
use silverpresta_api::config::AppConfig;
use silverpresta_api::database::DatabaseManager;
use silverpresta_api::state::AppState;

pub const ADMIN_COURRIEL: &str = "admin@silverpresta.com";
pub const ADMIN_MOT_DE_PASSE: &str = "Admin@2024";

// ---------------------------------------------------------------------------
// In-process router over the memory store
// ---------------------------------------------------------------------------

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        let state = AppState::new(Arc::new(AppConfig::test()), Arc::new(DatabaseManager::in_memory()));
        Self {
            router: app(state.clone()),
            state,
        }
    }

    /// Same app with the bootstrap admin already created.
    pub async fn with_admin() -> Self {
        let app = Self::new();
        app.state
            .users
            .ensure_admin(ADMIN_COURRIEL, ADMIN_MOT_DE_PASSE)
            .await
            .expect("bootstrap admin");
        app
    }

    pub fn secret(&self) -> &str {
        &self.state.config.security.jwt_secret
    }

    /// A valid token without going through the login route.
    pub fn token(&self) -> String {
        generate_jwt(&Claims::new(ADMIN_COURRIEL, 1), self.secret()).expect("sign token")
    }

    pub async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .expect("request");

        let response = self.router.clone().oneshot(request).await.expect("router response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let token = self.token();
        self.send(Method::GET, uri, Some(&token), None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let token = self.token();
        self.send(Method::POST, uri, Some(&token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let token = self.token();
        self.send(Method::PUT, uri, Some(&token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        let token = self.token();
        self.send(Method::DELETE, uri, Some(&token), None).await
    }

    /// Adds a product and returns it as listed by the API.
    pub async fn add_product(&self, produit: Value) -> Value {
        let code = produit["code"].clone();
        let (status, body) = self.post("/api/produits/add", json!({ "produit": produit })).await;
        assert_eq!(status, StatusCode::CREATED, "add failed: {}", body);

        let (_, list) = self.get("/api/produits/all").await;
        list["produits"]
            .as_array()
            .and_then(|all| all.iter().find(|p| p["code"] == code).cloned())
            .expect("added product is listed")
    }
}

// ---------------------------------------------------------------------------
// Payload fixtures
// ---------------------------------------------------------------------------

pub fn product_json(code: &str, categorie: &str) -> Value {
    let auteur = Uuid::new_v4();
    json!({
        "nom": "Basket Silver",
        "code": code,
        "categorie": categorie,
        "description": "Chaussure de sport légère",
        "quantite": 12,
        "seuilReapprovisionnement": 5,
        "prixVente": 79.99,
        "prixAchat": 50.0,
        "fournisseur": "Silver Distribution",
        "ajoutePar": auteur,
        "misAJourPar": auteur,
        "urlImage": "https://cdn.silverpresta.com/basket.png",
        "tags": ["sport", "été"]
    })
}

pub fn user_json(courriel: &str, mot_de_passe: &str) -> Value {
    json!({
        "nom": "Sambasso",
        "prenom": "Pappe",
        "courriel": courriel,
        "mot_de_passe": mot_de_passe,
        "role": "employe"
    })
}

// ---------------------------------------------------------------------------
// Spawned server binary
// ---------------------------------------------------------------------------

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_silverpresta-api"));
        cmd.env("APP_ENV", "test")
            .env("STORAGE", "memory")
            .env("HOST", "127.0.0.1")
            .env("PORT", port.to_string())
            .env("ADMIN_COURRIEL", ADMIN_COURRIEL)
            .env("ADMIN_MOT_DE_PASSE", ADMIN_MOT_DE_PASSE)
            .env_remove("DATABASE_URL")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == reqwest::StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}
