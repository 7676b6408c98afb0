mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

use common::{user_json, TestApp, ADMIN_COURRIEL};

async fn find_by_email(app: &TestApp, courriel: &str) -> Value {
    let (_, body) = app.get("/api/utilisateurs/all").await;
    body["utilisateurs"]
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["courriel"] == courriel)
        .cloned()
        .expect("user is listed")
}

#[tokio::test]
async fn add_normalizes_email_and_hides_password() {
    let app = TestApp::new();
    let (status, body) = app
        .post(
            "/api/utilisateurs/add",
            json!({ "utilisateur": user_json("  Jean.Diallo@SilverPresta.com ", "Secret123!") }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, Value::Null);

    let user = find_by_email(&app, "jean.diallo@silverpresta.com").await;
    assert_eq!(user["role"], "employe");
    assert_eq!(user["actif"], true);
    assert!(user.get("mot_de_passe").is_none());

    let (status, body) = app.get(&format!("/api/utilisateurs/{}", user["id"].as_str().unwrap())).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["utilisateur"].get("mot_de_passe").is_none());
    assert!(body["utilisateur"]["date_creation"].is_string());
}

#[tokio::test]
async fn weak_password_malformed_email_and_unknown_role_are_rejected() {
    let app = TestApp::new();

    let (status, body) = app
        .post("/api/utilisateurs/add", json!({ "utilisateur": user_json("jean@example.com", "motdepasse") }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["mot_de_passe"].is_string());

    let (status, body) = app
        .post("/api/utilisateurs/add", json!({ "utilisateur": user_json("jean@example", "Secret123!") }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["courriel"].is_string());

    let mut user = user_json("jean@example.com", "Secret123!");
    user["role"] = json!("stagiaire");
    let (status, body) = app.post("/api/utilisateurs/add", json!({ "utilisateur": user })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["role"].is_string());

    let (_, list) = app.get("/api/utilisateurs/all").await;
    assert_eq!(list, json!({ "utilisateurs": [] }));
}

#[tokio::test]
async fn email_longer_than_the_column_is_rejected() {
    let app = TestApp::new();
    let courriel = format!("{}@silverpresta.com", "a".repeat(300));

    let (status, body) = app
        .post("/api/utilisateurs/add", json!({ "utilisateur": user_json(&courriel, "Secret123!") }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["errors"]["courriel"].is_string());
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let app = TestApp::new();
    let body = json!({ "utilisateur": user_json("jean@example.com", "Secret123!") });

    let (status, _) = app.post("/api/utilisateurs/add", body.clone()).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, response) = app.post("/api/utilisateurs/add", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "Ce courriel est déjà utilisé");
}

#[tokio::test]
async fn missing_envelope_key_is_rejected() {
    let app = TestApp::new();
    let (status, body) = app
        .post("/api/utilisateurs/add", json!({ "utilisateur": null }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Utilisateur requis");
}

#[tokio::test]
async fn update_changes_role_and_password() {
    let app = TestApp::with_admin().await;
    let (status, _) = app
        .post("/api/utilisateurs/add", json!({ "utilisateur": user_json("jean@example.com", "Secret123!") }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let user = find_by_email(&app, "jean@example.com").await;

    let mut changed = user_json("jean@example.com", "Nouveau@456");
    changed["id"] = user["id"].clone();
    changed["role"] = json!("gestionnaire");
    let (status, _) = app.put("/api/utilisateurs/update", json!({ "utilisateur": changed })).await;
    assert_eq!(status, StatusCode::OK);

    let updated = find_by_email(&app, "jean@example.com").await;
    assert_eq!(updated["role"], "gestionnaire");
    assert_eq!(updated["date_creation"], user["date_creation"]);

    let (_, body) = app
        .send(
            axum::http::Method::POST,
            "/api/generatetoken",
            None,
            Some(json!({ "courriel": "jean@example.com", "mot_de_passe": "Nouveau@456" })),
        )
        .await;
    assert!(!body["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_user_is_404_everywhere() {
    let app = TestApp::new();
    let id = Uuid::new_v4();

    let (status, body) = app.get(&format!("/api/utilisateurs/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Utilisateur non trouvé");

    let mut user = user_json("jean@example.com", "Secret123!");
    user["id"] = json!(id);
    let (status, _) = app.put("/api/utilisateurs/update", json!({ "utilisateur": user })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.delete(&format!("/api/utilisateurs/delete/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_the_user() {
    let app = TestApp::with_admin().await;
    let admin = find_by_email(&app, ADMIN_COURRIEL).await;

    let (status, _) = app
        .delete(&format!("/api/utilisateurs/delete/{}", admin["id"].as_str().unwrap()))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, list) = app.get("/api/utilisateurs/all").await;
    assert_eq!(list, json!({ "utilisateurs": [] }));
}
