mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{product_json, ADMIN_COURRIEL, ADMIN_MOT_DE_PASSE};

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/health", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
    Ok(())
}

#[tokio::test]
async fn root_lists_endpoints() -> Result<()> {
    let server = common::ensure_server().await?;
    let body = reqwest::get(format!("{}/", server.base_url)).await?.json::<Value>().await?;

    assert_eq!(body["name"], "SilverPresta API");
    assert!(body["endpoints"]["produits"].is_string());
    Ok(())
}

#[tokio::test]
async fn bootstrap_admin_can_log_in_and_manage_products() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/generatetoken", server.base_url))
        .json(&json!({ "courriel": ADMIN_COURRIEL, "mot_de_passe": ADMIN_MOT_DE_PASSE }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let token = res.json::<Value>().await?["token"].as_str().unwrap_or_default().to_string();
    assert!(!token.is_empty(), "bootstrap admin login failed");

    let code = format!("E2E-{}", server.port);
    let res = client
        .post(format!("{}/api/produits/add", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "produit": product_json(&code, "Accessoires") }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = client
        .get(format!("{}/api/produits/filtres?categorie=Accessoires", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?
        .json::<Value>()
        .await?;
    let found = body["produits"]
        .as_array()
        .map(|all| all.iter().any(|p| p["code"] == code.as_str()))
        .unwrap_or(false);
    assert!(found);
    Ok(())
}

#[tokio::test]
async fn protected_route_without_token_is_401() -> Result<()> {
    let server = common::ensure_server().await?;
    let res = reqwest::get(format!("{}/api/utilisateurs/all", server.base_url)).await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
