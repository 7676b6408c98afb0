use chrono::{TimeZone, Utc};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde_json::json;

use crate::auth::Claims;
use crate::cli::client::ApiClient;
use crate::cli::config;
use crate::cli::utils::{output_error, output_success, output_value, prompt};
use crate::cli::OutputFormat;

pub async fn login(
    server: Option<String>,
    courriel: String,
    password: Option<String>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let mut session = config::load_session()?;
    let server_url = session.server_url(server.as_deref());

    let password = match password {
        Some(p) => p,
        None => prompt("Mot de passe: ")?,
    };

    let client = ApiClient::new(server_url.clone(), None)?;
    let token = client.generate_token(&courriel, &password).await?;
    if token.is_empty() {
        output_error(&output_format, "Courriel ou mot de passe incorrect")?;
        anyhow::bail!("login failed");
    }

    session.login(server_url.clone(), courriel.clone(), token);
    config::save_session(&session)?;

    output_success(
        &output_format,
        &format!("Connecté en tant que {}", courriel),
        Some(json!({ "server": server_url, "courriel": courriel })),
    )
}

pub fn logout(output_format: OutputFormat) -> anyhow::Result<()> {
    let mut session = config::load_session()?;
    session.logout();
    config::save_session(&session)?;
    output_success(&output_format, "Déconnecté", None)
}

pub async fn status(server: Option<String>, output_format: OutputFormat) -> anyhow::Result<()> {
    let session = config::load_session()?;
    let server_url = session.server_url(server.as_deref());
    let client = ApiClient::new(server_url.clone(), None)?;

    let health = client.health().await.ok();
    let expires_at = session.token.as_deref().and_then(token_expiry);

    let value = json!({
        "server": server_url,
        "reachable": health.is_some(),
        "storage": health.as_ref().and_then(|h| h.get("storage")).cloned(),
        "courriel": session.courriel,
        "logged_in": session.token.is_some(),
        "expires_at": expires_at,
    });

    output_value(&output_format, &value, || {
        let reachable = if health.is_some() { "joignable" } else { "injoignable" };
        let who = match (&session.courriel, expires_at) {
            (Some(c), Some(exp)) if exp > Utc::now().timestamp() => match Utc.timestamp_opt(exp, 0).single() {
                Some(at) => format!("connecté en tant que {} (expire {})", c, at.format("%Y-%m-%d %H:%M UTC")),
                None => format!("connecté en tant que {}", c),
            },
            (Some(c), Some(_)) => format!("session expirée pour {}", c),
            _ => "non connecté".to_string(),
        };
        format!("Serveur {} ({})\nSession: {}", server_url, reachable, who)
    })
}

/// Reads `exp` from a token without checking its signature; the secret
/// lives on the server.
fn token_expiry(token: &str) -> Option<i64> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;

    decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        .ok()
        .map(|data| data.claims.exp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::generate_jwt;

    #[test]
    fn expiry_is_read_without_the_secret() {
        let claims = Claims::new("jean@example.com", 2);
        let token = generate_jwt(&claims, "server-side-secret").unwrap();
        assert_eq!(token_expiry(&token), Some(claims.exp));
        assert_eq!(token_expiry("garbage"), None);
    }
}
