pub mod auth;
pub mod produits;
pub mod utilisateurs;

use crate::cli::client::ApiClient;
use crate::cli::config;

/// Client for the resolved server, carrying the saved token.
pub(crate) fn session_client(server: Option<&str>) -> anyhow::Result<ApiClient> {
    let session = config::load_session()?;
    Ok(ApiClient::new(session.server_url(server), session.token.clone())?)
}
