use clap::Subcommand;
use serde_json::{json, Value};

use super::session_client;
use crate::cli::utils::{output_value, render_users};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum UtilisateursCommands {
    #[command(about = "List user accounts")]
    List,

    #[command(about = "Show one user account")]
    Get {
        #[arg(help = "User id")]
        id: String,
    },
}

pub async fn handle(cmd: UtilisateursCommands, server: Option<String>, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = session_client(server.as_deref())?;

    match cmd {
        UtilisateursCommands::List => {
            let value = client.get("/api/utilisateurs/all").await?;
            let utilisateurs = value.get("utilisateurs").cloned().unwrap_or_else(|| json!([]));
            let rows = utilisateurs.as_array().cloned().unwrap_or_default();
            output_value(&output_format, &utilisateurs, || render_users(&rows))
        }
        UtilisateursCommands::Get { id } => {
            let value = client.get(&format!("/api/utilisateurs/{}", id)).await?;
            let utilisateur = value.get("utilisateur").cloned().unwrap_or(Value::Null);
            output_value(&output_format, &utilisateur, || render_users(std::slice::from_ref(&utilisateur)))
        }
    }
}
