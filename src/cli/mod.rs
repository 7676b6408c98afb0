pub mod client;
pub mod commands;
pub mod config;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "silverpresta")]
#[command(about = "SilverPresta CLI - inventory client for the SilverPresta API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, env = "SILVERPRESTA_SERVER", help = "API base URL (default: saved session, then http://localhost:3000)")]
    pub server: Option<String>,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Login and store the session token")]
    Login {
        #[arg(help = "Email address")]
        courriel: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Forget the stored session token")]
    Logout,

    #[command(about = "Show server and session status")]
    Status,

    #[command(about = "Product inventory")]
    Produits {
        #[command(subcommand)]
        cmd: commands::produits::ProduitsCommands,
    },

    #[command(about = "User accounts")]
    Utilisateurs {
        #[command(subcommand)]
        cmd: commands::utilisateurs::UtilisateursCommands,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let server = cli.server;

    match cli.command {
        Commands::Login { courriel, password } => {
            commands::auth::login(server, courriel, password, output_format).await
        }
        Commands::Logout => commands::auth::logout(output_format),
        Commands::Status => commands::auth::status(server, output_format).await,
        Commands::Produits { cmd } => commands::produits::handle(cmd, server, output_format).await,
        Commands::Utilisateurs { cmd } => commands::utilisateurs::handle(cmd, server, output_format).await,
    }
}
