use clap::Subcommand;
use serde_json::{json, Value};
use std::path::PathBuf;

use super::session_client;
use crate::cli::utils::{output_success, output_value, read_json_input, render_product, render_products};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum ProduitsCommands {
    #[command(about = "List every product")]
    List,

    #[command(about = "Show one product")]
    Get {
        #[arg(help = "Product id")]
        id: String,
    },

    #[command(about = "List products matching category / active flag / minimum quantity")]
    Filter {
        #[arg(long, help = "Exact category")]
        categorie: Option<String>,
        #[arg(long, help = "true or false")]
        actif: Option<bool>,
        #[arg(long, help = "Minimum quantity in stock")]
        quantite: Option<i32>,
    },

    #[command(about = "Add a product from a JSON file or stdin")]
    Add {
        #[arg(long, help = "JSON file (reads stdin if omitted)")]
        file: Option<PathBuf>,
    },

    #[command(about = "Replace a product from a JSON file or stdin")]
    Update {
        #[arg(help = "Product id")]
        id: String,
        #[arg(long, help = "JSON file (reads stdin if omitted)")]
        file: Option<PathBuf>,
    },

    #[command(about = "Delete a product")]
    Delete {
        #[arg(help = "Product id")]
        id: String,
    },
}

pub async fn handle(cmd: ProduitsCommands, server: Option<String>, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = session_client(server.as_deref())?;

    match cmd {
        ProduitsCommands::List => {
            let value = client.get("/api/produits/all").await?;
            print_list(&output_format, value)
        }
        ProduitsCommands::Get { id } => {
            let value = client.get(&format!("/api/produits/{}", id)).await?;
            let produit = value.get("produit").cloned().unwrap_or(Value::Null);
            if produit.is_null() {
                anyhow::bail!("Produit non trouvé: {}", id);
            }
            output_value(&output_format, &produit, || render_product(&produit))
        }
        ProduitsCommands::Filter { categorie, actif, quantite } => {
            let path = format!("/api/produits/filtres{}", filter_query(categorie.as_deref(), actif, quantite));
            let value = client.get(&path).await?;
            print_list(&output_format, value)
        }
        ProduitsCommands::Add { file } => {
            let produit = unwrap_record(read_json_input(file.as_deref())?);
            client.post("/api/produits/add", &json!({ "produit": produit })).await?;
            output_success(&output_format, "Produit ajouté", None)
        }
        ProduitsCommands::Update { id, file } => {
            let mut produit = unwrap_record(read_json_input(file.as_deref())?);
            if let Some(object) = produit.as_object_mut() {
                object.insert("id".to_string(), Value::String(id.clone()));
            }
            client.put("/api/produits/update", &json!({ "produit": produit })).await?;
            output_success(&output_format, &format!("Produit {} mis à jour", id), None)
        }
        ProduitsCommands::Delete { id } => {
            client.delete(&format!("/api/produits/delete/{}", id)).await?;
            output_success(&output_format, &format!("Produit {} supprimé", id), None)
        }
    }
}

fn print_list(output_format: &OutputFormat, value: Value) -> anyhow::Result<()> {
    let produits = value.get("produits").cloned().unwrap_or_else(|| json!([]));
    let rows = produits.as_array().cloned().unwrap_or_default();
    output_value(output_format, &produits, || render_products(&rows))
}

/// Accepts either a bare record or one already wrapped as `{"produit": {...}}`.
fn unwrap_record(input: Value) -> Value {
    match input {
        Value::Object(mut object) if object.len() == 1 && object.contains_key("produit") => {
            object.remove("produit").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn filter_query(categorie: Option<&str>, actif: Option<bool>, quantite: Option<i32>) -> String {
    let mut url = match url::Url::parse("http://localhost/") {
        Ok(url) => url,
        Err(_) => return String::new(),
    };
    {
        let mut pairs = url.query_pairs_mut();
        if let Some(c) = categorie {
            pairs.append_pair("categorie", c);
        }
        if let Some(a) = actif {
            pairs.append_pair("actif", if a { "true" } else { "false" });
        }
        if let Some(q) = quantite {
            pairs.append_pair("quantite", &q.to_string());
        }
    }
    match url.query() {
        Some(q) if !q.is_empty() => format!("?{}", q),
        _ => String::new(),
    }
}
