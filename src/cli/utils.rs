use serde_json::{json, Value};
use std::io::{self, BufRead, Read, Write};
use std::path::Path;

use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(output_format: &OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let Some(Value::Object(extra)) = data {
                if let Some(object) = response.as_object_mut() {
                    object.extend(extra);
                }
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(output_format: &OutputFormat, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let response = json!({
                "success": false,
                "error": message
            });
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Prints `value` as pretty JSON, or `text` otherwise.
pub fn output_value(output_format: &OutputFormat, value: &Value, text: impl FnOnce() -> String) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => println!("{}", text()),
    }
    Ok(())
}

fn str_field<'a>(record: &'a Value, key: &str) -> &'a str {
    record.get(key).and_then(Value::as_str).unwrap_or("")
}

/// Product list as shown by the inventory screen: name, code, category,
/// quantity, price. Rows at or under their restock threshold are flagged.
pub fn render_products(produits: &[Value]) -> String {
    if produits.is_empty() {
        return "Aucun produit.".to_string();
    }

    let mut out = format!(
        "{:<36}  {:<24} {:<12} {:<16} {:>8} {:>10}\n",
        "ID", "Nom", "Code", "Catégorie", "Quantité", "Prix ($)"
    );
    for p in produits {
        let quantite = p.get("quantite").and_then(Value::as_i64).unwrap_or(0);
        let seuil = p.get("seuilReapprovisionnement").and_then(Value::as_i64).unwrap_or(0);
        let prix = p.get("prixVente").and_then(Value::as_f64).unwrap_or(0.0);
        let restock = if quantite <= seuil { " !" } else { "" };

        out.push_str(&format!(
            "{:<36}  {:<24} {:<12} {:<16} {:>8} {:>10.2}{}\n",
            str_field(p, "id"),
            str_field(p, "nom"),
            str_field(p, "code"),
            str_field(p, "categorie"),
            quantite,
            prix,
            restock
        ));
    }
    out.push_str(&format!("{} produit(s)", produits.len()));
    out
}

pub fn render_product(p: &Value) -> String {
    let tags: Vec<&str> = p
        .get("tags")
        .and_then(Value::as_array)
        .map(|tags| tags.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    format!(
        "{} ({})\n  id:           {}\n  catégorie:    {}\n  description:  {}\n  quantité:     {} (seuil {})\n  prix vente:   {}\n  prix achat:   {}\n  fournisseur:  {}\n  actif:        {}\n  tags:         {}",
        str_field(p, "nom"),
        str_field(p, "code"),
        str_field(p, "id"),
        str_field(p, "categorie"),
        str_field(p, "description"),
        p.get("quantite").unwrap_or(&Value::Null),
        p.get("seuilReapprovisionnement").unwrap_or(&Value::Null),
        p.get("prixVente").unwrap_or(&Value::Null),
        p.get("prixAchat").unwrap_or(&Value::Null),
        str_field(p, "fournisseur"),
        p.get("actif").unwrap_or(&Value::Null),
        tags.join(", ")
    )
}

pub fn render_users(utilisateurs: &[Value]) -> String {
    if utilisateurs.is_empty() {
        return "Aucun utilisateur.".to_string();
    }

    let mut out = format!(
        "{:<36}  {:<20} {:<20} {:<32} {:<13} {}\n",
        "ID", "Nom", "Prénom", "Courriel", "Rôle", "Actif"
    );
    for u in utilisateurs {
        out.push_str(&format!(
            "{:<36}  {:<20} {:<20} {:<32} {:<13} {}\n",
            str_field(u, "id"),
            str_field(u, "nom"),
            str_field(u, "prenom"),
            str_field(u, "courriel"),
            str_field(u, "role"),
            if u.get("actif").and_then(Value::as_bool).unwrap_or(false) { "oui" } else { "non" }
        ));
    }
    out.push_str(&format!("{} utilisateur(s)", utilisateurs.len()));
    out
}

/// JSON record from `file`, or from stdin when no file is given.
pub fn read_json_input(file: Option<&Path>) -> anyhow::Result<Value> {
    let content = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    serde_json::from_str(&content).map_err(|e| anyhow::anyhow!("invalid JSON input: {}", e))
}

/// Reads one line from stdin after printing `label` on stderr.
pub fn prompt(label: &str) -> anyhow::Result<String> {
    eprint!("{}", label);
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
