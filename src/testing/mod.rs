//! Fixtures shared by the unit tests.

use std::sync::Arc;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::database::DatabaseManager;
use crate::models::{ProductInput, UserInput};
use crate::state::AppState;

/// A product payload that passes validation.
pub fn product_input(code: &str, categorie: &str) -> ProductInput {
    let auteur = Uuid::new_v4();
    ProductInput {
        nom: Some("Basket Silver".to_string()),
        code: Some(code.to_string()),
        categorie: Some(categorie.to_string()),
        description: Some("Chaussure de sport légère".to_string()),
        quantite: Some(12),
        seuil_reapprovisionnement: Some(5),
        prix_vente: Some(79.99),
        prix_achat: Some(50.0),
        fournisseur: Some("Silver Distribution".to_string()),
        ajoute_par: Some(auteur),
        mis_a_jour_par: Some(auteur),
        url_image: Some("https://cdn.silverpresta.com/basket.png".to_string()),
        actif: None,
        tags: Some(vec!["sport".to_string(), "été".to_string()]),
        ..Default::default()
    }
}

/// A user payload with role `admin` that passes validation.
pub fn user_input(courriel: &str, mot_de_passe: &str) -> UserInput {
    UserInput {
        nom: Some("Sambasso".to_string()),
        prenom: Some("Pappe".to_string()),
        courriel: Some(courriel.to_string()),
        mot_de_passe: Some(mot_de_passe.to_string()),
        role: Some("admin".to_string()),
        ..Default::default()
    }
}

/// Application state over empty in-memory repositories.
pub fn memory_state() -> AppState {
    AppState::new(Arc::new(AppConfig::test()), Arc::new(DatabaseManager::in_memory()))
}
