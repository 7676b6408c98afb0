use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::validation::{self, field_error, Validate, ValidationError, ValidationErrors};

/// A stored product. Field names serialize to the camelCase wire format
/// (`seuilReapprovisionnement`, `prixVente`, ...) and map 1:1 to columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub nom: String,
    pub code: String,
    pub categorie: String,
    pub description: String,
    pub quantite: i32,
    pub seuil_reapprovisionnement: i32,
    pub prix_vente: f64,
    pub prix_achat: Option<f64>,
    pub fournisseur: String,
    pub ajoute_par: Uuid,
    pub mis_a_jour_par: Uuid,
    pub url_image: Option<String>,
    pub actif: bool,
    pub tags: Vec<String>,
    pub date_ajout: DateTime<Utc>,
    pub date_mise_a_jour: DateTime<Utc>,
}

/// Product as received from a client. Everything is optional so that
/// missing fields become validation messages instead of parse errors.
/// Server-managed fields (`dateAjout`, `dateMiseAJour`) are ignored.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProductInput {
    pub id: Option<Uuid>,

    #[validate(
        required(message = "Le nom du produit est requis."),
        length(min = 3, max = 250, message = "Le nom du produit doit contenir entre 3 et 250 caractères.")
    )]
    pub nom: Option<String>,

    #[validate(
        required(message = "Le code du produit est requis"),
        length(min = 1, max = 50, message = "Le code du produit doit contenir entre 1 et 50 caractères.")
    )]
    pub code: Option<String>,

    #[validate(
        required(message = "La catégorie est obligatoire."),
        length(min = 1, max = 100, message = "La catégorie doit contenir entre 1 et 100 caractères.")
    )]
    pub categorie: Option<String>,

    #[validate(
        required(message = "Chaque produit doit avoir une description."),
        length(min = 1, max = 500, message = "La description doit contenir entre 1 et 500 caractères.")
    )]
    pub description: Option<String>,

    #[validate(
        required(message = "La quantité est obligatoire."),
        range(min = 0, message = "La quantité ne peut pas être négative.")
    )]
    pub quantite: Option<i32>,

    #[serde(rename = "seuilReapprovisionnement")]
    #[validate(
        required(message = "Le seuil de réapprovisionnement est obligatoire."),
        range(min = 0, message = "Le seuil de réapprovisionnement doit être positif.")
    )]
    pub seuil_reapprovisionnement: Option<i32>,

    #[serde(rename = "prixVente")]
    #[validate(
        required(message = "Le prix de vente est requis."),
        range(min = 0.0, message = "Le prix de vente doit être positif.")
    )]
    pub prix_vente: Option<f64>,

    #[serde(rename = "prixAchat")]
    #[validate(range(min = 0.0, message = "Le prix d'achat doit être positif."))]
    pub prix_achat: Option<f64>,

    #[validate(
        required(message = "Le fournisseur est obligatoire."),
        length(min = 1, max = 150, message = "Le nom du fournisseur doit contenir entre 1 et 150 caractères.")
    )]
    pub fournisseur: Option<String>,

    #[serde(rename = "ajoutePar")]
    #[validate(required(message = "L'utilisateur ayant ajouté le produit est obligatoire."))]
    pub ajoute_par: Option<Uuid>,

    #[serde(rename = "misAJourPar")]
    #[validate(required(message = "L'utilisateur ayant mis à jour le produit est obligatoire."))]
    pub mis_a_jour_par: Option<Uuid>,

    #[serde(rename = "urlImage")]
    #[validate(length(max = 500, message = "L'URL de l'image ne peut pas dépasser 500 caractères."))]
    pub url_image: Option<String>,

    pub actif: Option<bool>,

    #[validate(length(max = 5, message = "Un produit ne peut pas avoir plus de 5 tags."))]
    pub tags: Option<Vec<String>>,
}

/// A product that passed validation, ready to be stamped and stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub nom: String,
    pub code: String,
    pub categorie: String,
    pub description: String,
    pub quantite: i32,
    pub seuil_reapprovisionnement: i32,
    pub prix_vente: f64,
    pub prix_achat: Option<f64>,
    pub fournisseur: String,
    pub ajoute_par: Uuid,
    pub mis_a_jour_par: Uuid,
    pub url_image: Option<String>,
    pub actif: bool,
    pub tags: Vec<String>,
}

impl Product {
    pub fn new(draft: ProductDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            nom: draft.nom,
            code: draft.code,
            categorie: draft.categorie,
            description: draft.description,
            quantite: draft.quantite,
            seuil_reapprovisionnement: draft.seuil_reapprovisionnement,
            prix_vente: draft.prix_vente,
            prix_achat: draft.prix_achat,
            fournisseur: draft.fournisseur,
            ajoute_par: draft.ajoute_par,
            mis_a_jour_par: draft.mis_a_jour_par,
            url_image: draft.url_image,
            actif: draft.actif,
            tags: draft.tags,
            date_ajout: now,
            date_mise_a_jour: now,
        }
    }

    /// Overwrites every mutable field. The creator and creation date stay.
    pub fn apply(&mut self, draft: ProductDraft, now: DateTime<Utc>) {
        self.nom = draft.nom;
        self.code = draft.code;
        self.categorie = draft.categorie;
        self.description = draft.description;
        self.quantite = draft.quantite;
        self.seuil_reapprovisionnement = draft.seuil_reapprovisionnement;
        self.prix_vente = draft.prix_vente;
        self.prix_achat = draft.prix_achat;
        self.fournisseur = draft.fournisseur;
        self.mis_a_jour_par = draft.mis_a_jour_par;
        self.url_image = draft.url_image;
        self.actif = draft.actif;
        self.tags = draft.tags;
        self.date_mise_a_jour = now;
    }

    pub fn needs_restock(&self) -> bool {
        self.quantite <= self.seuil_reapprovisionnement
    }
}

/// Sale price must cover the purchase price whenever one is recorded.
pub fn price_covers_cost(prix_vente: f64, prix_achat: Option<f64>) -> bool {
    match prix_achat {
        Some(achat) => prix_vente >= achat,
        None => true,
    }
}

fn validate_prices(input: &ProductInput) -> Result<(), ValidationError> {
    match input.prix_vente {
        Some(vente) if vente >= 0.0 && !price_covers_cost(vente, input.prix_achat) => Err(field_error(
            "prix_vente_inferieur",
            "Le prix de vente doit être supérieur ou égal au prix d'achat.",
        )),
        _ => Ok(()),
    }
}

pub fn validate(input: ProductInput) -> Result<ProductDraft, ValidationErrors> {
    let mut errors = validation::collect(&input);
    if let Err(error) = validate_prices(&input) {
        errors.add("prixVente", error);
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    match (
        input.nom,
        input.code,
        input.categorie,
        input.description,
        input.quantite,
        input.seuil_reapprovisionnement,
        input.prix_vente,
        input.fournisseur,
        input.ajoute_par,
        input.mis_a_jour_par,
    ) {
        (
            Some(nom),
            Some(code),
            Some(categorie),
            Some(description),
            Some(quantite),
            Some(seuil_reapprovisionnement),
            Some(prix_vente),
            Some(fournisseur),
            Some(ajoute_par),
            Some(mis_a_jour_par),
        ) => Ok(ProductDraft {
            nom,
            code,
            categorie,
            description,
            quantite,
            seuil_reapprovisionnement,
            prix_vente,
            prix_achat: input.prix_achat,
            fournisseur,
            ajoute_par,
            mis_a_jour_par,
            url_image: input.url_image.filter(|url| !url.is_empty()),
            actif: input.actif.unwrap_or(true),
            tags: input.tags.unwrap_or_default(),
        }),
        _ => Err(errors),
    }
}
