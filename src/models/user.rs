use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

use super::validation::{self, field_error, Validate, ValidationError, ValidationErrors};

pub const PASSWORD_SPECIALS: &str = "@$!%*?&.,;:+-_=<>";

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern compiles"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "employe")]
    Employee,
    #[serde(rename = "gestionnaire")]
    Manager,
}

#[derive(Debug, Error, PartialEq)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Employee => "employe",
            Role::Manager => "gestionnaire",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "employe" => Ok(Role::Employee),
            "gestionnaire" => Ok(Role::Manager),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = UnknownRole;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored user. `mot_de_passe` holds the Argon2 hash and never leaves
/// the server.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub nom: String,
    pub prenom: String,
    pub courriel: String,
    #[serde(skip_serializing)]
    pub mot_de_passe: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub actif: bool,
    pub date_creation: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UserInput {
    pub id: Option<Uuid>,

    #[validate(
        required(message = "Le nom est obligatoire."),
        length(min = 1, max = 100, message = "Le nom doit contenir entre 1 et 100 caractères.")
    )]
    pub nom: Option<String>,

    #[validate(
        required(message = "Le prénom est obligatoire."),
        length(min = 1, max = 100, message = "Le prénom doit contenir entre 1 et 100 caractères.")
    )]
    pub prenom: Option<String>,

    #[validate(
        required(message = "Le courriel est obligatoire."),
        length(min = 1, max = 255, message = "Le courriel doit contenir entre 1 et 255 caractères."),
        regex(path = "EMAIL_PATTERN", message = "Le format du courriel est invalide."),
        email(message = "Le format du courriel est invalide.")
    )]
    pub courriel: Option<String>,

    #[validate(
        required(message = "Le mot de passe est obligatoire."),
        length(min = 8, message = "Le mot de passe doit contenir au moins 8 caractères."),
        custom = "validate_password_strength"
    )]
    pub mot_de_passe: Option<String>,

    #[validate(required(message = "Le rôle est obligatoire."), custom = "validate_role")]
    pub role: Option<String>,

    pub actif: Option<bool>,
}

/// Validated user fields. The password is still plaintext here; the
/// service hashes it before anything is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct UserDraft {
    pub nom: String,
    pub prenom: String,
    pub courriel: String,
    pub mot_de_passe: String,
    pub role: Role,
    pub actif: bool,
}

impl User {
    pub fn new(draft: UserDraft, password_hash: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            nom: draft.nom,
            prenom: draft.prenom,
            courriel: draft.courriel,
            mot_de_passe: password_hash,
            role: draft.role,
            actif: draft.actif,
            date_creation: now,
        }
    }

    pub fn apply(&mut self, draft: UserDraft, password_hash: String) {
        self.nom = draft.nom;
        self.prenom = draft.prenom;
        self.courriel = draft.courriel;
        self.mot_de_passe = password_hash;
        self.role = draft.role;
        self.actif = draft.actif;
    }
}

pub fn normalize_email(courriel: &str) -> String {
    courriel.trim().to_lowercase()
}

/// At least one upper-case letter, one lower-case letter, one digit and
/// one character from `PASSWORD_SPECIALS`.
pub fn is_strong_password(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    if is_strong_password(password) {
        Ok(())
    } else {
        Err(field_error(
            "mot_de_passe_faible",
            "Le mot de passe doit contenir une majuscule, une minuscule, un chiffre et un caractère spécial.",
        ))
    }
}

fn validate_role(role: &str) -> Result<(), ValidationError> {
    role.parse::<Role>()
        .map(|_| ())
        .map_err(|_| field_error("role_inconnu", "Le rôle doit être soit admin, employe ou gestionnaire."))
}

/// Normalizes the email, then checks every rule.
pub fn validate(mut input: UserInput) -> Result<UserDraft, ValidationErrors> {
    input.courriel = input.courriel.map(|c| normalize_email(&c));

    let errors = validation::collect(&input);
    if !errors.is_empty() {
        return Err(errors);
    }

    let role = input.role.as_deref().and_then(|raw| raw.parse::<Role>().ok());
    match (input.nom, input.prenom, input.courriel, input.mot_de_passe, role) {
        (Some(nom), Some(prenom), Some(courriel), Some(mot_de_passe), Some(role)) => Ok(UserDraft {
            nom,
            prenom,
            courriel,
            mot_de_passe,
            role,
            actif: input.actif.unwrap_or(true),
        }),
        _ => Err(errors),
    }
}
