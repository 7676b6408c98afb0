use axum::{extract::rejection::JsonRejection, Json};
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;

/// Pulls the record out of a `{"<key>": {...}}` body. A missing or null
/// key answers `missing_message`; a record of the wrong shape is
/// reported as invalid JSON.
pub fn extract_record<T: DeserializeOwned>(
    body: Result<Json<Value>, JsonRejection>,
    key: &str,
    missing_message: &str,
) -> Result<T, ApiError> {
    let Json(mut body) = body.map_err(|rejection| ApiError::invalid_json(rejection.body_text()))?;

    let record = match body.get_mut(key).map(Value::take) {
        None | Some(Value::Null) => return Err(ApiError::bad_request(missing_message)),
        Some(record) => record,
    };

    serde_json::from_value(record).map_err(|e| ApiError::invalid_json(format!("{}: {}", key, e)))
}

/// Path ids must be UUIDs.
pub fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request(format!("Identifiant invalide: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductInput;
    use serde_json::json;

    #[test]
    fn missing_key_is_reported() {
        let err = extract_record::<ProductInput>(Ok(Json(json!({}))), "produit", "Produit requis").unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message(), "Produit requis");

        let err = extract_record::<ProductInput>(Ok(Json(json!({ "produit": null }))), "produit", "Produit requis")
            .unwrap_err();
        assert_eq!(err.message(), "Produit requis");
    }

    #[test]
    fn wrong_field_type_is_invalid_json() {
        let err = extract_record::<ProductInput>(
            Ok(Json(json!({ "produit": { "quantite": "beaucoup" } }))),
            "produit",
            "Produit requis",
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_JSON");
    }

    #[test]
    fn record_is_deserialized() {
        let input = extract_record::<ProductInput>(
            Ok(Json(json!({ "produit": { "code": "CHA001", "prixVente": 12.5 } }))),
            "produit",
            "Produit requis",
        )
        .unwrap();
        assert_eq!(input.code.as_deref(), Some("CHA001"));
        assert_eq!(input.prix_vente, Some(12.5));
    }

    #[test]
    fn ids_must_be_uuids() {
        assert!(parse_id("not-a-uuid").is_err());
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
    }
}
