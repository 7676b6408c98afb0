use std::borrow::Cow;
use std::collections::BTreeMap;

pub use validator::{Validate, ValidationError, ValidationErrors};

/// A field error carrying the message shown to the client.
pub fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Runs the derived rules, yielding an empty set when they all pass so
/// cross-field checks can be added on top.
pub fn collect<T: Validate>(input: &T) -> ValidationErrors {
    match input.validate() {
        Ok(()) => ValidationErrors::new(),
        Err(errors) => errors,
    }
}

/// One message per field, keyed by the JSON field name. The first
/// failing rule of a field wins, which is how the client renders one
/// message under each form input.
pub fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, String> {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, list)| {
            list.first().map(|error| {
                let message = match &error.message {
                    Some(message) => message.to_string(),
                    None => error.code.to_string(),
                };
                (field.to_string(), message)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_message_per_field_is_kept() {
        let mut errors = ValidationErrors::new();
        errors.add("code", field_error("required", "Le code du produit est requis"));
        errors.add("code", field_error("length", "Le code du produit ne peut pas dépasser 50 caractères."));
        errors.add("tags", ValidationError::new("length"));

        let messages = field_messages(&errors);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages["code"], "Le code du produit est requis");
        assert_eq!(messages["tags"], "length");
    }
}
