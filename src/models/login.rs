use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub courriel: String,
    pub mot_de_passe: String,
}

/// Login body. The web client wraps the credentials in `userLogin`;
/// other callers send them flat.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LoginRequest {
    Wrapped {
        #[serde(rename = "userLogin")]
        user_login: Credentials,
    },
    Flat(Credentials),
}

impl LoginRequest {
    pub fn into_credentials(self) -> Credentials {
        match self {
            LoginRequest::Wrapped { user_login } => user_login,
            LoginRequest::Flat(credentials) => credentials,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_flat_and_wrapped_bodies() {
        let flat: LoginRequest =
            serde_json::from_value(json!({ "courriel": "a@b.co", "mot_de_passe": "x" })).unwrap();
        assert_eq!(flat.into_credentials().courriel, "a@b.co");

        let wrapped: LoginRequest = serde_json::from_value(json!({
            "userLogin": { "courriel": "c@d.co", "mot_de_passe": "y" }
        }))
        .unwrap();
        let credentials = wrapped.into_credentials();
        assert_eq!(credentials.courriel, "c@d.co");
        assert_eq!(credentials.mot_de_passe, "y");
    }

    #[test]
    fn rejects_incomplete_bodies() {
        assert!(serde_json::from_value::<LoginRequest>(json!({ "courriel": "a@b.co" })).is_err());
    }
}
