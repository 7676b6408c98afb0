use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_SERVER: &str = "http://localhost:3000";
const SESSION_FILE: &str = "session.json";

/// What the CLI remembers between invocations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub server: String,
    pub token: Option<String>,
    pub courriel: Option<String>,
    pub logged_in_at: Option<DateTime<Utc>>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            token: None,
            courriel: None,
            logged_in_at: None,
        }
    }
}

impl Session {
    pub fn login(&mut self, server: String, courriel: String, token: String) {
        self.server = server;
        self.courriel = Some(courriel);
        self.token = Some(token);
        self.logged_in_at = Some(Utc::now());
    }

    pub fn logout(&mut self) {
        self.token = None;
        self.courriel = None;
        self.logged_in_at = None;
    }

    /// The `--server` flag wins over the saved server.
    pub fn server_url(&self, flag: Option<&str>) -> String {
        flag.unwrap_or(&self.server).trim_end_matches('/').to_string()
    }
}

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("SILVERPRESTA_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME").map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("silverpresta")
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

pub fn load_session() -> anyhow::Result<Session> {
    load_session_from(&get_config_dir()?)
}

pub fn save_session(session: &Session) -> anyhow::Result<()> {
    save_session_to(&get_config_dir()?, session)
}

pub fn load_session_from(dir: &Path) -> anyhow::Result<Session> {
    let session_file = dir.join(SESSION_FILE);

    if !session_file.exists() {
        return Ok(Session::default());
    }

    let content = fs::read_to_string(session_file)?;
    let session: Session = serde_json::from_str(&content)?;
    Ok(session)
}

pub fn save_session_to(dir: &Path, session: &Session) -> anyhow::Result<()> {
    let content = serde_json::to_string_pretty(session)?;
    fs::write(dir.join(SESSION_FILE), content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("silverpresta-cli-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_file_gives_default_session() {
        let dir = temp_dir();
        assert_eq!(load_session_from(&dir).unwrap(), Session::default());
    }

    #[test]
    fn session_survives_a_round_trip() {
        let dir = temp_dir();
        let mut session = Session::default();
        session.login("http://inventaire:8080".to_string(), "jean@example.com".to_string(), "abc".to_string());

        save_session_to(&dir, &session).unwrap();
        assert_eq!(load_session_from(&dir).unwrap(), session);

        session.logout();
        assert!(session.token.is_none());
        assert_eq!(session.server, "http://inventaire:8080");
    }

    #[test]
    fn server_flag_overrides_saved_server() {
        let session = Session::default();
        assert_eq!(session.server_url(None), DEFAULT_SERVER);
        assert_eq!(session.server_url(Some("http://autre:3000/")), "http://autre:3000");
    }
}
