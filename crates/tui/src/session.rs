use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The operator's session: a bearer token, or nothing.
///
/// The token is the only item in durable client-side storage. It is
/// written on login and cleared whenever any request answers 401; the
/// app owns this value and hands it to each request site.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn load(path: &str) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let parent = Path::new(path).parent();
        if let Some(parent) = parent {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(self)?;
        fs::write(path, payload)?;
        Ok(())
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn clear(&mut self) {
        self.token = None;
    }
}

#[cfg(test)]
mod tests {
    use super::Session;

    fn temp_path(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("pixdesk_session_{}_{name}.json", std::process::id()))
            .display()
            .to_string()
    }

    #[test]
    fn missing_file_loads_as_empty_session() {
        let session = Session::load(&temp_path("missing")).unwrap();
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
    }

    #[test]
    fn save_then_load_returns_the_token() {
        let path = temp_path("roundtrip");
        let mut session = Session::default();
        session.set_token("abc123".to_string());
        session.save(&path).unwrap();

        let loaded = Session::load(&path).unwrap();
        assert_eq!(loaded.token(), Some("abc123"));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn clear_then_save_persists_the_absence() {
        let path = temp_path("clear");
        let mut session = Session::default();
        session.set_token("abc123".to_string());
        session.save(&path).unwrap();

        session.clear();
        session.save(&path).unwrap();

        let loaded = Session::load(&path).unwrap();
        assert!(!loaded.is_authenticated());
        std::fs::remove_file(&path).unwrap();
    }
}
