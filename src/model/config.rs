use serde::{Deserialize, Serialize};

use crate::model::task::UserId;

/// Configuration from config.toml: where the backend lives and the
/// credentials obtained from `zv login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token from the last successful login
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<StoredUser>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: default_base_url(),
            token: None,
            user: None,
        }
    }
}

/// The signed-in user as persisted alongside the token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

fn default_base_url() -> String {
    "http://localhost:8081/api/v1".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_on_empty_toml() {
        let config: ClientConfig = toml::from_str("").unwrap();
        assert_eq!(config.base_url, "http://localhost:8081/api/v1");
        assert!(config.token.is_none());
        assert!(config.user.is_none());
    }

    #[test]
    fn round_trips_through_toml() {
        let config = ClientConfig {
            base_url: "https://zelvo.example/api/v1".into(),
            token: Some("jwt".into()),
            user: Some(StoredUser {
                id: 1,
                name: "Ada".into(),
                email: "ada@example.com".into(),
            }),
        };
        let text = toml::to_string(&config).unwrap();
        let back: ClientConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.base_url, config.base_url);
        assert_eq!(back.token, config.token);
        assert_eq!(back.user, config.user);
    }
}
