//! Data models and configuration
//!
//! Chat messages held by the transcript and the environment-driven gateway
//! configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    User,
    Ai,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub author: Author,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            author: Author::User,
            text: text.into(),
        }
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Self {
            author: Author::Ai,
            text: text.into(),
        }
    }
}

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_CHAT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-4.0-generate-001";
pub const DEFAULT_VISION_MODEL: &str = "gemini-2.5-flash";

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// `None` puts the gateway into degraded mode.
    pub api_key: Option<String>,
    pub base_url: String,
    pub chat_model: String,
    pub image_model: String,
    pub vision_model: String,
    /// Per-request timeout. `None` leaves timing to the transport.
    pub request_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            vision_model: DEFAULT_VISION_MODEL.to_string(),
            request_timeout: None,
        }
    }
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset. The credential is read from
    /// `API_KEY`, then `GEMINI_API_KEY`.
    pub fn from_vars<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let request_timeout = match var("GATEWAY_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    crate::Error::Config(format!(
                        "GATEWAY_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                        raw
                    ))
                })?;
                if secs == 0 {
                    return Err(crate::Error::Config(
                        "GATEWAY_TIMEOUT_SECS must be at least 1 second".to_string(),
                    ));
                }
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            api_key: var("API_KEY").or_else(|| var("GEMINI_API_KEY")),
            base_url: var("GEMINI_BASE_URL").unwrap_or(defaults.base_url),
            chat_model: var("CHAT_MODEL").unwrap_or(defaults.chat_model),
            image_model: var("IMAGE_MODEL").unwrap_or(defaults.image_model),
            vision_model: var("VISION_MODEL").unwrap_or(defaults.vision_model),
            request_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_chat_message_serialization() {
        let message = ChatMessage::ai("hello");
        let json = serde_json::to_string(&message).unwrap();
        assert!(json.contains("\"author\":\"ai\""));

        let deserialized: ChatMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, message);
    }

    #[test]
    fn test_config_defaults_without_credential() {
        let config = Config::from_vars(lookup(&[])).unwrap();
        assert!(config.api_key.is_none());
        assert_eq!(config.chat_model, DEFAULT_CHAT_MODEL);
        assert_eq!(config.image_model, DEFAULT_IMAGE_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn test_config_blank_key_counts_as_missing() {
        let config = Config::from_vars(lookup(&[("API_KEY", "   ")])).unwrap();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_config_falls_back_to_gemini_api_key() {
        let config = Config::from_vars(lookup(&[("GEMINI_API_KEY", "g-key")])).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("g-key"));

        let config =
            Config::from_vars(lookup(&[("API_KEY", "a-key"), ("GEMINI_API_KEY", "g-key")]))
                .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("a-key"));
    }

    #[test]
    fn test_config_overrides() {
        let config = Config::from_vars(lookup(&[
            ("API_KEY", "key"),
            ("CHAT_MODEL", "gemini-test"),
            ("GATEWAY_TIMEOUT_SECS", "45"),
        ]))
        .unwrap();
        assert_eq!(config.chat_model, "gemini-test");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(45)));
    }

    #[test]
    fn test_config_rejects_bad_timeout() {
        let err = Config::from_vars(lookup(&[("GATEWAY_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_config_rejects_zero_timeout() {
        let err = Config::from_vars(lookup(&[("GATEWAY_TIMEOUT_SECS", "0")])).unwrap_err();
        assert!(matches!(err, crate::Error::Config(msg) if msg.contains("at least 1 second")));
    }
}
