//! # Configuration Module
//!
//! Startup configuration read from the environment. The bot token is the
//! only required value; the process refuses to start without it.

use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::path::PathBuf;

pub const TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";
pub const PORT_VAR: &str = "PORT";
/// Liveness port used when the hosting platform does not set `PORT`
pub const DEFAULT_PORT: u16 = 10000;

#[derive(Clone)]
pub struct BotConfig {
    pub telegram_token: String,
    /// Port of the liveness endpoint
    pub port: u16,
    /// Directory holding menu pages and other static assets
    pub assets_dir: PathBuf,
}

impl BotConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Parse configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let telegram_token = lookup(TOKEN_VAR)
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
            .with_context(|| format!("{TOKEN_VAR} must be set"))?;

        let port = match lookup(PORT_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("{PORT_VAR} must be a port number, got `{raw}`"))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            telegram_token,
            port,
            assets_dir: PathBuf::from("."),
        })
    }
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("telegram_token", &"<redacted>")
            .field("port", &self.port)
            .field("assets_dir", &self.assets_dir)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_token_is_required() {
        let err = BotConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.to_string().contains(TOKEN_VAR));

        let err = BotConfig::from_lookup(lookup_from(&[(TOKEN_VAR, "   ")])).unwrap_err();
        assert!(err.to_string().contains(TOKEN_VAR));
    }

    #[test]
    fn test_defaults() {
        let config = BotConfig::from_lookup(lookup_from(&[(TOKEN_VAR, "123:abc")])).unwrap();
        assert_eq!(config.telegram_token, "123:abc");
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.assets_dir, PathBuf::from("."));
    }

    #[test]
    fn test_port_override_and_validation() {
        let config =
            BotConfig::from_lookup(lookup_from(&[(TOKEN_VAR, "t"), (PORT_VAR, "8080")])).unwrap();
        assert_eq!(config.port, 8080);

        let err = BotConfig::from_lookup(lookup_from(&[(TOKEN_VAR, "t"), (PORT_VAR, "http")]))
            .unwrap_err();
        assert!(err.to_string().contains(PORT_VAR));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = BotConfig::from_lookup(lookup_from(&[(TOKEN_VAR, "secret-token")])).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("<redacted>"));
    }
}
