//! Environment configuration for the webhook server.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::ParseIntError;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT {value:?}: {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

#[derive(Debug, Clone)]
pub struct IngressConfig {
    pub addr: SocketAddr,
    pub channel_access_token: String,
    pub channel_secret: String,
    /// Overrides the LINE API host, e.g. to point at `mock-line`.
    pub api_base: Option<String>,
}

impl IngressConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT").filter(|v| !v.trim().is_empty()) {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|source| ConfigError::InvalidPort { value, source })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port),
            channel_access_token: lookup("LINE_BOT_CHANNEL_ACCESS_TOKEN").unwrap_or_default(),
            channel_secret: lookup("LINE_BOT_CHANNEL_SECRET").unwrap_or_default(),
            api_base: lookup("LINE_API_BASE").filter(|v| !v.trim().is_empty()),
        })
    }

    /// Names of credentials left empty; LINE calls fail authentication without them.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.channel_access_token.is_empty() {
            missing.push("LINE_BOT_CHANNEL_ACCESS_TOKEN");
        }
        if self.channel_secret.is_empty() {
            missing.push("LINE_BOT_CHANNEL_SECRET");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<IngressConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        IngressConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_env_is_empty() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.addr.port(), DEFAULT_PORT);
        assert!(cfg.addr.ip().is_unspecified());
        assert_eq!(cfg.channel_access_token, "");
        assert_eq!(cfg.channel_secret, "");
        assert!(cfg.api_base.is_none());
        assert_eq!(
            cfg.missing_credentials(),
            vec!["LINE_BOT_CHANNEL_ACCESS_TOKEN", "LINE_BOT_CHANNEL_SECRET"]
        );
    }

    #[test]
    fn reads_values_from_env() {
        let cfg = config(&[
            ("PORT", "8081"),
            ("LINE_BOT_CHANNEL_ACCESS_TOKEN", "token"),
            ("LINE_BOT_CHANNEL_SECRET", "secret"),
            ("LINE_API_BASE", "http://127.0.0.1:9090"),
        ])
        .unwrap();
        assert_eq!(cfg.addr.port(), 8081);
        assert_eq!(cfg.channel_access_token, "token");
        assert_eq!(cfg.channel_secret, "secret");
        assert_eq!(cfg.api_base.as_deref(), Some("http://127.0.0.1:9090"));
        assert!(cfg.missing_credentials().is_empty());
    }

    #[test]
    fn rejects_unparsable_port() {
        let err = config(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().starts_with("invalid PORT \"eighty\""));
    }
}
