//! Client configuration.

use std::env;

use crate::errors::ClientError;

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://platform-api.max.ru";

/// Environment variable holding the bot token.
pub const ENV_TOKEN: &str = "MAX_BOT_TOKEN";
/// Environment variable overriding [`DEFAULT_BASE_URL`].
pub const ENV_BASE_URL: &str = "MAX_API_URL";
/// Environment variable holding the webhook secret.
pub const ENV_WEBHOOK_SECRET: &str = "MAX_WEBHOOK_SECRET";

/// Configuration for [`crate::Client`].
///
/// ```rust
/// use max_client::Config;
///
/// let config = Config {
///     access_token: "token".into(),
///     ..Default::default()
/// };
/// assert_eq!(config.base_url, max_client::config::DEFAULT_BASE_URL);
/// ```
#[derive(Clone)]
pub struct Config {
    /// Bot token issued by the platform.
    pub access_token: String,
    /// API root, without a trailing path.
    pub base_url: String,
    /// Sent as the `v` query parameter on every call when set.
    pub api_version: Option<String>,
    /// Expected value of the webhook secret header.
    pub webhook_secret: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            access_token:   String::new(),
            base_url:       DEFAULT_BASE_URL.to_string(),
            api_version:    None,
            webhook_secret: None,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("access_token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("webhook_secret", &self.webhook_secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Config {
    /// Build a config with the given token and defaults for everything else.
    pub fn with_token(access_token: impl Into<String>) -> Self {
        Self { access_token: access_token.into(), ..Default::default() }
    }

    /// Read the config from `MAX_BOT_TOKEN`, `MAX_API_URL` and
    /// `MAX_WEBHOOK_SECRET`. Only the token is required.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClientError> {
        let access_token = lookup(ENV_TOKEN)
            .filter(|t| !t.trim().is_empty())
            .ok_or(ClientError::Config(ENV_TOKEN))?;
        let mut config = Self::with_token(access_token);
        if let Some(url) = lookup(ENV_BASE_URL).filter(|u| !u.is_empty()) {
            config.base_url = url;
        }
        config.webhook_secret = lookup(ENV_WEBHOOK_SECRET).filter(|s| !s.is_empty());
        Ok(config)
    }

    /// Pin the API version sent with every call.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    pub fn webhook_secret(mut self, secret: impl Into<String>) -> Self {
        self.webhook_secret = Some(secret.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn token_is_required() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ClientError::Config(ENV_TOKEN)));
        assert!(Config::from_lookup(lookup(&[(ENV_TOKEN, "  ")])).is_err());
    }

    #[test]
    fn env_overrides_defaults() {
        let config = Config::from_lookup(lookup(&[
            (ENV_TOKEN, "t0k"),
            (ENV_BASE_URL, "http://localhost:8080"),
            (ENV_WEBHOOK_SECRET, "s3cret"),
        ]))
        .unwrap();
        assert_eq!(config.access_token, "t0k");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.webhook_secret.as_deref(), Some("s3cret"));
    }

    #[test]
    fn debug_hides_token() {
        let shown = format!("{:?}", Config::with_token("very-secret"));
        assert!(!shown.contains("very-secret"));
    }
}
