//! Client configuration.

use std::fmt;
use std::time::Duration;

use crate::error::HostexError;

/// Production endpoint of the Hostex API.
pub const DEFAULT_BASE_URL: &str = "https://api.hostex.io/v3";

/// Round-trip timeout used when a call carries no deadline of its own.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Header carrying the credential on every request.
pub const ACCESS_TOKEN_HEADER: &str = "Hostex-Access-Token";

pub const USER_AGENT: &str = concat!("hostex-rs/", env!("CARGO_PKG_VERSION"));

pub const ENV_ACCESS_TOKEN: &str = "HOSTEX_ACCESS_TOKEN";
pub const ENV_BASE_URL: &str = "HOSTEX_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "HOSTEX_TIMEOUT_SECS";

/// Settings for [`HostexClient`](crate::HostexClient).
///
/// Only the access token is required. Validation happens when the client is
/// constructed, not here.
#[derive(Clone, Default)]
pub struct ClientConfig {
    pub access_token: String,
    pub base_url: Option<String>,
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Read `HOSTEX_ACCESS_TOKEN`, `HOSTEX_BASE_URL` and `HOSTEX_TIMEOUT_SECS`
    /// from the process environment.
    pub fn from_env() -> Result<Self, HostexError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`ClientConfig::from_env`], with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, HostexError> {
        let access_token = lookup(ENV_ACCESS_TOKEN)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| HostexError::Configuration(format!("{ENV_ACCESS_TOKEN} is not set")))?;

        let timeout = match lookup(ENV_TIMEOUT_SECS) {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|e| {
                    HostexError::Configuration(format!("{ENV_TIMEOUT_SECS}={raw:?}: {e}"))
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            access_token,
            base_url: lookup(ENV_BASE_URL).filter(|url| !url.is_empty()),
            timeout,
        })
    }

    /// Base URL with any trailing slash removed.
    pub(crate) fn resolved_base_url(&self) -> String {
        self.base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string()
    }

    pub(crate) fn resolved_timeout(&self) -> Duration {
        self.timeout.unwrap_or(DEFAULT_TIMEOUT)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("access_token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = ClientConfig::new("token");
        assert_eq!(config.resolved_base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.resolved_timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let config = ClientConfig::new("token").with_base_url("http://localhost:3000/");
        assert_eq!(config.resolved_base_url(), "http://localhost:3000");
    }

    #[test]
    fn debug_redacts_token() {
        let rendered = format!("{:?}", ClientConfig::new("secret-token"));
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn from_lookup_reads_all_variables() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_ACCESS_TOKEN, "abc"),
            (ENV_BASE_URL, "http://127.0.0.1:9000"),
            (ENV_TIMEOUT_SECS, "5"),
        ]))
        .unwrap();
        assert_eq!(config.access_token, "abc");
        assert_eq!(config.base_url.as_deref(), Some("http://127.0.0.1:9000"));
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn from_lookup_requires_token() {
        let err = ClientConfig::from_lookup(lookup(&[(ENV_BASE_URL, "http://x")])).unwrap_err();
        assert!(matches!(err, HostexError::Configuration(_)));
    }

    #[test]
    fn from_lookup_rejects_bad_timeout() {
        let err = ClientConfig::from_lookup(lookup(&[
            (ENV_ACCESS_TOKEN, "abc"),
            (ENV_TIMEOUT_SECS, "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, HostexError::Configuration(_)));
    }
}
