//! Advisor configuration.
//!
//! All configuration is loaded from environment variables. Without an API
//! key the advisor runs offline and answers every request with its
//! fallback text.

use std::time::Duration;

use crate::error::AdvisorError;

/// Default base URL of the generative language API.
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model name.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Advisor configuration loaded from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisorConfig {
    /// API key. `None` means offline.
    pub api_key: Option<String>,
    /// Base API URL, without a trailing slash.
    pub api_url: String,
    /// Model identifier.
    pub model: String,
    /// Per-request timeout. `None` waits as long as the server does.
    pub timeout: Option<Duration>,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self::offline()
    }
}

impl AdvisorConfig {
    /// A configuration with no API key.
    pub fn offline() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            timeout: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Optional variables:
    /// - `ADVISOR_API_KEY` -- API key (falls back to `API_KEY`)
    /// - `ADVISOR_API_URL` -- base URL (default [`DEFAULT_API_URL`])
    /// - `ADVISOR_MODEL` -- model name (default [`DEFAULT_MODEL`])
    /// - `ADVISOR_TIMEOUT_SECS` -- request timeout in seconds (default none)
    pub fn from_env() -> Result<Self, AdvisorError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AdvisorError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("ADVISOR_API_KEY")
            .or_else(|| lookup("API_KEY"))
            .filter(|key| !key.trim().is_empty());

        let api_url = lookup("ADVISOR_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned())
            .trim_end_matches('/')
            .to_owned();

        let model = lookup("ADVISOR_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_owned());

        let timeout = lookup("ADVISOR_TIMEOUT_SECS")
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|e| AdvisorError::Config(format!("invalid ADVISOR_TIMEOUT_SECS: {e}")))
            })
            .transpose()?;

        Ok(Self {
            api_key,
            api_url,
            model,
            timeout,
        })
    }

    /// Whether a backend can be reached at all.
    pub const fn is_online(&self) -> bool {
        self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn empty_environment_is_offline_with_defaults() {
        let config = AdvisorConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AdvisorConfig::offline());
        assert!(!config.is_online());
    }

    #[test]
    fn api_key_falls_back_to_generic_name() {
        let config = AdvisorConfig::from_lookup(lookup(&[("API_KEY", "k1")])).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("k1"));

        let config = AdvisorConfig::from_lookup(lookup(&[
            ("API_KEY", "k1"),
            ("ADVISOR_API_KEY", "k2"),
        ]))
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("k2"));
    }

    #[test]
    fn blank_key_stays_offline() {
        let config = AdvisorConfig::from_lookup(lookup(&[("ADVISOR_API_KEY", "  ")])).unwrap();
        assert!(!config.is_online());
    }

    #[test]
    fn url_and_timeout_are_parsed() {
        let config = AdvisorConfig::from_lookup(lookup(&[
            ("ADVISOR_API_URL", "http://localhost:9000/v1/"),
            ("ADVISOR_TIMEOUT_SECS", "15"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "http://localhost:9000/v1");
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn bad_timeout_is_a_config_error() {
        let err = AdvisorConfig::from_lookup(lookup(&[("ADVISOR_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, AdvisorError::Config(_)));
    }
}
