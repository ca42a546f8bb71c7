use crate::submission_log;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Default sequencer HTTP API base
pub const DEFAULT_API_URL: &str = "http://0.0.0.0:3001";

/// Default sequencer transaction feed
pub const DEFAULT_FEED_URL: &str = "ws://0.0.0.0:3001/transaction_feed";

/// Path of the submission endpoint, relative to the API base
pub const SUBMIT_PATH: &str = "send_transaction";

/// Default HTTP request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum number of records kept in the live feed
pub const FEED_CAPACITY: usize = 10;

/// Environment variable names
pub const ENV_API_URL: &str = "SEQFEED_API_URL";
pub const ENV_FEED_URL: &str = "SEQFEED_FEED_URL";
pub const ENV_BEARER_TOKEN: &str = "BEARER_TOKEN";
pub const ENV_TIMEOUT_SECS: &str = "SEQFEED_TIMEOUT_SECS";
pub const ENV_LOG_PATH: &str = "SEQFEED_LOG_PATH";

#[derive(Clone, Debug)]
pub struct Config {
    pub api_url: Url,
    pub feed_url: Url,
    pub bearer_token: Option<String>, // None = no Authorization header
    pub request_timeout: Duration,
    pub feed_capacity: usize,
    pub log_path: PathBuf,
}

impl Config {
    pub fn new(api_url: Url, feed_url: Url, bearer_token: Option<String>) -> Self {
        Self {
            api_url,
            feed_url,
            bearer_token,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            feed_capacity: FEED_CAPACITY,
            log_path: submission_log::log_path(),
        }
    }

    /// Build a config from process environment (call `dotenvy::dotenv()` first)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    ///
    /// Invalid URLs and timeouts (including zero) fall back to their defaults
    /// with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = parse_url_or_default(ENV_API_URL, lookup(ENV_API_URL), DEFAULT_API_URL);
        let feed_url = parse_url_or_default(ENV_FEED_URL, lookup(ENV_FEED_URL), DEFAULT_FEED_URL);

        let bearer_token = lookup(ENV_BEARER_TOKEN)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        if bearer_token.is_none() {
            tracing::warn!("{} is not set; submissions will be sent without credentials", ENV_BEARER_TOKEN);
        }

        let timeout_secs = match lookup(ENV_TIMEOUT_SECS) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(0) => {
                    tracing::warn!("Ignoring {}=0; a zero timeout fails every request", ENV_TIMEOUT_SECS);
                    DEFAULT_TIMEOUT_SECS
                }
                Ok(secs) => secs,
                Err(e) => {
                    tracing::warn!("Ignoring invalid {}={:?}: {}", ENV_TIMEOUT_SECS, raw, e);
                    DEFAULT_TIMEOUT_SECS
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        let mut config = Self::new(api_url, feed_url, bearer_token);
        config.request_timeout = Duration::from_secs(timeout_secs);
        if let Some(path) = lookup(ENV_LOG_PATH).map(|p| p.trim().to_string()).filter(|p| !p.is_empty()) {
            config.log_path = PathBuf::from(path);
        }
        config
    }

    /// Full URL of the transaction submission endpoint
    pub fn submit_url(&self) -> Url {
        let base = self.api_url.as_str().trim_end_matches('/');
        // base was already a valid URL and SUBMIT_PATH is a plain segment
        Url::parse(&format!("{}/{}", base, SUBMIT_PATH)).unwrap_or_else(|_| self.api_url.clone())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn parse_url_or_default(key: &str, raw: Option<String>, default: &str) -> Url {
    if let Some(raw) = raw {
        match Url::parse(raw.trim()) {
            Ok(url) => return url,
            Err(e) => tracing::warn!("Ignoring invalid {}={:?}: {}", key, raw, e),
        }
    }
    // Compile-time constants, always valid
    Url::parse(default).unwrap_or_else(|_| unreachable!("default URL {} is valid", default))
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
        move |key| map.get(key).cloned()
    }

    // ==================== defaults ====================

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.api_url.as_str(), "http://0.0.0.0:3001/");
        assert_eq!(config.feed_url.as_str(), DEFAULT_FEED_URL);
        assert!(config.bearer_token.is_none());
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.feed_capacity, 10);
        assert_eq!(config.log_path, submission_log::log_path());
    }

    #[test]
    fn test_submit_url_default() {
        let config = Config::default();
        assert_eq!(config.submit_url().as_str(), "http://0.0.0.0:3001/send_transaction");
    }

    // ==================== overrides ====================

    #[test]
    fn test_config_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            (ENV_API_URL, "http://127.0.0.1:8080/api/"),
            (ENV_FEED_URL, "ws://127.0.0.1:8080/feed"),
            (ENV_BEARER_TOKEN, "  secret  "),
            (ENV_TIMEOUT_SECS, "5"),
            (ENV_LOG_PATH, "/tmp/seqfeed/history.txt"),
        ]));
        assert_eq!(config.log_path, PathBuf::from("/tmp/seqfeed/history.txt"));
        assert_eq!(config.submit_url().as_str(), "http://127.0.0.1:8080/api/send_transaction");
        assert_eq!(config.feed_url.as_str(), "ws://127.0.0.1:8080/feed");
        assert_eq!(config.bearer_token.as_deref(), Some("secret"));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_empty_token_is_absent() {
        let config = Config::from_lookup(lookup_from(&[(ENV_BEARER_TOKEN, "   ")]));
        assert!(config.bearer_token.is_none());
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = Config::from_lookup(lookup_from(&[
            (ENV_API_URL, "not a url"),
            (ENV_TIMEOUT_SECS, "soon"),
        ]));
        assert_eq!(config.api_url.as_str(), "http://0.0.0.0:3001/");
        assert_eq!(config.request_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_zero_timeout_falls_back() {
        let config = Config::from_lookup(lookup_from(&[(ENV_TIMEOUT_SECS, "0")]));
        assert_eq!(config.request_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        let config = Config::from_lookup(lookup_from(&[(ENV_TIMEOUT_SECS, " 0 ")]));
        assert!(!config.request_timeout.is_zero());
    }
}
