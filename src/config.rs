use log::warn;
use std::env;
use std::time::Duration;

/// Runtime settings for the service, read from the environment
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bind_addr: String,
    pub fetch_timeout: Duration,
    pub cache_max_capacity: u64,
    pub cache_ttl: Duration,
    pub user_agent: Option<String>,
    pub sentry_dsn: Option<String>,
    pub sentry_environment: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            bind_addr: "0.0.0.0:8080".to_string(),
            fetch_timeout: Duration::from_secs(5),
            cache_max_capacity: 1000,
            cache_ttl: Duration::from_secs(3600),
            user_agent: None,
            sentry_dsn: None,
            sentry_environment: "production".to_string(),
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset or unparsable values keep their defaults
    pub fn from_lookup<L>(lookup: L) -> Self
    where
        L: Fn(&str) -> Option<String>,
    {
        let defaults = ServiceConfig::default();
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let seconds = |key: &str, default: Duration| match non_empty(key) {
            Some(value) => match value.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    warn!("Ignoring invalid {}={}, using {}s", key, value, default.as_secs());
                    default
                }
            },
            None => default,
        };

        let cache_max_capacity = match non_empty("CACHE_MAX_CAPACITY") {
            Some(value) => value.parse().unwrap_or_else(|_| {
                warn!("Ignoring invalid CACHE_MAX_CAPACITY={}", value);
                defaults.cache_max_capacity
            }),
            None => defaults.cache_max_capacity,
        };

        ServiceConfig {
            bind_addr: non_empty("BIND_ADDR").unwrap_or(defaults.bind_addr),
            fetch_timeout: seconds("FETCH_TIMEOUT_SECS", defaults.fetch_timeout),
            cache_max_capacity,
            cache_ttl: seconds("CACHE_TTL_SECS", defaults.cache_ttl),
            user_agent: non_empty("USER_AGENT"),
            sentry_dsn: non_empty("SENTRY_DSN"),
            sentry_environment: non_empty("SENTRY_ENVIRONMENT").unwrap_or(defaults.sentry_environment),
        }
    }
}
