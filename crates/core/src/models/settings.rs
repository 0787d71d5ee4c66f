use serde::{Deserialize, Serialize};

/// Default endpoint serving the coin reference list.
pub const DEFAULT_COINS_ENDPOINT: &str = "http://localhost:3000/api/coins";

/// Storage key the coin reference list is cached under.
pub const DEFAULT_COINS_CACHE_KEY: &str = "COINS_DATA";

/// Runtime configuration for the store and the coin data provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// URL returning the coin reference list as JSON.
    pub coins_endpoint: String,

    /// Key under which the fetched list is written to durable storage.
    pub coins_cache_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            coins_endpoint: DEFAULT_COINS_ENDPOINT.to_string(),
            coins_cache_key: DEFAULT_COINS_CACHE_KEY.to_string(),
        }
    }
}

impl Settings {
    /// Defaults, overridden by `COINS_ENDPOINT` and `COINS_CACHE_KEY` when set and non-empty.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            coins_endpoint: env_or("COINS_ENDPOINT", defaults.coins_endpoint),
            coins_cache_key: env_or("COINS_CACHE_KEY", defaults.coins_cache_key),
        }
    }
}

fn env_or(name: &str, fallback: String) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(fallback)
}
