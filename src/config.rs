//! Configuration types.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// Artificial delays applied before account operations complete.
///
/// The site simulates a network round-trip for every account request; the
/// defaults match what users see there.
#[derive(Debug, Clone)]
pub struct LatencyConfig {
    pub register: Duration,
    pub login: Duration,
    pub recovery: Duration,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            register: Duration::from_millis(1500),
            login: Duration::from_millis(1000),
            recovery: Duration::from_millis(1500),
        }
    }
}

impl LatencyConfig {
    /// No delays at all (tests, batch tooling).
    pub fn none() -> Self {
        Self {
            register: Duration::ZERO,
            login: Duration::ZERO,
            recovery: Duration::ZERO,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone)]
pub struct SumakConfig {
    /// JSON file backing the account store.
    pub store_path: PathBuf,
    /// Simulated request latency.
    pub latency: LatencyConfig,
    /// How long a password recovery code stays valid.
    pub recovery_code_ttl: Duration,
}

impl Default for SumakConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("./data/sumak-accounts.json"),
            latency: LatencyConfig::default(),
            recovery_code_ttl: Duration::from_secs(15 * 60), // 15 minutes
        }
    }
}

impl SumakConfig {
    /// Build a config from `SUMAK_*` environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("SUMAK_STORE_PATH") {
            config.store_path = PathBuf::from(path);
        }
        if let Some(ms) = parse_u64(&lookup, "SUMAK_REGISTER_DELAY_MS")? {
            config.latency.register = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_u64(&lookup, "SUMAK_LOGIN_DELAY_MS")? {
            config.latency.login = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_u64(&lookup, "SUMAK_RECOVERY_DELAY_MS")? {
            config.latency.recovery = Duration::from_millis(ms);
        }
        if let Some(min) = parse_u64(&lookup, "SUMAK_RECOVERY_TTL_MIN")? {
            if min == 0 {
                return Err(ConfigError::InvalidValue {
                    key: "SUMAK_RECOVERY_TTL_MIN".to_string(),
                    message: "must be at least 1 minute".to_string(),
                });
            }
            config.recovery_code_ttl = Duration::from_secs(min * 60);
        }

        Ok(config)
    }
}

fn parse_u64<F>(lookup: &F, key: &str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("{raw:?}: {e}"),
            }),
    }
}
