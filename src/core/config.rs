//! Engine configuration.
//!
//! Rules constants are fixed; only the knobs that matter to a host
//! (the implicit-pass window and the RNG seed) are configurable.

use std::time::Duration;

use tracing::warn;

/// Largest roster. There is one role per seat.
pub const MAX_PLAYERS: usize = 5;

/// Smallest roster that may start a game.
pub const MIN_PLAYERS: usize = 2;

/// How long a decision round waits before everyone is considered to
/// have passed.
pub const DEFAULT_PRIORITY_TIMEOUT: Duration = Duration::from_secs(20);

/// Environment variable overriding the priority timeout, in milliseconds.
pub const PRIORITY_TIMEOUT_ENV: &str = "ORACLE_PRIORITY_TIMEOUT_MS";

/// Environment variable fixing the RNG seed.
pub const SEED_ENV: &str = "ORACLE_SEED";

/// Engine configuration.
///
/// ```
/// use std::time::Duration;
/// use oracle_engine::core::EngineConfig;
///
/// let config = EngineConfig::new()
///     .with_priority_timeout(Duration::from_millis(500))
///     .with_seed(42);
/// assert_eq!(config.seed, Some(42));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Implicit-pass window for each decision round.
    pub priority_timeout: Duration,

    /// RNG seed. `None` draws one from entropy.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineConfig {
    /// Configuration with the standard 20-second window and a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            priority_timeout: DEFAULT_PRIORITY_TIMEOUT,
            seed: None,
        }
    }

    /// Defaults overridden by `ORACLE_PRIORITY_TIMEOUT_MS` and `ORACLE_SEED`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::new();

        if let Some(raw) = lookup(PRIORITY_TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.priority_timeout = Duration::from_millis(ms),
                Err(err) => warn!(%raw, %err, "ignoring {}", PRIORITY_TIMEOUT_ENV),
            }
        }

        if let Some(raw) = lookup(SEED_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(seed) => config.seed = Some(seed),
                Err(err) => warn!(%raw, %err, "ignoring {}", SEED_ENV),
            }
        }

        config
    }

    #[must_use]
    pub fn with_priority_timeout(mut self, timeout: Duration) -> Self {
        self.priority_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.priority_timeout, Duration::from_secs(20));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::new()
            .with_priority_timeout(Duration::from_millis(50))
            .with_seed(9);
        assert_eq!(config.priority_timeout, Duration::from_millis(50));
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_from_lookup() {
        let config = EngineConfig::from_lookup(|key| match key {
            PRIORITY_TIMEOUT_ENV => Some("250".to_string()),
            SEED_ENV => Some(" 17 ".to_string()),
            _ => None,
        });
        assert_eq!(config.priority_timeout, Duration::from_millis(250));
        assert_eq!(config.seed, Some(17));
    }

    #[test]
    fn test_from_lookup_ignores_garbage() {
        let config = EngineConfig::from_lookup(|key| match key {
            PRIORITY_TIMEOUT_ENV => Some("soon".to_string()),
            SEED_ENV => Some("-1".to_string()),
            _ => None,
        });
        assert_eq!(config, EngineConfig::new());
    }
}
