//! Session configuration.

use crate::error::ConfigError;
use std::time::Duration;

/// Environment variable overriding the simulated backend latency.
pub const LATENCY_ENV: &str = "PULSEBOARD_LATENCY_MS";

/// Latency applied to every simulated backend call unless configured.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Delay before a mock backend call resolves.
    pub latency: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            latency: DEFAULT_LATENCY,
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// A missing `PULSEBOARD_LATENCY_MS` falls back to the default latency.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_latency_var(std::env::var(LATENCY_ENV).ok().as_deref())
    }

    fn from_latency_var(value: Option<&str>) -> Result<Self, ConfigError> {
        let Some(raw) = value else {
            return Ok(Self::default());
        };

        let millis = raw
            .trim()
            .parse::<u64>()
            .map_err(|source| ConfigError::InvalidLatency {
                value: raw.to_string(),
                source,
            })?;
        Ok(Self::default().with_latency(Duration::from_millis(millis)))
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}
