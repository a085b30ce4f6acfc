//! Runtime settings.
//!
//! Settings are layered: built-in defaults, then `DCGM_DOCTOR_*`
//! environment variables, then command-line flags applied by the binary.
//!
//! ```bash
//! DCGM_DOCTOR_ENDPOINT=http://gpu-node:9400/metrics dcgm-doctor
//! DCGM_DOCTOR_TIMEOUT_MS=500 dcgm-doctor
//! ```

use std::time::Duration;

use config::{Config, ConfigError, Environment};
use dcgm_adapters::exporter::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
use serde::Deserialize;

/// Prefix of the environment variables read by [`Settings::load`].
pub const ENV_PREFIX: &str = "DCGM_DOCTOR";

/// Scrape settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// URL of the exporter's metrics endpoint.
    pub endpoint: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
        }
    }
}

impl Settings {
    /// Load settings from defaults and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_environment(Environment::with_prefix(ENV_PREFIX))
    }

    /// Load settings from defaults overlaid with the given environment source.
    pub fn from_environment(env: Environment) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Config::builder()
            .set_default("endpoint", defaults.endpoint)?
            .set_default("timeout_ms", defaults.timeout_ms as i64)?
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
