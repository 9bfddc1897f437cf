mod jobs;

pub use jobs::{load_jobs, parse_jobs, JobConfig, JobConfigError, DEFAULT_MAX_IDX};

use std::env;
use std::fmt;
use std::time::Duration;

const DEFAULT_ORACLE_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_ORACLE_MODEL: &str = "gpt-5-mini";
const ORACLE_TIMEOUT_RANGE_SECS: std::ops::RangeInclusive<u64> = 10..=60;

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level process settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub oracle: OracleConfig,
    pub screening: ScreeningConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let api_key = env::var("OPENAI_API_KEY")
            .ok()
            .filter(|value| !value.trim().is_empty());
        let base_url = env::var("OPENAI_BASE_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ORACLE_BASE_URL.to_string());
        let model = env::var("ORACLE_MODEL").unwrap_or_else(|_| DEFAULT_ORACLE_MODEL.to_string());

        let timeout_secs = env::var("ORACLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidOracleTimeout)?;
        if !ORACLE_TIMEOUT_RANGE_SECS.contains(&timeout_secs) {
            return Err(ConfigError::InvalidOracleTimeout);
        }

        let settle_ms = env::var("SCREENING_SETTLE_MS")
            .unwrap_or_else(|_| "1000".to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidSettleDelay)?;

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            oracle: OracleConfig {
                api_key,
                base_url,
                model,
                timeout: Duration::from_secs(timeout_secs),
            },
            screening: ScreeningConfig {
                settle_delay: Duration::from_millis(settle_ms),
            },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Connection settings for the qualification oracle.
#[derive(Clone)]
pub struct OracleConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl fmt::Debug for OracleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OracleConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Pacing of the candidate loop.
#[derive(Debug, Clone)]
pub struct ScreeningConfig {
    /// Wait after asking the surface to load more content.
    pub settle_delay: Duration,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidOracleTimeout,
    InvalidSettleDelay,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidOracleTimeout => write!(
                f,
                "ORACLE_TIMEOUT_SECS must be a whole number of seconds between {} and {}",
                ORACLE_TIMEOUT_RANGE_SECS.start(),
                ORACLE_TIMEOUT_RANGE_SECS.end()
            ),
            ConfigError::InvalidSettleDelay => {
                write!(f, "SCREENING_SETTLE_MS must be a whole number of milliseconds")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_LOG_LEVEL",
            "OPENAI_API_KEY",
            "OPENAI_BASE_URL",
            "ORACLE_MODEL",
            "ORACLE_TIMEOUT_SECS",
            "SCREENING_SETTLE_MS",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.oracle.base_url, DEFAULT_ORACLE_BASE_URL);
        assert_eq!(config.oracle.model, DEFAULT_ORACLE_MODEL);
        assert_eq!(config.oracle.timeout, Duration::from_secs(60));
        assert_eq!(config.screening.settle_delay, Duration::from_millis(1000));
    }

    #[test]
    fn rejects_timeout_outside_bounds() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ORACLE_TIMEOUT_SECS", "300");
        let err = AppConfig::load().expect_err("timeout above bound is rejected");
        assert!(matches!(err, ConfigError::InvalidOracleTimeout));
        reset_env();
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("OPENAI_API_KEY", "  ");
        let config = AppConfig::load().expect("config loads");
        assert!(config.oracle.api_key.is_none());
        reset_env();
    }
}
