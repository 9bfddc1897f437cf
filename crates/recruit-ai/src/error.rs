use crate::config::{ConfigError, JobConfigError};
use crate::telemetry::TelemetryError;
use crate::workflows::replay::ReplayError;
use crate::workflows::screening::OracleFault;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Jobs(JobConfigError),
    Replay(ReplayError),
    Oracle(OracleFault),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Jobs(err) => write!(f, "job configuration error: {}", err),
            AppError::Replay(err) => write!(f, "replay error: {}", err),
            AppError::Oracle(err) => write!(f, "oracle setup error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Jobs(err) => Some(err),
            AppError::Replay(err) => Some(err),
            AppError::Oracle(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<JobConfigError> for AppError {
    fn from(value: JobConfigError) -> Self {
        Self::Jobs(value)
    }
}

impl From<ReplayError> for AppError {
    fn from(value: ReplayError) -> Self {
        Self::Replay(value)
    }
}

impl From<OracleFault> for AppError {
    fn from(value: OracleFault) -> Self {
        Self::Oracle(value)
    }
}
