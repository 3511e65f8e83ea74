use std::error::Error;
use std::fmt;

use crate::config::ConfigError;
use crate::marketplace::MarketplaceError;
use crate::telemetry::TelemetryError;

/// Top-level failure for the service binary. Everything that can stop the
/// process from starting or serving funnels into this type.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Marketplace(MarketplaceError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "configuration error: {}", err),
            Self::Telemetry(err) => write!(f, "telemetry error: {}", err),
            Self::Io(err) => write!(f, "io error: {}", err),
            Self::Marketplace(err) => write!(f, "marketplace error: {}", err),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(error) => Some(error),
            Self::Telemetry(error) => Some(error),
            Self::Io(error) => Some(error),
            Self::Marketplace(error) => Some(error),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        Self::Config(error)
    }
}

impl From<TelemetryError> for AppError {
    fn from(error: TelemetryError) -> Self {
        Self::Telemetry(error)
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}

impl From<MarketplaceError> for AppError {
    fn from(error: MarketplaceError) -> Self {
        Self::Marketplace(error)
    }
}
