//! Crate-level error type.

use thiserror::Error;

use crate::config::ConfigError;
use crate::routing::RegistrationError;

/// Errors that stop the server from starting or running.
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("registration error: {0}")]
    Registration(#[from] RegistrationError),

    #[error("metrics error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("logging error: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid address: {0}")]
    Address(#[from] std::net::AddrParseError),
}

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
