//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check addresses parse, limits are non-zero
//! - Check the mount path can be turned into an axum route
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SegmentConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::SegmentConfig;

/// One semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid {field}: {value:?} is not a socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("invalid dispatch.mount_path {0:?}: {1}")]
    InvalidMountPath(String, &'static str),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &SegmentConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if let Err(reason) = check_mount_path(&config.dispatch.mount_path) {
        errors.push(ValidationError::InvalidMountPath(
            config.dispatch.mount_path.clone(),
            reason,
        ));
    }

    if config.dispatch.request_timeout_secs == 0 {
        errors.push(ValidationError::Zero("dispatch.request_timeout_secs"));
    }
    if config.dispatch.max_body_size == 0 {
        errors.push(ValidationError::Zero("dispatch.max_body_size"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_mount_path(path: &str) -> Result<(), &'static str> {
    if !path.starts_with('/') {
        return Err("must start with '/'");
    }
    if path.len() > 1 && path.ends_with('/') {
        return Err("must not end with '/'");
    }
    if path.contains(['*', '{', '}', ':']) {
        return Err("must be a literal path");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&SegmentConfig::default()).is_ok());
    }

    #[test]
    fn test_mount_path_rules() {
        assert!(check_mount_path("/").is_ok());
        assert!(check_mount_path("/api/v1").is_ok());
        assert!(check_mount_path("api").is_err());
        assert!(check_mount_path("/api/").is_err());
        assert!(check_mount_path("/api/{*rest}").is_err());
        assert!(check_mount_path("/:id").is_err());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = SegmentConfig::default();
        config.listener.bind_address = "bad".into();
        config.dispatch.mount_path = "api/".into();
        config.dispatch.max_body_size = 0;
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "also bad".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::Zero("dispatch.max_body_size")));
    }

    #[test]
    fn test_metrics_address_ignored_when_disabled() {
        let mut config = SegmentConfig::default();
        config.observability.metrics_address = "bad".into();
        assert!(validate_config(&config).is_ok());
    }
}
