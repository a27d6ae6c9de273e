//! Routing error types.

use axum::http::StatusCode;
use thiserror::Error;

use super::store::ControllerId;

/// Resolution-time failures. Each one is a controller-authoring or wiring
/// mistake, so all of them render as 500.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// A controller owns routes for the method but was never activated.
    #[error("Controller \"{0}\" found but not activated")]
    InactiveController(String),

    /// One pattern binds the same parameter name twice.
    #[error("Duplicate parameter \"{0}\"")]
    DuplicateParameter(String),

    /// More than one pattern matches the request path.
    #[error("Conflicting routes found: {}", .0.join(", "))]
    Conflict(Vec<String>),
}

impl RouteError {
    pub fn status(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// Registration-time failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// The id was not issued by this segment.
    #[error("unknown controller {0}")]
    UnknownController(ControllerId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            RouteError::InactiveController("Users".into()).to_string(),
            "Controller \"Users\" found but not activated"
        );
        assert_eq!(
            RouteError::DuplicateParameter("x".into()).to_string(),
            "Duplicate parameter \"x\""
        );
        assert_eq!(
            RouteError::Conflict(vec!["a/:x".into(), "a/:y".into()]).to_string(),
            "Conflicting routes found: a/:x, a/:y"
        );
    }
}
