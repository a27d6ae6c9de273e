//! Route table validation.
//!
//! # Responsibilities
//! - Find controllers that own routes but were never activated
//! - Find patterns that repeat a parameter name
//! - Find full paths claimed by more than one controller for a method
//!
//! # Design Decisions
//! - Returns all issues, not just the first
//! - Pure read of the store: Segment → Result<(), Vec<RouteIssue>>
//! - Advisory only; dispatch still raises the matching runtime errors

use std::collections::BTreeMap;

use thiserror::Error;

use super::matcher::repeated_parameter;
use super::method::HttpMethod;
use super::store::Segment;

/// A problem found in the registered routes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteIssue {
    #[error("controller \"{controller}\" has {routes} route(s) but is not activated")]
    InactiveController { controller: String, routes: usize },

    #[error("{method} {path} ({controller}) repeats parameter \"{parameter}\"")]
    DuplicateParameter {
        method: HttpMethod,
        path: String,
        controller: String,
        parameter: String,
    },

    #[error("{method} {path} is registered by several controllers: {}", controllers.join(", "))]
    DuplicatePath {
        method: HttpMethod,
        path: String,
        controllers: Vec<String>,
    },
}

/// Validate every registered route of `segment`.
pub fn validate_routes(segment: &Segment) -> Result<(), Vec<RouteIssue>> {
    let routes = segment.routes(None);
    let mut issues = Vec::new();

    let mut inactive: BTreeMap<String, usize> = BTreeMap::new();
    let mut owners: BTreeMap<(HttpMethod, &str), Vec<String>> = BTreeMap::new();

    for route in &routes {
        if !route.activated {
            *inactive.entry(route.controller_name.clone()).or_default() += 1;
        }
        if let Some(parameter) = repeated_parameter(&route.path) {
            issues.push(RouteIssue::DuplicateParameter {
                method: route.method,
                path: route.path.clone(),
                controller: route.controller_name.clone(),
                parameter: parameter.to_string(),
            });
        }
        owners
            .entry((route.method, route.path.as_str()))
            .or_default()
            .push(route.controller_name.clone());
    }

    issues.extend(
        inactive
            .into_iter()
            .map(|(controller, routes)| RouteIssue::InactiveController { controller, routes }),
    );
    issues.extend(
        owners
            .into_iter()
            .filter(|(_, controllers)| controllers.len() > 1)
            .map(|((method, path), controllers)| RouteIssue::DuplicatePath {
                method,
                path: path.to_string(),
                controllers,
            }),
    );

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}
