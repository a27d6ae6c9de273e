//! Path matching against a flat pattern table.
//!
//! # Responsibilities
//! - Empty request path: look up the `""` pattern, nothing else
//! - Literal pass: patterns without `:` that equal the joined request path
//! - Parameterized pass (only when the literal pass found nothing):
//!   same segment count, literal segments equal, `:name` segments bind
//! - Report ambiguity instead of picking a winner
//!
//! # Design Decisions
//! - Bindings are collected per pattern; a pattern that fails to match
//!   contributes nothing to the returned parameters
//! - A repeated `:name` is reported as soon as the second binding happens,
//!   before later segments are compared
//! - Linear scan over all patterns; tables are small and rebuilt per request

use std::collections::BTreeMap;

use super::error::RouteError;
use super::params::PathParams;

/// A pattern that matched, borrowed from the table.
#[derive(Debug)]
pub struct Matched<'a, T> {
    pub pattern: &'a str,
    pub route: &'a T,
    pub params: PathParams,
}

/// Find the single pattern in `routes` matching `segments`.
///
/// Returns `Ok(None)` when nothing matches.
pub fn match_path<'a, T>(
    routes: &'a BTreeMap<String, T>,
    segments: &[String],
) -> Result<Option<Matched<'a, T>>, RouteError> {
    if segments.is_empty() {
        return Ok(routes.get_key_value("").map(|(pattern, route)| Matched {
            pattern: pattern.as_str(),
            route,
            params: PathParams::new(),
        }));
    }

    let joined = segments.join("/");
    let mut matches: Vec<(&'a String, &'a T, PathParams)> = routes
        .iter()
        .filter(|(pattern, _)| !pattern.contains(':') && **pattern == joined)
        .map(|(pattern, route)| (pattern, route, PathParams::new()))
        .collect();

    if matches.is_empty() {
        for (pattern, route) in routes {
            if let Some(params) = match_pattern(pattern, segments)? {
                matches.push((pattern, route, params));
            }
        }
    }

    if matches.len() > 1 {
        return Err(RouteError::Conflict(
            matches.iter().map(|(p, _, _)| (*p).clone()).collect(),
        ));
    }

    Ok(matches.pop().map(|(pattern, route, params)| Matched {
        pattern: pattern.as_str(),
        route,
        params,
    }))
}

/// Match one pattern against the request segments.
pub fn match_pattern(pattern: &str, segments: &[String]) -> Result<Option<PathParams>, RouteError> {
    if pattern.split('/').count() != segments.len() {
        return Ok(None);
    }

    let mut params = PathParams::new();
    for (part, segment) in pattern.split('/').zip(segments) {
        if let Some(name) = part.strip_prefix(':') {
            if params.contains(name) {
                return Err(RouteError::DuplicateParameter(name.to_string()));
            }
            params.insert(name, segment);
        } else if part != segment {
            return Ok(None);
        }
    }
    Ok(Some(params))
}

/// First parameter name that appears more than once in `pattern`.
pub fn repeated_parameter(pattern: &str) -> Option<&str> {
    let mut seen = Vec::new();
    for name in pattern.split('/').filter_map(|part| part.strip_prefix(':')) {
        if seen.contains(&name) {
            return Some(name);
        }
        seen.push(name);
    }
    None
}
