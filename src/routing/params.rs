//! Path parameters extracted from `:name` segments.

use std::collections::HashMap;
use std::str::FromStr;

use axum::http::StatusCode;
use serde::Serialize;

use crate::dispatch::HttpException;

/// Parameters bound by the matched pattern, keyed by name without the `:`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PathParams(HashMap<String, String>);

impl PathParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a raw parameter value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Parse a parameter into `T`.
    ///
    /// A missing parameter is a wiring mistake (500); a value that does not
    /// parse is the client's fault (400).
    pub fn parse<T: FromStr>(&self, name: &str) -> Result<T, HttpException> {
        let raw = self.get(name).ok_or_else(|| {
            HttpException::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Missing path parameter \"{name}\""),
            )
        })?;
        raw.parse().map_err(|_| {
            HttpException::new(
                StatusCode::BAD_REQUEST,
                format!("Invalid path parameter \"{name}\": {raw}"),
            )
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub(crate) fn insert(&mut self, name: &str, value: &str) {
        self.0.insert(name.to_string(), value.to_string());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PathParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_typed_param() {
        let params: PathParams = [("id", "42"), ("slug", "hello")].into_iter().collect();
        assert_eq!(params.parse::<u64>("id").unwrap(), 42);
        assert_eq!(params.get("slug"), Some("hello"));
    }

    #[test]
    fn test_parse_invalid_is_bad_request() {
        let params: PathParams = [("id", "abc")].into_iter().collect();
        let err = params.parse::<u64>("id").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_parse_missing_is_internal_error() {
        let err = PathParams::new().parse::<u64>("id").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
