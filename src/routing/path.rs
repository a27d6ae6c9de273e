//! Path normalization helpers shared by registration and resolution.

use std::borrow::Cow;
use std::string::FromUtf8Error;

/// Strip at most one leading and one trailing `/`.
///
/// `"/users/"` becomes `"users"`, `"//a//"` becomes `"/a/"`, `"/"` becomes `""`.
pub fn trim_path(path: &str) -> &str {
    let path = path.strip_prefix('/').unwrap_or(path);
    path.strip_suffix('/').unwrap_or(path)
}

/// Join a controller prefix and a local route path, dropping empty parts.
pub fn join_path(prefix: &str, path: &str) -> String {
    match (prefix.is_empty(), path.is_empty()) {
        (true, _) => path.to_string(),
        (false, true) => prefix.to_string(),
        (false, false) => format!("{prefix}/{path}"),
    }
}

/// Split a captured wildcard into request segments. Empty segments are dropped,
/// so `"a//b/"` yields `["a", "b"]` and `""` yields nothing.
pub fn split_segments(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split a raw, still percent-encoded request path into decoded segments.
///
/// Each segment is decoded on its own, so `a%2Fb` stays one segment `"a/b"`.
/// Empty raw segments are dropped as in [`split_segments`].
pub fn decode_segments(raw: &str) -> Result<Vec<String>, FromUtf8Error> {
    raw.split('/')
        .filter(|s| !s.is_empty())
        .map(|s| urlencoding::decode(s).map(Cow::into_owned))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_path_strips_one_slash_each_side() {
        assert_eq!(trim_path("/users/"), "users");
        assert_eq!(trim_path("users"), "users");
        assert_eq!(trim_path("/"), "");
        assert_eq!(trim_path(""), "");
        assert_eq!(trim_path("//a//"), "/a/");
    }

    #[test]
    fn test_join_path_drops_empty_parts() {
        assert_eq!(join_path("", ""), "");
        assert_eq!(join_path("users", ""), "users");
        assert_eq!(join_path("", ":id"), ":id");
        assert_eq!(join_path("users", ":id"), "users/:id");
    }

    #[test]
    fn test_split_segments() {
        assert_eq!(split_segments("a/b"), vec!["a", "b"]);
        assert_eq!(split_segments("a//b/"), vec!["a", "b"]);
        assert!(split_segments("").is_empty());
    }

    #[test]
    fn test_decode_segments_decodes_each_segment() {
        assert_eq!(decode_segments("/things/a%2Fb").unwrap(), vec!["things", "a/b"]);
        assert_eq!(decode_segments("caf%C3%A9//x/").unwrap(), vec!["café", "x"]);
        assert!(decode_segments("/").unwrap().is_empty());
    }

    #[test]
    fn test_decode_segments_rejects_invalid_utf8() {
        assert!(decode_segments("things/%FF").is_err());
    }
}
