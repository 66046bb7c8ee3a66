//! Request URL construction and `next`-link handling.
//!
//! Paths handed to the client are either relative to the configured base
//! (`"/api/products/"`) or absolute links taken verbatim from a previous
//! page's `next` field:
//!
//! ```text
//! {"next": "https://api.example.com/api/products/?page=2", ...}
//! ```
//!
//! Absolute links are never re-prefixed with the base URL.

/// Returns `true` for `http://` and `https://` links.
#[must_use]
pub fn is_absolute(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

/// Joins `path` onto `base` with exactly one slash between them.
///
/// - an empty `path` yields `base` unchanged,
/// - an absolute `path` is returned verbatim,
/// - otherwise `base` loses its trailing slash and `path` gains a leading one.
///
/// This is plain concatenation, not RFC 3986 reference resolution: a base
/// with a path prefix keeps it (`https://x.test/v1/` + `api/` is
/// `https://x.test/v1/api/`).
#[must_use]
pub fn join_url(base: &str, path: &str) -> String {
    if path.is_empty() {
        return base.to_owned();
    }
    if is_absolute(path) {
        return path.to_owned();
    }

    let base = base.strip_suffix('/').unwrap_or(base);
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_returns_base() {
        assert_eq!(
            join_url("https://api.example.com/", ""),
            "https://api.example.com/"
        );
    }

    #[test]
    fn absolute_path_is_used_verbatim() {
        let next = "https://other.example.com/api/products/?page=2";
        assert_eq!(join_url("https://api.example.com/", next), next);
        let next = "http://127.0.0.1:9000/api/products/?page=3";
        assert_eq!(join_url("https://api.example.com/", next), next);
    }

    #[test]
    fn leading_slash_is_not_doubled() {
        assert_eq!(
            join_url("https://api.example.com/", "/api/products/"),
            "https://api.example.com/api/products/"
        );
    }

    #[test]
    fn missing_leading_slash_is_added() {
        assert_eq!(
            join_url("https://api.example.com/", "api/products/?page=2"),
            "https://api.example.com/api/products/?page=2"
        );
    }

    #[test]
    fn base_path_prefix_is_kept() {
        assert_eq!(
            join_url("https://api.example.com/v1/", "/api/categories/"),
            "https://api.example.com/v1/api/categories/"
        );
    }

    #[test]
    fn is_absolute_cases() {
        assert!(is_absolute("https://x.test/"));
        assert!(is_absolute("http://x.test/"));
        assert!(!is_absolute("/api/products/"));
        assert!(!is_absolute("ftp://x.test/"));
    }
}
