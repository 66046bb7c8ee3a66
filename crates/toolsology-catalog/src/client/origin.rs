//! Base URL resolution for the catalog client.

use reqwest::Url;

/// Used when no API URL is configured or the configured one is unusable.
pub const FALLBACK_BASE_URL: &str = "http://127.0.0.1:8000/";

/// Resolves the configured API origin into the base every request path is
/// joined onto.
///
/// Keeps `scheme://host[:port]` and the path, normalized to end with exactly
/// one slash. Credentials, query and fragment are dropped. Given
/// `"https://api.example.com"`, returns `"https://api.example.com/"`.
///
/// A missing, unparsable or non-HTTP value falls back to
/// [`FALLBACK_BASE_URL`] instead of failing startup.
#[must_use]
pub fn resolve_base_url(configured: Option<&str>) -> String {
    let Some(raw) = configured.map(str::trim).filter(|s| !s.is_empty()) else {
        tracing::warn!(
            fallback = FALLBACK_BASE_URL,
            "no API URL configured, using local fallback"
        );
        return FALLBACK_BASE_URL.to_owned();
    };

    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {
            let path = url.path().trim_end_matches('/');
            format!("{}{path}/", url.origin().ascii_serialization())
        }
        Ok(url) => {
            tracing::warn!(
                api_url = raw,
                scheme = url.scheme(),
                fallback = FALLBACK_BASE_URL,
                "API URL is not an http(s) origin, using local fallback"
            );
            FALLBACK_BASE_URL.to_owned()
        }
        Err(e) => {
            tracing::warn!(
                api_url = raw,
                error = %e,
                fallback = FALLBACK_BASE_URL,
                "could not parse API URL, using local fallback; check TOOLSOLOGY_API_URL"
            );
            FALLBACK_BASE_URL.to_owned()
        }
    }
}
