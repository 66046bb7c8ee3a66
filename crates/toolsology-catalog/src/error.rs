use thiserror::Error;

/// Longest body excerpt carried by [`CatalogError::Http`].
pub const HTTP_SNIPPET_CHARS: usize = 300;

/// Longest body excerpt carried by [`CatalogError::UnexpectedContentType`].
pub const CONTENT_TYPE_SNIPPET_CHARS: usize = 80;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport-level failure: DNS, connect, TLS, timeout, or a body that
    /// could not be read.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status} from {url}: {body_snippet}")]
    Http {
        status: u16,
        url: String,
        body_snippet: String,
    },

    /// A 2xx response that is not JSON, typically an HTML error page from a
    /// proxy or a misconfigured base URL.
    #[error("expected JSON, got \"{content_type}\": {body_snippet}")]
    UnexpectedContentType {
        content_type: String,
        body_snippet: String,
    },

    /// JSON that does not have the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A required argument was missing. Raised before any request is made.
    #[error("{0}")]
    Precondition(String),

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Truncates `text` to at most `max_chars` characters, on a char boundary.
pub(crate) fn snippet(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_owned(),
        None => text.to_owned(),
    }
}
