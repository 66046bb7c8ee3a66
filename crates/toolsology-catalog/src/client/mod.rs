//! HTTP client for the storefront catalog API.

mod fetch_all;
mod origin;

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use toolsology_core::{AppConfig, CategoryRecord, ProductRecord, ReviewRecord};

use crate::error::{snippet, CatalogError, CONTENT_TYPE_SNIPPET_CHARS, HTTP_SNIPPET_CHARS};
use crate::pagination::join_url;
use crate::types::{Listing, PaginatedPage, WhatsAppContact};

pub use origin::{resolve_base_url, FALLBACK_BASE_URL};

/// Default page ceiling for [`CatalogClient::fetch_all`].
pub const DEFAULT_MAX_PAGES: usize = 50;

pub const PRODUCTS_PATH: &str = "/api/products/";
pub const CATEGORIES_PATH: &str = "/api/categories/";
pub const REVIEWS_PATH: &str = "/api/reviews/";
pub const REVIEW_STATS_PATH: &str = "/api/review-stats/";
pub const WHATSAPP_PATH: &str = "/api/whatsapp/";

/// Construction parameters for [`CatalogClient`].
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Configured API origin, resolved with [`resolve_base_url`].
    pub api_url: Option<String>,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub user_agent: String,
    /// Page ceiling for paginated crawls. `None` crawls until `next` runs out.
    pub max_pages: Option<usize>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: None,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agent: "toolsology/0.1 (catalog-client)".to_owned(),
            max_pages: Some(DEFAULT_MAX_PAGES),
        }
    }
}

impl From<&AppConfig> for ClientSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            api_url: config.api_url.clone(),
            request_timeout_secs: config.request_timeout_secs,
            connect_timeout_secs: config.connect_timeout_secs,
            user_agent: config.user_agent.clone(),
            max_pages: config.max_pages,
        }
    }
}

/// Client for the catalog REST API.
///
/// Every request sends `Accept: application/json` and is bounded by the
/// configured timeout. Non-2xx statuses, non-JSON bodies and transport
/// failures surface as typed [`CatalogError`]s. There are no retries.
///
/// List operations (`fetch_all`, `fetch_categories`, `fetch_reviews`, ...)
/// never fail outright: they return a [`Listing`] carrying whatever was
/// collected plus the error that cut collection short. [`Self::fetch_by_id`]
/// is the one read path that propagates errors.
pub struct CatalogClient {
    pub(super) client: Client,
    pub(super) base_url: String,
    pub(super) max_pages: Option<usize>,
}

impl CatalogClient {
    /// Creates a `CatalogClient` from explicit settings.
    ///
    /// An unusable `api_url` does not fail construction; it falls back to
    /// [`FALLBACK_BASE_URL`].
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Network`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(settings: &ClientSettings) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .user_agent(settings.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url: resolve_base_url(settings.api_url.as_deref()),
            max_pages: settings.max_pages.filter(|n| *n > 0),
        })
    }

    /// The resolved base URL, always ending in `/`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full request URL for `path`. Absolute links are returned unchanged.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// Fetches a single product by id.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Precondition`] if `id` is empty, before any request.
    /// - [`CatalogError::Http`] for a non-2xx status (404 for unknown ids).
    /// - [`CatalogError::UnexpectedContentType`] for a non-JSON body.
    /// - [`CatalogError::Network`] on transport failure.
    /// - [`CatalogError::Deserialize`] if the body is not a product.
    pub async fn fetch_by_id(&self, id: &str) -> Result<ProductRecord, CatalogError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(CatalogError::Precondition(
                "product id is required".to_owned(),
            ));
        }

        let (url, body) = self.get_json(&format!("{PRODUCTS_PATH}{id}/")).await?;
        serde_json::from_value(body).map_err(|e| CatalogError::Deserialize {
            context: format!("product {id} from {url}"),
            source: e,
        })
    }

    /// Fetches one page of `path` and unwraps it. Never fails; a failure
    /// yields an empty, degraded [`Listing`].
    pub async fn fetch_single<T: DeserializeOwned>(&self, path: &str) -> Listing<T> {
        match self.fetch_page::<T>(path).await {
            Ok(page) => Listing::complete(page.results, 1),
            Err(e) => {
                tracing::warn!(path, error = %e, "single-page fetch failed, returning empty listing");
                Listing::degraded(Vec::new(), 0, e)
            }
        }
    }

    /// Fetches all categories.
    pub async fn fetch_categories(&self) -> Listing<CategoryRecord> {
        self.fetch_single(CATEGORIES_PATH).await
    }

    /// Fetches reviews, optionally restricted to one product.
    pub async fn fetch_reviews(&self, product_id: Option<i64>) -> Listing<ReviewRecord> {
        match product_id {
            Some(id) => {
                self.fetch_single(&format!("{REVIEWS_PATH}?product={id}"))
                    .await
            }
            None => self.fetch_single(REVIEWS_PATH).await,
        }
    }

    /// Fetches the aggregate review stats object.
    ///
    /// The endpoint is optional on the server side, so any failure (including
    /// a 404) is logged and reported as `None`.
    pub async fn fetch_review_stats(&self) -> Option<serde_json::Value> {
        match self.get_json(REVIEW_STATS_PATH).await {
            Ok((_, serde_json::Value::Null)) => None,
            Ok((_, body)) => Some(body),
            Err(e) => {
                tracing::warn!(error = %e, "review stats endpoint not available");
                None
            }
        }
    }

    /// Fetches the WhatsApp number orders are handed off to.
    pub async fn fetch_whatsapp_number(&self) -> Option<String> {
        let body = match self.get_json(WHATSAPP_PATH).await {
            Ok((_, body)) => body,
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch WhatsApp number");
                return None;
            }
        };

        match serde_json::from_value::<WhatsAppContact>(body) {
            Ok(contact) => contact
                .whatsapp_number
                .map(|n| n.trim().to_owned())
                .filter(|n| !n.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "unexpected WhatsApp endpoint body");
                None
            }
        }
    }

    /// Fetches and unwraps one collection page.
    pub(super) async fn fetch_page<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<PaginatedPage<T>, CatalogError> {
        let (url, body) = self.get_json(path).await?;
        PaginatedPage::from_body(body, &format!("page {url}"))
    }

    /// Issues a GET for `path` and decodes the body as JSON.
    ///
    /// Returns the resolved URL alongside the body for error context.
    async fn get_json(&self, path: &str) -> Result<(String, serde_json::Value), CatalogError> {
        let url = self.url_for(path);
        let parsed = Url::parse(&url).map_err(|e| CatalogError::InvalidUrl {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        let response = self
            .client
            .get(parsed)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body_snippet = if text.trim().is_empty() {
                format!(
                    "HTTP {} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or_default()
                )
                .trim_end()
                .to_owned()
            } else {
                snippet(&text, HTTP_SNIPPET_CHARS)
            };
            return Err(CatalogError::Http {
                status: status.as_u16(),
                url,
                body_snippet,
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_owned();

        if !content_type.contains("application/json") {
            let text = response.text().await?;
            return Err(CatalogError::UnexpectedContentType {
                content_type,
                body_snippet: snippet(&text, CONTENT_TYPE_SNIPPET_CHARS),
            });
        }

        let text = response.text().await?;
        let body = serde_json::from_str(&text).map_err(|e| CatalogError::Deserialize {
            context: format!("response from {url}"),
            source: e,
        })?;

        tracing::debug!(url, "fetched JSON");
        Ok((url, body))
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
