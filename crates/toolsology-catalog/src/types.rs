//! Wire envelopes for the catalog API and the typed result of list fetches.
//!
//! ## Observed shapes
//!
//! Collection endpoints are Django REST Framework views. Paginated ones
//! return `{"count": 42, "next": "https://.../?page=2", "previous": null,
//! "results": [...]}`; unpaginated ones return a bare JSON array. `next` is
//! usually absolute but may be relative or omitted, and is `null` on the last
//! page.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// One page of a collection endpoint, after unwrapping.
#[derive(Debug)]
pub struct PaginatedPage<T> {
    pub results: Vec<T>,
    /// Link to the following page, absent on the last one.
    pub next: Option<String>,
    /// Total records across all pages, when the server reports it.
    pub count: Option<i64>,
}

impl<T: DeserializeOwned> PaginatedPage<T> {
    /// Unwraps a decoded body: prefer `results`, fall back to a bare array,
    /// fall back to an empty page.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Deserialize`] if `results` (or the bare array)
    /// holds records that do not match `T`.
    pub fn from_body(body: serde_json::Value, context: &str) -> Result<Self, CatalogError> {
        let deserialize = |value: serde_json::Value| {
            serde_json::from_value::<Vec<T>>(value).map_err(|e| CatalogError::Deserialize {
                context: context.to_owned(),
                source: e,
            })
        };

        match body {
            serde_json::Value::Object(mut map) => {
                let next = map
                    .get("next")
                    .and_then(serde_json::Value::as_str)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_owned);
                let count = map.get("count").and_then(serde_json::Value::as_i64);
                let results = match map.remove("results") {
                    Some(serde_json::Value::Null) | None => Vec::new(),
                    Some(value) => deserialize(value)?,
                };
                Ok(Self {
                    results,
                    next,
                    count,
                })
            }
            serde_json::Value::Array(_) => Ok(Self {
                results: deserialize(body)?,
                next: None,
                count: None,
            }),
            _ => {
                tracing::debug!(context, "response body is neither a page nor an array");
                Ok(Self {
                    results: Vec::new(),
                    next: None,
                    count: None,
                })
            }
        }
    }
}

/// Result of a list fetch that degrades instead of failing.
///
/// `items` holds whatever was collected. `error` is the failure that stopped
/// collection early, if any. An empty, error-free listing means the
/// collection really is empty.
#[derive(Debug)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub error: Option<CatalogError>,
    /// Pages that returned successfully.
    pub pages: usize,
}

impl<T> Listing<T> {
    #[must_use]
    pub fn complete(items: Vec<T>, pages: usize) -> Self {
        Self {
            items,
            error: None,
            pages,
        }
    }

    #[must_use]
    pub fn degraded(items: Vec<T>, pages: usize, error: CatalogError) -> Self {
        Self {
            items,
            error: Some(error),
            pages,
        }
    }

    /// Returns `true` if a failure cut the fetch short.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drops the error and keeps whatever was collected.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Strict view: any recorded failure becomes `Err`, discarding partial
    /// items.
    ///
    /// # Errors
    ///
    /// Returns the [`CatalogError`] that degraded the listing.
    pub fn into_result(self) -> Result<Vec<T>, CatalogError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.items),
        }
    }
}

/// Per-page report produced by [`crate::CatalogClient::crawl_pages`].
#[derive(Debug, Clone, Serialize)]
pub struct PageSummary {
    /// 1-based page number.
    pub page: usize,
    pub url: String,
    pub count: Option<i64>,
    pub results: usize,
    pub next: Option<String>,
}

/// Body of `GET /api/whatsapp/`.
#[derive(Debug, Deserialize)]
pub(crate) struct WhatsAppContact {
    #[serde(default)]
    pub whatsapp_number: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Row {
        id: i64,
    }

    #[test]
    fn unwraps_paginated_object() {
        let page = PaginatedPage::<Row>::from_body(
            json!({"count": 3, "next": "https://api.test/api/products/?page=2", "results": [{"id": 1}, {"id": 2}]}),
            "test",
        )
        .unwrap();
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[1].id, 2);
        assert_eq!(page.count, Some(3));
        assert_eq!(
            page.next.as_deref(),
            Some("https://api.test/api/products/?page=2")
        );
    }

    #[test]
    fn unwraps_bare_array() {
        let page = PaginatedPage::<Row>::from_body(json!([{"id": 9}]), "test").unwrap();
        assert_eq!(page.results.len(), 1);
        assert!(page.next.is_none());
        assert!(page.count.is_none());
    }

    #[test]
    fn object_without_results_is_an_empty_page() {
        let page = PaginatedPage::<Row>::from_body(json!({"detail": "ok"}), "test").unwrap();
        assert!(page.results.is_empty());
        assert!(page.next.is_none());
    }

    #[test]
    fn null_results_and_blank_next_are_empty() {
        let page =
            PaginatedPage::<Row>::from_body(json!({"results": null, "next": ""}), "test").unwrap();
        assert!(page.results.is_empty());
        assert!(page.next.is_none());
    }

    #[test]
    fn scalar_body_is_an_empty_page() {
        let page = PaginatedPage::<Row>::from_body(json!("hello"), "test").unwrap();
        assert!(page.results.is_empty());
    }

    #[test]
    fn malformed_results_are_a_deserialize_error() {
        let err = PaginatedPage::<Row>::from_body(json!({"results": [{"name": "no id"}]}), "page")
            .unwrap_err();
        assert!(
            matches!(err, CatalogError::Deserialize { ref context, .. } if context == "page"),
            "expected Deserialize, got: {err:?}"
        );
    }

    #[test]
    fn listing_into_result_surfaces_error() {
        let listing: Listing<i64> = Listing::degraded(
            vec![1, 2],
            1,
            CatalogError::Precondition("boom".to_owned()),
        );
        assert!(listing.is_degraded());
        assert_eq!(listing.len(), 2);
        assert!(listing.into_result().is_err());

        let listing: Listing<i64> = Listing::complete(vec![], 1);
        assert!(!listing.is_degraded());
        assert_eq!(listing.into_result().unwrap(), Vec::<i64>::new());
    }
}
