//! Multi-page fetch loops for `CatalogClient`.

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use toolsology_core::ProductRecord;

use crate::error::CatalogError;
use crate::types::{Listing, PageSummary};

use super::{CatalogClient, PRODUCTS_PATH};

impl CatalogClient {
    /// Collects every record reachable from `start_path` by following `next`
    /// links, in server order.
    ///
    /// Pages are fetched strictly one after another. Collection stops at the
    /// first page with no `next`, the first empty page, a `next` link already
    /// visited, or the configured page ceiling (logged as a warning).
    ///
    /// **Degrade, don't fail**:
    /// - a failure on page 2 or later keeps the records already collected and
    ///   records the error on the returned [`Listing`];
    /// - a failure on the first page triggers exactly one single-page fetch of
    ///   `start_path`. Its records (possibly none) are returned with the first
    ///   error recorded, since the crawl never got past page one.
    pub async fn fetch_all<T: DeserializeOwned>(&self, start_path: &str) -> Listing<T> {
        let mut items: Vec<T> = Vec::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut next: Option<String> = Some(start_path.to_owned());
        let mut pages = 0usize;

        while let Some(path) = next.take() {
            if self.max_pages.is_some_and(|max| pages >= max) {
                tracing::warn!(
                    start_path,
                    max_pages = pages,
                    collected = items.len(),
                    "page ceiling reached, returning what was collected"
                );
                break;
            }
            if !visited.insert(self.url_for(&path)) {
                tracing::warn!(start_path, next = %path, "next link already visited, stopping");
                break;
            }

            match self.fetch_page::<T>(&path).await {
                Ok(page) => {
                    pages += 1;
                    tracing::debug!(
                        page = pages,
                        url = %path,
                        results = page.results.len(),
                        has_next = page.next.is_some(),
                        "fetched page"
                    );
                    if page.results.is_empty() {
                        break;
                    }
                    items.extend(page.results);
                    next = page.next;
                }
                Err(e) if pages == 0 => {
                    tracing::warn!(
                        start_path,
                        error = %e,
                        "first page failed, falling back to a single-page fetch"
                    );
                    let fallback = self.fetch_single::<T>(start_path).await;
                    let pages = fallback.pages;
                    return Listing::degraded(fallback.into_items(), pages, e);
                }
                Err(e) => {
                    tracing::warn!(
                        start_path,
                        page = pages + 1,
                        collected = items.len(),
                        error = %e,
                        "page fetch failed, returning partial results"
                    );
                    return Listing::degraded(items, pages, e);
                }
            }
        }

        tracing::info!(start_path, records = items.len(), pages, "pagination complete");
        Listing::complete(items, pages)
    }

    /// Fetches the full product catalog.
    pub async fn fetch_products(&self) -> Listing<ProductRecord> {
        self.fetch_all(PRODUCTS_PATH).await
    }

    /// Asks the server for one oversized page of products. If that page
    /// cannot be fetched, falls back to [`Self::fetch_products`].
    ///
    /// The page is unwrapped like any other, so a bare JSON array body is
    /// taken as the product list rather than treated as empty.
    pub async fn fetch_products_with_page_size(&self, page_size: u32) -> Listing<ProductRecord> {
        let listing = self
            .fetch_single::<ProductRecord>(&format!("{PRODUCTS_PATH}?page_size={page_size}"))
            .await;
        if listing.is_degraded() {
            tracing::warn!(page_size, "large page fetch failed, crawling all pages instead");
            return self.fetch_products().await;
        }
        listing
    }

    /// Walks the pages from `start_path` and reports each one without keeping
    /// its records. Diagnostic; unlike [`Self::fetch_all`] it stops on the
    /// first error.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] raised while fetching a page.
    pub async fn crawl_pages(&self, start_path: &str) -> Result<Vec<PageSummary>, CatalogError> {
        let mut summaries: Vec<PageSummary> = Vec::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut next: Option<String> = Some(start_path.to_owned());

        while let Some(path) = next.take() {
            if self.max_pages.is_some_and(|max| summaries.len() >= max) {
                tracing::warn!(start_path, pages = summaries.len(), "page ceiling reached");
                break;
            }
            let url = self.url_for(&path);
            if !visited.insert(url.clone()) {
                break;
            }

            let page = self.fetch_page::<serde_json::Value>(&path).await?;
            summaries.push(PageSummary {
                page: summaries.len() + 1,
                url,
                count: page.count,
                results: page.results.len(),
                next: page.next.clone(),
            });
            if page.results.is_empty() {
                break;
            }
            next = page.next;
        }

        Ok(summaries)
    }
}
