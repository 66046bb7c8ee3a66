pub mod client;
pub mod error;
pub mod normalize;
pub mod pagination;
pub mod types;

pub use client::{
    resolve_base_url, CatalogClient, ClientSettings, DEFAULT_MAX_PAGES, FALLBACK_BASE_URL,
};
pub use error::CatalogError;
pub use normalize::{normalize_product, normalize_products};
pub use types::{Listing, PageSummary, PaginatedPage};
