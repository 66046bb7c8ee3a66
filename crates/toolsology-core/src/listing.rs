//! Filtering and sorting of a fetched product list.
//!
//! Operates on borrowed records so a single fetched catalog can back any
//! number of listing views.

use std::cmp::Ordering;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::products::ProductRecord;

/// Sort orders offered by the product grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    PriceLow,
    PriceHigh,
    Name,
    Oldest,
    #[default]
    Newest,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price-low" => Ok(SortOrder::PriceLow),
            "price-high" => Ok(SortOrder::PriceHigh),
            "name" => Ok(SortOrder::Name),
            "oldest" => Ok(SortOrder::Oldest),
            "newest" => Ok(SortOrder::Newest),
            other => Err(format!(
                "unknown sort order \"{other}\" (expected price-low, price-high, name, oldest or newest)"
            )),
        }
    }
}

/// A product-grid query. The default matches every product, newest first.
#[derive(Debug, Clone, Default)]
pub struct ListingQuery {
    pub category_id: Option<i64>,
    /// Inclusive lower bound on `price` (missing price counts as zero).
    pub min_price: Option<Decimal>,
    /// Inclusive upper bound on `price`.
    pub max_price: Option<Decimal>,
    /// Case-insensitive substring matched against title and description.
    pub search: Option<String>,
    pub featured_only: bool,
    pub sort: SortOrder,
    /// Applied after filtering and sorting.
    pub limit: Option<usize>,
}

impl ListingQuery {
    /// Returns `true` if `product` passes every filter in the query.
    #[must_use]
    pub fn matches(&self, product: &ProductRecord) -> bool {
        if let Some(category_id) = self.category_id {
            if !product.in_category(category_id) {
                return false;
            }
        }

        let price = product.price_or_zero();
        if self.min_price.is_some_and(|min| price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| price > max) {
            return false;
        }

        if self.featured_only && !product.is_featured {
            return false;
        }

        match self.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => {
                let needle = needle.to_lowercase();
                product.title.to_lowercase().contains(&needle)
                    || product
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            }
            _ => true,
        }
    }

    /// Filters, sorts and truncates `products`. The sort is stable, so ties
    /// keep their fetch order.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [ProductRecord]) -> Vec<&'a ProductRecord> {
        let mut selected: Vec<&ProductRecord> =
            products.iter().filter(|p| self.matches(p)).collect();

        selected.sort_by(|a, b| compare(self.sort, a, b));

        if let Some(limit) = self.limit {
            selected.truncate(limit);
        }
        selected
    }
}

/// Up to `limit` other products sharing `product`'s first category, in
/// catalog order. A product without categories has no related products.
#[must_use]
pub fn related_products<'a>(
    product: &ProductRecord,
    catalog: &'a [ProductRecord],
    limit: usize,
) -> Vec<&'a ProductRecord> {
    let Some(category_id) = product.primary_category_id() else {
        return Vec::new();
    };

    catalog
        .iter()
        .filter(|p| p.id != product.id && p.primary_category_id() == Some(category_id))
        .take(limit)
        .collect()
}

fn compare(sort: SortOrder, a: &ProductRecord, b: &ProductRecord) -> Ordering {
    match sort {
        SortOrder::PriceLow => a.price_or_zero().cmp(&b.price_or_zero()),
        SortOrder::PriceHigh => b.price_or_zero().cmp(&a.price_or_zero()),
        SortOrder::Name => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        // `None < Some(_)`, so undated products count as the oldest.
        SortOrder::Oldest => a.created_at.cmp(&b.created_at),
        SortOrder::Newest => b.created_at.cmp(&a.created_at),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn catalog() -> Vec<ProductRecord> {
        serde_json::from_value(json!([
            {
                "id": 1,
                "title": "Canva Pro",
                "description": "Design anything",
                "price": "1200.00",
                "categories": [{"id": 10, "name": "Design"}],
                "is_featured": true,
                "created_at": "2025-01-01T00:00:00Z"
            },
            {
                "id": 2,
                "title": "ChatGPT Plus",
                "description": "AI assistant",
                "price": "3500.00",
                "categories": [{"id": 20, "name": "AI"}],
                "created_at": "2025-03-01T00:00:00Z"
            },
            {
                "id": 3,
                "title": "adobe express",
                "price": null,
                "categories": [{"id": 10, "name": "Design"}],
                "created_at": "2025-02-01T00:00:00Z"
            },
            {
                "id": 4,
                "title": "Grammarly",
                "description": "Writing assistant",
                "price": 800
            }
        ]))
        .unwrap()
    }

    fn ids(products: &[&ProductRecord]) -> Vec<i64> {
        products.iter().map(|p| p.id).collect()
    }

    #[test]
    fn default_query_returns_everything_newest_first() {
        let products = catalog();
        let out = ListingQuery::default().apply(&products);
        assert_eq!(ids(&out), vec![2, 3, 1, 4]);
    }

    #[test]
    fn oldest_puts_undated_products_first() {
        let products = catalog();
        let query = ListingQuery {
            sort: SortOrder::Oldest,
            ..ListingQuery::default()
        };
        assert_eq!(ids(&query.apply(&products)), vec![4, 1, 3, 2]);
    }

    #[test]
    fn category_filter() {
        let products = catalog();
        let query = ListingQuery {
            category_id: Some(10),
            ..ListingQuery::default()
        };
        assert_eq!(ids(&query.apply(&products)), vec![3, 1]);
    }

    #[test]
    fn price_range_is_inclusive_and_missing_price_is_zero() {
        let products = catalog();
        let query = ListingQuery {
            min_price: Some(Decimal::ZERO),
            max_price: Some(Decimal::from(1200)),
            sort: SortOrder::PriceLow,
            ..ListingQuery::default()
        };
        assert_eq!(ids(&query.apply(&products)), vec![3, 4, 1]);
    }

    #[test]
    fn price_high_sort() {
        let products = catalog();
        let query = ListingQuery {
            sort: SortOrder::PriceHigh,
            ..ListingQuery::default()
        };
        assert_eq!(ids(&query.apply(&products)), vec![2, 1, 4, 3]);
    }

    #[test]
    fn name_sort_ignores_case() {
        let products = catalog();
        let query = ListingQuery {
            sort: SortOrder::Name,
            ..ListingQuery::default()
        };
        assert_eq!(ids(&query.apply(&products)), vec![3, 1, 2, 4]);
    }

    #[test]
    fn search_matches_title_or_description() {
        let products = catalog();
        let query = ListingQuery {
            search: Some("ASSISTANT".to_owned()),
            sort: SortOrder::Name,
            ..ListingQuery::default()
        };
        assert_eq!(ids(&query.apply(&products)), vec![2, 4]);

        let query = ListingQuery {
            search: Some("canva".to_owned()),
            ..ListingQuery::default()
        };
        assert_eq!(ids(&query.apply(&products)), vec![1]);
    }

    #[test]
    fn blank_search_matches_everything() {
        let products = catalog();
        let query = ListingQuery {
            search: Some("   ".to_owned()),
            ..ListingQuery::default()
        };
        assert_eq!(query.apply(&products).len(), 4);
    }

    #[test]
    fn featured_and_limit() {
        let products = catalog();
        let query = ListingQuery {
            featured_only: true,
            ..ListingQuery::default()
        };
        assert_eq!(ids(&query.apply(&products)), vec![1]);

        let query = ListingQuery {
            limit: Some(2),
            ..ListingQuery::default()
        };
        assert_eq!(ids(&query.apply(&products)), vec![2, 3]);
    }

    #[test]
    fn related_products_share_first_category() {
        let products = catalog();
        let related = related_products(&products[0], &products, 4);
        assert_eq!(ids(&related), vec![3]);

        let related = related_products(&products[3], &products, 4);
        assert!(related.is_empty(), "uncategorized product has no related items");
    }

    #[test]
    fn sort_order_parses_storefront_tokens() {
        assert_eq!("price-low".parse::<SortOrder>(), Ok(SortOrder::PriceLow));
        assert_eq!("price-high".parse::<SortOrder>(), Ok(SortOrder::PriceHigh));
        assert_eq!("name".parse::<SortOrder>(), Ok(SortOrder::Name));
        assert_eq!("oldest".parse::<SortOrder>(), Ok(SortOrder::Oldest));
        assert_eq!("newest".parse::<SortOrder>(), Ok(SortOrder::Newest));
        assert!("cheapest".parse::<SortOrder>().is_err());
    }
}
