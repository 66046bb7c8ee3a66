//! Catalog records as the storefront API returns them.
//!
//! ## Observed shape
//!
//! ### Decimals
//! Prices and ratings arrive either as JSON numbers or as Django REST
//! decimal strings (`"1200.00"`). Both are accepted. A value that is neither
//! (or a string that does not parse) is treated as absent rather than
//! failing the whole page.
//!
//! ### `duration_months`
//! Despite the name this is a duration *code*, not a month count. It is
//! usually an integer, sometimes a string-encoded integer. Decoding lives in
//! [`crate::plans`].
//!
//! ### `created_at`
//! RFC 3339 with an offset. Unparsable timestamps become `None`.
//!
//! ### Nullable text
//! Titles and names may be `null` or missing; they deserialize to an empty
//! string. An image with no file (`"image": null`, Django's rendering of an
//! empty `ImageField`) keeps `image: None`. One such record never fails the
//! page it arrives on.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::plans::NormalizedPlan;

/// A product from `GET /api/products/` or `GET /api/products/{id}/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: i64,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "lenient_decimal")]
    pub price: Option<Decimal>,

    /// Pre-discount price, shown struck through when present.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub original_price: Option<Decimal>,

    #[serde(default)]
    pub categories: Vec<CategoryRef>,

    #[serde(default)]
    pub plans: Vec<RawPlan>,

    #[serde(default)]
    pub images: Vec<ImageRef>,

    /// Only embedded by the detail endpoint.
    #[serde(default)]
    pub reviews: Vec<ReviewRecord>,

    #[serde(default, deserialize_with = "lenient_decimal_or_zero")]
    pub rating: Decimal,

    #[serde(default)]
    pub review_count: i64,

    #[serde(default)]
    pub is_featured: bool,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ProductRecord {
    /// Returns `true` if the product is tagged with the given category id.
    #[must_use]
    pub fn in_category(&self, category_id: i64) -> bool {
        self.categories.iter().any(|c| c.id == category_id)
    }

    /// Listing price with the storefront's "missing means zero" rule.
    #[must_use]
    pub fn price_or_zero(&self) -> Decimal {
        self.price.unwrap_or(Decimal::ZERO)
    }

    /// The first gallery image with a file, used as the card thumbnail.
    #[must_use]
    pub fn primary_image(&self) -> Option<&ImageRef> {
        self.images.iter().find(|img| img.image.is_some())
    }

    /// Amount saved against `original_price`, when the product is on sale.
    #[must_use]
    pub fn savings(&self) -> Option<Decimal> {
        match (self.price, self.original_price) {
            (Some(price), Some(original)) if price < original => Some(original - price),
            _ => None,
        }
    }

    /// The category used to pick related products.
    #[must_use]
    pub fn primary_category_id(&self) -> Option<i64> {
        self.categories.first().map(|c| c.id)
    }
}

/// A [`ProductRecord`] with every plan decoded, ready for plan selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedProduct {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub original_price: Option<Decimal>,
    pub categories: Vec<CategoryRef>,
    pub images: Vec<ImageRef>,
    pub reviews: Vec<ReviewRecord>,
    pub rating: Decimal,
    pub review_count: i64,
    pub is_featured: bool,
    pub created_at: Option<DateTime<Utc>>,
    /// In the order the API returned them.
    pub plans: Vec<NormalizedPlan>,
}

impl NormalizedProduct {
    /// The plan pre-selected on the detail page: the first one listed.
    #[must_use]
    pub fn default_plan(&self) -> Option<&NormalizedPlan> {
        self.plans.first()
    }

    /// Returns `true` if any plan is a one-time lifetime purchase.
    #[must_use]
    pub fn has_lifetime_plan(&self) -> bool {
        self.plans.iter().any(|p| p.duration.is_lifetime)
    }
}

/// A category reference embedded in a product. Category objects are owned
/// by the categories endpoint; this is only the id plus a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

/// A category from `GET /api/categories/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default)]
    pub product_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    #[serde(default)]
    pub id: Option<i64>,
    /// Absolute or media-relative image URL. `None` when no file is attached.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub alt_text: Option<String>,
}

/// A purchasable subscription tier embedded in a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPlan {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub duration_months: Option<DurationCode>,
}

/// The raw `duration_months` value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DurationCode {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for DurationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationCode::Int(n) => write!(f, "{n}"),
            DurationCode::Float(x) => write!(f, "{x}"),
            DurationCode::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for DurationCode {
    fn from(n: i64) -> Self {
        DurationCode::Int(n)
    }
}

impl From<&str> for DurationCode {
    fn from(s: &str) -> Self {
        DurationCode::Text(s.to_owned())
    }
}

/// A customer review from `GET /api/reviews/` or embedded in a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub id: i64,
    #[serde(default)]
    pub rating: i32,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub verified_purchase: bool,
    #[serde(default)]
    pub helpful_count: i64,
    /// Free-text name of the tool the reviewer bought.
    #[serde(default)]
    pub purchased_tool: Option<String>,
    #[serde(default)]
    pub product: Option<ReviewProduct>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// The product a review belongs to: a bare id from the per-product listing,
/// or a nested summary from the global listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReviewProduct {
    Id(i64),
    Summary {
        id: i64,
        #[serde(default)]
        title: Option<String>,
    },
}

impl ReviewProduct {
    #[must_use]
    pub fn id(&self) -> i64 {
        match self {
            ReviewProduct::Id(id) | ReviewProduct::Summary { id, .. } => *id,
        }
    }
}

fn decimal_from_json(value: &serde_json::Value) -> Option<Decimal> {
    match value {
        serde_json::Value::Number(n) => n
            .to_string()
            .parse::<Decimal>()
            .ok()
            .or_else(|| n.as_f64().and_then(|f| Decimal::try_from(f).ok())),
        serde_json::Value::String(s) => s.trim().parse::<Decimal>().ok(),
        _ => None,
    }
}

fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(decimal_from_json))
}

fn lenient_decimal_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_decimal(deserializer).map(|d| d.unwrap_or(Decimal::ZERO))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn product_accepts_string_and_number_prices() {
        let product: ProductRecord = serde_json::from_value(json!({
            "id": 7,
            "title": "Canva Pro",
            "price": "1200.00",
            "original_price": 2500,
            "rating": 4.5,
        }))
        .unwrap();

        assert_eq!(product.price, Some(Decimal::new(120_000, 2)));
        assert_eq!(product.original_price, Some(Decimal::from(2500)));
        assert_eq!(product.rating, Decimal::new(45, 1));
        assert!(product.plans.is_empty());
        assert!(product.created_at.is_none());
    }

    #[test]
    fn unparsable_price_becomes_none() {
        let product: ProductRecord = serde_json::from_value(json!({
            "id": 1,
            "title": "x",
            "price": "contact us",
        }))
        .unwrap();
        assert!(product.price.is_none());
        assert_eq!(product.price_or_zero(), Decimal::ZERO);
    }

    #[test]
    fn null_rating_defaults_to_zero() {
        let product: ProductRecord =
            serde_json::from_value(json!({"id": 1, "title": "x", "rating": null})).unwrap();
        assert_eq!(product.rating, Decimal::ZERO);
    }

    #[test]
    fn created_at_with_offset_is_normalized_to_utc() {
        let product: ProductRecord = serde_json::from_value(json!({
            "id": 1,
            "title": "x",
            "created_at": "2025-03-01T10:00:00+05:00",
        }))
        .unwrap();
        assert_eq!(
            product.created_at.map(|t| t.to_rfc3339()),
            Some("2025-03-01T05:00:00+00:00".to_owned())
        );
    }

    #[test]
    fn garbage_created_at_is_ignored() {
        let product: ProductRecord = serde_json::from_value(json!({
            "id": 1,
            "title": "x",
            "created_at": "yesterday",
        }))
        .unwrap();
        assert!(product.created_at.is_none());
    }

    #[test]
    fn duration_code_accepts_int_string_and_null() {
        let plans: Vec<RawPlan> = serde_json::from_value(json!([
            {"id": 1, "title": "a", "price": "100", "duration_months": 3},
            {"id": 2, "title": "b", "price": "100", "duration_months": "2003"},
            {"id": 3, "title": "c", "price": "100", "duration_months": null},
            {"id": 4, "title": "d", "price": "100"},
        ]))
        .unwrap();

        assert_eq!(plans[0].duration_months, Some(DurationCode::Int(3)));
        assert_eq!(
            plans[1].duration_months,
            Some(DurationCode::Text("2003".to_owned()))
        );
        assert!(plans[2].duration_months.is_none());
        assert!(plans[3].duration_months.is_none());
    }

    #[test]
    fn duration_code_display_matches_wire_text() {
        assert_eq!(DurationCode::Int(20010).to_string(), "20010");
        assert_eq!(DurationCode::Float(12.5).to_string(), "12.5");
        assert_eq!(DurationCode::Float(12.0).to_string(), "12");
        assert_eq!(DurationCode::from("1007").to_string(), "1007");
    }

    #[test]
    fn savings_only_when_discounted() {
        let on_sale: ProductRecord = serde_json::from_value(json!({
            "id": 1, "title": "x", "price": "800", "original_price": "1000",
        }))
        .unwrap();
        assert_eq!(on_sale.savings(), Some(Decimal::from(200)));

        let full_price: ProductRecord = serde_json::from_value(json!({
            "id": 2, "title": "y", "price": "1000", "original_price": "1000",
        }))
        .unwrap();
        assert!(full_price.savings().is_none());

        let no_original: ProductRecord =
            serde_json::from_value(json!({"id": 3, "title": "z", "price": "10"})).unwrap();
        assert!(no_original.savings().is_none());
    }

    #[test]
    fn in_category_matches_on_id() {
        let product: ProductRecord = serde_json::from_value(json!({
            "id": 1,
            "title": "x",
            "categories": [{"id": 3, "name": "Design"}, {"id": 9}],
        }))
        .unwrap();
        assert!(product.in_category(3));
        assert!(product.in_category(9));
        assert!(!product.in_category(4));
    }

    #[test]
    fn review_product_accepts_id_or_summary() {
        let reviews: Vec<ReviewRecord> = serde_json::from_value(json!([
            {"id": 1, "rating": 5, "product": 12},
            {"id": 2, "rating": 4, "product": {"id": 13, "title": "Grammarly"}},
            {"id": 3, "rating": 3},
        ]))
        .unwrap();

        assert_eq!(reviews[0].product.as_ref().map(ReviewProduct::id), Some(12));
        assert_eq!(reviews[1].product.as_ref().map(ReviewProduct::id), Some(13));
        assert!(reviews[2].product.is_none());
        assert!(!reviews[2].verified_purchase);
    }

    #[test]
    fn null_text_and_image_do_not_fail_the_page() {
        let products: Vec<ProductRecord> = serde_json::from_value(json!([
            {"id": 1, "title": "ok"},
            {
                "id": 2,
                "title": null,
                "images": [{"id": 5, "image": null}, {"id": 6, "image": "/media/b.png"}],
                "plans": [{"id": 9, "title": null, "price": "100"}]
            },
            {"id": 3}
        ]))
        .unwrap();

        assert_eq!(products.len(), 3);
        assert_eq!(products[0].title, "ok");
        assert_eq!(products[1].title, "");
        assert!(products[1].images[0].image.is_none());
        assert_eq!(products[1].plans[0].title, "");
        assert_eq!(
            products[1].primary_image().and_then(|img| img.id),
            Some(6)
        );
        assert_eq!(products[2].title, "");
    }

    #[test]
    fn category_with_null_name_deserializes() {
        let category: CategoryRecord =
            serde_json::from_value(json!({"id": 4, "name": null})).unwrap();
        assert_eq!(category.name, "");
    }

}
