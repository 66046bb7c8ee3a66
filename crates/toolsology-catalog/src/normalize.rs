//! Conversion from raw [`ProductRecord`]s to [`NormalizedProduct`]s.
//!
//! Plan decoding is delegated to [`toolsology_core::normalize_plan`]; this
//! module only carries the product fields across and trims empty text.

use toolsology_core::{normalize_plan, NormalizedProduct, ProductRecord};

/// Normalizes a [`ProductRecord`], decoding every plan's duration code and
/// attaching its labels. Plans keep their API order.
#[must_use]
pub fn normalize_product(product: ProductRecord, currency: &str) -> NormalizedProduct {
    let plans = product
        .plans
        .into_iter()
        .map(|plan| normalize_plan(plan, currency))
        .collect();

    NormalizedProduct {
        id: product.id,
        title: product.title.trim().to_owned(),
        // Treat blank descriptions as absent.
        description: product
            .description
            .map(|d| d.trim().to_owned())
            .filter(|d| !d.is_empty()),
        price: product.price,
        original_price: product.original_price,
        categories: product.categories,
        images: product.images,
        reviews: product.reviews,
        rating: product.rating,
        review_count: product.review_count,
        is_featured: product.is_featured,
        created_at: product.created_at,
        plans,
    }
}

/// Normalizes a batch of products, preserving order.
#[must_use]
pub fn normalize_products(products: Vec<ProductRecord>, currency: &str) -> Vec<NormalizedProduct> {
    products
        .into_iter()
        .map(|p| normalize_product(p, currency))
        .collect()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
