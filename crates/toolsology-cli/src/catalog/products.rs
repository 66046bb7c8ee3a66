use toolsology_catalog::{normalize_product, CatalogClient};
use toolsology_core::{related_products, ListingQuery, NormalizedProduct, ProductRecord};

use super::{fmt_opt, report_degraded, truncate};

/// List products matching `query`.
///
/// With `page_size` set, asks for one oversized page instead of crawling.
///
/// # Errors
///
/// Returns an error if JSON output cannot be serialized.
pub(crate) async fn run_products(
    client: &CatalogClient,
    query: &ListingQuery,
    page_size: Option<u32>,
    json: bool,
) -> anyhow::Result<()> {
    let listing = match page_size {
        Some(size) => client.fetch_products_with_page_size(size).await,
        None => client.fetch_products().await,
    };
    report_degraded("product list", &listing);

    let selected = query.apply(&listing.items);
    if json {
        println!("{}", serde_json::to_string_pretty(&selected)?);
        return Ok(());
    }

    if selected.is_empty() {
        println!("no products match");
        return Ok(());
    }

    println!(
        "{:<8}{:<42}{:>12}{:>12}  {:<7}PLANS",
        "ID", "TITLE", "PRICE", "WAS", "RATING"
    );
    for product in &selected {
        println!(
            "{:<8}{:<42}{:>12}{:>12}  {:<7}{}",
            product.id,
            truncate(&product.title, 38),
            fmt_opt(product.price),
            fmt_opt(product.original_price),
            product.rating,
            product.plans.len()
        );
    }
    println!("{} of {} product(s)", selected.len(), listing.len());

    Ok(())
}

/// Show one product, its decoded plans and a few related products.
///
/// # Errors
///
/// Returns an error if the product cannot be fetched (blank id, unknown id,
/// transport failure) or JSON output cannot be serialized.
pub(crate) async fn run_product(
    client: &CatalogClient,
    id: &str,
    related: usize,
    currency: &str,
    json: bool,
) -> anyhow::Result<()> {
    let record = client.fetch_by_id(id).await?;
    let related_records = if related > 0 {
        let listing = client.fetch_products().await;
        report_degraded("related products", &listing);
        listing.into_items()
    } else {
        Vec::new()
    };
    let siblings: Vec<&ProductRecord> = related_products(&record, &related_records, related);
    let product = normalize_product(record, currency);

    if json {
        println!("{}", serde_json::to_string_pretty(&product)?);
        return Ok(());
    }

    print_product(&product);
    if !siblings.is_empty() {
        println!();
        println!("Related:");
        for sibling in siblings {
            println!("  {:<8}{}", sibling.id, sibling.title);
        }
    }

    Ok(())
}

fn print_product(product: &NormalizedProduct) {
    println!("{} (#{})", product.title, product.id);
    if let Some(description) = &product.description {
        println!("{}", truncate(description, 160));
    }
    println!(
        "price {}  was {}  rating {} ({} review(s))",
        fmt_opt(product.price),
        fmt_opt(product.original_price),
        product.rating,
        product.review_count
    );

    if product.plans.is_empty() {
        println!("no plans listed");
        return;
    }

    println!();
    println!(
        "{:<6}{:<24}{:>12}  {:<12}{:<26}DESCRIPTION",
        "ID", "PLAN", "PRICE", "DURATION", "RATE"
    );
    for plan in &product.plans {
        println!(
            "{:<6}{:<24}{:>12}  {:<12}{:<26}{}",
            plan.id,
            truncate(&plan.title, 20),
            fmt_opt(plan.price),
            plan.duration.display_duration,
            plan.unit_price_label.as_deref().unwrap_or("-"),
            plan.description
        );
    }
}

/// Fetch products and categories concurrently and print per-category counts.
pub(crate) async fn run_summary(client: &CatalogClient) {
    let (products, categories) =
        futures::join!(client.fetch_products(), client.fetch_categories());
    report_degraded("product list", &products);
    report_degraded("category list", &categories);

    println!(
        "{} product(s) over {} page(s), {} categor{}",
        products.len(),
        products.pages,
        categories.len(),
        if categories.len() == 1 { "y" } else { "ies" }
    );

    let featured = products.items.iter().filter(|p| p.is_featured).count();
    println!("{featured} featured");

    if categories.is_empty() {
        return;
    }
    println!();
    println!("{:<6}{:<32}{:>10}", "ID", "CATEGORY", "PRODUCTS");
    for category in &categories.items {
        let count = products
            .items
            .iter()
            .filter(|p| p.in_category(category.id))
            .count();
        println!(
            "{:<6}{:<32}{:>10}",
            category.id,
            truncate(&category.name, 30),
            count
        );
    }
}
