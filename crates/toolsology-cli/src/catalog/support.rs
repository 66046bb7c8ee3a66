use toolsology_catalog::CatalogClient;

use super::{fmt_opt, report_degraded, truncate};

pub(crate) async fn run_categories(client: &CatalogClient) {
    let listing = client.fetch_categories().await;
    report_degraded("category list", &listing);

    if listing.is_empty() {
        println!("no categories found");
        return;
    }

    println!("{:<6}{:<32}{:>10}", "ID", "NAME", "PRODUCTS");
    for category in &listing.items {
        println!(
            "{:<6}{:<32}{:>10}",
            category.id,
            truncate(&category.name, 30),
            category.product_count
        );
    }
}

/// List reviews, newest as the server orders them.
pub(crate) async fn run_reviews(client: &CatalogClient, product_id: Option<i64>) {
    let listing = client.fetch_reviews(product_id).await;
    report_degraded("review list", &listing);

    if listing.is_empty() {
        println!(
            "no reviews found{}",
            product_id
                .map(|id| format!(" for product {id}"))
                .unwrap_or_default()
        );
        return;
    }

    println!(
        "{:<6}{:<8}{:<8}{:<22}{:<10}COMMENT",
        "ID", "PRODUCT", "RATING", "CUSTOMER", "VERIFIED"
    );
    for review in &listing.items {
        println!(
            "{:<6}{:<8}{:<8}{:<22}{:<10}{}",
            review.id,
            fmt_opt(review.product.as_ref().map(toolsology_core::ReviewProduct::id)),
            review.rating,
            truncate(review.customer_name.as_deref().unwrap_or("-"), 20),
            if review.verified_purchase { "yes" } else { "no" },
            truncate(review.comment.as_deref().unwrap_or(""), 60)
        );
    }
}

/// Print the aggregate review stats as JSON.
///
/// # Errors
///
/// Returns an error if the stats cannot be serialized.
pub(crate) async fn run_review_stats(client: &CatalogClient) -> anyhow::Result<()> {
    match client.fetch_review_stats().await {
        Some(stats) => println!("{}", serde_json::to_string_pretty(&stats)?),
        None => println!("review stats not available"),
    }
    Ok(())
}

pub(crate) async fn run_whatsapp(client: &CatalogClient) {
    match client.fetch_whatsapp_number().await {
        Some(number) => println!("{number}"),
        None => println!("no WhatsApp number configured"),
    }
}

/// Walk the pages from `path` and print one line per page.
///
/// # Errors
///
/// Returns the first error raised while fetching a page.
pub(crate) async fn run_pages(client: &CatalogClient, path: &str) -> anyhow::Result<()> {
    let pages = client.crawl_pages(path).await?;

    println!("{:<6}{:>8}{:>9}  URL -> NEXT", "PAGE", "COUNT", "RESULTS");
    for page in &pages {
        println!(
            "{:<6}{:>8}{:>9}  {} -> {}",
            page.page,
            fmt_opt(page.count),
            page.results,
            page.url,
            page.next.as_deref().unwrap_or("-")
        );
    }
    let total: usize = pages.iter().map(|p| p.results).sum();
    println!("{} page(s), {total} record(s)", pages.len());

    Ok(())
}
