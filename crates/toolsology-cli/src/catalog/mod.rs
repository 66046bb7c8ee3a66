//! Catalog command handlers for the CLI.
//!
//! Called from `main` once config is loaded and the client is built. Every
//! handler is read-only. List commands print whatever was fetched and report
//! a degraded fetch on stderr instead of failing.

mod products;
mod support;

use toolsology_catalog::Listing;

pub(crate) use products::{run_product, run_products, run_summary};
pub(crate) use support::{run_categories, run_pages, run_review_stats, run_reviews, run_whatsapp};

/// Prints a one-line notice on stderr when `listing` was cut short.
fn report_degraded<T>(what: &str, listing: &Listing<T>) {
    if let Some(error) = &listing.error {
        eprintln!(
            "warning: {what} incomplete after {} page(s), showing {} record(s): {error}",
            listing.pages,
            listing.len()
        );
    }
}

/// Truncates `text` to `max` characters, marking the cut with `...`.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_owned()
    }
}

/// Format an optional value for display, returning `"-"` when `None`.
fn fmt_opt<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_owned(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("Canva Pro", 10), "Canva Pro");
    }

    #[test]
    fn truncate_cuts_on_chars() {
        assert_eq!(truncate("ChatGPT Plus Team", 7), "ChatGPT...");
        assert_eq!(truncate("≈≈≈≈", 2), "≈≈...");
    }

    #[test]
    fn fmt_opt_dash_for_none() {
        assert_eq!(fmt_opt::<i64>(None), "-");
        assert_eq!(fmt_opt(Some(4)), "4");
    }
}
