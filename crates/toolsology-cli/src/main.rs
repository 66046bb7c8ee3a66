mod catalog;
mod plans;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use toolsology_catalog::{CatalogClient, ClientSettings};
use toolsology_core::SortOrder;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "toolsology")]
#[command(about = "Toolsology storefront catalog client")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List products, filtered and sorted like the storefront grid
    Products {
        /// Only products in this category id
        #[arg(long)]
        category: Option<i64>,
        /// Inclusive minimum price
        #[arg(long)]
        min_price: Option<Decimal>,
        /// Inclusive maximum price
        #[arg(long)]
        max_price: Option<Decimal>,
        /// Case-insensitive title/description search
        #[arg(long)]
        search: Option<String>,
        /// Only featured products
        #[arg(long)]
        featured: bool,
        /// price-low, price-high, name, oldest or newest
        #[arg(long, default_value = "newest")]
        sort: SortOrder,
        /// Maximum number of products to show
        #[arg(long)]
        limit: Option<usize>,
        /// Request one page of this size instead of crawling every page
        #[arg(long)]
        page_size: Option<u32>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show one product with its decoded plans
    Product {
        /// Product id
        id: String,
        /// Number of related products to list
        #[arg(long, default_value = "4")]
        related: usize,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List categories
    Categories,
    /// List reviews, optionally for one product
    Reviews {
        /// Only reviews of this product id
        #[arg(long)]
        product: Option<i64>,
    },
    /// Show aggregate review stats
    ReviewStats,
    /// Show the WhatsApp number orders are sent to
    Whatsapp,
    /// Walk a paginated endpoint and report each page
    Pages {
        /// Start path or absolute URL
        #[arg(long, default_value = "/api/products/")]
        path: String,
    },
    /// Fetch products and categories together and summarize the catalog
    Summary,
    /// Decode a plan duration code without contacting the API
    Decode {
        /// Raw `duration_months` value, e.g. 2002 or 20010
        code: String,
        /// Plan price, to show the per-unit label
        #[arg(long)]
        price: Option<Decimal>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Arguments first: `--help` must not depend on a valid environment.
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = toolsology_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let Some(command) = cli.command else {
        println!("toolsology: no command given, see --help");
        return Ok(());
    };

    // Construction does no I/O.
    let client = CatalogClient::new(&ClientSettings::from(&config))?;
    tracing::debug!(base_url = client.base_url(), env = %config.env, "catalog client ready");

    match command {
        Commands::Products {
            category,
            min_price,
            max_price,
            search,
            featured,
            sort,
            limit,
            page_size,
            json,
        } => {
            let query = toolsology_core::ListingQuery {
                category_id: category,
                min_price,
                max_price,
                search,
                featured_only: featured,
                sort,
                limit,
            };
            catalog::run_products(&client, &query, page_size, json).await?;
        }
        Commands::Product { id, related, json } => {
            catalog::run_product(&client, &id, related, &config.currency, json).await?;
        }
        Commands::Categories => catalog::run_categories(&client).await,
        Commands::Reviews { product } => catalog::run_reviews(&client, product).await,
        Commands::ReviewStats => catalog::run_review_stats(&client).await?,
        Commands::Whatsapp => catalog::run_whatsapp(&client).await,
        Commands::Pages { path } => catalog::run_pages(&client, &path).await?,
        Commands::Summary => catalog::run_summary(&client).await,
        Commands::Decode { code, price } => plans::run_decode(&code, price, &config.currency),
    }

    Ok(())
}
