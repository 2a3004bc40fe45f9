use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use storefront_search::{HttpSearchEngine, SearchConfig, SearchService};
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Run one product search against the storefront API and print the result as JSON
#[derive(Parser, Debug)]
#[command(name = "storefront-search")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search with the filters carried in a listing page URL
    Url {
        /// Listing URL, e.g. "https://shop.example.com/search?search=shoes&priceFrom=50"
        url: Url,

        /// Category slug that overrides the URL's `categories` parameter
        category: Option<String>,
    },

    /// Free-text search with no facet filters
    Text {
        query: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = SearchConfig::from_env()?;
    let engine = HttpSearchEngine::with_config(&config)?;
    info!("Searching via {}", engine.endpoint());

    let service = SearchService::new(Arc::new(engine));

    let result = match cli.command {
        Commands::Url { url, category } => service.search_by_url(&url, category.as_deref()).await,
        Commands::Text { query } => service.search_by_text(&query).await,
    };

    info!("{} products across {} pages", result.count, result.total_pages);

    for (i, product) in result.products().iter().enumerate() {
        let mut flags = Vec::new();
        if product.is_discounted() {
            flags.push(format!("was {}", product.mrp));
        }
        if !product.in_stock() {
            flags.push("out of stock".to_string());
        }
        info!("{}. {} ({}) {}", i + 1, product.title, product.price, flags.join(", "));
    }

    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
