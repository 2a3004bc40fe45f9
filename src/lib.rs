//! Product search for the storefront API.
//!
//! Compiles listing-page URLs into search requests, dispatches them to a
//! [`SearchEngine`], and normalizes whatever comes back into a
//! [`SearchResult`] that is always safe to render.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use storefront_search::{HttpSearchEngine, SearchConfig, SearchService};
//!
//! let engine = HttpSearchEngine::with_config(&SearchConfig::from_env()?)?;
//! let service = SearchService::new(Arc::new(engine));
//!
//! let url = url::Url::parse("https://shop.example.com/search?search=shoes&priceFrom=50")?;
//! let results = service.search_by_url(&url, None).await;
//! println!("{} products", results.count);
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod search;

pub use config::SearchConfig;
pub use error::SearchError;
pub use models::{Product, ProductStatus};
pub use search::{
    compile, normalize, FacetCount, Facets, HttpSearchEngine, PriceStat, SearchEngine, SearchRequest,
    SearchResult, SearchService,
};
