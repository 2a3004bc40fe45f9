pub mod compiler;
pub mod http;
pub mod normalizer;
pub mod service;
pub mod traits;
pub mod types;

pub use compiler::{compile, ParamKind};
pub use http::HttpSearchEngine;
pub use normalizer::normalize;
pub use service::SearchService;
pub use traits::SearchEngine;
pub use types::{FacetCount, Facets, PriceStat, SearchRequest, SearchResult};
