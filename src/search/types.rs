use crate::models::Product;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Facet names the search index is configured with.
///
/// These must match the engine's `filterableAttributes`; change them here only
/// together with the index settings.
pub mod facet_keys {
    /// Facet-distribution bucket holding category slug counts
    pub const CATEGORY_SLUG: &str = "categories.category.slug";
    /// Facet-distribution bucket holding tag name counts
    pub const TAG_NAME: &str = "tags.name";
    /// Numeric facet-stats entry for product price
    pub const PRICE: &str = "price";
}

/// Structured product search request compiled from URL query parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Free-text term
    pub query: String,
    /// Category slug, possibly overridden by the route
    pub categories: String,
    pub tags: String,
    pub origin_country: String,
    pub keywords: String,
    /// 1-based page number
    pub page: u32,
    /// Raw sort token, interpreted by the engine
    pub sort: String,
    /// Empty, or `"<from>,<to>"` with either side possibly empty
    pub price: String,
    /// `attributes.*` filters, keys kept verbatim
    pub attribute_params: BTreeMap<String, String>,
    /// `option.*` filters, keys kept verbatim
    pub option_params: BTreeMap<String, String>,
    /// Everything else that is not a reserved parameter
    pub other_params: BTreeMap<String, String>,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            categories: String::new(),
            tags: String::new(),
            origin_country: String::new(),
            keywords: String::new(),
            page: 1,
            sort: String::new(),
            price: String::new(),
            attribute_params: BTreeMap::new(),
            option_params: BTreeMap::new(),
            other_params: BTreeMap::new(),
        }
    }
}

impl SearchRequest {
    /// Request carrying only a free-text term; every filter left at its default
    pub fn from_text(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Whether a price filter is set
    pub fn has_price_filter(&self) -> bool {
        !self.price.is_empty()
    }

    /// Flatten into the query parameters sent to the search endpoint.
    ///
    /// Empty standard fields are omitted; `page` is always sent. Dynamic keys
    /// follow in attribute, option, other order.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        let standard = [
            ("search", &self.query),
            ("categories", &self.categories),
            ("tags", &self.tags),
            ("originCountry", &self.origin_country),
            ("keywords", &self.keywords),
        ];
        for (key, value) in standard {
            if !value.is_empty() {
                pairs.push((key.to_string(), value.clone()));
            }
        }

        pairs.push(("page".to_string(), self.page.to_string()));

        if !self.sort.is_empty() {
            pairs.push(("sort".to_string(), self.sort.clone()));
        }
        if self.has_price_filter() {
            pairs.push(("price".to_string(), self.price.clone()));
        }

        let dynamic = self
            .attribute_params
            .iter()
            .chain(&self.option_params)
            .chain(&self.other_params);
        for (key, value) in dynamic {
            pairs.push((key.clone(), value.clone()));
        }

        pairs
    }
}

/// Price range statistics over the matched set
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct PriceStat {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// One value of a terms facet with its document count
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FacetCount {
    pub name: String,
    pub count: u64,
}

impl FacetCount {
    pub fn new(name: impl Into<String>, count: u64) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// Facet value counts keyed by facet name, then by value
pub type FacetDistribution = BTreeMap<String, BTreeMap<String, u64>>;

/// Filter options derived from the result set
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Facets {
    pub price_stat: PriceStat,
    /// Category slugs in engine order
    pub categories: Vec<FacetCount>,
    /// Tag names in engine order
    pub tags: Vec<FacetCount>,
    /// Every facet bucket the engine returned, re-keyed into sorted maps.
    ///
    /// Engine order is not kept here; use `categories` and `tags` for ranked
    /// values. Counts that are not whole non-negative numbers are dropped.
    pub all_filters: FacetDistribution,
}

/// Normalized product search result, always fully populated
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Raw hits as returned by the engine
    pub data: Vec<serde_json::Value>,
    pub count: u64,
    pub total_pages: u64,
    pub category_hierarchy: Vec<serde_json::Value>,
    pub facets: Facets,
}

impl SearchResult {
    /// The result returned whenever the pipeline cannot produce a real answer
    pub fn empty() -> Self {
        Self::default()
    }

    /// True for a result with no hits and no reported total
    pub fn is_empty(&self) -> bool {
        self.data.is_empty() && self.count == 0
    }

    /// Decode hits into products, skipping any that do not fit the model
    pub fn products(&self) -> Vec<Product> {
        self.data
            .iter()
            .filter_map(|hit| match Product::deserialize(hit) {
                Ok(product) => Some(product),
                Err(err) => {
                    warn!("Skipping undecodable hit: {}", err);
                    None
                }
            })
            .collect()
    }
}
