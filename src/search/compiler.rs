//! Query compiler: URL query parameters to a structured [`SearchRequest`].

use crate::search::types::SearchRequest;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use url::Url;

/// Parameter names with a fixed meaning in the search request
pub const RESERVED_PARAMS: [&str; 9] = [
    "search",
    "categories",
    "priceFrom",
    "priceTo",
    "tags",
    "originCountry",
    "keywords",
    "page",
    "sort",
];

const ATTRIBUTE_PREFIX: &str = "attributes.";
const OPTION_PREFIX: &str = "option.";

/// Bucket a query parameter belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Reserved,
    Attribute,
    Option,
    Other,
}

impl ParamKind {
    /// Classify a key. Rules are tried in order; the first match wins.
    pub fn classify(key: &str) -> Self {
        if RESERVED_PARAMS.contains(&key) {
            ParamKind::Reserved
        } else if key.starts_with(ATTRIBUTE_PREFIX) {
            ParamKind::Attribute
        } else if key.starts_with(OPTION_PREFIX) {
            ParamKind::Option
        } else {
            ParamKind::Other
        }
    }
}

/// Compile the query string of `url` into a search request.
///
/// A non-empty `category_override` replaces any `categories` parameter.
/// Duplicate keys keep their first value.
///
/// `page` must be a plain positive integer (surrounding whitespace allowed);
/// numeric spellings like `"3.0"` or `"2e0"` are not accepted and give page 1.
pub fn compile(url: &Url, category_override: Option<&str>) -> SearchRequest {
    let params = first_values(url);
    let get = |key: &str| {
        params
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    };
    let text = |key: &str| get(key).unwrap_or_default().to_string();

    let categories = category_override
        .filter(|slug| !slug.is_empty())
        .or_else(|| get("categories"))
        .unwrap_or_default()
        .to_string();

    let price = match (get("priceFrom"), get("priceTo")) {
        (None, None) => String::new(),
        (from, to) => format!("{},{}", from.unwrap_or_default(), to.unwrap_or_default()),
    };

    let mut request = SearchRequest {
        query: text("search"),
        categories,
        tags: text("tags"),
        origin_country: text("originCountry"),
        keywords: text("keywords"),
        page: parse_page(get("page")),
        sort: text("sort"),
        price,
        ..SearchRequest::default()
    };

    for (key, value) in &params {
        let bucket = match ParamKind::classify(key) {
            ParamKind::Reserved => continue,
            ParamKind::Attribute => &mut request.attribute_params,
            ParamKind::Option => &mut request.option_params,
            ParamKind::Other => &mut request.other_params,
        };
        bucket.insert(key.clone(), value.clone());
    }

    request
}

/// Decode the query string, keeping only the first value seen for each key
fn first_values(url: &Url) -> BTreeMap<String, String> {
    let mut params = BTreeMap::new();
    for (key, value) in url.query_pairs() {
        if let Entry::Vacant(slot) = params.entry(key.into_owned()) {
            slot.insert(value.into_owned());
        }
    }
    params
}

fn parse_page(raw: Option<&str>) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}
