//! Result normalizer: raw engine payload to a fixed-shape [`SearchResult`].
//!
//! The engine's response schema is treated as partial. Every read goes through
//! `Value::get` and a typed accessor, so a missing field, a `null`, or a value of
//! the wrong type degrades to the documented default instead of failing.

use crate::search::types::{facet_keys, FacetCount, FacetDistribution, Facets, PriceStat, SearchResult};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Reshape a raw engine response into a [`SearchResult`]. Never fails.
pub fn normalize(raw: &Value) -> SearchResult {
    let distribution = raw.get("facetDistribution").and_then(Value::as_object);

    SearchResult {
        data: array_field(raw, "hits").to_vec(),
        count: count_field(raw, "totalHits")
            .or_else(|| count_field(raw, "estimatedTotalHits"))
            .unwrap_or(0),
        total_pages: count_field(raw, "totalPages").unwrap_or(0),
        category_hierarchy: array_field(raw, "categories")
            .iter()
            .filter(|category| category.is_object())
            .cloned()
            .collect(),
        facets: Facets {
            price_stat: price_stat(raw),
            categories: facet_counts(distribution, facet_keys::CATEGORY_SLUG),
            tags: facet_counts(distribution, facet_keys::TAG_NAME),
            all_filters: all_filters(distribution),
        },
    }
}

fn array_field<'a>(raw: &'a Value, key: &str) -> &'a [Value] {
    raw.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn count_field(raw: &Value, key: &str) -> Option<u64> {
    raw.get(key).and_then(as_count)
}

/// Read a non-negative integer; whole-valued floats are accepted
fn as_count(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|n| n.is_finite() && *n >= 0.0 && n.fract() == 0.0)
            .map(|n| n as u64)
    })
}

/// Price bounds from `allfacetStats`, falling back to `facetStats`
fn price_stat(raw: &Value) -> PriceStat {
    let stats = ["allfacetStats", "facetStats"]
        .iter()
        .find_map(|key| raw.get(*key)?.get(facet_keys::PRICE)?.as_object());

    match stats {
        Some(price) => PriceStat {
            min: price.get("min").and_then(Value::as_f64),
            max: price.get("max").and_then(Value::as_f64),
        },
        None => PriceStat::default(),
    }
}

/// Project one facet bucket into name/count pairs, keeping engine order
fn facet_counts(distribution: Option<&Map<String, Value>>, facet: &str) -> Vec<FacetCount> {
    let Some(bucket) = distribution
        .and_then(|d| d.get(facet))
        .and_then(Value::as_object)
    else {
        return Vec::new();
    };

    bucket
        .iter()
        .filter_map(|(name, count)| Some(FacetCount::new(name.clone(), as_count(count)?)))
        .collect()
}

/// Project the whole distribution into sorted maps.
/// Buckets that are not objects and counts that are not whole numbers are dropped.
fn all_filters(distribution: Option<&Map<String, Value>>) -> FacetDistribution {
    let Some(distribution) = distribution else {
        return FacetDistribution::new();
    };

    distribution
        .iter()
        .filter_map(|(facet, bucket)| {
            let values: BTreeMap<String, u64> = bucket
                .as_object()?
                .iter()
                .filter_map(|(value, count)| Some((value.clone(), as_count(count)?)))
                .collect();
            Some((facet.clone(), values))
        })
        .collect()
}
