use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Publication state of a product
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Draft,
    Proposed,
    #[default]
    Published,
    Rejected,
}

/// Storefront product document as indexed by the search engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub mrp: f64,
    pub currency: Option<String>,
    #[serde(default)]
    pub stock: i64,
    pub thumbnail: Option<String>,
    pub images: Option<String>,
    pub origin_country: Option<String>,
    pub vendor_id: Option<String>,
    pub category_id: Option<String>,
    #[serde(default)]
    pub status: ProductStatus,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Whether the listed price is below the maximum retail price
    pub fn is_discounted(&self) -> bool {
        self.mrp > 0.0 && self.price < self.mrp
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Accepts an RFC 3339 string; anything else (null, numbers, garbage) becomes `None`
fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(raw
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc)))
}
