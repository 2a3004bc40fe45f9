use crate::error::SearchError;
use crate::search::types::SearchRequest;
use async_trait::async_trait;

/// External full-text search engine the service dispatches to.
/// Implementations return the engine's raw payload untouched; shaping it is the normalizer's job.
#[async_trait]
pub trait SearchEngine: Send + Sync {
    /// Run one search and return the raw response body
    async fn search(&self, request: &SearchRequest) -> Result<serde_json::Value, SearchError>;

    /// Get the name of the engine backend
    fn engine_name(&self) -> &'static str;
}
