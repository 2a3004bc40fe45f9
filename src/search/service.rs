use crate::error::SearchError;
use crate::search::compiler::compile;
use crate::search::normalizer::normalize;
use crate::search::traits::SearchEngine;
use crate::search::types::{SearchRequest, SearchResult};
use futures::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error, info};
use url::Url;

/// Product search entry points used by listing and quick-search views.
///
/// Holds the engine it dispatches to; construct one at startup and share it.
/// Clones are cheap and share the same engine.
#[derive(Clone)]
pub struct SearchService {
    engine: Arc<dyn SearchEngine>,
}

impl SearchService {
    pub fn new(engine: Arc<dyn SearchEngine>) -> Self {
        Self { engine }
    }

    /// Search with filters taken from the query string of `url`.
    ///
    /// `category_slug`, when non-empty, replaces the `categories` parameter.
    /// Failures, panics included, are logged and turned into [`SearchResult::empty`].
    pub async fn search_by_url(&self, url: &Url, category_slug: Option<&str>) -> SearchResult {
        self.absorb(self.try_search_by_url(url, category_slug)).await
    }

    /// Free-text search with no facet filters, for autocomplete and search bars.
    /// Failures, panics included, are logged and turned into [`SearchResult::empty`].
    pub async fn search_by_text(&self, query: &str) -> SearchResult {
        self.absorb(self.try_search_by_text(query)).await
    }

    /// Like [`search_by_url`](Self::search_by_url) but surfaces the failure
    pub async fn try_search_by_url(
        &self,
        url: &Url,
        category_slug: Option<&str>,
    ) -> Result<SearchResult, SearchError> {
        let request = compile(url, category_slug);
        self.execute(&request).await
    }

    /// Like [`search_by_text`](Self::search_by_text) but surfaces the failure
    pub async fn try_search_by_text(&self, query: &str) -> Result<SearchResult, SearchError> {
        self.execute(&SearchRequest::from_text(query)).await
    }

    async fn execute(&self, request: &SearchRequest) -> Result<SearchResult, SearchError> {
        debug!(
            engine = self.engine.engine_name(),
            query = %request.query,
            page = request.page,
            "Dispatching search: {:?}",
            request
        );

        let raw = self.engine.search(request).await?;
        let result = normalize(&raw);

        info!(
            "Search '{}' matched {} products ({} on this page)",
            request.query,
            result.count,
            result.data.len()
        );
        Ok(result)
    }

    /// Run a search to completion, mapping both errors and panics to the empty result
    async fn absorb<F>(&self, search: F) -> SearchResult
    where
        F: Future<Output = Result<SearchResult, SearchError>>,
    {
        let engine = self.engine.engine_name();
        match AssertUnwindSafe(search).catch_unwind().await {
            Ok(Ok(result)) => result,
            Ok(Err(err)) => {
                error!(engine, "Search failed, returning empty result: {}", err);
                SearchResult::empty()
            }
            Err(panic) => {
                error!(engine, "Search panicked, returning empty result: {}", panic_message(&*panic));
                SearchResult::empty()
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}
