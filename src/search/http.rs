use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::search::traits::SearchEngine;
use crate::search::types::SearchRequest;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

/// Search engine reached through the storefront's product search endpoint
pub struct HttpSearchEngine {
    client: Client,
    endpoint: Url,
}

impl HttpSearchEngine {
    /// Create an engine with default settings
    pub fn new() -> Result<Self> {
        Self::with_config(&SearchConfig::default())
    }

    /// Create an engine with custom settings
    pub fn with_config(config: &SearchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .context("Failed to create HTTP client")?;

        let endpoint = config
            .base_url
            .join(&config.products_path)
            .map_err(SearchError::from)
            .with_context(|| format!("Invalid search path: {}", config.products_path))?;

        Ok(Self { client, endpoint })
    }

    /// Full URL of the search endpoint, without query
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SearchEngine for HttpSearchEngine {
    async fn search(&self, request: &SearchRequest) -> Result<serde_json::Value, SearchError> {
        let pairs = request.to_query_pairs();
        debug!("GET {} with {} params", self.endpoint, pairs.len());

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&pairs)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Search endpoint returned status: {}", status);
            return Err(SearchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        debug!("Received {} bytes of search results", body.len());

        Ok(serde_json::from_slice(&body)?)
    }

    fn engine_name(&self) -> &'static str {
        "storefront-http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve exactly one HTTP response and hand back the request head
    async fn serve_once(status_line: &'static str, body: &'static str) -> (Url, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();

            String::from_utf8_lossy(&head).into_owned()
        });

        (Url::parse(&format!("http://{}", addr)).unwrap(), handle)
    }

    fn engine_for(base_url: Url) -> HttpSearchEngine {
        HttpSearchEngine::with_config(&SearchConfig {
            base_url,
            timeout: Duration::from_secs(5),
            ..SearchConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_joins_path() {
        let engine = HttpSearchEngine::new().unwrap();
        assert_eq!(engine.endpoint().as_str(), "http://localhost:3000/api/ms/products");
    }

    #[test]
    fn test_unjoinable_base_url_is_invalid_url() {
        let err = HttpSearchEngine::with_config(&SearchConfig {
            base_url: Url::parse("mailto:shop@example.com").unwrap(),
            ..SearchConfig::default()
        })
        .err()
        .expect("mailto: cannot be a base URL");

        assert!(matches!(
            err.downcast_ref::<SearchError>(),
            Some(SearchError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_search_sends_query_and_returns_payload() {
        let (base, server) = serve_once("200 OK", r#"{"hits":[{"id":"p1"}],"totalHits":1}"#).await;
        let engine = engine_for(base);

        let mut request = SearchRequest::from_text("red shoes");
        request
            .attribute_params
            .insert("attributes.color".to_string(), "red".to_string());

        let payload = engine.search(&request).await.unwrap();
        assert_eq!(payload, json!({"hits": [{"id": "p1"}], "totalHits": 1}));

        let head = server.await.unwrap();
        let request_line = head.lines().next().unwrap();
        assert!(request_line.starts_with("GET /api/ms/products?"));
        assert!(request_line.contains("search=red+shoes"));
        assert!(request_line.contains("page=1"));
        assert!(request_line.contains("attributes.color=red"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let (base, server) = serve_once("503 Service Unavailable", "{}").await;
        let engine = engine_for(base);

        let err = engine.search(&SearchRequest::default()).await.unwrap_err();
        assert!(matches!(err, SearchError::Status { status: 503 }));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_json_is_a_decode_error() {
        let (base, server) = serve_once("200 OK", "<html>maintenance</html>").await;
        let engine = engine_for(base);

        let err = engine.search(&SearchRequest::default()).await.unwrap_err();
        assert!(matches!(err, SearchError::Decode(_)));
        server.await.unwrap();
    }
}
