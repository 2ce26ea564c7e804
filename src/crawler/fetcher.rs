//! HTTP fetcher implementation
//!
//! This module covers the producer side of the pipeline:
//! - The [`DocumentSource`] capability and its reqwest-backed implementation
//! - Building HTTP clients with a proper user agent string
//! - Error classification for a single GET
//! - The fetch unit, which hands successful bodies to the parse pool

use crate::config::{Config, HttpConfig, UserAgentConfig};
use crate::state::DocumentState;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// A fetched body on its way to a parse unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedDocument {
    /// The URL as it appeared in the batch
    pub url: String,

    /// Raw response body
    pub body: Vec<u8>,
}

/// Result of a fetch operation
#[derive(Debug, Clone)]
pub enum FetchResult {
    /// Success status and a fully read body
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: Vec<u8>,
    },

    /// Response arrived with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, DNS, TLS)
    NetworkError {
        /// Error description
        error: String,
    },

    /// Success status, but reading the body failed
    BodyError {
        /// The HTTP status code
        status_code: u16,
        /// Error description
        error: String,
    },
}

/// Capability that retrieves one document by URL
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch(&self, url: &str) -> FetchResult;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `http` - Request and connect timeouts
///
/// # Example
///
/// ```no_run
/// use tandem_scrape::config::{HttpConfig, UserAgentConfig};
/// use tandem_scrape::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    http: &HttpConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(http.timeout_secs))
        .connect_timeout(Duration::from_secs(http.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`DocumentSource`] backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds the client from the user agent and HTTP sections of `config`
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(&config.user_agent, &config.http)?))
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    async fn fetch(&self, url: &str) -> FetchResult {
        fetch_url(&self.client, url).await
    }
}

/// Fetches a URL with a single GET and classifies the outcome
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx, body read and decoded | `Success` (UTF-8 body) |
/// | 2xx, body read fails | `BodyError` |
/// | Any other status | `HttpError` |
/// | Timeout / connect / other transport error | `NetworkError` |
///
/// Redirects are followed by the client, so 3xx only shows up when the
/// redirect limit is hit.
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                format!("Request timeout: {}", e)
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else {
                e.to_string()
            };
            return FetchResult::NetworkError { error };
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    // text() decodes using the Content-Type charset, falling back to UTF-8
    // with replacement characters
    let final_url = response.url().to_string();
    match response.text().await {
        Ok(text) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            body: text.into_bytes(),
        },
        Err(e) => FetchResult::BodyError {
            status_code: status.as_u16(),
            error: e.to_string(),
        },
    }
}

/// Runs one fetch unit to completion
///
/// Only a `Success` result produces a [`FetchedDocument`]; every other
/// outcome is logged and the unit finishes without sending anything.
/// Sending may suspend if the channel is momentarily full.
pub async fn run_fetch_unit(
    id: usize,
    url: String,
    source: Arc<dyn DocumentSource>,
    sender: mpsc::Sender<FetchedDocument>,
) -> DocumentState {
    tracing::debug!("Fetcher {} requesting {}", id, url);

    match source.fetch(&url).await {
        FetchResult::Success {
            final_url,
            status_code,
            body,
        } => {
            tracing::debug!(
                "Fetcher {} got HTTP {} from {} ({} bytes)",
                id,
                status_code,
                final_url,
                body.len()
            );

            let document = FetchedDocument { url, body };
            match sender.send(document).await {
                Ok(()) => DocumentState::Fetched,
                Err(mpsc::error::SendError(document)) => {
                    tracing::warn!(
                        "Fetcher {}: no parser left to receive {}",
                        id,
                        document.url
                    );
                    DocumentState::Undelivered
                }
            }
        }

        FetchResult::HttpError { status_code } => {
            tracing::debug!("Fetcher {} skipping {}: HTTP {}", id, url, status_code);
            DocumentState::Filtered { status_code }
        }

        FetchResult::NetworkError { error } => {
            tracing::warn!("Fetcher {} failed to reach {}: {}", id, url, error);
            DocumentState::Unreachable
        }

        FetchResult::BodyError { status_code, error } => {
            tracing::warn!(
                "Fetcher {} could not read body of {} (HTTP {}): {}",
                id,
                url,
                status_code,
                error
            );
            DocumentState::BodyReadFailed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSource(FetchResult);

    #[async_trait]
    impl DocumentSource for FixedSource {
        async fn fetch(&self, _url: &str) -> FetchResult {
            self.0.clone()
        }
    }

    fn source(result: FetchResult) -> Arc<dyn DocumentSource> {
        Arc::new(FixedSource(result))
    }

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&UserAgentConfig::default(), &HttpConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_http_source_from_config() {
        assert!(HttpSource::from_config(&Config::default()).is_ok());
    }

    #[tokio::test]
    async fn test_success_is_sent() {
        let (tx, mut rx) = mpsc::channel(1);
        let state = run_fetch_unit(
            0,
            "https://example.com/".to_string(),
            source(FetchResult::Success {
                final_url: "https://example.com/".to_string(),
                status_code: 200,
                body: b"<p>hi</p>".to_vec(),
            }),
            tx,
        )
        .await;

        assert_eq!(state, DocumentState::Fetched);
        let document = rx.recv().await.unwrap();
        assert_eq!(document.url, "https://example.com/");
        assert_eq!(document.body, b"<p>hi</p>".to_vec());
    }

    #[tokio::test]
    async fn test_non_success_status_sends_nothing() {
        let (tx, mut rx) = mpsc::channel(1);
        let state = run_fetch_unit(
            1,
            "https://example.com/missing".to_string(),
            source(FetchResult::HttpError { status_code: 404 }),
            tx,
        )
        .await;

        assert_eq!(state, DocumentState::Filtered { status_code: 404 });
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_network_error_sends_nothing() {
        let (tx, mut rx) = mpsc::channel(1);
        let state = run_fetch_unit(
            2,
            "https://unreachable.invalid/".to_string(),
            source(FetchResult::NetworkError {
                error: "Connection failed".to_string(),
            }),
            tx,
        )
        .await;

        assert_eq!(state, DocumentState::Unreachable);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_body_error_is_recoverable() {
        let (tx, mut rx) = mpsc::channel(1);
        let state = run_fetch_unit(
            3,
            "https://example.com/".to_string(),
            source(FetchResult::BodyError {
                status_code: 200,
                error: "connection reset".to_string(),
            }),
            tx,
        )
        .await;

        assert_eq!(state, DocumentState::BodyReadFailed);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_closed_channel_is_undelivered() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);

        let state = run_fetch_unit(
            4,
            "https://example.com/".to_string(),
            source(FetchResult::Success {
                final_url: "https://example.com/".to_string(),
                status_code: 200,
                body: Vec::new(),
            }),
            tx,
        )
        .await;

        assert_eq!(state, DocumentState::Undelivered);
    }
}
