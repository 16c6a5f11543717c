//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with the configured user agent and timeout
//! - Substituting achievement IDs into the page URL template
//! - Classifying responses into success, HTTP error, and network error

use crate::config::{expand_url_template, CrawlerConfig, UserAgentConfig};
use reqwest::{Client, StatusCode};
use std::future::Future;

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// HTTP 200 with the page body
    Success {
        status_code: u16,
        body: String,
    },

    /// Any response other than HTTP 200
    HttpError { status_code: u16 },

    /// Connection failure, timeout, or a body that couldn't be read
    NetworkError { error: String },
}

/// A source of achievement pages, addressed by ID
///
/// Implementations never fail; every problem is reported through
/// [`FetchResult`].
pub trait PageSource {
    fn fetch(&self, id: u64) -> impl Future<Output = FetchResult>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `crawler` - Crawl settings; `request_timeout` is applied per request
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    crawler: &CrawlerConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(crawler.request_timeout())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches achievement pages over HTTP
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    url_template: String,
}

impl HttpFetcher {
    pub fn new(client: Client, url_template: impl Into<String>) -> Self {
        Self {
            client,
            url_template: url_template.into(),
        }
    }

    /// Builds a fetcher from configuration
    pub fn from_config(
        user_agent: &UserAgentConfig,
        crawler: &CrawlerConfig,
    ) -> Result<Self, reqwest::Error> {
        let client = build_http_client(user_agent, crawler)?;
        Ok(Self::new(client, crawler.url_template.clone()))
    }

    pub fn page_url(&self, id: u64) -> String {
        expand_url_template(&self.url_template, id)
    }
}

impl PageSource for HttpFetcher {
    async fn fetch(&self, id: u64) -> FetchResult {
        fetch_url(&self.client, &self.page_url(id)).await
    }
}

/// Fetches a URL with a single GET request
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
///
/// # Returns
///
/// A FetchResult indicating success or the type of failure
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else {
                e.to_string()
            };
            return FetchResult::NetworkError { error };
        }
    };

    let status = response.status();
    if status != StatusCode::OK {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    match response.text().await {
        Ok(body) => FetchResult::Success {
            status_code: status.as_u16(),
            body,
        },
        Err(e) => FetchResult::NetworkError {
            error: e.to_string(),
        },
    }
}
