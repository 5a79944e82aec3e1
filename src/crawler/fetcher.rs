//! HTTP fetcher implementation
//!
//! This module provides the production `PageFetcher`:
//! - Building the HTTP client with the configured user agent
//! - Spawning one request task per opened page
//! - Bounded waiting for the body to arrive
//! - Aborting the request when the page is closed or dropped
//! - Classifying non-2xx statuses and transport errors as faults

use crate::config::FetcherConfig;
use crate::crawler::page::{Document, Page, PageFetcher, Readiness};
use crate::crawler::parser::HtmlDocument;
use crate::{FetchError, FetchResult};
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use tokio::task::JoinHandle;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The fetcher configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use cast_harvest::config::FetcherConfig;
/// use cast_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// `PageFetcher` backed by plain HTTP requests
///
/// Pages are "ready" once the full response body has been received. No
/// scripts are executed.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a client built from `config`
    pub fn new(config: &FetcherConfig) -> FetchResult<Self> {
        Ok(Self::with_client(build_http_client(config)?))
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn open(&self, url: &Url) -> FetchResult<Box<dyn Page>> {
        let client = self.client.clone();
        let target = url.clone();
        let request = tokio::spawn(async move { load_body(&client, target).await });

        Ok(Box::new(HttpPage {
            url: url.clone(),
            request: Some(request),
            body: None,
        }))
    }
}

/// Sends the GET request and reads the whole body
async fn load_body(client: &Client, url: Url) -> FetchResult<String> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|source| FetchError::Http {
        url: url.to_string(),
        source,
    })
}

/// A page whose body is loaded by a background request task
pub struct HttpPage {
    url: Url,
    request: Option<JoinHandle<FetchResult<String>>>,
    body: Option<String>,
}

#[async_trait]
impl Page for HttpPage {
    fn url(&self) -> &Url {
        &self.url
    }

    async fn wait_ready(&mut self, timeout: Duration) -> FetchResult<Readiness> {
        if self.body.is_some() {
            return Ok(Readiness::Ready);
        }

        let Some(request) = self.request.as_mut() else {
            return Err(FetchError::NotReady {
                url: self.url.to_string(),
            });
        };

        let joined = match tokio::time::timeout(timeout, request).await {
            Ok(joined) => joined,
            Err(_) => return Ok(Readiness::TimedOut),
        };
        self.request = None;

        let body = joined.map_err(|e| FetchError::Task {
            url: self.url.to_string(),
            message: e.to_string(),
        })??;
        self.body = Some(body);

        Ok(Readiness::Ready)
    }

    fn document(&self) -> FetchResult<Box<dyn Document + '_>> {
        match &self.body {
            Some(body) => Ok(Box::new(HtmlDocument::parse(body))),
            None => Err(FetchError::NotReady {
                url: self.url.to_string(),
            }),
        }
    }

    async fn close(&mut self) {
        if let Some(request) = self.request.take() {
            request.abort();
        }
        self.body = None;
    }
}

impl Drop for HttpPage {
    fn drop(&mut self) {
        if let Some(request) = self.request.take() {
            request.abort();
        }
    }
}
