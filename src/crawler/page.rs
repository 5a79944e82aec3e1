//! Page fetcher capability
//!
//! The crawl core talks to the web only through these traits. A fetcher opens
//! pages; a page is owned by exactly one worker until it is closed. Document
//! and element handles are synchronous views of a ready page and are never
//! held across an await point.

use crate::FetchResult;
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

/// Outcome of waiting for a page to finish loading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    TimedOut,
}

/// Opens pages; shared by all workers
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Starts loading `url` and returns a handle to the page
    async fn open(&self, url: &Url) -> FetchResult<Box<dyn Page>>;
}

/// A single open page (one browser tab, one in-flight request)
#[async_trait]
pub trait Page: Send {
    /// URL the page was opened with
    fn url(&self) -> &Url;

    /// Waits at most `timeout` for the page to become ready
    async fn wait_ready(&mut self, timeout: Duration) -> FetchResult<Readiness>;

    /// Returns a queryable view of the ready page
    fn document(&self) -> FetchResult<Box<dyn Document + '_>>;

    /// Releases the page; calling it twice is harmless
    async fn close(&mut self);
}

/// Structural queries over a whole page
pub trait Document {
    /// All elements matching `selector`, in document order
    fn query_all(&self, selector: &str) -> FetchResult<Vec<Box<dyn Element + '_>>>;
}

/// Structural queries and content access for one element
pub trait Element {
    /// Descendants matching `selector`, in document order
    fn query_all(&self, selector: &str) -> FetchResult<Vec<Box<dyn Element + '_>>>;

    /// Attribute value, if present
    fn attribute(&self, name: &str) -> Option<String>;

    /// Concatenated text content, untrimmed
    fn text(&self) -> String;

    /// First descendant matching `selector`
    fn query_first(&self, selector: &str) -> FetchResult<Option<Box<dyn Element + '_>>> {
        Ok(self.query_all(selector)?.into_iter().next())
    }
}
