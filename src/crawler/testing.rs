//! In-memory page fetcher for tests
//!
//! Pages are described up front as lists of `(selector, element)` pairs; a
//! query returns the elements registered under exactly that selector string.
//! The fetcher counts open pages so tests can check the concurrency bound and
//! that every opened page was closed.

use crate::crawler::page::{Document, Element, Page, PageFetcher, Readiness};
use crate::{FetchError, FetchResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

pub const ROW: &str = ".cast_list tr";
pub const MARKER: &str = ".character";
pub const NAME_CELL: &str = ".primary_photo + td";
pub const LINK: &str = "a";
pub const LISTING_ITEM: &str = "div.ipc-title.ipc-title--base.ipc-title--title.cli-title";

#[derive(Debug, Clone, Default)]
pub struct FakeElement {
    text: String,
    attributes: HashMap<String, String>,
    children: Vec<(String, FakeElement)>,
    inspections: Arc<AtomicUsize>,
}

impl FakeElement {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Self::default()
        }
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_child(mut self, selector: &str, child: FakeElement) -> Self {
        self.children.push((selector.to_string(), child));
        self
    }

    /// Number of queries and text reads made on this element
    pub fn inspections(&self) -> usize {
        self.inspections.load(Ordering::SeqCst)
    }
}

impl Element for FakeElement {
    fn query_all(&self, selector: &str) -> FetchResult<Vec<Box<dyn Element + '_>>> {
        self.inspections.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .children
            .iter()
            .filter(|(s, _)| s == selector)
            .map(|(_, child)| Box::new(child.clone()) as Box<dyn Element + '_>)
            .collect())
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(name).cloned()
    }

    fn text(&self) -> String {
        self.inspections.fetch_add(1, Ordering::SeqCst);
        self.text.clone()
    }
}

/// A cast row with a role marker and a name cell
pub fn cast_row(name: &str, href: Option<&str>, role: &str) -> FakeElement {
    let mut cell = FakeElement::new(name);
    if let Some(href) = href {
        cell = cell.with_child(LINK, FakeElement::new(name).with_attr("href", href));
    }
    FakeElement::new(&format!("{} ... {}", name, role))
        .with_child(NAME_CELL, cell)
        .with_child(MARKER, FakeElement::new(role))
}

/// A row without a role marker
pub fn label_row(text: &str) -> FakeElement {
    FakeElement::new(text)
}

/// A row with a role marker but no name cell
pub fn malformed_row(role: &str) -> FakeElement {
    FakeElement::new(role).with_child(MARKER, FakeElement::new(role))
}

/// A listing entry linking to `href`
pub fn listing_entry(title: &str, href: &str) -> FakeElement {
    FakeElement::new(title).with_child(LINK, FakeElement::new(title).with_attr("href", href))
}

#[derive(Debug, Clone)]
pub enum FakePage {
    /// Becomes ready after the fetcher's delay with these elements
    Ready(Vec<(String, FakeElement)>),
    /// Never becomes ready
    Hangs,
    /// `open` fails
    Unreachable,
    /// `wait_ready` fails
    Broken,
    /// `wait_ready` panics
    Panics,
}

impl FakePage {
    pub fn cast(rows: Vec<FakeElement>) -> Self {
        Self::Ready(rows.into_iter().map(|r| (ROW.to_string(), r)).collect())
    }

    pub fn listing(entries: Vec<FakeElement>) -> Self {
        Self::Ready(
            entries
                .into_iter()
                .map(|e| (LISTING_ITEM.to_string(), e))
                .collect(),
        )
    }
}

#[derive(Default)]
struct Counters {
    open_now: AtomicUsize,
    max_open: AtomicUsize,
    opened: AtomicUsize,
    closed: AtomicUsize,
}

#[derive(Default)]
pub struct FakeFetcher {
    pages: HashMap<String, FakePage>,
    ready_delay: Duration,
    counters: Arc<Counters>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ready_delay(mut self, delay: Duration) -> Self {
        self.ready_delay = delay;
        self
    }

    pub fn with_page(mut self, url: &str, page: FakePage) -> Self {
        self.pages.insert(url.to_string(), page);
        self
    }

    /// Most pages ever open at the same time
    pub fn max_open(&self) -> usize {
        self.counters.max_open.load(Ordering::SeqCst)
    }

    pub fn opened(&self) -> usize {
        self.counters.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.counters.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for FakeFetcher {
    async fn open(&self, url: &Url) -> FetchResult<Box<dyn Page>> {
        let content = match self.pages.get(url.as_str()) {
            Some(FakePage::Unreachable) | None => {
                return Err(FetchError::Status {
                    url: url.to_string(),
                    status: 404,
                })
            }
            Some(page) => page.clone(),
        };

        let now = self.counters.open_now.fetch_add(1, Ordering::SeqCst) + 1;
        self.counters.max_open.fetch_max(now, Ordering::SeqCst);
        self.counters.opened.fetch_add(1, Ordering::SeqCst);

        Ok(Box::new(FakeTab {
            url: url.clone(),
            content,
            ready: false,
            open: true,
            ready_delay: self.ready_delay,
            counters: Arc::clone(&self.counters),
        }))
    }
}

struct FakeTab {
    url: Url,
    content: FakePage,
    ready: bool,
    open: bool,
    ready_delay: Duration,
    counters: Arc<Counters>,
}

impl FakeTab {
    /// Frees the tab; only an explicit close counts towards `closed`
    fn release(&mut self, explicit: bool) {
        if self.open {
            self.open = false;
            self.counters.open_now.fetch_sub(1, Ordering::SeqCst);
            if explicit {
                self.counters.closed.fetch_add(1, Ordering::SeqCst);
            }
        }
    }
}

#[async_trait]
impl Page for FakeTab {
    fn url(&self) -> &Url {
        &self.url
    }

    async fn wait_ready(&mut self, timeout: Duration) -> FetchResult<Readiness> {
        match self.content {
            FakePage::Hangs => {
                tokio::time::sleep(timeout).await;
                Ok(Readiness::TimedOut)
            }
            FakePage::Broken => Err(FetchError::Status {
                url: self.url.to_string(),
                status: 500,
            }),
            FakePage::Panics => panic!("page {} crashed while loading", self.url),
            _ if self.ready_delay > timeout => {
                tokio::time::sleep(timeout).await;
                Ok(Readiness::TimedOut)
            }
            _ => {
                tokio::time::sleep(self.ready_delay).await;
                self.ready = true;
                Ok(Readiness::Ready)
            }
        }
    }

    fn document(&self) -> FetchResult<Box<dyn Document + '_>> {
        match &self.content {
            FakePage::Ready(elements) if self.ready && self.open => {
                Ok(Box::new(FakeDocument { elements }))
            }
            _ => Err(FetchError::NotReady {
                url: self.url.to_string(),
            }),
        }
    }

    async fn close(&mut self) {
        self.release(true);
    }
}

impl Drop for FakeTab {
    fn drop(&mut self) {
        self.release(false);
    }
}

struct FakeDocument<'a> {
    elements: &'a [(String, FakeElement)],
}

impl<'a> Document for FakeDocument<'a> {
    fn query_all(&self, selector: &str) -> FetchResult<Vec<Box<dyn Element + '_>>> {
        Ok(self
            .elements
            .iter()
            .filter(|(s, _)| s == selector)
            .map(|(_, element)| Box::new(element.clone()) as Box<dyn Element + '_>)
            .collect())
    }
}
