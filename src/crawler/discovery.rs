//! Seed discovery from the ranked listing page

use crate::config::SelectorConfig;
use crate::crawler::page::{Page, PageFetcher, Readiness};
use crate::url::resolve_href;
use crate::{CrawlError, FetchResult};
use std::time::Duration;
use url::Url;

/// Collects the title URLs listed on `seed_page`
///
/// Listing order is kept and duplicates are not removed. Entries without a
/// usable link are skipped with a warning.
///
/// # Returns
///
/// * `Ok(Vec<Url>)` - At least one title URL
/// * `Err(CrawlError::DiscoveryEmpty)` - The page listed nothing
/// * `Err(CrawlError::ItemTimeout)` - The listing page never became ready
/// * `Err(CrawlError::FetcherFault)` - The listing page could not be loaded
pub async fn discover_seeds(
    fetcher: &dyn PageFetcher,
    seed_page: &Url,
    selectors: &SelectorConfig,
    ready_timeout: Duration,
) -> Result<Vec<Url>, CrawlError> {
    tracing::info!(url = %seed_page, "Fetching the listing page");

    let mut page = fetcher.open(seed_page).await?;
    let outcome = load_listing(page.as_mut(), selectors, ready_timeout).await;
    page.close().await;

    let seeds = outcome?;
    if seeds.is_empty() {
        return Err(CrawlError::DiscoveryEmpty {
            url: seed_page.to_string(),
        });
    }

    tracing::info!(url = %seed_page, seeds = seeds.len(), "Listing entries discovered");
    Ok(seeds)
}

async fn load_listing(
    page: &mut dyn Page,
    selectors: &SelectorConfig,
    ready_timeout: Duration,
) -> Result<Vec<Url>, CrawlError> {
    let readiness = page.wait_ready(ready_timeout).await?;
    match readiness {
        Readiness::Ready => Ok(collect_seed_urls(page, selectors)?),
        Readiness::TimedOut => Err(CrawlError::ItemTimeout {
            url: page.url().to_string(),
            timeout_ms: ready_timeout.as_millis() as u64,
        }),
    }
}

fn collect_seed_urls(page: &dyn Page, selectors: &SelectorConfig) -> FetchResult<Vec<Url>> {
    let document = page.document()?;
    let mut seeds = Vec::new();

    for (index, entry) in document
        .query_all(&selectors.listing_item)?
        .iter()
        .enumerate()
    {
        let href = entry
            .query_first(&selectors.listing_link)?
            .and_then(|link| link.attribute("href"));

        match href.as_deref().and_then(|h| resolve_href(h, page.url())) {
            Some(url) => seeds.push(url),
            None => tracing::warn!(entry = index, href = ?href, "Listing entry has no usable link"),
        }
    }

    Ok(seeds)
}
