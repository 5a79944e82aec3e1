use serde::Deserialize;

/// Listing page of the ranked titles
pub const DEFAULT_SEED_PAGE_URL: &str = "https://www.imdb.com/chart/top/?ref_=nv_mv_250";

/// Path segment appended to a title URL to reach its full credits
pub const DEFAULT_DETAIL_PATH_SUFFIX: &str = "/fullcredits/";

/// Row text that marks the end of the principal cast
pub const DEFAULT_SENTINEL: &str = "Rest of cast";

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Main configuration structure for Cast-Harvest
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub fetcher: FetcherConfig,
    pub selectors: SelectorConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Listing page the seed titles are discovered from
    #[serde(rename = "seed-page-url")]
    pub seed_page_url: String,

    /// Maximum number of detail pages open at the same time
    #[serde(rename = "max-concurrent-pages-open")]
    pub max_concurrent_pages_open: u32,

    /// Upper bound on waiting for a page to become ready (milliseconds)
    #[serde(rename = "ready-timeout-ms")]
    pub ready_timeout_ms: u64,

    /// Path suffix that turns a title URL into its detail page URL
    #[serde(rename = "detail-path-suffix")]
    pub detail_path_suffix: String,

    /// Maximum number of discovered titles to crawl (0 = all)
    #[serde(rename = "max-items")]
    pub max_items: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            seed_page_url: DEFAULT_SEED_PAGE_URL.to_string(),
            max_concurrent_pages_open: 10,
            ready_timeout_ms: 60_000,
            detail_path_suffix: DEFAULT_DETAIL_PATH_SUFFIX.to_string(),
            max_items: 0,
        }
    }
}

/// HTTP fetcher configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Full User-Agent header value
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// TCP/TLS connect timeout (milliseconds)
    #[serde(rename = "connect-timeout-ms")]
    pub connect_timeout_ms: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            connect_timeout_ms: 10_000,
        }
    }
}

/// CSS selectors and markers describing the page structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// One element per ranked entry on the listing page
    #[serde(rename = "listing-item")]
    pub listing_item: String,

    /// Link inside a listing entry pointing at the title page
    #[serde(rename = "listing-link")]
    pub listing_link: String,

    /// Rows of the cast table on a detail page
    #[serde(rename = "cast-row")]
    pub cast_row: String,

    /// Cell whose presence marks a row as a cast record (holds the role)
    #[serde(rename = "role-marker")]
    pub role_marker: String,

    /// Cell holding the performer's name, relative to the row
    #[serde(rename = "name-cell")]
    pub name_cell: String,

    /// Profile link inside the name cell
    #[serde(rename = "profile-link")]
    pub profile_link: String,

    /// Row text after which no further rows are scanned
    pub sentinel: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            listing_item: "div.ipc-title.ipc-title--base.ipc-title--title.cli-title".to_string(),
            listing_link: "a".to_string(),
            cast_row: ".cast_list tr".to_string(),
            role_marker: ".character".to_string(),
            name_cell: ".primary_photo + td".to_string(),
            profile_link: "a".to_string(),
            sentinel: DEFAULT_SENTINEL.to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the CSV file receiving the records
    #[serde(rename = "csv-path")]
    pub csv_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: "imdb_top250_cast.csv".to_string(),
        }
    }
}
