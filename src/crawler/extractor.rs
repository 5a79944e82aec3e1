//! Cast row extraction
//!
//! Rows are scanned in document order. A row carrying a role marker becomes
//! an `Actor`; every row is then checked for the sentinel text, and the first
//! row containing it stops the scan. The sentinel row's own record, if it has
//! one, is kept.

use crate::config::SelectorConfig;
use crate::crawler::page::Element;
use crate::record::Actor;
use crate::state::{ExtractorState, Termination};
use crate::url::resolve_href;
use url::Url;

/// A row that had a role marker but not the expected name structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDefect {
    /// Zero-based index of the row in document order
    pub row: usize,
    pub message: String,
}

/// Records taken from one detail page
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub records: Vec<Actor>,

    /// Rows inspected, including the sentinel or defective row
    pub rows_scanned: usize,

    pub state: ExtractorState,

    pub defect: Option<RowDefect>,
}

impl Extraction {
    pub fn termination(&self) -> Termination {
        if self.defect.is_some() {
            Termination::RowDefect
        } else if self.state.is_terminal() {
            Termination::SentinelReached
        } else {
            Termination::Exhausted
        }
    }
}

/// Turns cast table rows into records
#[derive(Debug, Clone)]
pub struct RowExtractor {
    role_marker: String,
    name_cell: String,
    profile_link: String,
    sentinel: String,
}

impl RowExtractor {
    pub fn new(selectors: &SelectorConfig) -> Self {
        Self {
            role_marker: selectors.role_marker.clone(),
            name_cell: selectors.name_cell.clone(),
            profile_link: selectors.profile_link.clone(),
            sentinel: selectors.sentinel.clone(),
        }
    }

    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    /// Scans `rows` until the sentinel row, a defective row, or the end
    ///
    /// Profile links are resolved against `page_url`; a name cell without
    /// a usable link yields an empty `profile_url`.
    pub fn extract(&self, rows: &[Box<dyn Element + '_>], page_url: &Url) -> Extraction {
        let mut extraction = Extraction::default();

        for (index, row) in rows.iter().enumerate() {
            extraction.rows_scanned += 1;

            match self.extract_row(row.as_ref(), page_url) {
                Ok(Some(actor)) => extraction.records.push(actor),
                Ok(None) => {}
                Err(message) => {
                    extraction.defect = Some(RowDefect {
                        row: index,
                        message,
                    });
                    break;
                }
            }

            let sentinel_found = row.text().contains(&self.sentinel);
            extraction.state = extraction.state.after_row(sentinel_found);
            if extraction.state.is_terminal() {
                tracing::debug!(
                    row = index,
                    sentinel = %self.sentinel,
                    state = %extraction.state,
                    "Sentinel reached"
                );
                break;
            }
        }

        extraction
    }

    /// Builds the record for one row, or None if it has no role marker
    fn extract_row(&self, row: &dyn Element, page_url: &Url) -> Result<Option<Actor>, String> {
        let Some(marker) = row
            .query_first(&self.role_marker)
            .map_err(|e| e.to_string())?
        else {
            return Ok(None);
        };

        let name_cell = row
            .query_first(&self.name_cell)
            .map_err(|e| e.to_string())?
            .ok_or_else(|| format!("role marker present but no '{}' cell", self.name_cell))?;

        let href = name_cell
            .query_first(&self.profile_link)
            .map_err(|e| e.to_string())?
            .and_then(|link| link.attribute("href"));

        let profile_url = match href {
            Some(href) => match resolve_href(&href, page_url) {
                Some(url) => url.to_string(),
                None => {
                    tracing::debug!(href = %href, "Ignoring unusable profile link");
                    String::new()
                }
            },
            None => String::new(),
        };

        Ok(Some(Actor::new(&name_cell.text(), profile_url, &marker.text())))
    }
}
