//! HTML document adapter
//!
//! Implements the `Document` / `Element` capability on top of `scraper`.
//! Selectors are CSS; an element query matches descendants of the element
//! while still evaluating combinators against the full document, so
//! `.primary_photo + td` inside a row finds the cell next to the photo.

use crate::crawler::page::{Document, Element};
use crate::{FetchError, FetchResult};
use scraper::{ElementRef, Html, Selector};

/// A parsed HTML page
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// Parses a full HTML document
    ///
    /// # Example
    ///
    /// ```
    /// use cast_harvest::crawler::{Document, HtmlDocument};
    ///
    /// let doc = HtmlDocument::parse("<table><tr><td class='character'>Hero</td></tr></table>");
    /// let cells = doc.query_all(".character").unwrap();
    /// assert_eq!(cells[0].text(), "Hero");
    /// ```
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }
}

impl Document for HtmlDocument {
    fn query_all(&self, selector: &str) -> FetchResult<Vec<Box<dyn Element + '_>>> {
        let selector = parse_selector(selector)?;
        Ok(self
            .html
            .select(&selector)
            .map(|element| Box::new(HtmlElement(element)) as Box<dyn Element + '_>)
            .collect())
    }
}

/// One element of an `HtmlDocument`
pub struct HtmlElement<'a>(ElementRef<'a>);

impl<'a> Element for HtmlElement<'a> {
    fn query_all(&self, selector: &str) -> FetchResult<Vec<Box<dyn Element + '_>>> {
        let selector = parse_selector(selector)?;
        Ok(self
            .0
            .select(&selector)
            .map(|element| Box::new(HtmlElement(element)) as Box<dyn Element + '_>)
            .collect())
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.value().attr(name).map(str::to_string)
    }

    fn text(&self) -> String {
        self.0.text().collect()
    }
}

fn parse_selector(selector: &str) -> FetchResult<Selector> {
    Selector::parse(selector).map_err(|e| FetchError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}
