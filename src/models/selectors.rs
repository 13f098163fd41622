// src/models/selectors.rs

//! CSS selectors for scraping the news listing and detail pages.

use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// CSS selectors for scraping the provider's pages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewsSelectors {
    /// Container holding the notice rows on a listing page
    #[serde(default = "defaults::list")]
    pub list_selector: String,

    /// Selector for each row within the listing container
    #[serde(default = "defaults::row")]
    pub row_selector: String,

    /// Title anchor within a row; its `href` is the detail link
    #[serde(default = "defaults::title")]
    pub title_selector: String,

    /// Tag element within a row
    #[serde(default = "defaults::tag")]
    pub tag_selector: String,

    /// Timestamp element within a row
    #[serde(default = "defaults::time")]
    pub time_selector: String,

    /// Container of a notice on its detail page
    #[serde(default = "defaults::detail")]
    pub detail_selector: String,

    /// Header block inside the detail container
    #[serde(default = "defaults::header")]
    pub header_selector: String,

    /// Body block inside the detail container
    #[serde(default = "defaults::body")]
    pub body_selector: String,

    /// Pagination control on a listing page
    #[serde(default = "defaults::pagination")]
    pub pagination_selector: String,

    /// Text of the pagination link pointing at the next older page
    #[serde(default = "defaults::next_page_text")]
    pub next_page_text: String,
}

impl Default for NewsSelectors {
    fn default() -> Self {
        Self {
            list_selector: defaults::list(),
            row_selector: defaults::row(),
            title_selector: defaults::title(),
            tag_selector: defaults::tag(),
            time_selector: defaults::time(),
            detail_selector: defaults::detail(),
            header_selector: defaults::header(),
            body_selector: defaults::body(),
            pagination_selector: defaults::pagination(),
            next_page_text: defaults::next_page_text(),
        }
    }
}

impl NewsSelectors {
    /// Parse every selector, reporting the first one that is invalid.
    pub fn validate(&self) -> Result<()> {
        for s in [
            &self.list_selector,
            &self.row_selector,
            &self.title_selector,
            &self.tag_selector,
            &self.time_selector,
            &self.detail_selector,
            &self.header_selector,
            &self.body_selector,
            &self.pagination_selector,
        ] {
            parse_selector(s)?;
        }
        Ok(())
    }
}

/// Parse a CSS selector, mapping failures to [`AppError::Selector`].
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

mod defaults {
    pub fn list() -> String {
        "ul.newslists".into()
    }
    pub fn row() -> String {
        "li".into()
    }
    pub fn title() -> String {
        "a.cltit".into()
    }
    pub fn tag() -> String {
        "a.cltag".into()
    }
    pub fn time() -> String {
        "span.cltime".into()
    }
    pub fn detail() -> String {
        "div.newsconcent.details".into()
    }
    pub fn header() -> String {
        "div.ahd".into()
    }
    pub fn body() -> String {
        "div.artws".into()
    }
    pub fn pagination() -> String {
        "div.cpages".into()
    }
    pub fn next_page_text() -> String {
        "下一页 >".into()
    }
}
