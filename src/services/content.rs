// src/services/content.rs

//! Notice content fetcher.
//!
//! Downloads a notice's detail page, cuts out its header and body blocks and
//! converts them to repaired Markdown.

use std::sync::Arc;

use reqwest::Client;
use scraper::Html;

use crate::error::Result;
use crate::models::{NewsSelectors, Notice, parse_selector};
use crate::utils::{http, markdown};

/// HTML to Markdown conversion.
pub trait Converter: Send + Sync {
    fn to_markdown(&self, html: &str) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Html2MdConverter;

impl Converter for Html2MdConverter {
    fn to_markdown(&self, html: &str) -> String {
        html2md::parse_html(html)
    }
}

/// Fetches notice bodies.
#[derive(Clone)]
pub struct ContentFetcher {
    client: Client,
    selectors: NewsSelectors,
    converter: Arc<dyn Converter>,
}

impl ContentFetcher {
    /// Create a content fetcher using the default converter.
    pub fn new(client: Client, selectors: NewsSelectors) -> Self {
        Self::with_converter(client, selectors, Arc::new(Html2MdConverter))
    }

    pub fn with_converter(
        client: Client,
        selectors: NewsSelectors,
        converter: Arc<dyn Converter>,
    ) -> Self {
        Self {
            client,
            selectors,
            converter,
        }
    }

    /// Fetch and convert the notice body.
    ///
    /// Network failures are errors. A page without the expected detail
    /// structure leaves the content untouched and only logs a warning.
    pub async fn fetch(&self, mut notice: Notice) -> Result<Notice> {
        let html = http::fetch_text(&self.client, &notice.url).await?;

        match render_detail(&html, &self.selectors, self.converter.as_ref())? {
            Some(content) => {
                notice.content = content;
                log::debug!("{} content fetched", notice.title);
            }
            None => {
                log::warn!(
                    "Detail structure not found for '{}' ({}), content left unchanged",
                    notice.title,
                    notice.url
                );
            }
        }
        Ok(notice)
    }
}

/// Extract the header and body blocks of a detail page as one HTML fragment.
///
/// Returns `None` when the detail container or either block is missing.
pub fn extract_detail(document: &Html, selectors: &NewsSelectors) -> Result<Option<String>> {
    let detail_sel = parse_selector(&selectors.detail_selector)?;
    let header_sel = parse_selector(&selectors.header_selector)?;
    let body_sel = parse_selector(&selectors.body_selector)?;

    let Some(detail) = document.select(&detail_sel).next() else {
        return Ok(None);
    };
    let header = detail.select(&header_sel).next();
    let body = detail.select(&body_sel).next();

    Ok(match (header, body) {
        (Some(header), Some(body)) => Some(format!("{}\n{}", header.html(), body.html())),
        _ => None,
    })
}

/// Convert a detail page to repaired Markdown, if it has the expected structure.
pub fn render_detail(
    html: &str,
    selectors: &NewsSelectors,
    converter: &dyn Converter,
) -> Result<Option<String>> {
    let document = Html::parse_document(html);
    let Some(fragment) = extract_detail(&document, selectors)? else {
        return Ok(None);
    };
    let converted = converter.to_markdown(&fragment);
    Ok(Some(markdown::repair(&converted)))
}
