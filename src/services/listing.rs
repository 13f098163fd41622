// src/services/listing.rs

//! Listing page fetcher.
//!
//! Turns one listing page into notice stubs, and discovers how many listing
//! pages exist by reading the pagination control of the last current page.

use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{
    CURRENT_PAGES, NewsSelectors, NoticeStub, PageCatalog, PageIndex, ProviderConfig,
    parse_selector,
};
use crate::utils::{http, resolve_url};

/// Fetches and parses listing pages.
#[derive(Debug, Clone)]
pub struct ListingFetcher {
    client: Client,
    provider: ProviderConfig,
    base_url: Url,
}

impl ListingFetcher {
    /// Create a fetcher sharing the given client.
    pub fn new(client: Client, provider: ProviderConfig) -> Result<Self> {
        let base_url = Url::parse(&provider.base_url)?;
        Ok(Self {
            client,
            provider,
            base_url,
        })
    }

    /// Fetch one listing page as stubs in provider order.
    pub async fn fetch(&self, index: PageIndex) -> Result<Vec<NoticeStub>> {
        let url = self.provider.list_url(index);
        log::debug!("Fetching listing page {index} from {url}");

        let html = http::fetch_text(&self.client, &url).await?;
        let document = Html::parse_document(&html);
        let stubs = parse_listing(&document, &self.provider.selectors, &self.base_url)?;

        log::debug!("Listing page {index}: {} notices", stubs.len());
        Ok(stubs)
    }

    /// Discover the page total from the probe page's "next page" link.
    pub async fn discover(&self) -> Result<PageCatalog> {
        let probe = PageIndex::current(CURRENT_PAGES)?;
        let url = self.provider.list_url(probe);
        log::debug!("Discovering pagination from {url}");

        let html = http::fetch_text(&self.client, &url).await?;
        let document = Html::parse_document(&html);
        let catalog = parse_catalog(&document, &self.provider)?;

        log::info!("Discovered {} listing pages", catalog.total());
        Ok(catalog)
    }
}

/// Parse the notice rows of a listing document.
///
/// A missing listing container is an error; rows missing a title, tag or time
/// are skipped.
pub fn parse_listing(
    document: &Html,
    selectors: &NewsSelectors,
    base_url: &Url,
) -> Result<Vec<NoticeStub>> {
    let list_sel = parse_selector(&selectors.list_selector)?;
    let row_sel = parse_selector(&selectors.row_selector)?;
    let title_sel = parse_selector(&selectors.title_selector)?;
    let tag_sel = parse_selector(&selectors.tag_selector)?;
    let time_sel = parse_selector(&selectors.time_selector)?;

    let list = document.select(&list_sel).next().ok_or_else(|| {
        AppError::parse(
            "listing",
            format!("container '{}' not found", selectors.list_selector),
        )
    })?;

    let stubs = list
        .select(&row_sel)
        .filter_map(|row| parse_row(&row, &title_sel, &tag_sel, &time_sel, base_url))
        .collect();
    Ok(stubs)
}

fn parse_row(
    row: &ElementRef,
    title_sel: &Selector,
    tag_sel: &Selector,
    time_sel: &Selector,
    base_url: &Url,
) -> Option<NoticeStub> {
    let title_elem = row.select(title_sel).next()?;
    let tag_elem = row.select(tag_sel).next()?;
    let time_elem = row.select(time_sel).next()?;
    let href = title_elem.value().attr("href")?;

    Some(NoticeStub {
        url: resolve_url(base_url, href.trim()),
        title: element_text(&title_elem),
        tag: element_text(&tag_elem),
        time: element_text(&time_elem),
    })
}

/// Parse the page catalog from the pagination control of the probe page.
pub fn parse_catalog(document: &Html, provider: &ProviderConfig) -> Result<PageCatalog> {
    let selectors = &provider.selectors;
    let pager_sel = parse_selector(&selectors.pagination_selector)?;
    let link_sel = parse_selector("a")?;

    let pager = document.select(&pager_sel).next().ok_or_else(|| {
        AppError::parse(
            "discovery",
            format!(
                "pagination '{}' not found",
                selectors.pagination_selector
            ),
        )
    })?;

    let next_text = selectors.next_page_text.trim();
    let href = pager
        .select(&link_sel)
        .find(|a| element_text(a) == next_text)
        .and_then(|a| a.value().attr("href"))
        .ok_or_else(|| AppError::parse("discovery", format!("no '{next_text}' link")))?;

    let offset = provider
        .page_token(href)
        .and_then(|token| token.strip_prefix('n'))
        .and_then(|digits| digits.parse::<u32>().ok())
        .ok_or_else(|| {
            AppError::parse("discovery", format!("unexpected next page link '{href}'"))
        })?;

    PageCatalog::from_newest_historical(offset)
}

fn element_text(elem: &ElementRef) -> String {
    elem.text().collect::<String>().trim().to_string()
}
