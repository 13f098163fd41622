// src/services/news.rs

//! News service.
//!
//! Combines the listing and content fetchers: stubs come from one listing
//! request, bodies are fetched concurrently over the shared client.

use futures::stream::{self, StreamExt};
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::{CURRENT_PAGES, Config, Notice, NoticeStub, PageIndex};
use crate::utils::http;

use super::{ContentFetcher, ListingFetcher};

/// Service producing fully populated notices.
#[derive(Clone)]
pub struct NewsService {
    listing: ListingFetcher,
    content: ContentFetcher,
    max_concurrent: usize,
}

impl NewsService {
    /// Create a service with its own HTTP client.
    pub fn new(config: &Config) -> Result<Self> {
        let client = http::create_async_client(&config.crawler)?;
        Self::with_client(config, client)
    }

    /// Create a service on an existing client. Both fetchers share its pool.
    pub fn with_client(config: &Config, client: Client) -> Result<Self> {
        Ok(Self {
            listing: ListingFetcher::new(client.clone(), config.provider.clone())?,
            content: ContentFetcher::new(client, config.provider.selectors.clone()),
            max_concurrent: config.crawler.max_concurrent.max(1),
        })
    }

    pub fn listing(&self) -> &ListingFetcher {
        &self.listing
    }

    /// Fetch the newest notice with its content.
    ///
    /// Only the first row of page 1 is fetched in full. A failure to download
    /// its body is returned rather than degraded.
    pub async fn fetch_latest(&self) -> Result<Notice> {
        let stub = self
            .listing
            .fetch(PageIndex::FIRST)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::parse("listing", "first page has no notices"))?;

        log::info!("{} added", stub.title);
        self.content.fetch(Notice::from(stub)).await
    }

    /// Fetch a listing page as stubs only.
    pub async fn fetch_stubs(&self, index: PageIndex) -> Result<Vec<NoticeStub>> {
        self.listing.fetch(index).await
    }

    /// Fetch a whole page with every notice's content.
    ///
    /// Content failures for single notices are logged and leave that notice
    /// empty. Results keep the listing order.
    pub async fn fetch_page(&self, index: PageIndex) -> Result<Vec<Notice>> {
        let stubs = self.listing.fetch(index).await?;
        for stub in &stubs {
            log::info!("{} added", stub.title);
        }

        let notices = stream::iter(stubs)
            .map(|stub| async move {
                let notice = Notice::from(stub);
                let fallback = notice.clone();
                match self.content.fetch(notice).await {
                    Ok(notice) => notice,
                    Err(error) => {
                        log::warn!("Failed to fetch content of '{}': {}", fallback.title, error);
                        fallback
                    }
                }
            })
            .buffered(self.max_concurrent)
            .collect::<Vec<_>>()
            .await;

        let missing = notices.iter().filter(|n| !n.has_content()).count();
        if missing > 0 {
            log::warn!("Page {index}: {missing} of {} notices without content", notices.len());
        }
        Ok(notices)
    }

    /// The most recent notices as stubs, walking the current pages in order.
    pub async fn list_recent(&self, limit: usize) -> Result<Vec<NoticeStub>> {
        let mut recent = Vec::with_capacity(limit);
        for ordinal in 1..=CURRENT_PAGES {
            if recent.len() >= limit {
                break;
            }
            let stubs = self.listing.fetch(PageIndex::current(ordinal)?).await?;
            if stubs.is_empty() {
                break;
            }
            recent.extend(stubs);
        }
        recent.truncate(limit);
        Ok(recent)
    }
}
