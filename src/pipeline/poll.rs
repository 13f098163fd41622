// src/pipeline/poll.rs

//! One poll of the news listing.

use std::future::Future;

use crate::error::Result;
use crate::models::Notice;
use crate::services::NewsService;
use crate::storage::{FingerprintStore, NoticeArchive};

use super::detect::{Change, ChangeDetector};

/// What a poll did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome<T> {
    /// The newest notice was already reported.
    Unchanged,
    /// A new notice was handed to the callback, which returned this value.
    Delivered(T),
}

impl<T> PollOutcome<T> {
    pub fn is_delivered(&self) -> bool {
        matches!(self, PollOutcome::Delivered(_))
    }
}

/// Polls for the newest notice and reports it once.
pub struct NoticePoller<S> {
    news: NewsService,
    detector: ChangeDetector<S>,
    archive: Option<Box<dyn NoticeArchive>>,
}

impl<S: FingerprintStore> NoticePoller<S> {
    pub fn new(news: NewsService, store: S) -> Self {
        Self {
            news,
            detector: ChangeDetector::new(store),
            archive: None,
        }
    }

    /// Also archive every changed notice before delivering it.
    pub fn with_archive(mut self, archive: impl NoticeArchive + 'static) -> Self {
        self.archive = Some(Box::new(archive));
        self
    }

    /// Fetch the newest notice and deliver it if it was not seen before.
    ///
    /// Fetch, parse, fingerprint and callback errors are returned as-is;
    /// nothing is retried.
    pub async fn poll_once<F, Fut, T>(&self, deliver: F) -> Result<PollOutcome<T>>
    where
        F: FnOnce(Notice) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        log::info!("Fetching latest notice ...");
        let latest = self.news.fetch_latest().await?;

        match self.detector.check_and_update(&latest).await? {
            Change::Unchanged => {
                log::info!("No new notice");
                Ok(PollOutcome::Unchanged)
            }
            Change::Changed => {
                log::info!("New notice: {} ({})", latest.title, latest.time);
                // The fingerprint is already updated, so an archive failure
                // must not keep the notice from being delivered.
                if let Some(archive) = &self.archive {
                    if let Err(e) = archive.archive_notice(&latest).await {
                        log::warn!("Failed to archive '{}': {}", latest.title, e);
                    }
                }
                deliver(latest).await.map(PollOutcome::Delivered)
            }
        }
    }
}
