// src/pipeline/archive.rs

//! Archive a listing page as Markdown files.

use crate::error::Result;
use crate::models::PageIndex;
use crate::services::NewsService;
use crate::storage::NoticeArchive;

/// Summary of an archive run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub archived: usize,
    /// Notices skipped because their content could not be fetched
    pub skipped: usize,
}

/// Fetch a full page and archive every notice that has content.
pub async fn run_archive(
    news: &NewsService,
    archive: &dyn NoticeArchive,
    index: PageIndex,
) -> Result<ArchiveSummary> {
    let notices = news.fetch_page(index).await?;
    let mut summary = ArchiveSummary::default();

    for notice in &notices {
        if !notice.has_content() {
            log::warn!("Skipping '{}': no content", notice.title);
            summary.skipped += 1;
            continue;
        }
        archive.archive_notice(notice).await?;
        summary.archived += 1;
    }

    log::info!(
        "Archived {} notices from page {} ({} skipped)",
        summary.archived,
        index,
        summary.skipped
    );
    Ok(summary)
}
