//! Pipeline entry points for watcher operations.
//!
//! - `NoticePoller`: fetch the newest notice and report it once
//! - `ChangeDetector`: compare against the stored fingerprint
//! - `run_archive`: write a listing page to Markdown files

pub mod archive;
pub mod detect;
pub mod poll;

pub use archive::{ArchiveSummary, run_archive};
pub use detect::{Change, ChangeDetector};
pub use poll::{NoticePoller, PollOutcome};
