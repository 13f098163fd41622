// src/models/mod.rs

//! Domain models for the notice watcher.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod fingerprint;
mod notice;
mod page;
mod selectors;

// Re-export all public types
pub use config::{
    Config, CrawlerConfig, NotifyConfig, NotifyMode, PAGE_PLACEHOLDER, PathsConfig, ProviderConfig,
};
pub use fingerprint::{Fingerprint, content_digest};
pub use notice::{Notice, NoticeStub};
pub use page::{CURRENT_PAGES, PageCatalog, PageIndex, PageKind};
pub use selectors::{NewsSelectors, parse_selector};
