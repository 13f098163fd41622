//! Storage abstractions for watcher state.
//!
//! ## Directory Structure
//!
//! ```text
//! storage/
//! ├── config.toml           # Watcher configuration
//! ├── last_notice.json      # Fingerprint of the last notice seen
//! └── news/                 # Archived notices as Markdown
//!     └── {tag}/
//!         └── {time}_{title}.md
//! ```

pub mod local;

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::Result;
use crate::models::{Fingerprint, Notice};

// Re-export for convenience
pub use local::LocalStorage;

/// Trait for the single-record fingerprint store.
#[async_trait]
pub trait FingerprintStore: Send + Sync {
    /// Read the stored fingerprint. `None` when nothing has been stored yet.
    async fn load_fingerprint(&self) -> Result<Option<Fingerprint>>;

    /// Replace the stored fingerprint.
    async fn save_fingerprint(&self, fingerprint: &Fingerprint) -> Result<()>;

    /// Lock held across one load-compare-save cycle. Every handle to the same
    /// record must return the same lock.
    fn update_lock(&self) -> &Mutex<()>;
}

#[async_trait]
impl<T: FingerprintStore + ?Sized> FingerprintStore for Arc<T> {
    async fn load_fingerprint(&self) -> Result<Option<Fingerprint>> {
        self.as_ref().load_fingerprint().await
    }

    async fn save_fingerprint(&self, fingerprint: &Fingerprint) -> Result<()> {
        self.as_ref().save_fingerprint(fingerprint).await
    }

    fn update_lock(&self) -> &Mutex<()> {
        self.as_ref().update_lock()
    }
}

/// Trait for notice archive backends.
#[async_trait]
pub trait NoticeArchive: Send + Sync {
    /// Write a notice's Markdown content, returning where it went.
    async fn archive_notice(&self, notice: &Notice) -> Result<PathBuf>;
}
