//! Local filesystem storage implementation.
//!
//! ## Storage Layout
//!
//! ```text
//! {root}/
//! ├── last_notice.json      # Fingerprint (single JSON object)
//! └── news/                 # Archive
//!     └── {tag}/{time}_{title}.md
//! ```
//!
//! Every write goes to a temporary file first and is renamed into place, so a
//! failed write never leaves a truncated fingerprint behind.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::error::{AppError, Result};
use crate::models::{Fingerprint, Notice, PathsConfig};
use crate::storage::{FingerprintStore, NoticeArchive};
use crate::utils::sanitize_file_name;

/// Local filesystem storage backend.
///
/// Clones share one fingerprint update lock. Separately constructed instances
/// over the same directory do not.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
    paths: PathsConfig,
    update_lock: Arc<Mutex<()>>,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory with default file names.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self::with_paths(root_dir, PathsConfig::default())
    }

    /// Create a LocalStorage with configured file names.
    pub fn with_paths(root_dir: impl Into<PathBuf>, paths: PathsConfig) -> Self {
        Self {
            root_dir: root_dir.into(),
            paths,
            update_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes_at(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        self.ensure_dir(path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }

    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        self.write_bytes_at(&self.path(key), bytes).await
    }

    /// Write JSON data.
    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(key, &bytes).await
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Read JSON data.
    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read_bytes(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Archive path for a notice: `{archive}/{tag}/{time}_{title}.md`.
    pub fn archive_path(&self, notice: &Notice) -> PathBuf {
        let file_name = format!(
            "{}_{}.md",
            sanitize_file_name(&notice.time),
            sanitize_file_name(&notice.title)
        );
        self.paths
            .archive_root(&self.root_dir)
            .join(sanitize_file_name(&notice.tag))
            .join(file_name)
    }
}

#[async_trait]
impl FingerprintStore for LocalStorage {
    async fn load_fingerprint(&self) -> Result<Option<Fingerprint>> {
        self.read_json(&self.paths.fingerprint_file).await
    }

    async fn save_fingerprint(&self, fingerprint: &Fingerprint) -> Result<()> {
        self.write_json(&self.paths.fingerprint_file, fingerprint)
            .await
    }

    fn update_lock(&self) -> &Mutex<()> {
        &self.update_lock
    }
}

#[async_trait]
impl NoticeArchive for LocalStorage {
    async fn archive_notice(&self, notice: &Notice) -> Result<PathBuf> {
        let path = self.archive_path(notice);
        self.write_bytes_at(&path, notice.content.as_bytes()).await?;
        log::info!("Archived '{}' to {}", notice.title, path.display());
        Ok(path)
    }
}
