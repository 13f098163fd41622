//! Change detection against the persisted fingerprint.
//!
//! The detector keeps exactly one fingerprint: the one taken from the last
//! notice passed to [`ChangeDetector::check_and_update`]. Each call does one
//! read and at most one write under the store's update lock, so detectors
//! sharing a store cannot both report the same notice.

use crate::error::Result;
use crate::models::{Fingerprint, Notice};
use crate::storage::FingerprintStore;

/// Outcome of comparing a notice with the stored fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Unchanged,
    Changed,
}

impl Change {
    pub fn is_changed(&self) -> bool {
        matches!(self, Change::Changed)
    }
}

/// Compares notices with the stored fingerprint and keeps it current.
pub struct ChangeDetector<S> {
    store: S,
}

impl<S: FingerprintStore> ChangeDetector<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Report whether `latest` differs from the stored fingerprint, replacing
    /// the fingerprint when it does.
    ///
    /// No stored fingerprint counts as a change. Store errors are returned
    /// before any outcome is decided.
    pub async fn check_and_update(&self, latest: &Notice) -> Result<Change> {
        let _guard = self.store.update_lock().lock().await;

        if let Some(previous) = self.store.load_fingerprint().await? {
            if previous.describes(latest) {
                log::debug!("Fingerprint unchanged for '{}'", latest.title);
                return Ok(Change::Unchanged);
            }
            if previous.same_metadata(latest) {
                log::warn!(
                    "Content of '{}' ({}) changed without a new timestamp",
                    latest.title,
                    latest.time
                );
            }
        } else {
            log::info!("No fingerprint stored yet");
        }

        self.store
            .save_fingerprint(&Fingerprint::of(latest))
            .await?;
        Ok(Change::Changed)
    }
}
