// src/models/fingerprint.rs

//! Persisted record of the last notice observed.

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};

use super::Notice;

/// Identity of a notice used for change detection.
///
/// Serialized as the sole JSON object of the fingerprint file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Fingerprint {
    pub tag: String,
    pub title: String,
    pub time: String,

    /// Lowercase hex MD5 of the Markdown content
    pub content_md5: String,
}

impl Fingerprint {
    /// Fingerprint a notice, hashing its current content.
    pub fn of(notice: &Notice) -> Self {
        Self {
            tag: notice.tag.clone(),
            title: notice.title.clone(),
            time: notice.time.clone(),
            content_md5: content_digest(&notice.content),
        }
    }

    /// Whether tag, title and time all match the notice.
    pub fn same_metadata(&self, notice: &Notice) -> bool {
        self.tag == notice.tag && self.title == notice.title && self.time == notice.time
    }

    /// Whether the notice is the one this fingerprint was taken from.
    ///
    /// The content hash is only computed when the metadata matches.
    pub fn describes(&self, notice: &Notice) -> bool {
        self.same_metadata(notice) && self.content_md5 == content_digest(&notice.content)
    }
}

/// Lowercase hex MD5 digest of a content string.
pub fn content_digest(content: &str) -> String {
    hex::encode(Md5::digest(content.as_bytes()))
}
