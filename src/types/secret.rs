use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// One stored item in the vault.
///
/// Secrets only ever exist in memory while the vault is unlocked and are
/// persisted exclusively inside the encrypted collection blob. The content
/// is wiped from memory when the value is dropped.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct Secret {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(rename = "created")]
    #[zeroize(skip)]
    pub created_at: DateTime<Utc>,
}

impl Secret {
    /// Creates a secret with a fresh random id and the current time.
    pub fn new(title: &str, content: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
        }
    }

    /// Case-insensitive substring match against title or content.
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.content.to_lowercase().contains(needle)
    }
}

// Content never shows up in debug output or logs.
impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("content", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}
