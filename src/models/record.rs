//! Paste record model
//!
//! The value type the paste-deduplication caller stores in the cache.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata remembered about an uploaded paste.
///
/// Callers look this up before uploading: a hit means the paste already
/// exists and only needs re-uploading when the source changed since.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasteRecord {
    /// Identifier returned by the paste service
    pub paste_id: String,
    /// When the source content was last edited, if known
    #[serde(default)]
    pub last_modified: Option<DateTime<Utc>>,
}

impl PasteRecord {
    /// Creates a record without a modification timestamp.
    pub fn new(paste_id: impl Into<String>) -> Self {
        Self {
            paste_id: paste_id.into(),
            last_modified: None,
        }
    }

    pub fn with_last_modified(mut self, at: DateTime<Utc>) -> Self {
        self.last_modified = Some(at);
        self
    }

    /// Whether this record still reflects a source edited at `edited_at`.
    ///
    /// When the source has no edit time there is nothing newer to compare
    /// against, so the record is current. A record without a timestamp is
    /// stale once the source reports an edit.
    pub fn is_current_for(&self, edited_at: Option<DateTime<Utc>>) -> bool {
        match (self.last_modified, edited_at) {
            (Some(recorded), Some(edited)) => recorded >= edited,
            (None, Some(_)) => false,
            (_, None) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_record_new() {
        let record = PasteRecord::new("abc123");
        assert_eq!(record.paste_id, "abc123");
        assert!(record.last_modified.is_none());
    }

    #[test]
    fn test_record_current_without_edit() {
        let record = PasteRecord::new("abc123");
        assert!(record.is_current_for(None));
    }

    #[test]
    fn test_record_stale_after_edit() {
        let now = Utc::now();
        let record = PasteRecord::new("abc123").with_last_modified(now);

        assert!(record.is_current_for(Some(now)));
        assert!(record.is_current_for(Some(now - Duration::seconds(5))));
        assert!(!record.is_current_for(Some(now + Duration::seconds(5))));
    }

    #[test]
    fn test_record_without_timestamp_is_stale_once_edited() {
        let record = PasteRecord::new("abc123");
        assert!(!record.is_current_for(Some(Utc::now())));
    }

    #[test]
    fn test_record_deserialize_without_timestamp() {
        let json = r#"{"paste_id":"abc123"}"#;
        let record: PasteRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record, PasteRecord::new("abc123"));
    }
}
