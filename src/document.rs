//! The user-owned document record.
//!
//! Records are stored as JSON objects keyed by id. Field names and the
//! millisecond timestamps match the layout the browser build of the
//! application wrote, so existing collections load unchanged.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title given to documents saved or renamed without one.
pub const DEFAULT_TITLE: &str = "NEW DOCUMENT";

/// Represents a single user-owned document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    /// Unique identifier, never reused
    pub id: String,
    /// Sidebar and search label
    pub name: String,
    /// Editable title; kept equal to `name` by save and rename
    #[serde(default)]
    pub title: String,
    /// Serialized rendered markup, opaque to the store
    #[serde(default)]
    pub content: String,
    /// When the document was created
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// Last save time
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
    /// Read by the dashboard; nothing in the store sets it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
}

impl DocumentRecord {
    /// Creates a record stamped with the current time.
    pub fn new(id: String, name: String, title: String, content: String) -> Self {
        let now = Utc::now();

        DocumentRecord {
            id,
            name,
            title,
            content,
            created_at: Some(now),
            updated_at: Some(now),
            is_favorite: None,
        }
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite.unwrap_or(false)
    }

    /// Replaces the content and refreshes `updated_at`.
    pub(crate) fn touch_content(&mut self, content: String) {
        self.content = content;
        self.updated_at = Some(Utc::now());
    }

    /// Sets title and name together.
    pub(crate) fn set_title(&mut self, title: String) {
        self.name = title.clone();
        self.title = title;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_browser_layout() {
        let json = r#"{
            "id": "doc-1700000000000-2",
            "name": "Shopping",
            "title": "Shopping",
            "content": "<p>eggs</p>",
            "createdAt": 1700000000000,
            "updatedAt": 1700000500000,
            "isFavorite": true
        }"#;

        let record: DocumentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name, "Shopping");
        assert_eq!(
            record.created_at.unwrap().timestamp_millis(),
            1_700_000_000_000
        );
        assert!(record.is_favorite());
    }

    #[test]
    fn missing_optional_fields_default() {
        // Notes created by the browser build carry no timestamps.
        let json = r#"{"id": "note-1-1", "name": "New Note 1", "title": "NEW NOTE"}"#;

        let record: DocumentRecord = serde_json::from_str(json).unwrap();
        assert!(record.created_at.is_none());
        assert!(record.content.is_empty());
        assert!(!record.is_favorite());

        let out = serde_json::to_value(&record).unwrap();
        assert!(out.get("createdAt").is_none());
        assert!(out.get("isFavorite").is_none());
    }
}
