//! Shared wire types for the local hub HTTP API and its clients.
//!
//! Field names follow the JSON the browser frontend already speaks
//! (camelCase keys, optional fields omitted when absent).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `updatedAt` value reported when a note is read back from disk.
pub const UPDATED_AT_UNKNOWN: &str = "n/a";

// =====================================================
// Request Types
// =====================================================

/// POST /clipboard/set
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SetClipboardRequest {
    pub content: String,
    /// Time to live in seconds
    pub ttl: i64,
}

/// POST /notes/save
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveNoteRequest {
    /// Empty or absent means "derive one from the title"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub title: String,
    pub body: String,
}

/// POST /todos/add
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AddTodoRequest {
    pub text: String,
}

// =====================================================
// Response Types
// =====================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetClipboardResponse {
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// =====================================================
// Domain Types
// =====================================================

/// A clipboard entry that lives until `expires_at`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipboardItem {
    pub id: String,
    pub content: String,
    pub expires_at: DateTime<Utc>,
}

impl ClipboardItem {
    /// True once `now` is strictly past the expiry instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// One parsed line of a todo.txt file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub raw: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<char>,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,
    pub contexts: Vec<String>,
    pub projects: Vec<String>,
    pub text: String,
}

/// A markdown note stored as `# <title>\n\n<body>`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub slug: String,
    pub title: String,
    pub body: String,
    /// RFC 3339 on save, [`UPDATED_AT_UNKNOWN`] on read, empty in listings
    pub updated_at: String,
}

/// Process memory snapshot served by GET /metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemStats {
    /// Bytes currently allocated on the heap
    pub alloc: u64,
    /// Cumulative bytes allocated since start
    #[serde(rename = "totalAlloc")]
    pub total_alloc: u64,
    /// Resident memory obtained from the OS
    pub sys: u64,
    /// Live OS threads (key kept for frontend compatibility)
    #[serde(rename = "numGoroutine")]
    pub num_threads: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_todo_omits_absent_optionals() {
        let todo = Todo {
            raw: "Buy milk".to_string(),
            text: "Buy milk".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert!(json.get("priority").is_none());
        assert!(json.get("creationDate").is_none());
        assert_eq!(json["contexts"], serde_json::json!([]));
        assert_eq!(json["completed"], false);
    }

    #[test]
    fn test_todo_priority_serializes_as_letter() {
        let todo = Todo {
            priority: Some('A'),
            completion_date: Some("2023-01-02".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["priority"], "A");
        assert_eq!(json["completionDate"], "2023-01-02");
    }

    #[test]
    fn test_clipboard_item_wire_keys() {
        let item = ClipboardItem {
            id: "101500.250".to_string(),
            content: "hello".to_string(),
            expires_at: Utc.with_ymd_and_hms(2024, 5, 1, 10, 15, 30).unwrap(),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["expiresAt"], "2024-05-01T10:15:30Z");
        assert_eq!(json["id"], "101500.250");
    }

    #[test]
    fn test_clipboard_item_expiry_is_strict() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let item = ClipboardItem {
            id: "x".to_string(),
            content: String::new(),
            expires_at: at,
        };
        assert!(!item.is_expired_at(at));
        assert!(item.is_expired_at(at + chrono::Duration::milliseconds(1)));
    }

    #[test]
    fn test_requests_default_missing_fields() {
        let req: SaveNoteRequest = serde_json::from_str(r#"{"title":"Hi"}"#).unwrap();
        assert_eq!(req.slug, None);
        assert_eq!(req.body, "");

        let req: SetClipboardRequest = serde_json::from_str(r#"{"content":"x"}"#).unwrap();
        assert_eq!(req.ttl, 0);
    }

    #[test]
    fn test_mem_stats_wire_keys() {
        let json = serde_json::to_value(MemStats::default()).unwrap();
        for key in ["alloc", "totalAlloc", "sys", "numGoroutine"] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
    }
}
