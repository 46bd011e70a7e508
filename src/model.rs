//! Core data models for the board.
//! Screen points are continuous pixels; world positions are the integer grid
//! that entries are stored on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::StoreError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: i32,
    pub y: i32,
}

impl WorldPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A placed note as returned by the entry store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextEntry {
    pub id: String,
    pub content: String,
    pub x: i32,
    pub y: i32,
    pub created_at: DateTime<Utc>,
}

impl TextEntry {
    pub fn position(&self) -> WorldPos {
        WorldPos::new(self.x, self.y)
    }
}

/// Body of a create request. The store assigns `id` and `createdAt`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTextEntry {
    pub content: String,
    pub x: i32,
    pub y: i32,
}

impl NewTextEntry {
    pub fn at(pos: WorldPos, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            x: pos.x,
            y: pos.y,
        }
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        if self.content.trim().is_empty() {
            return Err(StoreError::Validation("content must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_reads_server_json() {
        let raw = r#"{"id":"a1","content":"hi","x":-4,"y":12,"createdAt":"2025-03-01T10:00:00Z"}"#;
        let entry: TextEntry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.position(), WorldPos::new(-4, 12));
        assert_eq!(entry.content, "hi");
    }

    #[test]
    fn create_body_has_only_content_and_coordinates() {
        let body = serde_json::to_value(NewTextEntry::at(WorldPos::new(50, 20), "hello")).unwrap();
        assert_eq!(body, serde_json::json!({"content": "hello", "x": 50, "y": 20}));
    }

    #[test]
    fn whitespace_content_fails_validation() {
        let new = NewTextEntry::at(WorldPos::default(), "   \n");
        assert!(matches!(new.validate(), Err(StoreError::Validation(_))));
        assert!(NewTextEntry::at(WorldPos::default(), "x").validate().is_ok());
    }
}
