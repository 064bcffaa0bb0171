use crate::error::GridflowError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = GridflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(GridflowError::InvalidTheme(s.to_string())),
        }
    }
}

/// Immutable capture of the buffer at one point in time, used for undo/redo.
///
/// Equality covers content, tags and cursor position only. Two snapshots taken
/// at different moments of the same document state compare equal.
#[derive(Debug, Clone, Serialize)]
pub struct EditorState {
    content: String,
    timestamp: DateTime<Utc>,
    tags: Vec<String>,
    cursor_position: usize,
}

impl EditorState {
    pub fn new(content: String, tags: Vec<String>, cursor_position: usize) -> Self {
        Self {
            content,
            timestamp: Utc::now(),
            tags,
            cursor_position,
        }
    }

    pub fn empty() -> Self {
        Self::new(String::new(), Vec::new(), 0)
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }
}

impl PartialEq for EditorState {
    fn eq(&self, other: &Self) -> bool {
        self.content == other.content
            && self.tags == other.tags
            && self.cursor_position == other.cursor_position
    }
}

impl Eq for EditorState {}

/// Read-only statistics derived from the editor at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditorStats {
    pub characters: usize,
    pub words: usize,
    pub lines: usize,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub last_saved: DateTime<Utc>,
    pub theme: Theme,
    pub is_modified: bool,
    pub tags_count: usize,
    pub undo_available: bool,
    pub redo_available: bool,
}

/// The exported form of a note. Field order matches the JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteExport {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub theme: Theme,
}

impl NoteExport {
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
