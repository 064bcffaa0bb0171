//! # Command Layer
//!
//! Business logic behind the `gridflow` client. Each command drives a
//! [`NoteEditor`](crate::editor::NoteEditor) and returns a [`CmdResult`]; none
//! of them print or exit. Formatting is the client's job.

use crate::config::EditorConfig;
use crate::model::EditorStats;

pub mod config;
pub mod export;
pub mod helpers;
pub mod replace;
pub mod search;
pub mod stats;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A search match located for display. Offsets are characters; `line` and
/// `column` are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub messages: Vec<CmdMessage>,
    pub stats: Option<EditorStats>,
    pub hits: Vec<SearchHit>,
    pub replacements: Option<usize>,
    pub export: Option<String>,
    pub config: Option<EditorConfig>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_stats(mut self, stats: EditorStats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_hits(mut self, hits: Vec<SearchHit>) -> Self {
        self.hits = hits;
        self
    }

    pub fn with_replacements(mut self, count: usize) -> Self {
        self.replacements = Some(count);
        self
    }

    pub fn with_export(mut self, json: String) -> Self {
        self.export = Some(json);
        self
    }

    pub fn with_config(mut self, config: EditorConfig) -> Self {
        self.config = Some(config);
        self
    }
}
