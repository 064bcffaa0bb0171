//! # Text Buffer
//!
//! The buffer owns the document text, the cursor and selection, the modified
//! flag and the three timestamps the editor reports.
//!
//! ## Offsets
//!
//! Every position the buffer accepts or returns is a character offset
//! (Unicode scalar values), never a byte offset. Positions past the end are
//! clamped to the end, so callers can pass stale offsets from a UI without
//! slicing into the middle of a code point.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Buffer {
    content: String,
    cursor: usize,
    selection: (usize, usize),
    modified: bool,
    revision: u64,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
    last_save_time: DateTime<Utc>,
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Buffer {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            content: String::new(),
            cursor: 0,
            selection: (0, 0),
            modified: false,
            revision: 0,
            created_at: now,
            modified_at: now,
            last_save_time: now,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selection(&self) -> (usize, usize) {
        self.selection
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Counter bumped by every mutation, used to detect edits made while a
    /// save was in flight.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }

    pub fn last_save_time(&self) -> DateTime<Utc> {
        self.last_save_time
    }

    /// Replace the whole text. The cursor and selection are clamped to the new length.
    pub fn set_content(&mut self, content: String) {
        self.content = content;
        self.clamp_positions();
    }

    /// Splice `text` in at `position` and move the cursor past it.
    pub fn insert(&mut self, position: usize, text: &str) {
        let pos = position.min(self.char_len());
        let at = byte_offset(&self.content, pos);
        self.content.insert_str(at, text);
        self.cursor = pos + text.chars().count();
        self.clamp_positions();
    }

    /// Remove the half-open span `[start, end)` and put the cursor at `start`.
    pub fn delete(&mut self, start: usize, end: usize) {
        let (start, end) = self.normalize_range(start, end);
        let from = byte_offset(&self.content, start);
        let to = byte_offset(&self.content, end);
        self.content.replace_range(from..to, "");
        self.cursor = start;
        self.clamp_positions();
    }

    pub fn set_cursor(&mut self, position: usize) {
        self.cursor = position.min(self.char_len());
    }

    pub fn set_selection(&mut self, start: usize, end: usize) {
        self.selection = self.normalize_range(start, end);
    }

    pub fn selected_text(&self) -> &str {
        let (start, end) = self.selection;
        let from = byte_offset(&self.content, start);
        let to = byte_offset(&self.content, end);
        &self.content[from..to]
    }

    /// Order and clamp a range into `[0, char_len]`.
    pub fn normalize_range(&self, start: usize, end: usize) -> (usize, usize) {
        let len = self.char_len();
        let (a, b) = (start.min(len), end.min(len));
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// Record a mutation: set the modified flag and bump `modified_at`.
    pub fn touch(&mut self) {
        self.modified = true;
        self.revision += 1;
        self.modified_at = Utc::now();
    }

    /// Record a completed save.
    pub fn mark_saved(&mut self) {
        self.modified = false;
        self.last_save_time = Utc::now();
    }

    /// Record a save of the content as it was at `revision`. The modified flag
    /// is only cleared if nothing changed since; returns whether it was.
    pub fn mark_saved_at(&mut self, revision: u64) -> bool {
        self.last_save_time = Utc::now();
        if self.revision == revision {
            self.modified = false;
            true
        } else {
            false
        }
    }

    /// Forget the modified state without recording a save (used when a
    /// document is opened).
    pub fn mark_clean(&mut self) {
        self.modified = false;
        self.revision += 1;
    }

    pub fn set_created_at(&mut self, created_at: DateTime<Utc>) {
        self.created_at = created_at;
    }

    pub fn set_modified_at(&mut self, modified_at: DateTime<Utc>) {
        self.modified_at = modified_at;
    }

    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }

    /// Number of lines; an empty buffer has one.
    pub fn line_count(&self) -> usize {
        self.content.split('\n').count()
    }

    fn clamp_positions(&mut self) {
        let len = self.char_len();
        self.cursor = self.cursor.min(len);
        self.selection = (self.selection.0.min(len), self.selection.1.min(len));
    }
}

/// Byte index of the `char_idx`-th character, or the text length when past the end.
pub fn byte_offset(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}
