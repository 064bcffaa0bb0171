use super::NoteStore;
use crate::error::Result;
use std::sync::{Arc, Mutex, PoisonError};

/// In-memory store for testing and development.
/// Does NOT persist data.
///
/// Clones share one save log, so a test can keep a handle after moving the
/// store into an editor.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    saves: Arc<Mutex<Vec<String>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every persisted content, oldest first.
    pub fn saves(&self) -> Vec<String> {
        self.saves
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn last_saved(&self) -> Option<String> {
        self.saves
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl NoteStore for InMemoryStore {
    fn persist(&mut self, content: &str) -> Result<()> {
        self.saves
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(content.to_string());
        Ok(())
    }
}
