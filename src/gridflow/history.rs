//! Undo/redo history: two bounded stacks of [`EditorState`] snapshots.
//!
//! The undo stack holds the states that preceded each edit. Undoing hands the
//! caller the most recent of them and parks the state being left behind on the
//! redo stack; redoing is the mirror image. Any fresh [`push`](UndoRedoManager::push)
//! clears the redo stack.
//!
//! Both stacks evict their oldest entry once `max_history` is exceeded.

use crate::model::EditorState;
use std::collections::VecDeque;

pub const DEFAULT_MAX_HISTORY: usize = 100;

#[derive(Debug, Clone)]
pub struct UndoRedoManager {
    max_history: usize,
    undo_stack: VecDeque<EditorState>,
    redo_stack: VecDeque<EditorState>,
}

impl Default for UndoRedoManager {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}

impl UndoRedoManager {
    pub fn new(max_history: usize) -> Self {
        Self {
            max_history,
            undo_stack: VecDeque::with_capacity(max_history.min(DEFAULT_MAX_HISTORY)),
            redo_stack: VecDeque::new(),
        }
    }

    pub fn max_history(&self) -> usize {
        self.max_history
    }

    /// Record the state preceding an edit. Clears the redo stack.
    pub fn push(&mut self, state: EditorState) {
        push_bounded(&mut self.undo_stack, state, self.max_history);
        self.redo_stack.clear();
    }

    /// Step back. `current` is the state being left and becomes redoable.
    ///
    /// Returns `None` (and leaves both stacks untouched) when there is nothing to undo.
    pub fn undo(&mut self, current: EditorState) -> Option<EditorState> {
        let previous = self.undo_stack.pop_back()?;
        push_bounded(&mut self.redo_stack, current, self.max_history);
        Some(previous)
    }

    /// Step forward again. `current` goes back onto the undo stack.
    pub fn redo(&mut self, current: EditorState) -> Option<EditorState> {
        let next = self.redo_stack.pop_back()?;
        push_bounded(&mut self.undo_stack, current, self.max_history);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

fn push_bounded(stack: &mut VecDeque<EditorState>, state: EditorState, max: usize) {
    if max == 0 {
        return;
    }
    while stack.len() >= max {
        stack.pop_front();
    }
    stack.push_back(state);
}
