//! # Persistence Layer
//!
//! The editor never writes anywhere itself. When a save happens, it hands the
//! current content to a [`NoteStore`], the seam behind which a UI plugs its own
//! persistence (a page dictionary, a project file, a database row).
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: writes the content to a single file.
//! - [`memory::InMemoryStore`]: records every save in memory, for tests.
//! - Any `FnMut(&str) -> Result<()> + Send` closure, for callers that just
//!   want a callback.
//!
//! ## Failure
//!
//! A failing store is not retried or swallowed. The error surfaces from
//! `NoteEditor::save` / `NoteEditor::shutdown` and the document stays marked
//! as modified, so the next save attempt writes it again.

use crate::error::Result;

pub mod fs;
pub mod memory;

/// Destination for saved note content.
pub trait NoteStore: Send {
    /// Durably persist `content`.
    fn persist(&mut self, content: &str) -> Result<()>;
}

impl<F> NoteStore for F
where
    F: FnMut(&str) -> Result<()> + Send,
{
    fn persist(&mut self, content: &str) -> Result<()> {
        self(content)
    }
}
