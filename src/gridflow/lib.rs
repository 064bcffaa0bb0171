//! # Gridflow Architecture
//!
//! Gridflow is the editing core of a note-taking application: a text buffer
//! with undo/redo, regex search and replace, tags, a theme, statistics, JSON
//! export and periodic auto-save. It draws nothing. A UI (or the bundled
//! `gridflow` CLI) drives a [`NoteEditor`](editor::NoteEditor) and renders
//! what it reads back.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs, print.rs)                           │
//! │  - Parses arguments, formats output, owns stdout and exit   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands (commands/*.rs)                                   │
//! │  - One function per CLI verb, returns a CmdResult           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Editor (editor.rs)                                         │
//! │  - Buffer + history + search + tags behind one lock         │
//! │  - Modification subscribers, auto-save timer                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage (store/)                                           │
//! │  - NoteStore trait, FileStore and InMemoryStore             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing from `commands` inward writes to stdout or exits the process.
//!
//! ## Offsets
//!
//! Cursor positions, selections, ranges and search spans count Unicode scalar
//! values (`char`s), not bytes. Out-of-range positions are clamped to the
//! content and reversed ranges are swapped.
//!
//! ## Module Overview
//!
//! - [`editor`]: The `NoteEditor` aggregate
//! - [`buffer`]: Text content, cursor, selection and timestamps
//! - [`history`]: Bounded undo/redo stacks
//! - [`search`]: Regex find and replace
//! - [`tags`]: Tag set with usage counters
//! - [`autosave`]: Background save timer
//! - [`store`]: Persistence trait and implementations
//! - [`model`]: Snapshots, stats, export and theme types
//! - [`commands`]: Business logic behind the CLI verbs
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod autosave;
pub mod buffer;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod history;
pub mod model;
pub mod search;
pub mod store;
pub mod tags;

pub use config::EditorConfig;
pub use editor::NoteEditor;
pub use error::{GridflowError, Result};
pub use model::{EditorState, EditorStats, NoteExport, Theme};
