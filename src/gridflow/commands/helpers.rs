use crate::config::EditorConfig;
use crate::editor::NoteEditor;
use crate::error::{GridflowError, Result};
use crate::store::fs::FileStore;
use std::io;
use std::path::Path;

/// Open a text file in an editor. With `writable`, saves go back to the same
/// file and a missing file opens as an empty note. Otherwise the editor has no
/// store and a missing file is an `Io` error.
///
/// Auto-save is always off: commands are one-shot and save explicitly.
pub fn open_note(path: &Path, config: &EditorConfig, writable: bool) -> Result<NoteEditor> {
    let config = config.clone().without_auto_save();
    let store = FileStore::new(path);
    let content = match store.load()? {
        Some(content) => content,
        None if writable => String::new(),
        None => {
            return Err(GridflowError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )))
        }
    };

    let editor = if writable {
        NoteEditor::with_store(&config, store)?
    } else {
        NoteEditor::new(&config)?
    };
    editor.load_content(&content);
    Ok(editor)
}

/// 1-based (line, column) of a character offset.
pub fn line_col(text: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut column = 1;
    for ch in text.chars().take(offset) {
        if ch == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn line_col_counts_from_one() {
        let text = "ab\ncd\nef";
        assert_eq!(line_col(text, 0), (1, 1));
        assert_eq!(line_col(text, 1), (1, 2));
        assert_eq!(line_col(text, 3), (2, 1));
        assert_eq!(line_col(text, 7), (3, 2));
    }

    #[test]
    fn open_note_loads_clean_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        fs::write(&path, "hello").unwrap();

        let editor = open_note(&path, &EditorConfig::default(), false).unwrap();
        assert_eq!(editor.get_content(), "hello");
        assert!(!editor.is_modified());
        assert!(!editor.can_undo());
    }

    #[test]
    fn open_missing_note_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let editor = open_note(&dir.path().join("new.txt"), &EditorConfig::default(), true).unwrap();
        assert_eq!(editor.get_content(), "");
    }

    #[test]
    fn read_only_open_of_missing_note_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");
        match open_note(&missing, &EditorConfig::default(), false) {
            Err(GridflowError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
            Err(other) => panic!("unexpected error {}", other),
            Ok(_) => panic!("missing note opened read-only"),
        }
        assert!(!missing.exists());
    }

    #[test]
    fn writable_note_saves_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        fs::write(&path, "one").unwrap();

        let editor = open_note(&path, &EditorConfig::default(), true).unwrap();
        editor.insert_text(" two", Some(3));
        editor.shutdown().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "one two");
    }
}
