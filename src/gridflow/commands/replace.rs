use crate::commands::{CmdMessage, CmdResult};
use crate::editor::NoteEditor;
use crate::error::Result;
use crate::search::is_valid_pattern;

/// Replace through the editor and save if anything changed. Whether the save
/// reaches disk depends on the store the editor was opened with.
pub fn run(
    editor: &NoteEditor,
    pattern: &str,
    replacement: &str,
    replace_all: bool,
    case_sensitive: bool,
) -> Result<CmdResult> {
    editor.set_case_sensitive(case_sensitive);
    let outcome = editor.replace(pattern, replacement, replace_all);

    let mut result = CmdResult::default().with_replacements(outcome.count);
    if !is_valid_pattern(pattern) {
        result.add_message(CmdMessage::warning(format!("Invalid pattern: {}", pattern)));
        return Ok(result);
    }
    if outcome.count == 0 {
        result.add_message(CmdMessage::info(format!("No matches for {}", pattern)));
        return Ok(result);
    }

    editor.save()?;
    let noun = if outcome.count == 1 {
        "occurrence"
    } else {
        "occurrences"
    };
    result.add_message(CmdMessage::success(format!(
        "Replaced {} {}",
        outcome.count, noun
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::config::EditorConfig;
    use crate::store::memory::InMemoryStore;

    fn editor_with(content: &str, store: &InMemoryStore) -> NoteEditor {
        let editor =
            NoteEditor::with_store(&EditorConfig::default().without_auto_save(), store.clone())
                .unwrap();
        editor.load_content(content);
        editor
    }

    #[test]
    fn replaces_and_saves() {
        let store = InMemoryStore::new();
        let editor = editor_with("foo bar foo", &store);

        let result = run(&editor, "foo", "baz", true, false).unwrap();
        assert_eq!(result.replacements, Some(2));
        assert_eq!(store.saves(), vec!["baz bar baz".to_string()]);
    }

    #[test]
    fn no_match_does_not_save() {
        let store = InMemoryStore::new();
        let editor = editor_with("foo bar foo", &store);

        let result = run(&editor, "qux", "baz", true, false).unwrap();
        assert_eq!(result.replacements, Some(0));
        assert!(!editor.is_modified());
        assert!(!editor.can_undo());
        drop(editor);
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn invalid_pattern_warns_and_keeps_content() {
        let store = InMemoryStore::new();
        let editor = editor_with("a(b", &store);

        let result = run(&editor, "(", "x", true, false).unwrap();
        assert_eq!(result.replacements, Some(0));
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert_eq!(editor.get_content(), "a(b");
    }

    #[test]
    fn honours_case_sensitivity() {
        let store = InMemoryStore::new();
        let editor = editor_with("Foo foo", &store);

        let result = run(&editor, "foo", "x", true, true).unwrap();
        assert_eq!(result.replacements, Some(1));
        assert_eq!(editor.get_content(), "Foo x");
    }
}
