use crate::buffer::byte_offset;
use crate::commands::helpers::line_col;
use crate::commands::{CmdMessage, CmdResult, SearchHit};
use crate::editor::NoteEditor;
use crate::error::Result;
use crate::search::is_valid_pattern;

pub fn run(editor: &NoteEditor, pattern: &str, case_sensitive: bool) -> Result<CmdResult> {
    let content = editor.get_content();
    let hits: Vec<SearchHit> = editor
        .search(pattern, case_sensitive)
        .into_iter()
        .map(|(start, end)| {
            let (line, column) = line_col(&content, start);
            let text = content[byte_offset(&content, start)..byte_offset(&content, end)].to_string();
            SearchHit {
                start,
                end,
                line,
                column,
                text,
            }
        })
        .collect();

    let mut result = CmdResult::default();
    if !is_valid_pattern(pattern) {
        result.add_message(CmdMessage::warning(format!("Invalid pattern: {}", pattern)));
    } else if hits.is_empty() {
        result.add_message(CmdMessage::info(format!("No matches for {}", pattern)));
    }
    Ok(result.with_hits(hits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::config::EditorConfig;

    fn editor_with(content: &str) -> NoteEditor {
        let editor = NoteEditor::new(&EditorConfig::default().without_auto_save()).unwrap();
        editor.load_content(content);
        editor
    }

    #[test]
    fn locates_hits_by_line_and_column() {
        let editor = editor_with("Todo: milk\nfinish TODO list");
        let result = run(&editor, "todo", false).unwrap();

        assert_eq!(result.hits.len(), 2);
        assert_eq!((result.hits[0].line, result.hits[0].column), (1, 1));
        assert_eq!(result.hits[0].text, "Todo");
        assert_eq!((result.hits[1].line, result.hits[1].column), (2, 8));
        assert_eq!(result.hits[1].text, "TODO");
        assert!(result.messages.is_empty());
    }

    #[test]
    fn case_sensitive_search_narrows_hits() {
        let editor = editor_with("Todo: milk\nfinish TODO list");
        let result = run(&editor, "TODO", true).unwrap();
        assert_eq!(result.hits.len(), 1);
    }

    #[test]
    fn invalid_pattern_is_a_warning() {
        let editor = editor_with("anything");
        let result = run(&editor, "(", false).unwrap();
        assert!(result.hits.is_empty());
        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
    }

    #[test]
    fn no_match_is_info() {
        let editor = editor_with("anything");
        let result = run(&editor, "zzz", false).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Info);
    }
}
