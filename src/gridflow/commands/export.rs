use crate::commands::CmdResult;
use crate::editor::NoteEditor;
use crate::error::Result;
use crate::model::Theme;

/// Apply the given note metadata, then render the JSON export.
pub fn run(
    editor: &NoteEditor,
    title: Option<&str>,
    tags: &[String],
    theme: Option<Theme>,
) -> Result<CmdResult> {
    if let Some(title) = title {
        editor.set_title(title);
    }
    for tag in tags {
        editor.add_tag(tag);
    }
    if let Some(theme) = theme {
        editor.set_theme(theme);
    }
    let json = editor.export_as_json()?;
    Ok(CmdResult::default().with_export(json))
}
