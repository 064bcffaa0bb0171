use crate::commands::CmdResult;
use crate::editor::NoteEditor;
use crate::error::Result;

pub fn run(editor: &NoteEditor) -> Result<CmdResult> {
    Ok(CmdResult::default().with_stats(editor.get_stats()))
}
