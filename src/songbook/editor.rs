use crate::error::{Result, SongbookError};
use crate::form::SongDraft;
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

/// Formats a draft for the editor buffer: pretty JSON with a trailing newline.
pub fn to_buffer(draft: &SongDraft) -> Result<String> {
    let mut buffer = serde_json::to_string_pretty(draft).map_err(SongbookError::Serialization)?;
    buffer.push('\n');
    Ok(buffer)
}

/// Parses an edited buffer back into a draft.
pub fn from_buffer(buffer: &str) -> Result<SongDraft> {
    if buffer.trim().is_empty() {
        return Err(SongbookError::Validation("editor buffer is empty".to_string()));
    }
    serde_json::from_str(buffer)
        .map_err(|e| SongbookError::Validation(format!("could not parse edited song: {}", e)))
}

/// Gets the editor command from environment.
/// Checks $EDITOR, then $VISUAL, then falls back to common editors.
pub fn get_editor() -> Result<String> {
    for var in ["EDITOR", "VISUAL"] {
        if let Ok(editor) = env::var(var) {
            if !editor.is_empty() {
                return Ok(editor);
            }
        }
    }

    for fallback in &["vim", "vi", "nano"] {
        if Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
        {
            return Ok((*fallback).to_string());
        }
    }

    Err(SongbookError::Api(
        "No editor found. Set $EDITOR environment variable.".to_string(),
    ))
}

/// Opens a file in the user's editor and waits for it to close.
/// Returns the contents of the file after editing.
pub fn open_in_editor<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let editor = get_editor()?;
    let path = file_path.as_ref();

    // $EDITOR may carry arguments, e.g. "code --wait".
    let mut parts = editor.split_whitespace();
    let program = parts.next().unwrap_or(editor.as_str());
    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| SongbookError::Api(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(SongbookError::Api(format!(
            "Editor '{}' exited with non-zero status",
            editor
        )));
    }

    fs::read_to_string(path).map_err(SongbookError::Io)
}

/// Opens an editor on `initial` and returns the edited draft.
pub fn edit_draft(initial: &SongDraft) -> Result<SongDraft> {
    let temp_file = env::temp_dir().join(format!("songbook_edit_{}.json", std::process::id()));
    fs::write(&temp_file, to_buffer(initial)?).map_err(SongbookError::Io)?;

    let result = open_in_editor(&temp_file);
    let _ = fs::remove_file(&temp_file);

    from_buffer(&result?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MediaLink;

    #[test]
    fn test_buffer_roundtrip() {
        let mut draft = SongDraft::new("千本桜");
        draft.performers = vec!["花玲".into()];
        draft.lives = vec![MediaLink::new("https://b23.tv/x", "歌回", "2024-01-01")];

        let buffer = to_buffer(&draft).unwrap();
        assert!(buffer.ends_with("}\n"));
        assert_eq!(from_buffer(&buffer).unwrap(), draft);
    }

    #[test]
    fn test_empty_buffer_is_rejected() {
        assert!(matches!(from_buffer("  \n"), Err(SongbookError::Validation(_))));
    }

    #[test]
    fn test_garbage_buffer_is_rejected() {
        assert!(matches!(from_buffer("title: x"), Err(SongbookError::Validation(_))));
    }
}
