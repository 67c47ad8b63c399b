//! Editor integration for drafting posts. The buffer format is the title
//! on the first line, a blank line, then the body.

use crate::error::{BlogError, Result};
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

/// The editable text of a post as it appears in the editor buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftBuffer {
    pub title: String,
    pub content: String,
}

impl DraftBuffer {
    pub fn new(title: String, content: String) -> Self {
        Self { title, content }
    }

    pub fn to_buffer(&self) -> String {
        if self.content.is_empty() {
            format!("{}\n\n", self.title)
        } else {
            format!("{}\n\n{}", self.title, self.content)
        }
    }

    /// First line is the title, the rest (minus surrounding blank lines)
    /// is the body. A missing blank separator is tolerated.
    pub fn from_buffer(buffer: &str) -> Self {
        let mut lines = buffer.lines();
        let title = lines.next().unwrap_or("").trim().to_string();
        let content = lines.collect::<Vec<_>>().join("\n").trim().to_string();
        Self { title, content }
    }
}

/// The editor command: `$EDITOR`, then `$VISUAL`, then whichever of the
/// usual suspects is installed.
pub fn get_editor() -> Result<String> {
    if let Ok(editor) = env::var("EDITOR") {
        if !editor.is_empty() {
            return Ok(editor);
        }
    }

    if let Ok(editor) = env::var("VISUAL") {
        if !editor.is_empty() {
            return Ok(editor);
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

    Err(BlogError::Editor(
        "No editor found. Set $EDITOR environment variable.".to_string(),
    ))
}

/// Opens `file_path` in the user's editor, waits, and returns the file
/// contents afterwards.
pub fn open_in_editor<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let editor = get_editor()?;
    let path = file_path.as_ref();

    let status = Command::new(&editor)
        .arg(path)
        .status()
        .map_err(|e| BlogError::Editor(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(BlogError::Editor(format!(
            "Editor '{}' exited with non-zero status",
            editor
        )));
    }

    fs::read_to_string(path).map_err(BlogError::Io)
}

/// Round-trips a draft through the user's editor via a temp file.
pub fn edit_draft(initial: &DraftBuffer) -> Result<DraftBuffer> {
    let temp_file = env::temp_dir().join("blogz_draft.md");

    fs::write(&temp_file, initial.to_buffer()).map_err(BlogError::Io)?;

    let result = open_in_editor(&temp_file)?;

    let _ = fs::remove_file(&temp_file);

    Ok(DraftBuffer::from_buffer(&result))
}
