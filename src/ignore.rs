//! The shared ignore-pattern list.
//!
//! One glob-like pattern per line, stored next to the other config
//! documents. The planner never interprets the patterns; the directory-sync
//! tool reads the file on its own, so `sy` only has to keep it editable.

use std::io;
use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IgnoreError {
    #[error("failed to read ignore patterns: {0}")]
    Read(#[source] io::Error),

    #[error("failed to write ignore patterns: {0}")]
    Write(#[source] io::Error),

    #[error("editor session failed: {0}")]
    Editor(String),
}

/// Read the pattern list. A missing file is an empty list.
pub fn read_patterns(path: &Path) -> Result<Vec<String>, IgnoreError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(IgnoreError::Read(err)),
    };
    Ok(parse_patterns(&text))
}

/// Write the pattern list, creating parent directories as needed.
pub fn write_patterns(path: &Path, patterns: &[String]) -> Result<(), IgnoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(IgnoreError::Write)?;
    }
    let mut text = patterns.join("\n");
    if !text.is_empty() {
        text.push('\n');
    }
    std::fs::write(path, text).map_err(IgnoreError::Write)
}

/// Open the pattern list in `$EDITOR`; returns whether it was saved back.
pub fn edit_patterns(path: &Path) -> Result<bool, IgnoreError> {
    let current = read_patterns(path)?.join("\n");
    let edited = dialoguer::Editor::new()
        .edit(&current)
        .map_err(|e| IgnoreError::Editor(e.to_string()))?;

    match edited {
        Some(text) => {
            write_patterns(path, &parse_patterns(&text))?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Blank lines carry nothing and are dropped on read and rewrite.
fn parse_patterns(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
