//! File operations for the notes directory
//!
//! Handles slug derivation, the `# title` / body split, and walking the
//! directory for `.md` files.

use chrono::NaiveDate;
use std::fs;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

pub const NOTE_EXTENSION: &str = ".md";
const TITLE_MARKER: &str = "# ";

/// Derive a note filename from a title (e.g. "Hello World" on 2024-05-01 ->
/// "2024-05-01-hello-world.md"). Only spaces are replaced; other characters
/// pass through.
pub fn derive_slug(title: &str, date: NaiveDate) -> String {
    format!(
        "{}-{}{}",
        date.format("%Y-%m-%d"),
        title.to_lowercase().replace(' ', "-"),
        NOTE_EXTENSION
    )
}

/// Reject slugs that would escape the notes directory
pub fn validate_slug(slug: &str) -> Result<(), String> {
    if slug.trim().is_empty() {
        return Err("slug is empty".to_string());
    }
    if slug.contains('\\') {
        return Err(format!("invalid slug: {}", slug));
    }
    let path = Path::new(slug);
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(format!("invalid slug: {}", slug));
    }
    Ok(())
}

/// Render the on-disk form of a note
pub fn render_note(title: &str, body: &str) -> String {
    format!("{}{}\n\n{}", TITLE_MARKER, title, body)
}

/// Title from the first line, with a leading `# ` removed
pub fn title_from_line(first_line: &str) -> String {
    first_line
        .strip_prefix(TITLE_MARKER)
        .unwrap_or(first_line)
        .to_string()
}

/// Split file content into (title, body). Body is everything after the
/// first newline, trimmed.
pub fn split_note(content: &str) -> (String, String) {
    match content.split_once('\n') {
        Some((first, rest)) => (title_from_line(first), rest.trim().to_string()),
        None => (title_from_line(content), String::new()),
    }
}

/// Write a note file, truncating any previous content
pub fn write_note(path: &Path, content: &str) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

/// Read only the first line of a note (without the newline)
pub fn read_first_line(path: &Path) -> io::Result<String> {
    let mut reader = BufReader::new(fs::File::open(path)?);
    let mut line = Vec::new();
    reader.read_until(b'\n', &mut line)?;
    if line.last() == Some(&b'\n') {
        line.pop();
    }
    Ok(String::from_utf8_lossy(&line).into_owned())
}

/// List all markdown files under the notes directory (recursively), in walk
/// order. Unreadable entries are skipped.
pub fn list_notes(notes_dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(notes_dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| !entry.file_type().is_dir())
        .filter(|entry| {
            entry
                .file_name()
                .to_string_lossy()
                .ends_with(NOTE_EXTENSION)
        })
        .map(|entry| entry.into_path())
        .collect()
}
