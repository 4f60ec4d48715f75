//! NoteStore: one markdown file per note, no index.
//!
//! The notes directory is the only state. Saves are last-writer-wins.

use chrono::{Local, SecondsFormat, Utc};
use hub_types::{Note, UPDATED_AT_UNKNOWN};
use std::io;
use std::path::{Path, PathBuf};

use super::file_ops;
use crate::error::{HubError, HubResult};

pub struct NoteStore {
    notes_dir: PathBuf,
}

impl NoteStore {
    pub fn new(notes_dir: PathBuf) -> Self {
        Self { notes_dir }
    }

    /// Get the notes directory path
    pub fn notes_dir(&self) -> &Path {
        &self.notes_dir
    }

    fn path_for(&self, slug: &str) -> HubResult<PathBuf> {
        file_ops::validate_slug(slug).map_err(HubError::BadRequest)?;
        Ok(self.notes_dir.join(slug))
    }

    /// Create or overwrite a note. A missing/blank slug is derived from today's
    /// date and the title, so same-day saves of one title share a file.
    pub fn save(&self, slug: Option<&str>, title: &str, body: &str) -> HubResult<Note> {
        let slug = match slug.filter(|s| !s.is_empty()) {
            Some(s) => s.to_string(),
            None => file_ops::derive_slug(title, Local::now().date_naive()),
        };
        let path = self.path_for(&slug)?;

        file_ops::write_note(&path, &file_ops::render_note(title, body))?;
        log::info!("[NOTES] Saved {}", slug);

        Ok(Note {
            slug,
            title: title.to_string(),
            body: body.to_string(),
            updated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        })
    }

    /// Read one note. Any read failure counts as not found.
    pub fn get(&self, slug: &str) -> HubResult<Note> {
        let path = self.path_for(slug)?;
        let content = std::fs::read(&path).map_err(|e| {
            if e.kind() != io::ErrorKind::NotFound {
                log::warn!("[NOTES] Failed to read {}: {}", slug, e);
            }
            HubError::NotFound(format!("note not found: {}", slug))
        })?;

        let (title, body) = file_ops::split_note(&String::from_utf8_lossy(&content));

        // The file's mtime is deliberately not consulted; reads report the
        // sentinel and only save results carry a real timestamp.
        Ok(Note {
            slug: slug.to_string(),
            title,
            body,
            updated_at: UPDATED_AT_UNKNOWN.to_string(),
        })
    }

    /// Every `.md` file under the directory with its title. Body and
    /// updated_at stay empty; slug is the bare file name.
    pub fn list(&self) -> Vec<Note> {
        file_ops::list_notes(&self.notes_dir)
            .into_iter()
            .filter_map(|path| {
                let slug = path.file_name()?.to_string_lossy().to_string();
                // Unreadable notes are still listed, just without a title
                let first_line = file_ops::read_first_line(&path).unwrap_or_else(|e| {
                    log::warn!("[NOTES] Cannot read {}: {}", path.display(), e);
                    String::new()
                });
                Some(Note {
                    slug,
                    title: file_ops::title_from_line(&first_line),
                    ..Default::default()
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn store() -> (tempfile::TempDir, NoteStore) {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path().to_path_buf());
        (dir, store)
    }

    #[test]
    fn test_save_with_derived_slug_then_get() {
        let (_dir, store) = store();

        let saved = store.save(None, "Hello World", "text").unwrap();
        let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
        assert_eq!(saved.slug, format!("{}-hello-world.md", today));
        assert_ne!(saved.updated_at, UPDATED_AT_UNKNOWN);

        let read = store.get(&saved.slug).unwrap();
        assert_eq!(read.title, "Hello World");
        assert_eq!(read.body, "text");
        assert_eq!(read.updated_at, UPDATED_AT_UNKNOWN);
    }

    #[test]
    fn test_save_empty_slug_is_derived() {
        let (_dir, store) = store();
        let saved = store.save(Some(""), "Trip", "pack").unwrap();
        assert!(saved.slug.ends_with("-trip.md"));
    }

    #[test]
    fn test_file_layout() {
        let (dir, store) = store();
        store.save(Some("plan.md"), "Plan", "line one").unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("plan.md")).unwrap(),
            "# Plan\n\nline one"
        );
    }

    #[test]
    fn test_resave_overwrites() {
        let (_dir, store) = store();
        store.save(Some("plan.md"), "Plan", "a much longer first draft").unwrap();
        store.save(Some("plan.md"), "Plan v2", "short").unwrap();

        let read = store.get("plan.md").unwrap();
        assert_eq!(read.title, "Plan v2");
        assert_eq!(read.body, "short");
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let (_dir, store) = store();
        assert!(matches!(store.get("ghost.md"), Err(HubError::NotFound(_))));
    }

    #[test]
    fn test_unsafe_slug_rejected() {
        let (_dir, store) = store();
        assert!(matches!(
            store.save(Some("../escape.md"), "x", "y"),
            Err(HubError::BadRequest(_))
        ));
        assert!(matches!(store.get("/etc/hosts"), Err(HubError::BadRequest(_))));
    }

    #[test]
    fn test_save_into_missing_dir_is_io_error() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path().join("not-created"));
        assert!(matches!(store.save(None, "x", "y"), Err(HubError::Io(_))));
    }

    #[test]
    fn test_list_titles_without_bodies() {
        let (dir, store) = store();
        store.save(Some("a.md"), "Alpha", "first body").unwrap();
        store.save(Some("b.md"), "Beta", "second body").unwrap();
        fs::create_dir(dir.path().join("archive")).unwrap();
        fs::write(dir.path().join("archive/old.md"), "# Old\n\nstuff").unwrap();
        fs::write(dir.path().join("scratch.txt"), "# Not a note").unwrap();

        let mut notes = store.list();
        notes.sort_by(|a, b| a.slug.cmp(&b.slug));

        let summary: Vec<_> = notes
            .iter()
            .map(|n| (n.slug.as_str(), n.title.as_str()))
            .collect();
        assert_eq!(summary, vec![("a.md", "Alpha"), ("b.md", "Beta"), ("old.md", "Old")]);
        assert!(notes.iter().all(|n| n.body.is_empty() && n.updated_at.is_empty()));
    }

    #[cfg(unix)]
    #[test]
    fn test_list_keeps_unreadable_note_with_empty_title() {
        let (dir, store) = store();
        store.save(Some("ok.md"), "Fine", "body").unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("dangling.md"))
            .unwrap();

        let mut notes = store.list();
        notes.sort_by(|a, b| a.slug.cmp(&b.slug));

        let summary: Vec<_> = notes
            .iter()
            .map(|n| (n.slug.as_str(), n.title.as_str()))
            .collect();
        assert_eq!(summary, vec![("dangling.md", ""), ("ok.md", "Fine")]);
    }
}
