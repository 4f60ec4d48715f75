//! The append-only todo.txt file behind GET /todos and POST /todos/add

use hub_types::Todo;
use std::fs::{self, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use super::parser::parse_line;

pub struct TodoFile {
    path: PathBuf,
}

impl TodoFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the parent directory and an empty file if missing. Errors are
    /// ignored here; the following open reports them.
    fn ensure(&self) {
        if let Some(parent) = self.path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        if !self.path.exists() {
            let _ = fs::File::create(&self.path);
        }
    }

    /// Parse every non-blank line, in file order. Bytes that are not UTF-8
    /// are replaced rather than failing the whole file.
    pub fn list(&self) -> io::Result<Vec<Todo>> {
        self.ensure();
        let reader = BufReader::new(fs::File::open(&self.path)?);

        let mut todos = Vec::new();
        for line in reader.split(b'\n') {
            let line = line?;
            let line = String::from_utf8_lossy(&line);
            let line = line.trim();
            if !line.is_empty() {
                todos.push(parse_line(line));
            }
        }
        Ok(todos)
    }

    /// Append one line. No validation: the next list parses whatever landed.
    pub fn add(&self, text: &str) -> io::Result<()> {
        self.ensure();
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        file.write_all(format!("{}\n", text).as_bytes())?;
        log::debug!("[TODOS] Appended {} bytes to {}", text.len() + 1, self.path.display());
        Ok(())
    }
}
