//! Notes system: flat markdown files, one per note
//!
//! Each file starts with a `# <title>` line followed by the body. The file
//! name is the note's slug.

pub mod file_ops;
pub mod store;

pub use store::NoteStore;
