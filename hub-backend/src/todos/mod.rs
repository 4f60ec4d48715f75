//! todo.txt support: a line parser and the flat file it reads from.

pub mod parser;
pub mod store;

pub use store::TodoFile;
