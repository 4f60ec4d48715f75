//! Ephemeral clipboard shared across devices on the LAN.

pub mod store;

pub use store::ClipboardStore;
