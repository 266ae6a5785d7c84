//! Domain types and pure helpers for Prompt Directory.
//!
//! Nothing in this crate performs I/O; it is shared by the repository,
//! library and API layers.

pub mod error;
pub mod mutation;
pub mod patch;
pub mod prompt;
pub mod search;
pub mod slug;
pub mod types;
