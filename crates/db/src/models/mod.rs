//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` create/update DTOs where the entity is writable

pub mod category;
pub mod prompt;
pub mod prompt_version;
pub mod tag;
