//! Prompt workflows on top of a [`PromptStore`](promptdir_db::store::PromptStore).
//!
//! - [`query`]: the prompt query composer
//! - [`hydrate`]: batched category/tag resolution
//! - [`prompts`]: create, get, update-with-versioning, favorite toggle, delete
//! - [`reference`]: category and tag lists, tag creation
//!
//! Every workflow is a free function taking `&dyn PromptStore`. Multi-step
//! workflows are not atomic across store calls: a failure partway leaves the
//! earlier steps applied.

pub mod error;
pub mod hydrate;
pub mod prompts;
pub mod query;
pub mod reference;

pub use error::{LibraryError, LibraryResult};
