pub mod categories;
pub mod prompts;
pub mod tags;
