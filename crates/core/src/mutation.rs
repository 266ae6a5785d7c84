//! User-facing outcome messages for mutating operations.
//!
//! Each mutation reports a single discrete outcome that a client can show
//! as-is: a success message on the response envelope, or the error message
//! of the failure. When a failure carries no usable message the fallback
//! for its mutation kind is used.

/// The kinds of mutation exposed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Update,
    Delete,
    ToggleFavorite,
    CreateTag,
}

impl Mutation {
    /// Message reported when the mutation succeeds.
    ///
    /// A favorite toggle reports its new flag through [`Mutation::favorite_message`].
    pub fn success_message(self) -> &'static str {
        match self {
            Mutation::Create => "Prompt created successfully",
            Mutation::Update => "Prompt updated successfully",
            Mutation::Delete => "Prompt deleted",
            Mutation::ToggleFavorite => "Favorite updated",
            Mutation::CreateTag => "Tag created",
        }
    }

    /// Success message for a favorite toggle, given the flag after the toggle.
    pub fn favorite_message(is_favorite: bool) -> &'static str {
        if is_favorite {
            "Added to favorites"
        } else {
            "Removed from favorites"
        }
    }

    /// Message reported when the mutation fails without a usable error message.
    pub fn failure_message(self) -> &'static str {
        match self {
            Mutation::Create => "Failed to create prompt",
            Mutation::Update => "Failed to update prompt",
            Mutation::Delete => "Failed to delete prompt",
            Mutation::ToggleFavorite => "Failed to update favorite",
            Mutation::CreateTag => "Failed to create tag",
        }
    }
}
