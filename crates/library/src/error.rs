use promptdir_core::error::CoreError;
use promptdir_core::types::DbId;
use promptdir_db::store::StoreError;

/// Failure of a library workflow.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    /// Validation, not-found or conflict failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The backing store rejected or failed a call. Unique violations are
    /// reported as [`CoreError::Conflict`] instead.
    #[error(transparent)]
    Store(StoreError),

    /// The prompt disappeared between its update and the re-fetch, which
    /// means it was deleted concurrently.
    #[error("Prompt {0} not found after update")]
    MissingAfterUpdate(DbId),
}

pub type LibraryResult<T> = Result<T, LibraryError>;

impl From<StoreError> for LibraryError {
    fn from(err: StoreError) -> Self {
        if let Some(constraint) = err.unique_violation() {
            return LibraryError::Core(CoreError::Conflict(format!(
                "Duplicate value violates unique constraint: {constraint}"
            )));
        }
        LibraryError::Store(err)
    }
}

/// Shorthand for the prompt not-found error.
pub(crate) fn prompt_not_found(id: DbId) -> LibraryError {
    LibraryError::Core(CoreError::NotFound {
        entity: "Prompt",
        id,
    })
}
