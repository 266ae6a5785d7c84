//! Prompt validation and change detection.
//!
//! Validation runs before any store call is issued, so a rejected request
//! never touches the backend.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length for a prompt title in characters.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length for a prompt body in characters.
pub const MAX_CONTENT_LENGTH: usize = 50_000;

/// Maximum length for a tag name in characters.
pub const MAX_TAG_NAME_LENGTH: usize = 50;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a prompt title: must not be blank and within length limit.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title is required".to_string()));
    }
    let len = title.chars().count();
    if len > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title exceeds maximum length of {MAX_TITLE_LENGTH} characters (got {len})"
        )));
    }
    Ok(())
}

/// Validate a prompt body: must not be blank and within length limit.
pub fn validate_content(content: &str) -> Result<(), CoreError> {
    if content.trim().is_empty() {
        return Err(CoreError::Validation("Content is required".to_string()));
    }
    let len = content.chars().count();
    if len > MAX_CONTENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Content exceeds maximum length of {MAX_CONTENT_LENGTH} characters (got {len})"
        )));
    }
    Ok(())
}

/// Validate a tag name: must not be blank, within length limit, and must
/// yield a non-empty slug.
pub fn validate_tag_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("Tag name is required".to_string()));
    }
    let len = name.chars().count();
    if len > MAX_TAG_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Tag name exceeds maximum length of {MAX_TAG_NAME_LENGTH} characters (got {len})"
        )));
    }
    if crate::slug::slugify(name).is_empty() {
        return Err(CoreError::Validation(format!(
            "Tag name '{name}' contains no usable characters"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Change detection
// ---------------------------------------------------------------------------

/// Whether an update must snapshot the current prompt into version history.
///
/// Compares by value: a field that is omitted, or provided with the value
/// already stored, does not count as a change.
pub fn requires_snapshot(
    current_title: &str,
    current_content: &str,
    new_title: Option<&str>,
    new_content: Option<&str>,
) -> bool {
    let title_changed = new_title.is_some_and(|t| t != current_title);
    let content_changed = new_content.is_some_and(|c| c != current_content);
    title_changed || content_changed
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
