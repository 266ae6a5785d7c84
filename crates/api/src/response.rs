//! Shared response envelope types for API handlers.
//!
//! Reads use a `{ "data": ... }` envelope; mutations add a user-displayable
//! `message` next to the data.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": T, "message": "..." }` envelope returned by mutating endpoints.
#[derive(Debug, Serialize)]
pub struct MutationResponse<T: Serialize> {
    pub data: T,
    pub message: &'static str,
}
