use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use promptdir_core::error::CoreError;
use promptdir_core::mutation::Mutation;
use promptdir_db::store::StoreError;
use promptdir_library::LibraryError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps library errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent `{ error, code }` JSON.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A failed library workflow.
    #[error(transparent)]
    Library(#[from] LibraryError),

    /// A failed mutation. Internal failures report the mutation's fallback
    /// message instead of a generic one.
    #[error("{}: {source}", .mutation.failure_message())]
    Mutation {
        mutation: Mutation,
        source: LibraryError,
    },

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Adapter for `map_err` tagging a library failure with its mutation.
    pub fn failed(mutation: Mutation) -> impl FnOnce(LibraryError) -> AppError {
        move |source| AppError::Mutation { mutation, source }
    }
}

type Classified = (StatusCode, &'static str, String);

const INTERNAL: &str = "An internal error occurred";

fn internal(message: &str) -> Classified {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        message.to_string(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Library(err) => classify_library_error(err),
            AppError::Mutation { mutation, source } => {
                let classified = classify_library_error(source);
                if classified.0 == StatusCode::INTERNAL_SERVER_ERROR {
                    internal(mutation.failure_message())
                } else {
                    classified
                }
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn classify_core_error(err: &CoreError) -> Classified {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            internal(INTERNAL)
        }
    }
}

fn classify_library_error(err: &LibraryError) -> Classified {
    match err {
        LibraryError::Core(core) => classify_core_error(core),
        LibraryError::Store(store) => classify_store_error(store),
        LibraryError::MissingAfterUpdate(_) => {
            (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string())
        }
    }
}

/// Unique violations never reach here: the library reports them as
/// [`CoreError::Conflict`].
fn classify_store_error(err: &StoreError) -> Classified {
    match err {
        StoreError::Database(db) => classify_sqlx_error(db),
        StoreError::ForeignKeyViolation(constraint) => missing_reference(constraint),
        StoreError::UniqueViolation(_) | StoreError::Unavailable(_) => {
            tracing::error!(error = %err, "Store error");
            internal(INTERNAL)
        }
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Foreign key violations (SQLSTATE 23503) map to 400.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> Classified {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23503") => {
            missing_reference(db_err.constraint().unwrap_or("unknown"))
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal(INTERNAL)
        }
    }
}

fn missing_reference(constraint: &str) -> Classified {
    (
        StatusCode::BAD_REQUEST,
        "BAD_REQUEST",
        format!("Referenced row does not exist: {constraint}"),
    )
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;

    use super::*;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_maps_to_404() {
        let err = AppError::Library(LibraryError::Core(CoreError::NotFound {
            entity: "Prompt",
            id: 5,
        }));
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(body["error"], "Prompt with id 5 not found");
    }

    #[tokio::test]
    async fn duplicate_slug_maps_to_409() {
        let err = AppError::Library(LibraryError::from(StoreError::UniqueViolation(
            "uq_tags_slug".into(),
        )));
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn missing_reference_maps_to_400() {
        let err = AppError::Library(LibraryError::Store(StoreError::ForeignKeyViolation(
            "fk_prompts_category".into(),
        )));
        let (status, _) = render(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_after_update_maps_to_404() {
        let err = AppError::Library(LibraryError::MissingAfterUpdate(9));
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Prompt 9 not found after update");
    }

    #[tokio::test]
    async fn failed_mutation_reports_its_fallback_message() {
        let err = AppError::failed(Mutation::Create)(LibraryError::Store(
            StoreError::Unavailable("connection reset".into()),
        ));
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to create prompt");
    }

    #[tokio::test]
    async fn failed_mutation_keeps_client_errors() {
        let err = AppError::failed(Mutation::Update)(LibraryError::Core(CoreError::Validation(
            "Title is required".into(),
        )));
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Title is required");
    }
}
