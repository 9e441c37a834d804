//! Error boundary - every failure leaves the server as an `ErrorResponse`.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use quill_core::DomainError;
use quill_core::error::RepoError;
use quill_shared::ErrorResponse;

use super::auth::AuthenticationError;

/// Application-level error type that converts to JSON error bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Internal error: {0}")]
    Internal(String),
    #[error("Validation errors: {0:?}")]
    Validation(Vec<String>),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Internal(detail) = self {
            // Log internal errors, never leak them
            tracing::error!("Internal error: {}", detail);
        }
        HttpResponse::build(self.status_code()).json(self.body())
    }
}

impl AppError {
    /// The JSON body sent to the client.
    pub fn body(&self) -> ErrorResponse {
        match self {
            AppError::NotFound(message) => ErrorResponse::not_found(message),
            AppError::BadRequest(message) => ErrorResponse::bad_request(message),
            AppError::Unauthorized => {
                ErrorResponse::unauthorized().with_message("Invalid username or password")
            }
            AppError::Conflict(message) => ErrorResponse::conflict(message),
            AppError::Internal(_) => ErrorResponse::internal_error(),
            AppError::Validation(errors) => {
                ErrorResponse::new(422, "Validation Failed").with_message(errors.join(", "))
            }
        }
    }
}

/// Rebuild the body of an error produced by this server, if it is one.
pub fn error_body(err: &actix_web::Error) -> Option<ErrorResponse> {
    if let Some(app_error) = err.as_error::<AppError>() {
        return Some(app_error.body());
    }
    err.as_error::<AuthenticationError>()
        .map(AuthenticationError::body)
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { .. } => AppError::NotFound(err.to_string()),
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            DomainError::Duplicate(msg) => AppError::Conflict(msg),
            DomainError::Mismatch(msg) => AppError::BadRequest(msg),
            DomainError::Unauthorized => AppError::Unauthorized,
            DomainError::Internal(msg) => AppError::Internal(msg),
            DomainError::Repo(repo) => repo.into(),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::Constraint(msg) => AppError::Conflict(msg),
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_map_to_statuses() {
        let cases = [
            (DomainError::not_found("Post", 1), StatusCode::NOT_FOUND),
            (
                DomainError::Mismatch("Comment does not belong to post".into()),
                StatusCode::BAD_REQUEST,
            ),
            (DomainError::Duplicate("taken".into()), StatusCode::CONFLICT),
            (DomainError::Unauthorized, StatusCode::UNAUTHORIZED),
            (
                DomainError::Repo(RepoError::Query("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (domain, status) in cases {
            assert_eq!(AppError::from(domain).status_code(), status);
        }
    }

    #[test]
    fn test_error_body_recovered_from_actix_error() {
        let err = actix_web::Error::from(AppError::Conflict("Username already exists.".into()));

        let body = error_body(&err).unwrap();
        assert_eq!(body.status, 409);
        assert_eq!(body.message, "Username already exists.");
    }

    #[test]
    fn test_internal_body_hides_detail() {
        let body = AppError::Internal("db password leaked".into()).body();

        assert_eq!(body.status, 500);
        assert!(!body.message.contains("password"));
    }

    #[test]
    fn test_not_found_message_is_kept() {
        let err = AppError::from(DomainError::not_found("Comment", 9));

        assert!(matches!(err, AppError::NotFound(ref m) if m == "Comment not found with id : '9'"));
    }
}
