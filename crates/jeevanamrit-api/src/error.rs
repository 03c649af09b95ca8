use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use jeevanamrit_instruments::error::AssessmentError;
use jeevanamrit_intake::error::IntakeError;
use jeevanamrit_intake::validation::Rejection;
use jeevanamrit_storage::error::StorageError;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Unauthorized(String),
    Conflict(String),
    Rejected(Rejection),
    Upstream(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<Rejection>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, reason) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg, None),
            ApiError::Rejected(rejection) => {
                let status = match rejection {
                    Rejection::SubmitInFlight | Rejection::AlreadySubmitted => StatusCode::CONFLICT,
                    _ => StatusCode::UNPROCESSABLE_ENTITY,
                };
                (status, rejection.to_string(), Some(rejection))
            }
            ApiError::Upstream(msg) => {
                tracing::warn!("profile store error: {msg}");
                (StatusCode::BAD_GATEWAY, "profile store unavailable".to_string(), None)
            }
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string(), None)
            }
        };

        (status, Json(ErrorBody { error: message, reason })).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound { key } => ApiError::NotFound(format!("object not found: {key}")),
            StorageError::AlreadyExists { key } => {
                ApiError::Conflict(format!("object already exists: {key}"))
            }
            other => ApiError::Upstream(other.to_string()),
        }
    }
}

impl From<AssessmentError> for ApiError {
    fn from(e: AssessmentError) -> Self {
        match e {
            AssessmentError::InvalidSelection(invalid) => ApiError::BadRequest(invalid.to_string()),
            AssessmentError::UnknownInstrument(id) => {
                ApiError::NotFound(format!("instrument not found: {id}"))
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<IntakeError> for ApiError {
    fn from(e: IntakeError) -> Self {
        match e {
            IntakeError::ValidationRejected(rejection) => ApiError::Rejected(rejection),
            IntakeError::Assessment(err) => err.into(),
            // Any store failure at submit is upstream, including a profile
            // that vanished between start and submit.
            IntakeError::Persistence(err) => ApiError::Upstream(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: impl Into<ApiError>) -> StatusCode {
        err.into().into_response().status()
    }

    #[test]
    fn store_failures_during_submit_are_bad_gateway() {
        let missing = IntakeError::Persistence(StorageError::NotFound {
            key: "profiles/a.json".to_string(),
        });
        assert_eq!(status_of(missing), StatusCode::BAD_GATEWAY);

        let refused = IntakeError::Persistence(StorageError::Rejected("refused".to_string()));
        assert_eq!(status_of(refused), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn direct_lookups_keep_not_found() {
        let missing = StorageError::NotFound {
            key: "profiles/a.json".to_string(),
        };
        assert_eq!(status_of(missing), StatusCode::NOT_FOUND);
    }

    #[test]
    fn rejections_map_to_unprocessable_or_conflict() {
        assert_eq!(
            status_of(IntakeError::ValidationRejected(Rejection::MissingAge)),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(IntakeError::ValidationRejected(Rejection::SubmitInFlight)),
            StatusCode::CONFLICT
        );
    }
}
