//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the central error type for the service. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::PhotoExtension;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1002,
///     "message": "invalid timestamp in `timestamp`: expected YYYY-MM-DD HH:MM:SS",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`ApiError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category                 | HTTP Status               |
/// |-----------|--------------------------|---------------------------|
/// | 1000–1999 | Validation               | 400 Bad Request           |
/// | 2000–2999 | Referenced entity absent | 400 (dependent creation) / 404 (direct lookup) |
/// | 3000–3999 | Storage / Repository     | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Required submission fields were absent or empty.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// A timestamp field did not match `YYYY-MM-DD HH:MM:SS` exactly.
    #[error("invalid timestamp in `{0}`: expected YYYY-MM-DD HH:MM:SS")]
    InvalidTimestamp(String),

    /// A field was present but could not be parsed.
    #[error("invalid value for `{field}`: {reason}")]
    InvalidField {
        /// Name of the offending field.
        field: String,
        /// What went wrong while parsing it.
        reason: String,
    },

    /// Uploaded file extension is not in the whitelist.
    #[error("unsupported file type `{provided}`; allowed: {}", .allowed.join(", "))]
    UnsupportedFileType {
        /// Extension taken from the uploaded filename.
        provided: String,
        /// Whitelisted extensions.
        allowed: &'static [&'static str],
    },

    /// The multipart request body could not be read.
    #[error("malformed multipart body: {0}")]
    MalformedBody(String),

    /// A snapshot upload referenced a robot that does not exist.
    #[error("unknown robot: {0}")]
    UnknownRobot(i64),

    /// An explicitly supplied robot id does not exist.
    #[error("robot not found: {0}")]
    RobotNotFound(i64),

    /// No stored photo under the requested reference.
    #[error("photo not found: {0}")]
    PhotoNotFound(String),

    /// Durable photo storage read/write failed.
    #[error("storage failure: {0}")]
    StorageFailure(String),

    /// Constraint violation or transactional failure in the repository.
    #[error("repository failure: {0}")]
    RepositoryFailure(String),
}

impl ApiError {
    /// Builds a [`Self::MissingFields`] from field names.
    #[must_use]
    pub fn missing_fields(fields: &[&str]) -> Self {
        Self::MissingFields(fields.iter().map(|f| (*f).to_string()).collect())
    }

    /// Builds a [`Self::UnsupportedFileType`] with the standard whitelist.
    #[must_use]
    pub fn unsupported_file_type(provided: impl Into<String>) -> Self {
        Self::UnsupportedFileType {
            provided: provided.into(),
            allowed: PhotoExtension::ALLOWED,
        }
    }

    /// Builds a [`Self::RepositoryFailure`] from a database error.
    #[must_use]
    pub fn repository(err: &sqlx::Error) -> Self {
        Self::RepositoryFailure(err.to_string())
    }

    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::MissingFields(_) => 1001,
            Self::InvalidTimestamp(_) => 1002,
            Self::InvalidField { .. } => 1003,
            Self::UnsupportedFileType { .. } => 1004,
            Self::MalformedBody(_) => 1005,
            Self::UnknownRobot(_) => 2001,
            Self::RobotNotFound(_) => 2002,
            Self::PhotoNotFound(_) => 2003,
            Self::StorageFailure(_) => 3001,
            Self::RepositoryFailure(_) => 3002,
        }
    }

    /// Returns the HTTP status code for this variant.
    ///
    /// A missing robot during dependent creation is the client's mistake
    /// (400); only the direct photo lookup maps absence to 404.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingFields(_)
            | Self::InvalidTimestamp(_)
            | Self::InvalidField { .. }
            | Self::UnsupportedFileType { .. }
            | Self::MalformedBody(_)
            | Self::UnknownRobot(_)
            | Self::RobotNotFound(_) => StatusCode::BAD_REQUEST,
            Self::PhotoNotFound(_) => StatusCode::NOT_FOUND,
            Self::StorageFailure(_) | Self::RepositoryFailure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
