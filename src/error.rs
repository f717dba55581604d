//! Error types for the link core and the HTTP layer.
//!
//! [`LinkError`] is the typed failure taxonomy of the code allocator, the link
//! store and the link service. [`AppError`] is the HTTP-facing envelope that
//! handlers return; every `LinkError` maps onto exactly one `AppError` variant.
//!
//! # Error Response Format
//!
//! ```json
//! {
//!   "error": {
//!     "code": "conflict",
//!     "message": "Code already exists",
//!     "details": { "code": "Ab3dEf" }
//!   }
//! }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// Boxed source error carried by [`LinkError::Storage`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failures of the code allocator, link store and link service.
///
/// Absence of a link is not an error: lookups return `Option` and deletes
/// return `bool`.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    /// Caller-supplied code does not match `[A-Za-z0-9]{6,8}`.
    #[error("code `{0}` must match [A-Za-z0-9]{{6,8}}")]
    InvalidCode(String),

    /// Target URL is not an absolute `http`/`https` URL.
    #[error("`{0}` is not a valid http(s) URL")]
    InvalidUrl(String),

    /// The code is already taken. Enforced by the store itself.
    #[error("code `{0}` already exists")]
    CodeConflict(String),

    /// No free random code was found within the retry bound.
    #[error("unable to allocate a unique code after {attempts} attempts")]
    Exhausted { attempts: usize },

    /// Any other persistence fault. Opaque to callers.
    #[error("storage error: {0}")]
    Storage(#[source] BoxError),
}

impl LinkError {
    /// Wraps an arbitrary backend error as [`LinkError::Storage`].
    pub fn storage(err: impl Into<BoxError>) -> Self {
        Self::Storage(err.into())
    }

    /// Returns true for errors caused by the server rather than the request.
    pub fn is_server_fault(&self) -> bool {
        matches!(self, Self::Exhausted { .. } | Self::Storage(_))
    }
}

/// Error body returned to API clients.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error description.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// HTTP-facing application error.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("{message}")]
    Conflict { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into its serializable description.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            Self::Validation { message, details } => ("validation_error", message, details),
            Self::NotFound { message, details } => ("not_found", message, details),
            Self::Conflict { message, details } => ("conflict", message, details),
            Self::Internal { message, details } => ("internal_error", message, details),
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<LinkError> for AppError {
    fn from(err: LinkError) -> Self {
        if err.is_server_fault() {
            tracing::error!(error = %err, "Link operation failed");
            return AppError::internal("Unexpected error", json!({}));
        }

        match err {
            LinkError::InvalidCode(code) => AppError::bad_request(
                "Code must match [A-Za-z0-9]{6,8}",
                json!({ "field": "code", "value": code }),
            ),
            LinkError::InvalidUrl(_) => AppError::bad_request(
                "Please provide a valid http(s) URL.",
                json!({ "field": "url" }),
            ),
            LinkError::CodeConflict(code) => {
                AppError::conflict("Code already exists", json!({ "code": code }))
            }
            LinkError::Exhausted { .. } | LinkError::Storage(_) => {
                AppError::internal("Unexpected error", json!({}))
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors.field_errors().keys().map(|k| k.to_string()).collect();
        fields.sort();

        let message = if fields.iter().any(|f| f == "url") {
            "Please provide a valid http(s) URL.".to_string()
        } else {
            "Request validation failed".to_string()
        };

        AppError::bad_request(message, json!({ "fields": fields }))
    }
}
