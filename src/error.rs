//! Typed errors for the extraction pipeline
//!
//! Every extractor failure maps to one of these kinds. The messages are
//! deliberately generic: the underlying validator detail is logged server-side
//! at the rejection site and never included in a response, so callers cannot
//! probe the identifier rules through error text.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::fmt;

/// Errors produced while extracting request parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// The form body could not be parsed
    MalformedBody,

    /// The URL path is too short to carry an owner/database pair
    MalformedUrl,

    /// A single identifier field failed its validation rule
    InvalidIdentifier { field: &'static str },

    /// The combined owner/database rule rejected the pair
    InvalidOwnerOrDatabase,

    /// The version field is not a non-negative base-10 integer
    InvalidVersion,

    /// The visibility field was absent; callers must be able to tell
    /// "false" apart from "unspecified"
    MissingVisibility,

    /// The visibility field was present but not a `true`/`false` literal
    InvalidVisibility,

    /// A login attempt supplied one credential but not the other
    MissingCredential,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::MalformedBody => write!(f, "Invalid request body"),
            InputError::MalformedUrl => write!(f, "Invalid URL"),
            InputError::InvalidIdentifier { field } => {
                write!(f, "Invalid {} name", field)
            }
            InputError::InvalidOwnerOrDatabase => {
                write!(f, "Invalid owner or database name")
            }
            InputError::InvalidVersion => write!(f, "Invalid database version number"),
            InputError::MissingVisibility => {
                write!(f, "No public/private value present")
            }
            InputError::InvalidVisibility => {
                write!(f, "Invalid public/private value")
            }
            InputError::MissingCredential => write!(f, "Missing credential"),
        }
    }
}

impl std::error::Error for InputError {}

impl InputError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            InputError::MissingCredential => StatusCode::UNAUTHORIZED,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Stable machine-readable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            InputError::MalformedBody => "MALFORMED_BODY",
            InputError::MalformedUrl => "MALFORMED_URL",
            InputError::InvalidIdentifier { .. } => "INVALID_IDENTIFIER",
            InputError::InvalidOwnerOrDatabase => "INVALID_OWNER_OR_DATABASE",
            InputError::InvalidVersion => "INVALID_VERSION",
            InputError::MissingVisibility => "MISSING_VISIBILITY",
            InputError::InvalidVisibility => "INVALID_VISIBILITY",
            InputError::MissingCredential => "MISSING_CREDENTIAL",
        }
    }
}

impl IntoResponse for InputError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
            }
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === Display ===

    #[test]
    fn test_display_is_generic() {
        // No variant leaks validator internals
        let err = InputError::InvalidIdentifier { field: "database" };
        assert_eq!(err.to_string(), "Invalid database name");

        let err = InputError::InvalidOwnerOrDatabase;
        assert_eq!(err.to_string(), "Invalid owner or database name");
    }

    #[test]
    fn test_display_malformed_url() {
        assert_eq!(InputError::MalformedUrl.to_string(), "Invalid URL");
    }

    #[test]
    fn test_display_missing_visibility() {
        assert_eq!(
            InputError::MissingVisibility.to_string(),
            "No public/private value present"
        );
    }

    // === status_code ===

    #[test]
    fn test_status_codes() {
        assert_eq!(
            InputError::MalformedBody.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            InputError::InvalidVersion.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            InputError::MissingCredential.status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    // === error_code ===

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(
            InputError::InvalidIdentifier { field: "folder" }.error_code(),
            "INVALID_IDENTIFIER"
        );
        assert_eq!(InputError::MalformedUrl.error_code(), "MALFORMED_URL");
        assert_eq!(
            InputError::InvalidVisibility.error_code(),
            "INVALID_VISIBILITY"
        );
    }

    // === IntoResponse ===

    #[test]
    fn test_into_response_status() {
        let response = InputError::MalformedUrl.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = InputError::MissingCredential.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
