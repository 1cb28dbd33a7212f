use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

// failures talking to the generation API
#[derive(Error, Debug)]
pub enum UpstreamError {
    // includes timeouts
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("upstream returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("parse error: {0}")]
    Decode(String),
}

#[derive(Error, Debug)]
pub enum ValidateError {
    #[error("Missing idea input")]
    MissingInput,

    #[error("Invalid request body")]
    InvalidBody(String),

    #[error("Rate limit exceeded: max {max} requests allowed per IP.")]
    RateLimited { max: u32 },

    #[error("Internal server error")]
    Upstream(#[from] UpstreamError),

    #[error("No response from Gemini")]
    EmptyResult,
}

impl ValidateError {
    pub fn status(&self) -> StatusCode {
        match self {
            ValidateError::MissingInput | ValidateError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ValidateError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ValidateError::Upstream(_) | ValidateError::EmptyResult => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

// JSON error envelope
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ValidateError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Display only carries the public message, causes stay in the logs
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_message_cites_ceiling() {
        let err = ValidateError::RateLimited { max: 5 };
        assert_eq!(err.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            err.to_string(),
            "Rate limit exceeded: max 5 requests allowed per IP."
        );
    }

    #[test]
    fn upstream_cause_is_not_in_public_message() {
        let err = ValidateError::from(UpstreamError::Status {
            status: 503,
            message: "backend exploded at 10.0.0.7".into(),
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Internal server error");
    }

    #[test]
    fn input_errors_are_client_errors() {
        assert_eq!(ValidateError::MissingInput.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ValidateError::InvalidBody("eof".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ValidateError::EmptyResult.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
