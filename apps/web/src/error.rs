use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;
use updatemate_core::AppError;

const UNEXPECTED_ERROR_TEXT: &str = "An unexpected error occurred. Please try again later.";

/// HTTP error wrapper around core application errors.
///
/// Responses are plain text. Transport and internal failures are logged and
/// answered with a generic message so upstream details stay server-side.
#[derive(Debug)]
pub struct WebError(pub AppError);

impl From<AppError> for WebError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, text) = match &self.0 {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, self.0.to_string()),
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, self.0.to_string()),
            AppError::Upstream(rejection) => (
                StatusCode::BAD_GATEWAY,
                format!("An error occurred: {rejection}"),
            ),
            AppError::Transport(_) => {
                error!(error = %self.0, "upstream service unreachable");
                (StatusCode::BAD_GATEWAY, UNEXPECTED_ERROR_TEXT.to_owned())
            }
            AppError::Internal(_) => {
                error!(error = %self.0, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, UNEXPECTED_ERROR_TEXT.to_owned())
            }
        };

        (status, text).into_response()
    }
}

/// Standard web result type.
pub type WebResult<T> = Result<T, WebError>;
