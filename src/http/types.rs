use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("todo not found")]
    NotFound,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

/// The body is the message as a bare JSON string.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response { (self.status_code(), axum::Json(self.to_string())).into_response() }
}
