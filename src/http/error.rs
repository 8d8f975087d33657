//! Error type for request handling.
//!
//! Handlers return [`PipelineError`] and let the conversion to a response
//! happen in one place. The client always receives a generic 500 body;
//! the detail goes to the log, never over the wire.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::views::ViewError;

/// Failures surfaced while serving a request.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// View lookup or rendering failed.
    #[error(transparent)]
    Render(#[from] ViewError),

    /// Any other handler failure.
    #[error(transparent)]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Convenience alias for handler return types.
pub type PipelineResult<T> = Result<T, PipelineError>;

impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        tracing::error!(
            status = StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            detail = %self,
            "Request failed"
        );
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_response_body_never_carries_detail() {
        let err = PipelineError::Internal("secret database password".into());
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"Internal Server Error");
    }

    #[test]
    fn test_view_errors_convert_directly() {
        let err = PipelineError::from(ViewError::NotFound("index.html".into()));
        assert!(matches!(err, PipelineError::Render(_)));
    }
}
