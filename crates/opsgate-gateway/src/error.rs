//! HTTP mapping for `OpsGateError`.
//!
//! Errors are written as plain-text bodies with the status carried by the
//! error's client code.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use opsgate_core::error::OpsGateError;

/// Wrapper so core errors can be returned from axum handlers.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct HttpError(#[from] pub OpsGateError);

impl HttpError {
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.0.client_code().http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(code = self.0.client_code().as_str(), error = %self.0, "request failed");
        } else {
            tracing::debug!(code = self.0.client_code().as_str(), error = %self.0, "request rejected");
        }

        let mut resp = (status, format!("{}\n", self.0)).into_response();
        let headers = resp.headers_mut();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        headers.insert(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        );
        resp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn bad_request_body_is_plain_text() {
        let resp = HttpError(OpsGateError::MissingOperand("operand1".into())).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            resp.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"Failure in arguments: no operand operand1\n");
    }

    #[tokio::test]
    async fn auth_errors_are_unauthorized() {
        let resp = HttpError::from(OpsGateError::AuthMismatch).into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn user_requested_is_internal() {
        assert_eq!(
            HttpError(OpsGateError::UserRequested).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
