//! Shared error type across opsgate crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Malformed path, form, operands, or body.
    BadRequest,
    /// Auth header missing or not matching.
    Unauthorized,
    /// Internal server error (including the user-requested one).
    Internal,
}

impl ClientCode {
    /// String representation used in logs and tests.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::Unauthorized => "UNAUTHORIZED",
            ClientCode::Internal => "INTERNAL",
        }
    }

    /// HTTP status carried by this code.
    pub fn http_status(self) -> u16 {
        match self {
            ClientCode::BadRequest => 400,
            ClientCode::Unauthorized => 401,
            ClientCode::Internal => 500,
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, OpsGateError>;

/// Unified error type used by core, gateway, and emitter.
#[derive(Debug, Error)]
pub enum OpsGateError {
    #[error("Invalid operation in {0}")]
    PathMismatch(String),
    #[error("Unable to parse form: {0}")]
    FormParse(String),
    #[error("Failure in arguments: no operand {0}")]
    MissingOperand(String),
    #[error("Failure in arguments: invalid value for {key}: {reason}")]
    InvalidOperandValue { key: String, reason: String },
    #[error("Failure in arguments: failed to decode body: {0}")]
    BodyDecodeFailure(String),
    #[error("Need arguments in {0}")]
    MissingArguments(String),
    #[error("User requested error")]
    UserRequested,
    #[error("No Auth Header")]
    MissingAuthHeader,
    #[error("Auth Header Mismatch")]
    AuthMismatch,
    #[error("Failure in marshaling data: {0}")]
    SerializationFailure(String),
    #[error("bad config: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl OpsGateError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            OpsGateError::PathMismatch(_)
            | OpsGateError::FormParse(_)
            | OpsGateError::MissingOperand(_)
            | OpsGateError::InvalidOperandValue { .. }
            | OpsGateError::BodyDecodeFailure(_)
            | OpsGateError::MissingArguments(_) => ClientCode::BadRequest,
            OpsGateError::MissingAuthHeader | OpsGateError::AuthMismatch => {
                ClientCode::Unauthorized
            }
            OpsGateError::UserRequested
            | OpsGateError::SerializationFailure(_)
            | OpsGateError::Config(_)
            | OpsGateError::Internal(_) => ClientCode::Internal,
        }
    }
}

impl From<serde_json::Error> for OpsGateError {
    fn from(err: serde_json::Error) -> Self {
        OpsGateError::SerializationFailure(err.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_family_maps_to_400() {
        let errs = [
            OpsGateError::PathMismatch("/x".into()),
            OpsGateError::FormParse("bad".into()),
            OpsGateError::MissingOperand("operand1".into()),
            OpsGateError::InvalidOperandValue {
                key: "operand2".into(),
                reason: "nope".into(),
            },
            OpsGateError::BodyDecodeFailure("EOF".into()),
            OpsGateError::MissingArguments("arg".into()),
        ];
        for e in errs {
            assert_eq!(e.client_code(), ClientCode::BadRequest, "{e}");
            assert_eq!(e.client_code().http_status(), 400);
        }
    }

    #[test]
    fn auth_failures_are_401_with_fixed_text() {
        assert_eq!(OpsGateError::MissingAuthHeader.client_code().http_status(), 401);
        assert_eq!(OpsGateError::AuthMismatch.client_code().http_status(), 401);
        assert_eq!(OpsGateError::MissingAuthHeader.to_string(), "No Auth Header");
    }

    #[test]
    fn user_requested_error_is_500() {
        let e = OpsGateError::UserRequested;
        assert_eq!(e.client_code().as_str(), "INTERNAL");
        assert_eq!(e.client_code().http_status(), 500);
        assert_eq!(e.to_string(), "User requested error");
    }

    #[test]
    fn operand_errors_embed_cause() {
        let e = OpsGateError::InvalidOperandValue {
            key: "operand1".into(),
            reason: "invalid digit found in string".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("operand1"));
        assert!(msg.contains("invalid digit"));
    }
}
