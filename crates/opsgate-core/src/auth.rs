//! Single shared-secret authorization check.
//!
//! A literal, case-sensitive comparison of one header against an expected
//! value. The expected value is the caller-supplied override (a same-named
//! form field) when non-empty, else the configured default.

use crate::error::{OpsGateError, Result};
use crate::form::FormValues;

/// Default header inspected by the gate.
pub const DEFAULT_AUTH_HEADER: &str = "Authorization";
/// Default expected header value.
pub const DEFAULT_AUTH_VALUE: &str = "default";

/// Outcome of an accepted check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthDecision {
    /// Header matched the expected default value.
    AcceptedDefault,
    /// Header matched a caller-supplied override.
    AcceptedOverride,
}

/// Immutable policy handed to the auth route at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthPolicy {
    header: String,
    default_value: String,
}

impl Default for AuthPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_AUTH_HEADER, DEFAULT_AUTH_VALUE)
    }
}

impl AuthPolicy {
    pub fn new(header: impl Into<String>, default_value: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            default_value: default_value.into(),
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn default_value(&self) -> &str {
        &self.default_value
    }

    /// Expected value and whether it came from the form override.
    pub fn expected<'a>(&'a self, form: &'a FormValues) -> (&'a str, bool) {
        match form.first(&self.header) {
            Some(v) if !v.is_empty() => (v, true),
            _ => (self.default_value.as_str(), false),
        }
    }

    /// Decide on the first header value.
    ///
    /// `header_value` is `None` when the header is absent and `Some(None)` when
    /// present but not valid UTF-8 (which can never match).
    pub fn decide(&self, header_value: Option<Option<&str>>, form: &FormValues) -> Result<AuthDecision> {
        let header_value = header_value.ok_or(OpsGateError::MissingAuthHeader)?;
        let (expected, overridden) = self.expected(form);
        match header_value {
            Some(v) if v == expected => Ok(if overridden {
                AuthDecision::AcceptedOverride
            } else {
                AuthDecision::AcceptedDefault
            }),
            _ => Err(OpsGateError::AuthMismatch),
        }
    }
}
