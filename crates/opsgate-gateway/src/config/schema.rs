use axum::http::HeaderName;
use serde::Deserialize;

use opsgate_core::auth::{AuthPolicy, DEFAULT_AUTH_HEADER, DEFAULT_AUTH_VALUE};
use opsgate_core::error::{OpsGateError, Result};

const MAX_BODY_LIMIT: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub ops: OpsSection,

    #[serde(default)]
    pub auth: AuthSection,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            ops: OpsSection::default(),
            auth: AuthSection::default(),
        }
    }
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(OpsGateError::Config(format!(
                "unsupported config version {}",
                self.version
            )));
        }

        self.server.validate()?;
        validate_prefix("ops.prefix", &self.ops.prefix)?;
        validate_prefix("auth.prefix", &self.auth.prefix)?;
        if self.ops.prefix == self.auth.prefix {
            return Err(OpsGateError::Config(
                "ops.prefix and auth.prefix must differ".into(),
            ));
        }
        self.auth.validate()?;

        Ok(())
    }
}

fn validate_prefix(field: &str, prefix: &str) -> Result<()> {
    let ok = !prefix.is_empty()
        && prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !ok {
        return Err(OpsGateError::Config(format!(
            "{field} must be non-empty and contain only [A-Za-z0-9_-]"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_BODY_LIMIT).contains(&self.max_body_bytes) {
            return Err(OpsGateError::Config(format!(
                "server.max_body_bytes must be between 1 and {MAX_BODY_LIMIT}"
            )));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8001".into()
}
fn default_max_body_bytes() -> usize {
    64 * 1024
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpsSection {
    #[serde(default = "default_ops_prefix")]
    pub prefix: String,
}

impl Default for OpsSection {
    fn default() -> Self {
        Self {
            prefix: default_ops_prefix(),
        }
    }
}

fn default_ops_prefix() -> String {
    "ops".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthSection {
    #[serde(default = "default_auth_prefix")]
    pub prefix: String,

    #[serde(default = "default_auth_header")]
    pub header: String,

    #[serde(default = "default_auth_value")]
    pub default_value: String,
}

impl Default for AuthSection {
    fn default() -> Self {
        Self {
            prefix: default_auth_prefix(),
            header: default_auth_header(),
            default_value: default_auth_value(),
        }
    }
}

impl AuthSection {
    pub fn validate(&self) -> Result<()> {
        HeaderName::from_bytes(self.header.as_bytes()).map_err(|e| {
            OpsGateError::Config(format!("auth.header is not a valid header name: {e}"))
        })?;
        Ok(())
    }

    pub fn policy(&self) -> AuthPolicy {
        AuthPolicy::new(self.header.clone(), self.default_value.clone())
    }
}

fn default_auth_prefix() -> String {
    "auth".into()
}
fn default_auth_header() -> String {
    DEFAULT_AUTH_HEADER.into()
}
fn default_auth_value() -> String {
    DEFAULT_AUTH_VALUE.into()
}
