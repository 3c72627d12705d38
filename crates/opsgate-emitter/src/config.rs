//! Emitter config loader (strict parsing).

use std::fs;
use std::time::Duration;

use serde::Deserialize;

use opsgate_core::error::{OpsGateError, Result};

const MAX_INTERVAL_MS: u64 = 86_400_000;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmitterConfig {
    pub version: u32,

    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    #[serde(default = "default_log_name")]
    pub log_name: String,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            version: 1,
            interval_ms: default_interval_ms(),
            log_name: default_log_name(),
        }
    }
}

impl EmitterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(OpsGateError::Config(format!(
                "unsupported config version {}",
                self.version
            )));
        }
        if !(1..=MAX_INTERVAL_MS).contains(&self.interval_ms) {
            return Err(OpsGateError::Config(format!(
                "interval_ms must be between 1 and {MAX_INTERVAL_MS}"
            )));
        }
        if self.log_name.is_empty() {
            return Err(OpsGateError::Config("log_name must not be empty".into()));
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

fn default_interval_ms() -> u64 {
    30_000
}
fn default_log_name() -> String {
    "json_outputer".into()
}

pub fn load_from_file(path: &str) -> Result<EmitterConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| OpsGateError::Config(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<EmitterConfig> {
    let cfg: EmitterConfig = serde_yaml::from_str(s)
        .map_err(|e| OpsGateError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_or_default(path: Option<&str>) -> Result<EmitterConfig> {
    match path {
        Some(p) => load_from_file(p),
        None => Ok(EmitterConfig::default()),
    }
}
