// src/config/validate.rs

use crate::config::model::{RawConfigFile, SubmitterConfig};
use crate::errors::{ApiaryError, Result};

impl TryFrom<RawConfigFile> for SubmitterConfig {
    type Error = ApiaryError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(SubmitterConfig::new_unchecked(raw.server))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_host(&cfg.server.host)?;
    validate_timeouts(cfg)?;
    Ok(())
}

fn validate_host(host: &str) -> Result<()> {
    let host = host.trim();
    if host.is_empty() {
        return Err(ApiaryError::ConfigError(
            "[server].host must not be empty".to_string(),
        ));
    }
    if !(host.starts_with("http://") || host.starts_with("https://")) {
        return Err(ApiaryError::ConfigError(format!(
            "[server].host must start with http:// or https:// (got '{host}')"
        )));
    }
    Ok(())
}

fn validate_timeouts(cfg: &RawConfigFile) -> Result<()> {
    if cfg.server.timeout_secs == 0 {
        return Err(ApiaryError::ConfigError(
            "[server].timeout_secs must be >= 1 (got 0)".to_string(),
        ));
    }
    if cfg.server.connect_timeout_secs == 0 {
        return Err(ApiaryError::ConfigError(
            "[server].connect_timeout_secs must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}
