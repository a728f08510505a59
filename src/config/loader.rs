// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{RawConfigFile, SubmitterConfig};
use crate::errors::Result;

/// Environment variable overriding `[server].host`.
pub const HOST_ENV_VAR: &str = "APIARY_HOST";

/// Load a configuration file from a given path and return the raw
/// `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** validate or apply
/// environment overrides. Use [`load_or_default`] or [`finish`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file, apply the host override, and validate it. A
/// missing file means "all defaults".
///
/// `host_override` (typically `--host`) takes precedence over `APIARY_HOST`.
pub fn load_or_default(
    path: impl AsRef<Path>,
    host_override: Option<String>,
) -> Result<SubmitterConfig> {
    let path = path.as_ref();
    let raw = if path.exists() {
        load_from_path(path)?
    } else {
        debug!(path = %path.display(), "config file not found; using defaults");
        RawConfigFile::default()
    };
    let host = host_override.or_else(|| std::env::var(HOST_ENV_VAR).ok());
    finish(raw, host)
}

/// Apply a host override (from the environment or CLI) and validate.
pub fn finish(mut raw: RawConfigFile, host_override: Option<String>) -> Result<SubmitterConfig> {
    if let Some(host) = host_override.filter(|h| !h.trim().is_empty()) {
        debug!(%host, "overriding [server].host");
        raw.server.host = host;
    }
    SubmitterConfig::try_from(raw)
}

/// Default config path: `Apiary.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Apiary.toml")
}
