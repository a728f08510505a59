// src/config/model.rs

use serde::Deserialize;

/// Default jobs service location, used when neither the file nor the
/// environment sets one.
pub const DEFAULT_HOST: &str = "http://localhost";

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [server]
/// host = "http://farm.local:8000"
/// timeout_secs = 30
/// connect_timeout_secs = 5
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub server: ServerConfig,
}

/// Validated configuration. Only constructible through
/// `TryFrom<RawConfigFile>` (see `config::validate`).
#[derive(Debug, Clone)]
pub struct SubmitterConfig {
    pub server: ServerConfig,
}

impl SubmitterConfig {
    pub(crate) fn new_unchecked(server: ServerConfig) -> Self {
        Self { server }
    }
}

/// `[server]` section: where the jobs service lives and how long to wait
/// for it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    /// Whole-request timeout applied by the HTTP client.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    5
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}
