// src/config/mod.rs

//! Configuration loading and validation.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk and apply overrides (`loader.rs`).
//! - Validate the result (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, finish, load_from_path, load_or_default};
pub use model::{RawConfigFile, ServerConfig, SubmitterConfig};
