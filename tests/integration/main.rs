// tests/integration/main.rs

#[path = "../common/mod.rs"]
mod common;

mod config_files;
mod http_backend;
mod stub_server;
