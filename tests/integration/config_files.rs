// tests/integration/config_files.rs

use std::io::Write;

use apiary_submitter::config::{finish, load_from_path, load_or_default};
use apiary_submitter::errors::ApiaryError;
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn server_section_is_read_from_toml() {
    let file = config_file(
        r#"
[server]
host = "http://farm.local:8000"
timeout_secs = 10
"#,
    );

    let cfg = finish(load_from_path(file.path()).unwrap(), None).unwrap();

    assert_eq!(cfg.server.host, "http://farm.local:8000");
    assert_eq!(cfg.server.timeout_secs, 10);
    assert_eq!(cfg.server.connect_timeout_secs, 5);
}

#[test]
fn empty_file_means_defaults() {
    let file = config_file("");

    let cfg = finish(load_from_path(file.path()).unwrap(), None).unwrap();

    assert_eq!(cfg.server.host, "http://localhost");
    assert_eq!(cfg.server.timeout_secs, 30);
}

#[test]
fn host_override_wins_over_file() {
    let file = config_file(
        r#"
[server]
host = "http://farm.local:8000"
"#,
    );

    let cfg = load_or_default(file.path(), Some("https://other.example".to_string())).unwrap();

    assert_eq!(cfg.server.host, "https://other.example");
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Apiary.toml");

    let cfg = load_or_default(&path, Some("http://farm.local".to_string())).unwrap();

    assert_eq!(cfg.server.host, "http://farm.local");
}

#[test]
fn host_without_scheme_is_a_config_error() {
    let file = config_file(
        r#"
[server]
host = "farm.local:8000"
"#,
    );

    match finish(load_from_path(file.path()).unwrap(), None) {
        Err(ApiaryError::ConfigError(msg)) => assert!(msg.contains("http://")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn invalid_toml_is_reported_as_such() {
    let file = config_file("[server\nhost = ");

    let err = load_from_path(file.path()).unwrap_err();

    assert!(matches!(err, ApiaryError::TomlError(_)), "got {err:?}");
}
