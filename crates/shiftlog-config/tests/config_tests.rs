// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Shiftlog configuration system.

use shiftlog_config::diagnostic::ConfigError;
use shiftlog_config::model::ShiftlogConfig;
use shiftlog_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_shiftlog_config() {
    let toml = r#"
[app]
log_level = "debug"

[remote]
base_url = "https://logs.example.com/api"
api_token = "tok-123"
timeout_secs = 5

[polish]
api_key = "sk-123"
model = "gpt-4o"
base_url = "http://localhost:8080/v1"
timeout_secs = 3
max_chars = 180

[storage]
database_path = "/tmp/shiftlog-test.db"
wal_mode = false

[sync]
flush_on_start = false
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.app.log_level, "debug");
    assert_eq!(config.remote.base_url, "https://logs.example.com/api");
    assert_eq!(config.remote.api_token.as_deref(), Some("tok-123"));
    assert_eq!(config.remote.timeout_secs, 5);
    assert_eq!(config.polish.api_key.as_deref(), Some("sk-123"));
    assert_eq!(config.polish.model, "gpt-4o");
    assert_eq!(config.polish.max_chars, 180);
    assert_eq!(config.storage.database_path, "/tmp/shiftlog-test.db");
    assert!(!config.storage.wal_mode);
    assert!(!config.sync.flush_on_start);
}

/// Empty TOML falls back to compiled defaults.
#[test]
fn empty_toml_uses_defaults() {
    let config = load_config_from_str("").expect("empty config is valid");
    let defaults = ShiftlogConfig::default();
    assert_eq!(config.remote.base_url, defaults.remote.base_url);
    assert_eq!(config.polish.timeout_secs, defaults.polish.timeout_secs);
}

/// Unknown field in a section produces an error naming the key.
#[test]
fn unknown_field_in_remote_produces_error() {
    let toml = r#"
[remote]
base_ulr = "http://x"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("base_ulr"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Unknown section at the top level is rejected.
#[test]
fn unknown_section_produces_error() {
    let toml = r#"
[telemetry]
enabled = true
"#;
    assert!(load_config_from_str(toml).is_err());
}

/// Diagnostics for a typo carry a suggestion.
#[test]
fn typo_produces_unknown_key_with_suggestion() {
    let toml = r#"
[polish]
max_char = 100
"#;

    let errors = load_and_validate_str(toml).expect_err("typo should fail");
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => {
            assert_eq!(key, "max_char");
            assert_eq!(suggestion.as_deref(), Some("max_chars"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

/// Wrong value type is reported as InvalidType.
#[test]
fn wrong_type_produces_invalid_type() {
    let toml = r#"
[remote]
timeout_secs = "soon"
"#;

    let errors = load_and_validate_str(toml).expect_err("wrong type should fail");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { key, .. } if key.contains("timeout_secs")))
    );
}

/// Semantic validation runs after successful deserialization.
#[test]
fn validation_errors_surface_through_load_and_validate() {
    let toml = r#"
[remote]
base_url = "logs.example.com"
"#;

    let errors = load_and_validate_str(toml).expect_err("bad url should fail");
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Invalid { key, .. } if key == "remote.base_url")
    ));
}

/// Diagnostics render through miette without panicking.
#[test]
fn diagnostics_render_to_string() {
    use miette::{Diagnostic, GraphicalReportHandler};

    let errors = load_and_validate_str("[app]\nlog_levle = \"info\"\n").unwrap_err();
    let handler = GraphicalReportHandler::new();
    let mut buf = String::new();
    let diagnostic: &dyn Diagnostic = &errors[0];
    handler.render_report(&mut buf, diagnostic).unwrap();
    assert!(buf.contains("log_levle"));
}

/// An explicit config file with a typo is reported with its file attached.
#[test]
fn explicit_file_errors_point_into_the_file() {
    figment::Jail::expect_with(|jail| {
        jail.create_file("night.toml", "[sync]\nflush_on_strat = true\n")?;
        let path = jail.directory().join("night.toml");
        let errors = shiftlog_config::load_and_validate_path(&path).expect_err("typo");
        match &errors[0] {
            ConfigError::UnknownKey {
                key, suggestion, ..
            } => {
                assert_eq!(key, "flush_on_strat");
                assert_eq!(suggestion.as_deref(), Some("flush_on_start"));
            }
            other => panic!("expected UnknownKey, got {other:?}"),
        }
        Ok(())
    });
}

/// A valid explicit file loads and validates.
#[test]
fn explicit_file_loads() {
    figment::Jail::expect_with(|jail| {
        jail.create_file("night.toml", "[storage]\ndatabase_path = \"night.db\"\n")?;
        let path = jail.directory().join("night.toml");
        let config = shiftlog_config::load_and_validate_path(&path).expect("valid file");
        assert_eq!(config.storage.database_path, "night.db");
        Ok(())
    });
}
