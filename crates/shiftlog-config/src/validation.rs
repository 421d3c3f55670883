// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks semantic constraints serde attributes cannot express: URL shapes,
//! non-empty paths, positive timeouts, and known log levels.

use crate::diagnostic::ConfigError;
use crate::model::ShiftlogConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &ShiftlogConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.app.log_level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::invalid(
            "app.log_level",
            format!(
                "`{}` is not a log level; use one of {}",
                config.app.log_level,
                LOG_LEVELS.join(", ")
            ),
        ));
    }

    check_http_url("remote.base_url", &config.remote.base_url, &mut errors);
    check_http_url("polish.base_url", &config.polish.base_url, &mut errors);

    for (key, secs) in [
        ("remote.timeout_secs", config.remote.timeout_secs),
        ("polish.timeout_secs", config.polish.timeout_secs),
    ] {
        if secs == 0 {
            errors.push(ConfigError::invalid(key, "must be greater than 0"));
        }
    }

    // Truncation keeps 3 characters of room for the ellipsis.
    if config.polish.max_chars < 20 {
        errors.push(ConfigError::invalid(
            "polish.max_chars",
            format!("must be at least 20, got {}", config.polish.max_chars),
        ));
    }

    if config
        .polish
        .api_key
        .as_deref()
        .is_some_and(|k| k.trim().is_empty())
    {
        errors.push(ConfigError::invalid(
            "polish.api_key",
            "must not be blank; omit it to disable remote polishing",
        ));
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::invalid(
            "storage.database_path",
            "must not be empty",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_http_url(key: &str, value: &str, errors: &mut Vec<ConfigError>) {
    let value = value.trim();
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        errors.push(ConfigError::invalid(
            key,
            format!("`{value}` must start with http:// or https://"),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = ShiftlogConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_database_path_fails_validation() {
        let mut config = ShiftlogConfig::default();
        config.storage.database_path = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| e.key() == Some("storage.database_path")
        ));
    }

    #[test]
    fn non_http_base_url_fails_validation() {
        let mut config = ShiftlogConfig::default();
        config.remote.base_url = "ftp://example.com".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| e.key() == Some("remote.base_url")
        ));
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = ShiftlogConfig::default();
        config.app.log_level = "loud".to_string();
        config.remote.timeout_secs = 0;
        config.polish.max_chars = 5;
        config.polish.api_key = Some("  ".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn log_level_is_case_insensitive() {
        let mut config = ShiftlogConfig::default();
        config.app.log_level = "DEBUG".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn sync_section_deserializes() {
        let toml_str = r#"
[sync]
flush_on_start = false
"#;
        let config: ShiftlogConfig = toml::from_str(toml_str).unwrap();
        assert!(!config.sync.flush_on_start);
        assert_eq!(config.app.log_level, "info");
    }
}
