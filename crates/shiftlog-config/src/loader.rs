// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./shiftlog.toml` > `~/.config/shiftlog/shiftlog.toml` >
//! `/etc/shiftlog/shiftlog.toml` with environment variable overrides via `SHIFTLOG_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::ShiftlogConfig;

/// Top-level section names, used to map `SHIFTLOG_<SECTION>_<KEY>` env vars.
const SECTIONS: &[&str] = &["app", "remote", "polish", "storage", "sync"];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/shiftlog/shiftlog.toml` (system-wide)
/// 3. `~/.config/shiftlog/shiftlog.toml` (user XDG config)
/// 4. `./shiftlog.toml` (local directory)
/// 5. `SHIFTLOG_*` environment variables
pub fn load_config() -> Result<ShiftlogConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<ShiftlogConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ShiftlogConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ShiftlogConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ShiftlogConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(ShiftlogConfig::default()))
        .merge(Toml::file("/etc/shiftlog/shiftlog.toml"))
        .merge(Toml::file(user_config_path()))
        .merge(Toml::file("shiftlog.toml"))
        .merge(env_provider())
}

/// Path of the per-user config file.
pub fn user_config_path() -> std::path::PathBuf {
    dirs::config_dir()
        .map(|d| d.join("shiftlog/shiftlog.toml"))
        .unwrap_or_default()
}

/// Environment provider mapping `SHIFTLOG_REMOTE_API_TOKEN` to `remote.api_token`.
///
/// Uses `Env::map()` rather than `Env::split("_")` since key names contain
/// underscores themselves.
fn env_provider() -> Env {
    Env::prefixed("SHIFTLOG_").map(|key| map_env_key(key.as_str()).into())
}

fn map_env_key(key: &str) -> String {
    for section in SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_to_sections() {
        assert_eq!(map_env_key("remote_api_token"), "remote.api_token");
        assert_eq!(map_env_key("polish_max_chars"), "polish.max_chars");
        assert_eq!(map_env_key("sync_flush_on_start"), "sync.flush_on_start");
        assert_eq!(map_env_key("app_log_level"), "app.log_level");
        assert_eq!(map_env_key("unknown"), "unknown");
    }

    #[test]
    fn env_overrides_file_values() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "[remote]\nbase_url = \"http://file\"\n")?;
            jail.set_env("SHIFTLOG_REMOTE_BASE_URL", "http://env");
            jail.set_env("SHIFTLOG_POLISH_MAX_CHARS", "120");
            let config = load_config_from_path(Path::new("custom.toml"))?;
            assert_eq!(config.remote.base_url, "http://env");
            assert_eq!(config.polish.max_chars, 120);
            Ok(())
        });
    }

    #[test]
    fn local_file_is_picked_up() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("shiftlog.toml", "[app]\nlog_level = \"debug\"\n")?;
            let config = load_config()?;
            assert_eq!(config.app.log_level, "debug");
            Ok(())
        });
    }
}
