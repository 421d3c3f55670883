// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Shiftlog.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Shiftlog configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ShiftlogConfig {
    /// Application-wide settings.
    #[serde(default)]
    pub app: AppConfig,

    /// Remote shift store settings.
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Text polish collaborator settings.
    #[serde(default)]
    pub polish: PolishConfig,

    /// Local storage settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Sync engine settings.
    #[serde(default)]
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Remote shift store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteConfig {
    /// Base URL of the shift API, e.g. `https://logs.example.com/api`.
    #[serde(default = "default_remote_base_url")]
    pub base_url: String,

    /// Bearer token sent with every request. `None` sends no auth header.
    #[serde(default)]
    pub api_token: Option<String>,

    /// Per-request timeout in seconds. A timeout counts as a delivery failure.
    #[serde(default = "default_remote_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: default_remote_base_url(),
            api_token: None,
            timeout_secs: default_remote_timeout_secs(),
        }
    }
}

fn default_remote_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_remote_timeout_secs() -> u64 {
    15
}

/// Text polish collaborator configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PolishConfig {
    /// API key for the chat-completions endpoint. `None` disables remote
    /// polishing; notes are then formatted locally.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model name passed to the endpoint.
    #[serde(default = "default_polish_model")]
    pub model: String,

    /// Base URL of an OpenAI-compatible API.
    #[serde(default = "default_polish_base_url")]
    pub base_url: String,

    /// Upper bound on a polish round trip before falling back.
    #[serde(default = "default_polish_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum length of a polished sentence, in characters.
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
}

impl Default for PolishConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_polish_model(),
            base_url: default_polish_base_url(),
            timeout_secs: default_polish_timeout_secs(),
            max_chars: default_max_chars(),
        }
    }
}

fn default_polish_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_polish_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_polish_timeout_secs() -> u64 {
    8
}

fn default_max_chars() -> usize {
    220
}

/// Local storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for concurrent reads.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_local_dir()
        .map(|d| d.join("shiftlog").join("shiftlog.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("shiftlog.db"))
        .display()
        .to_string()
}

fn default_wal_mode() -> bool {
    true
}

/// Sync engine configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SyncConfig {
    /// Flush the queue as soon as a shift is opened while online.
    #[serde(default = "default_flush_on_start")]
    pub flush_on_start: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            flush_on_start: default_flush_on_start(),
        }
    }
}

fn default_flush_on_start() -> bool {
    true
}
