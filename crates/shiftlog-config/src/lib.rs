// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for Shiftlog.
//!
//! Settings come from layered TOML files and `SHIFTLOG_*` environment
//! variables. Unknown keys are rejected, and every problem found is reported
//! at once as a miette diagnostic.
//!
//! ```no_run
//! let config = shiftlog_config::load_and_validate().expect("config errors");
//! println!("Remote: {}", config.remote.base_url);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::{Path, PathBuf};

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::ShiftlogConfig;

/// Loads the standard file hierarchy plus env overrides, then validates.
pub fn load_and_validate() -> Result<ShiftlogConfig, Vec<ConfigError>> {
    finish(loader::load_config(), standard_sources)
}

/// Loads one explicit file plus env overrides, then validates.
pub fn load_and_validate_path(path: &Path) -> Result<ShiftlogConfig, Vec<ConfigError>> {
    let config = finish(loader::load_config_from_path(path), || {
        read_sources([path.to_path_buf()])
    })?;
    tracing::debug!(path = %path.display(), "configuration loaded");
    Ok(config)
}

/// Parses a TOML document on its own, then validates.
pub fn load_and_validate_str(toml_content: &str) -> Result<ShiftlogConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content), Vec::new)
}

/// Validates a loaded config, or turns the load failure into diagnostics.
///
/// Sources are only read back from disk when there is an error to point at.
fn finish(
    loaded: Result<ShiftlogConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<ShiftlogConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::from_figment(err, &sources())),
    }
}

fn standard_sources() -> Vec<(String, String)> {
    let local = std::env::current_dir()
        .map(|d| d.join("shiftlog.toml"))
        .unwrap_or_else(|_| PathBuf::from("shiftlog.toml"));
    read_sources([
        local,
        loader::user_config_path(),
        PathBuf::from("/etc/shiftlog/shiftlog.toml"),
    ])
}

fn read_sources(paths: impl IntoIterator<Item = PathBuf>) -> Vec<(String, String)> {
    paths
        .into_iter()
        .filter_map(|path| {
            std::fs::read_to_string(&path)
                .ok()
                .map(|content| (path.display().to_string(), content))
        })
        .collect()
}
