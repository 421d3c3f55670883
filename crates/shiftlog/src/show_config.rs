// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `shiftlog config`: prints the effective configuration as TOML.

use shiftlog_config::model::ShiftlogConfig;
use shiftlog_core::ShiftlogError;

/// The redaction placeholder.
const REDACTED: &str = "[REDACTED]";

pub fn run_config(config: &ShiftlogConfig, show_secrets: bool) -> Result<(), ShiftlogError> {
    print!("{}", render(config, show_secrets)?);
    Ok(())
}

fn render(config: &ShiftlogConfig, show_secrets: bool) -> Result<String, ShiftlogError> {
    let printable = if show_secrets {
        config.clone()
    } else {
        redacted(config)
    };
    toml::to_string_pretty(&printable)
        .map_err(|e| ShiftlogError::Config(format!("failed to render configuration: {e}")))
}

/// Replaces every credential that is set with a placeholder.
fn redacted(config: &ShiftlogConfig) -> ShiftlogConfig {
    let mut config = config.clone();
    for secret in [&mut config.remote.api_token, &mut config.polish.api_key] {
        if secret.is_some() {
            *secret = Some(REDACTED.to_string());
        }
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_secrets() -> ShiftlogConfig {
        let mut config = ShiftlogConfig::default();
        config.remote.api_token = Some("tok-live-1234567890".into());
        config.polish.api_key = Some("sk-abcdefghijklmnopqrstuvwxyz".into());
        config
    }

    #[test]
    fn secrets_are_redacted_by_default() {
        let out = render(&with_secrets(), false).unwrap();
        assert!(!out.contains("tok-live-1234567890"));
        assert!(!out.contains("sk-abcdefghijklmnopqrstuvwxyz"));
        assert_eq!(out.matches(REDACTED).count(), 2);
    }

    #[test]
    fn show_secrets_prints_them() {
        let out = render(&with_secrets(), true).unwrap();
        assert!(out.contains("tok-live-1234567890"));
    }

    #[test]
    fn unset_secrets_stay_absent() {
        let out = render(&ShiftlogConfig::default(), false).unwrap();
        assert!(!out.contains(REDACTED));
        assert!(out.contains("[remote]"));
        assert!(out.contains("base_url"));
    }

    #[test]
    fn rendered_config_loads_back() {
        let out = render(&ShiftlogConfig::default(), true).unwrap();
        let back = shiftlog_config::load_and_validate_str(&out).expect("round trip");
        assert_eq!(back.polish.max_chars, 220);
    }
}
