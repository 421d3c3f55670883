// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shiftlog - offline-first shift logging.
//!
//! Command-line entry point for inspecting and flushing the local mutation
//! queue, adding notes, and checking configuration.

mod context;
mod notes;
mod queue;
mod show_config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shiftlog_config::model::ShiftlogConfig;

/// Shiftlog - offline-first shift logging.
#[derive(Parser, Debug)]
#[command(name = "shiftlog", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List operations waiting for delivery to the remote store.
    Queue {
        /// Only show operations for this shift.
        shift_id: Option<String>,
        /// Output as JSON.
        #[arg(long)]
        json: bool,
        /// Disable colors.
        #[arg(long)]
        plain: bool,
    },
    /// Deliver a shift's queued operations now.
    Flush {
        shift_id: String,
    },
    /// Add a free-text note to a shift.
    Note {
        shift_id: String,
        /// The note, polished before it is saved.
        text: String,
        /// Entry time (HH:mm). Defaults to now.
        #[arg(long)]
        time: Option<String>,
    },
    /// Print a narrative summary of a shift.
    Summary {
        shift_id: String,
    },
    /// Print the effective configuration.
    Config {
        /// Show secrets instead of redacting them.
        #[arg(long)]
        show_secrets: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => shiftlog_config::load_and_validate_path(path),
        None => shiftlog_config::load_and_validate(),
    };
    let config: ShiftlogConfig = match loaded {
        Ok(config) => config,
        Err(errors) => {
            shiftlog_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.app.log_level);

    let result = match cli.command {
        Some(Commands::Queue {
            shift_id,
            json,
            plain,
        }) => queue::run_queue(&config, shift_id.as_deref(), json, plain).await,
        Some(Commands::Flush { shift_id }) => queue::run_flush(&config, &shift_id).await,
        Some(Commands::Note {
            shift_id,
            text,
            time,
        }) => notes::run_note(&config, &shift_id, &text, time).await,
        Some(Commands::Summary { shift_id }) => notes::run_summary(&config, &shift_id).await,
        Some(Commands::Config { show_secrets }) => show_config::run_config(&config, show_secrets),
        None => {
            println!("shiftlog: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("shiftlog: {e}");
        std::process::exit(1);
    }
}

/// Initialize the tracing subscriber with an env filter.
///
/// `RUST_LOG` takes precedence over `app.log_level`.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("shiftlog={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_queue_with_flags() {
        let cli = Cli::try_parse_from(["shiftlog", "queue", "s-1", "--json"]).unwrap();
        match cli.command {
            Some(Commands::Queue {
                shift_id, json, ..
            }) => {
                assert_eq!(shift_id.as_deref(), Some("s-1"));
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn note_time_is_optional() {
        let cli = Cli::try_parse_from(["shiftlog", "note", "s-1", "checked panel"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Note { time: None, .. })
        ));
    }

    #[test]
    fn global_config_flag_after_subcommand() {
        let cli =
            Cli::try_parse_from(["shiftlog", "flush", "s-1", "--config", "/tmp/x.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/x.toml")));
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config = shiftlog_config::load_and_validate_str("").expect("defaults should be valid");
        assert_eq!(config.app.log_level, "info");
    }
}
