// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `shiftlog queue` and `shiftlog flush` command implementations.
//!
//! `queue` reads the durable queue straight from local storage and never
//! touches the network. `flush` restores the shift's sync engine and
//! delivers whatever is pending.

use std::io::IsTerminal;

use chrono::{DateTime, Utc};
use serde::Serialize;
use shiftlog_config::model::ShiftlogConfig;
use shiftlog_core::{Mutation, QueuedOperation, ShiftlogError};

use crate::context;

/// One queued operation, as printed by `--json`.
#[derive(Debug, Serialize)]
pub struct QueueItem {
    pub operation_id: String,
    pub shift_id: String,
    pub kind: &'static str,
    pub enqueued_at: DateTime<Utc>,
    pub target: String,
}

/// Structured output for `shiftlog queue --json`.
#[derive(Debug, Serialize)]
pub struct QueueReport {
    pub pending: usize,
    pub operations: Vec<QueueItem>,
}

impl QueueReport {
    fn from_operations(ops: &[QueuedOperation]) -> Self {
        Self {
            pending: ops.len(),
            operations: ops.iter().map(QueueItem::from).collect(),
        }
    }
}

impl From<&QueuedOperation> for QueueItem {
    fn from(op: &QueuedOperation) -> Self {
        Self {
            operation_id: op.id.to_string(),
            shift_id: op.shift_id.to_string(),
            kind: op.mutation.kind(),
            enqueued_at: op.enqueued_at,
            target: describe_target(&op.mutation),
        }
    }
}

/// Short human description of what a mutation touches.
fn describe_target(mutation: &Mutation) -> String {
    match mutation {
        Mutation::Append { entry } | Mutation::Update { entry, .. } => {
            if entry.in_progress {
                format!("{} (in progress)", entry.time)
            } else {
                truncate(&entry.text, 48)
            }
        }
        Mutation::Delete { index, .. } => format!("entry #{}", index + 1),
        Mutation::Complete { .. } => "end of shift".to_string(),
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

/// Run the `shiftlog queue` command.
///
/// If `--json` is passed, outputs structured JSON for scripting.
/// If `--plain` is passed or stdout is not a TTY, disables colors.
pub async fn run_queue(
    config: &ShiftlogConfig,
    shift_id: Option<&str>,
    json: bool,
    plain: bool,
) -> Result<(), ShiftlogError> {
    let store = context::open_store(config).await?;
    let mut ops = store.all_pending().await?;
    if let Some(id) = shift_id {
        ops.retain(|op| op.shift_id.0 == id);
    }

    let report = QueueReport::from_operations(&ops);
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        let use_color = !plain && std::io::stdout().is_terminal();
        print_queue(&report, use_color);
    }
    Ok(())
}

/// Run the `shiftlog flush` command.
pub async fn run_flush(config: &ShiftlogConfig, shift_id: &str) -> Result<(), ShiftlogError> {
    let mut engine = context::open_engine(config, shift_id).await?;
    let report = engine.flush().await?;
    let status = engine.status();

    println!();
    println!("  shiftlog flush {shift_id}");
    println!("  {}", "-".repeat(35));
    println!("    Status:    {}", status.label());
    println!("    Delivered: {}", report.delivered);
    println!("    Remaining: {}", report.remaining);
    println!();
    Ok(())
}

fn print_queue(report: &QueueReport, use_color: bool) {
    println!();
    println!("  shiftlog queue");
    println!("  {}", "-".repeat(35));

    if report.pending == 0 {
        if use_color {
            use colored::Colorize;
            println!("    {} {}", "✓".green(), "all changes synced".green());
        } else {
            println!("    [OK] all changes synced");
        }
        println!();
        return;
    }

    if use_color {
        use colored::Colorize;
        println!(
            "    {} {}",
            "●".yellow(),
            format!("{} pending", report.pending).yellow()
        );
    } else {
        println!("    [QUEUED] {} pending", report.pending);
    }
    println!();
    for item in &report.operations {
        println!(
            "    {}  {:<8} {:<12} {}",
            item.enqueued_at.format("%H:%M:%S"),
            item.kind,
            item.shift_id,
            item.target
        );
    }
    println!();
}
