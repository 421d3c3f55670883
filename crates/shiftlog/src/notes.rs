// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `shiftlog note` and `shiftlog summary` command implementations.

use shiftlog_config::model::ShiftlogConfig;
use shiftlog_core::ShiftlogError;
use shiftlog_sync::Delivery;
use shiftlog_wizard::{WizardError, manual_entry};

use crate::context;

/// Run the `shiftlog note` command.
///
/// The note is composed into a complete entry and applied through the sync
/// engine, so it is queued durably even when the remote store is unreachable.
pub async fn run_note(
    config: &ShiftlogConfig,
    shift_id: &str,
    text: &str,
    time: Option<String>,
) -> Result<(), ShiftlogError> {
    let time = time.unwrap_or_else(current_time);
    let composer = context::build_composer(config);
    let mut engine = context::open_engine(config, shift_id).await?;

    let emission = manual_entry(text, &time, &composer)
        .await
        .map_err(wizard_error)?;
    let line = emission.entry().text.clone();
    let delivery = engine.apply(emission.into_mutation()).await?;

    println!("{line}");
    match delivery {
        Delivery::Confirmed => println!("  saved ({})", engine.status().label()),
        Delivery::Queued => println!(
            "  queued, {} change(s) waiting for delivery",
            engine.status().pending
        ),
    }
    Ok(())
}

/// Run the `shiftlog summary` command.
pub async fn run_summary(config: &ShiftlogConfig, shift_id: &str) -> Result<(), ShiftlogError> {
    let composer = context::build_composer(config);
    let engine = context::open_engine(config, shift_id).await?;
    let shift = engine.shift();

    let summary = match &shift.summary {
        Some(summary) => summary.clone(),
        None => composer.summarize(shift).await,
    };
    println!("{} {} ({})", shift.date, shift.designation, shift.timings);
    println!();
    println!("{summary}");
    Ok(())
}

fn current_time() -> String {
    chrono::Local::now().format("%H:%M").to_string()
}

fn wizard_error(e: WizardError) -> ShiftlogError {
    match e {
        WizardError::InvalidTime(time) => ShiftlogError::InvalidEntry(format!(
            "invalid time {time:?}, expected HH:mm"
        )),
        other => ShiftlogError::InvalidEntry(other.to_string()),
    }
}
