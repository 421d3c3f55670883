// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shift and entry documents.
//!
//! These are plain data containers mirroring the remote wire format
//! (camelCase JSON). The only behavior here is what keeps the data-model
//! invariants intact: one in-progress entry per shift, non-empty text on
//! finalized entries, no mutation after completion.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::ShiftlogError;
use crate::types::{EntryId, ShiftId};

/// Marker appended to an entry's text once it has been acknowledged.
pub const TEN_FOUR_SUFFIX: &str = " 10-4";

/// Operational profile of a shift. Selects the wizard branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftMode {
    SitePatrol,
    AlarmResponse,
    ParkingEnforcement,
    Interchange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShiftStatus {
    #[default]
    Active,
    Completed,
}

/// Radio status code recorded with an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryStatus {
    /// Out of service.
    #[serde(rename = "10-7")]
    OutOfService,
    /// In service.
    #[serde(rename = "10-8")]
    InService,
    /// Acknowledgement.
    #[serde(rename = "10-4")]
    Acknowledged,
}

impl EntryStatus {
    pub fn code(&self) -> &'static str {
        match self {
            EntryStatus::OutOfService => "10-7",
            EntryStatus::InService => "10-8",
            EntryStatus::Acknowledged => "10-4",
        }
    }
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Operational subtype of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    SitePatrol,
    AlarmResponse,
    ParkingEnforcement,
    InterchangeAssist,
    Manual,
}

/// Type-specific payload of an entry. The variant always matches
/// [`Entry::entry_type`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntryDetails {
    SitePatrol {
        site: String,
    },
    AlarmResponse {
        company: String,
        location: String,
    },
    ParkingEnforcement {
        site: String,
        vehicle: String,
        action: String,
    },
    InterchangeAssist {
        location: String,
    },
    Manual {
        note: String,
    },
}

impl EntryDetails {
    pub fn entry_type(&self) -> EntryType {
        match self {
            EntryDetails::SitePatrol { .. } => EntryType::SitePatrol,
            EntryDetails::AlarmResponse { .. } => EntryType::AlarmResponse,
            EntryDetails::ParkingEnforcement { .. } => EntryType::ParkingEnforcement,
            EntryDetails::InterchangeAssist { .. } => EntryType::InterchangeAssist,
            EntryDetails::Manual { .. } => EntryType::Manual,
        }
    }

    /// The location the entry refers to, used as the entry's `site`.
    pub fn location(&self) -> &str {
        match self {
            EntryDetails::SitePatrol { site } => site,
            EntryDetails::AlarmResponse { location, .. } => location,
            EntryDetails::ParkingEnforcement { site, .. } => site,
            EntryDetails::InterchangeAssist { location } => location,
            EntryDetails::Manual { .. } => "Manual Entry",
        }
    }
}

/// One log record within a shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: EntryId,
    /// Local wall-clock time, `HH:mm`.
    pub time: String,
    pub status: EntryStatus,
    pub site: String,
    pub ok: bool,
    pub text: String,
    #[serde(default)]
    pub ten_four: bool,
    #[serde(default)]
    pub manual: bool,
    #[serde(default)]
    pub in_progress: bool,
    pub entry_type: EntryType,
    pub details: EntryDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guard_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub guard_checks: Vec<bool>,
    /// Opaque resume state written by the entry wizard while the entry is in
    /// progress. Cleared on finalize.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuation: Option<serde_json::Value>,
}

impl Entry {
    /// Builds an entry whose type and site are derived from `details`.
    pub fn new(
        time: impl Into<String>,
        status: EntryStatus,
        details: EntryDetails,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: EntryId::new(),
            time: time.into(),
            status,
            site: details.location().to_string(),
            ok: true,
            text: text.into(),
            ten_four: false,
            manual: matches!(details, EntryDetails::Manual { .. }),
            in_progress: false,
            entry_type: details.entry_type(),
            details,
            staff_name: None,
            guard_name: None,
            guard_checks: Vec::new(),
            continuation: None,
        }
    }

    /// Checks the per-entry invariants.
    pub fn validate(&self) -> Result<(), ShiftlogError> {
        if !is_valid_time(&self.time) {
            return Err(ShiftlogError::InvalidEntry(format!(
                "time `{}` is not HH:mm",
                self.time
            )));
        }
        if self.details.entry_type() != self.entry_type {
            return Err(ShiftlogError::InvalidEntry(format!(
                "details do not match entry type {:?}",
                self.entry_type
            )));
        }
        if !self.in_progress && self.text.trim().is_empty() {
            return Err(ShiftlogError::InvalidEntry(
                "finalized entry has empty text".into(),
            ));
        }
        Ok(())
    }

    /// Sets or clears the acknowledgement flag, keeping the trailing
    /// ` 10-4` marker in the text in step. Repeating a call is a no-op.
    pub fn set_ten_four(&mut self, on: bool) {
        let trimmed = self.text.trim_end();
        let has_marker = trimmed.ends_with(TEN_FOUR_SUFFIX);
        if on && !has_marker {
            self.text = format!("{trimmed}{TEN_FOUR_SUFFIX}");
        } else if !on && has_marker {
            self.text = trimmed[..trimmed.len() - TEN_FOUR_SUFFIX.len()].to_string();
        }
        self.ten_four = on;
    }

    /// Rewrites the time and the narrative body. The text becomes
    /// `"{time} {body}"`.
    pub fn edit(&mut self, time: &str, body: &str) -> Result<(), ShiftlogError> {
        if !is_valid_time(time) {
            return Err(ShiftlogError::InvalidEntry(format!(
                "time `{time}` is not HH:mm"
            )));
        }
        let body = body.trim();
        if body.is_empty() {
            return Err(ShiftlogError::InvalidEntry("entry text is empty".into()));
        }
        self.time = time.to_string();
        self.text = format!("{time} {body}");
        Ok(())
    }
}

/// Returns true for a zero-padded 24-hour `HH:mm` string.
pub fn is_valid_time(time: &str) -> bool {
    time.len() == 5 && NaiveTime::parse_from_str(time, "%H:%M").is_ok()
}

/// One work period owned by a single user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub id: ShiftId,
    pub owner_id: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Display string such as `18:00–06:00`.
    pub timings: String,
    pub designation: String,
    pub mode: ShiftMode,
    #[serde(default)]
    pub status: ShiftStatus,
    #[serde(default)]
    pub entries: Vec<Entry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl Shift {
    pub fn new(
        id: impl Into<String>,
        owner_id: impl Into<String>,
        date: impl Into<String>,
        timings: impl Into<String>,
        designation: impl Into<String>,
        mode: ShiftMode,
    ) -> Self {
        Self {
            id: ShiftId(id.into()),
            owner_id: owner_id.into(),
            date: date.into(),
            timings: timings.into(),
            designation: designation.into(),
            mode,
            status: ShiftStatus::Active,
            entries: Vec::new(),
            summary: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == ShiftStatus::Completed
    }

    /// The single in-progress entry, with its index, if any.
    pub fn in_progress_entry(&self) -> Option<(usize, &Entry)> {
        self.entries.iter().enumerate().find(|(_, e)| e.in_progress)
    }

    /// Current position of the entry with the given id.
    pub fn position_of(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Fails with [`ShiftlogError::ShiftCompleted`] once the shift is completed.
    pub fn ensure_active(&self) -> Result<(), ShiftlogError> {
        if self.is_completed() {
            return Err(ShiftlogError::ShiftCompleted {
                shift_id: self.id.0.clone(),
            });
        }
        Ok(())
    }
}
