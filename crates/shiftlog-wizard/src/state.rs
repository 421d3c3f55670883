// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wizard steps, answers, and the accumulated state between them.

use serde::{Deserialize, Serialize};
use shiftlog_core::{EntryDetails, EntryStatus, EntryType, ShiftMode};

/// Fixed guard-check questions asked one per step, in this order.
pub const GUARD_CHECKS: [&str; 4] = [
    "Guard in uniform?",
    "Guard at post?",
    "Logbook up to date?",
    "Site keys accounted for?",
];

/// The branch of questions that builds one kind of entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Flow {
    SitePatrol,
    AlarmResponse,
    ParkingEnforcement,
    InterchangeAssist,
}

impl Flow {
    pub fn entry_type(self) -> EntryType {
        match self {
            Flow::SitePatrol => EntryType::SitePatrol,
            Flow::AlarmResponse => EntryType::AlarmResponse,
            Flow::ParkingEnforcement => EntryType::ParkingEnforcement,
            Flow::InterchangeAssist => EntryType::InterchangeAssist,
        }
    }

    /// First step of the resume phase.
    pub fn resume_step(self) -> Step {
        match self {
            Flow::SitePatrol => Step::GuardPresent,
            _ => Step::Outcome,
        }
    }

    /// Flow for an existing entry type, if the wizard builds that type.
    pub fn for_entry_type(entry_type: EntryType) -> Option<Self> {
        match entry_type {
            EntryType::SitePatrol => Some(Flow::SitePatrol),
            EntryType::AlarmResponse => Some(Flow::AlarmResponse),
            EntryType::ParkingEnforcement => Some(Flow::ParkingEnforcement),
            EntryType::InterchangeAssist => Some(Flow::InterchangeAssist),
            EntryType::Manual => None,
        }
    }
}

/// A named wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Step {
    Status,
    Site,
    StaffName,
    AlarmDetails,
    ParkingDetails,
    InterchangePrompt,
    LocationSelect,
    AlarmOrPatrol,
    GuardPresent,
    GuardName,
    /// Index into [`GUARD_CHECKS`].
    GuardCheck(usize),
    Outcome,
    IssueDescription,
    Done,
}

impl Step {
    /// Question shown to the operator.
    pub fn prompt(self) -> &'static str {
        match self {
            Step::Status => "Status?",
            Step::Site => "Site / location?",
            Step::StaffName => "Staff member met (optional)?",
            Step::AlarmDetails => "Alarm company and location?",
            Step::ParkingDetails => "Site, vehicle and action taken?",
            Step::InterchangePrompt => "Interchange assist?",
            Step::LocationSelect => "Interchange location?",
            Step::AlarmOrPatrol => "Alarm response or site patrol?",
            Step::GuardPresent => "Is a guard on site?",
            Step::GuardName => "Guard name?",
            Step::GuardCheck(i) => GUARD_CHECKS.get(i).copied().unwrap_or("Guard check?"),
            Step::Outcome => "Is everything OK?",
            Step::IssueDescription => "Describe the issue.",
            Step::Done => "Entry saved.",
        }
    }
}

/// Choice at the interchange "no" branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Alarm,
    Patrol,
}

/// One operator answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Status(EntryStatus),
    Text(String),
    Skip,
    YesNo(bool),
    AlarmDetails { company: String, location: String },
    ParkingDetails { site: String, vehicle: String, action: String },
    Route(Route),
}

impl Answer {
    pub fn kind(&self) -> &'static str {
        match self {
            Answer::Status(_) => "status",
            Answer::Text(_) => "text",
            Answer::Skip => "skip",
            Answer::YesNo(_) => "yes/no",
            Answer::AlarmDetails { .. } => "alarm details",
            Answer::ParkingDetails { .. } => "parking details",
            Answer::Route(_) => "route",
        }
    }
}

/// Answers collected so far. Persisted with an in-progress entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guard_present: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guard_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub guard_checks: Vec<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ok: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
}

impl Fields {
    /// Rebuilds the arrival answers from an entry's details payload.
    pub fn from_details(details: &EntryDetails) -> Self {
        let mut fields = Fields::default();
        match details {
            EntryDetails::SitePatrol { site } => fields.site = Some(site.clone()),
            EntryDetails::AlarmResponse { company, location } => {
                fields.company = Some(company.clone());
                fields.location = Some(location.clone());
            }
            EntryDetails::ParkingEnforcement {
                site,
                vehicle,
                action,
            } => {
                fields.site = Some(site.clone());
                fields.vehicle = Some(vehicle.clone());
                fields.action = Some(action.clone());
            }
            EntryDetails::InterchangeAssist { location } => {
                fields.location = Some(location.clone());
            }
            EntryDetails::Manual { .. } => {}
        }
        fields
    }
}

/// Everything the transition function needs to pick the next step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardState {
    pub mode: ShiftMode,
    /// Unknown until mode routing has run.
    pub flow: Option<Flow>,
    pub step: Step,
    pub time: String,
    pub status: Option<EntryStatus>,
    pub fields: Fields,
}

impl WizardState {
    /// Fresh state at the status step.
    pub fn new(mode: ShiftMode, time: impl Into<String>) -> Self {
        Self {
            mode,
            flow: None,
            step: Step::Status,
            time: time.into(),
            status: None,
            fields: Fields::default(),
        }
    }

    pub(crate) fn at(&self, step: Step) -> Self {
        Self {
            step,
            ..self.clone()
        }
    }
}

/// Resume state stored on the in-progress entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Continuation {
    pub flow: Flow,
    pub step: Step,
    /// `"{time} {status} …{location}"` text every version of the entry
    /// starts with.
    pub prefix: String,
    pub fields: Fields,
}

impl Continuation {
    pub fn to_value(&self) -> serde_json::Value {
        // Serializing plain data with string keys cannot fail.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    pub fn from_value(value: &serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value.clone())
    }
}
