// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Entry prefixes, provisional text, and the raw note handed to the composer.

use shiftlog_core::{EntryDetails, EntryStatus};

use crate::error::WizardError;
use crate::state::{Fields, Flow, GUARD_CHECKS};

/// Separator between the entry prefix and its narrative.
pub const NARRATIVE_SEPARATOR: &str = " — ";

const IN_PROGRESS_MARKER: &str = "in progress";

fn field<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str, WizardError> {
    value.as_deref().ok_or(WizardError::MissingField(name))
}

/// The `"{time} {status} …{location}"` head shared by every version of an
/// entry.
pub fn prefix(
    flow: Flow,
    time: &str,
    status: EntryStatus,
    fields: &Fields,
) -> Result<String, WizardError> {
    Ok(match flow {
        Flow::SitePatrol => format!("{time} {status} at {}", field(&fields.site, "site")?),
        Flow::AlarmResponse => format!(
            "{time} {status} alarm response for {} at {}",
            field(&fields.company, "alarm company")?,
            field(&fields.location, "location")?
        ),
        Flow::ParkingEnforcement => format!(
            "{time} {status} parking enforcement at {}",
            field(&fields.site, "site")?
        ),
        Flow::InterchangeAssist => format!(
            "{time} {status} interchange assist at {}",
            field(&fields.location, "location")?
        ),
    })
}

/// Text of an entry that has been started but not finalized.
pub fn provisional_text(prefix: &str) -> String {
    format!("{prefix}{NARRATIVE_SEPARATOR}{IN_PROGRESS_MARKER}")
}

/// Final entry text from the prefix and the composed narrative.
pub fn final_text(prefix: &str, narrative: &str) -> String {
    if narrative.is_empty() {
        prefix.to_string()
    } else {
        format!("{prefix}{NARRATIVE_SEPARATOR}{narrative}")
    }
}

/// Structured details for the entry under construction.
pub fn details(flow: Flow, fields: &Fields) -> Result<EntryDetails, WizardError> {
    Ok(match flow {
        Flow::SitePatrol => EntryDetails::SitePatrol {
            site: field(&fields.site, "site")?.to_string(),
        },
        Flow::AlarmResponse => EntryDetails::AlarmResponse {
            company: field(&fields.company, "alarm company")?.to_string(),
            location: field(&fields.location, "location")?.to_string(),
        },
        Flow::ParkingEnforcement => EntryDetails::ParkingEnforcement {
            site: field(&fields.site, "site")?.to_string(),
            vehicle: field(&fields.vehicle, "vehicle")?.to_string(),
            action: field(&fields.action, "action taken")?.to_string(),
        },
        Flow::InterchangeAssist => EntryDetails::InterchangeAssist {
            location: field(&fields.location, "location")?.to_string(),
        },
    })
}

/// Raw note summarising the collected answers, one clause per fact.
pub fn note(flow: Flow, fields: &Fields) -> String {
    let mut parts: Vec<String> = Vec::new();
    let unknown = || "unknown".to_string();

    match flow {
        Flow::SitePatrol => {
            parts.push("Patrolled exterior and interior".into());
            if let Some(staff) = &fields.staff_name {
                parts.push(format!("Met with staff member {staff}"));
            }
            if fields.guard_present == Some(true) {
                let name = fields.guard_name.clone().unwrap_or_else(unknown);
                parts.push(format!("S/G \"{name}\" on site"));
                let failed: Vec<&str> = GUARD_CHECKS
                    .iter()
                    .copied()
                    .zip(&fields.guard_checks)
                    .filter(|(_, passed)| !**passed)
                    .map(|(question, _)| question.trim_end_matches('?'))
                    .collect();
                if failed.is_empty() {
                    parts.push("All guard checks passed".into());
                } else {
                    parts.push(format!("Guard checks failed: {}", failed.join(", ")));
                }
            }
        }
        Flow::AlarmResponse => parts.push(format!(
            "Responded to an alarm from {} at {}",
            fields.company.clone().unwrap_or_else(unknown),
            fields.location.clone().unwrap_or_else(unknown)
        )),
        Flow::ParkingEnforcement => parts.push(format!(
            "Conducted parking enforcement on vehicle {} at {}, action taken: {}",
            fields.vehicle.clone().unwrap_or_else(unknown),
            fields.site.clone().unwrap_or_else(unknown),
            fields.action.clone().unwrap_or_else(unknown)
        )),
        Flow::InterchangeAssist => parts.push(format!(
            "Assisted at interchange {}",
            fields.location.clone().unwrap_or_else(unknown)
        )),
    }

    match (&fields.issue, fields.ok) {
        (Some(issue), _) => parts.push(issue.clone()),
        (None, Some(false)) => {}
        (None, _) => parts.push(match flow {
            Flow::SitePatrol => "All secure".into(),
            _ => "No issues found".into(),
        }),
    }

    parts
        .iter()
        .map(|p| capitalize(p))
        .collect::<Vec<_>>()
        .join(". ")
}

fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
