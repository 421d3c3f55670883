// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pure transition tables.
//!
//! [`transition`] never mutates its input. A refused answer therefore leaves
//! the caller's state exactly as it was.

use shiftlog_core::{EntryStatus, ShiftMode};

use crate::error::WizardError;
use crate::state::{Answer, Flow, GUARD_CHECKS, Route, Step, WizardState};

/// Result of accepting one answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Move to the next question.
    Next(WizardState),
    /// The arrival fields are known. The in-progress entry should be
    /// emitted; the state already points at the first resume step.
    Arrived(WizardState),
    /// All answers are in; finalize the entry.
    Finished(WizardState),
}

impl Transition {
    pub fn state(&self) -> &WizardState {
        match self {
            Transition::Next(s) | Transition::Arrived(s) | Transition::Finished(s) => s,
        }
    }
}

/// Computes the state that follows `answer`.
pub fn transition(state: &WizardState, answer: Answer) -> Result<Transition, WizardError> {
    match state.step {
        Step::Status | Step::InterchangePrompt | Step::AlarmOrPatrol => routing(state, answer),
        Step::Outcome | Step::IssueDescription => outcome(state, answer),
        Step::Done => Err(unexpected(state, &answer)),
        _ => match state.flow {
            Some(Flow::SitePatrol) => site_patrol(state, answer),
            Some(Flow::AlarmResponse) => alarm_response(state, answer),
            Some(Flow::ParkingEnforcement) => parking_enforcement(state, answer),
            Some(Flow::InterchangeAssist) => interchange_assist(state, answer),
            None => Err(unexpected(state, &answer)),
        },
    }
}

fn routing(state: &WizardState, answer: Answer) -> Result<Transition, WizardError> {
    match (state.step, answer) {
        (Step::Status, Answer::Status(status)) if status != EntryStatus::Acknowledged => {
            let mut next = state.clone();
            next.status = Some(status);
            let (flow, step) = match state.mode {
                ShiftMode::SitePatrol => (Some(Flow::SitePatrol), Step::Site),
                ShiftMode::AlarmResponse => (Some(Flow::AlarmResponse), Step::AlarmDetails),
                ShiftMode::ParkingEnforcement => {
                    (Some(Flow::ParkingEnforcement), Step::ParkingDetails)
                }
                ShiftMode::Interchange => (None, Step::InterchangePrompt),
            };
            next.flow = flow;
            next.step = step;
            Ok(Transition::Next(next))
        }
        (Step::InterchangePrompt, Answer::YesNo(true)) => {
            let mut next = state.at(Step::LocationSelect);
            next.flow = Some(Flow::InterchangeAssist);
            Ok(Transition::Next(next))
        }
        (Step::InterchangePrompt, Answer::YesNo(false)) => {
            Ok(Transition::Next(state.at(Step::AlarmOrPatrol)))
        }
        (Step::AlarmOrPatrol, Answer::Route(route)) => {
            let (flow, step) = match route {
                Route::Alarm => (Flow::AlarmResponse, Step::AlarmDetails),
                Route::Patrol => (Flow::SitePatrol, Step::Site),
            };
            let mut next = state.at(step);
            next.flow = Some(flow);
            Ok(Transition::Next(next))
        }
        (_, answer) => Err(unexpected(state, &answer)),
    }
}

fn site_patrol(state: &WizardState, answer: Answer) -> Result<Transition, WizardError> {
    match (state.step, answer) {
        (Step::Site, Answer::Text(site)) => {
            let mut next = state.at(Step::StaffName);
            next.fields.site = Some(required(&site, "site")?);
            Ok(Transition::Next(next))
        }
        (Step::StaffName, answer @ (Answer::Text(_) | Answer::Skip)) => {
            let mut next = state.at(Flow::SitePatrol.resume_step());
            next.fields.staff_name = match answer {
                Answer::Text(name) => optional(&name),
                _ => None,
            };
            Ok(Transition::Arrived(next))
        }
        (Step::GuardPresent, Answer::YesNo(true)) => {
            let mut next = state.at(Step::GuardName);
            next.fields.guard_present = Some(true);
            Ok(Transition::Next(next))
        }
        (Step::GuardPresent, Answer::YesNo(false)) => {
            let mut next = state.at(Step::Outcome);
            next.fields.guard_present = Some(false);
            next.fields.guard_name = None;
            next.fields.guard_checks.clear();
            Ok(Transition::Next(next))
        }
        (Step::GuardName, Answer::Text(name)) => {
            let mut next = state.at(Step::GuardCheck(0));
            next.fields.guard_name = Some(required(&name, "guard name")?);
            next.fields.guard_checks.clear();
            Ok(Transition::Next(next))
        }
        (Step::GuardCheck(i), Answer::YesNo(passed)) => {
            let step = if i + 1 < GUARD_CHECKS.len() {
                Step::GuardCheck(i + 1)
            } else {
                Step::Outcome
            };
            let mut next = state.at(step);
            next.fields.guard_checks.truncate(i);
            next.fields.guard_checks.push(passed);
            Ok(Transition::Next(next))
        }
        (_, answer) => Err(unexpected(state, &answer)),
    }
}

fn alarm_response(state: &WizardState, answer: Answer) -> Result<Transition, WizardError> {
    match (state.step, answer) {
        (Step::AlarmDetails, Answer::AlarmDetails { company, location }) => {
            let mut next = state.at(Flow::AlarmResponse.resume_step());
            next.fields.company = Some(required(&company, "alarm company")?);
            next.fields.location = Some(required(&location, "location")?);
            Ok(Transition::Arrived(next))
        }
        (_, answer) => Err(unexpected(state, &answer)),
    }
}

fn parking_enforcement(state: &WizardState, answer: Answer) -> Result<Transition, WizardError> {
    match (state.step, answer) {
        (
            Step::ParkingDetails,
            Answer::ParkingDetails {
                site,
                vehicle,
                action,
            },
        ) => {
            let mut next = state.at(Flow::ParkingEnforcement.resume_step());
            next.fields.site = Some(required(&site, "site")?);
            next.fields.vehicle = Some(required(&vehicle, "vehicle")?);
            next.fields.action = Some(required(&action, "action taken")?);
            Ok(Transition::Arrived(next))
        }
        (_, answer) => Err(unexpected(state, &answer)),
    }
}

fn interchange_assist(state: &WizardState, answer: Answer) -> Result<Transition, WizardError> {
    match (state.step, answer) {
        (Step::LocationSelect, Answer::Text(location)) => {
            let mut next = state.at(Flow::InterchangeAssist.resume_step());
            next.fields.location = Some(required(&location, "location")?);
            Ok(Transition::Arrived(next))
        }
        (_, answer) => Err(unexpected(state, &answer)),
    }
}

fn outcome(state: &WizardState, answer: Answer) -> Result<Transition, WizardError> {
    match (state.step, answer) {
        (Step::Outcome, Answer::YesNo(true)) => {
            let mut next = state.at(Step::Done);
            next.fields.ok = Some(true);
            next.fields.issue = None;
            Ok(Transition::Finished(next))
        }
        (Step::Outcome, Answer::YesNo(false)) => {
            let mut next = state.at(Step::IssueDescription);
            next.fields.ok = Some(false);
            Ok(Transition::Next(next))
        }
        (Step::IssueDescription, Answer::Text(issue)) => {
            let mut next = state.at(Step::Done);
            next.fields.issue = Some(required(&issue, "issue description")?);
            Ok(Transition::Finished(next))
        }
        (_, answer) => Err(unexpected(state, &answer)),
    }
}

fn required(value: &str, field: &'static str) -> Result<String, WizardError> {
    optional(value).ok_or(WizardError::MissingField(field))
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn unexpected(state: &WizardState, answer: &Answer) -> WizardError {
    WizardError::UnexpectedAnswer {
        step: state.step,
        answer: answer.kind(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(mut state: WizardState, answers: Vec<Answer>) -> (WizardState, Vec<&'static str>) {
        let mut kinds = Vec::new();
        for answer in answers {
            let t = transition(&state, answer).unwrap();
            kinds.push(match &t {
                Transition::Next(_) => "next",
                Transition::Arrived(_) => "arrived",
                Transition::Finished(_) => "finished",
            });
            state = t.state().clone();
        }
        (state, kinds)
    }

    fn text(s: &str) -> Answer {
        Answer::Text(s.into())
    }

    #[test]
    fn site_patrol_with_guard_walks_every_check() {
        let state = WizardState::new(ShiftMode::SitePatrol, "21:05");
        let mut answers = vec![
            Answer::Status(EntryStatus::InService),
            text("Dock 4"),
            Answer::Skip,
            Answer::YesNo(true),
            text("Sam"),
        ];
        answers.extend([true, false, true, true].map(Answer::YesNo));
        answers.push(Answer::YesNo(true));

        let (state, kinds) = run(state, answers);
        assert_eq!(
            kinds,
            [
                "next", "next", "arrived", "next", "next", "next", "next", "next", "next",
                "finished"
            ]
        );
        assert_eq!(state.step, Step::Done);
        assert_eq!(state.fields.guard_checks, vec![true, false, true, true]);
        assert_eq!(state.fields.guard_name.as_deref(), Some("Sam"));
        assert_eq!(state.fields.ok, Some(true));
    }

    #[test]
    fn no_guard_goes_straight_to_outcome() {
        let mut state = WizardState::new(ShiftMode::SitePatrol, "21:05");
        state.flow = Some(Flow::SitePatrol);
        state.step = Step::GuardPresent;
        let t = transition(&state, Answer::YesNo(false)).unwrap();
        assert_eq!(t.state().step, Step::Outcome);
        assert_eq!(t.state().fields.guard_present, Some(false));
    }

    #[test]
    fn alarm_mode_arrives_after_details() {
        let state = WizardState::new(ShiftMode::AlarmResponse, "22:15");
        let (state, kinds) = run(
            state,
            vec![
                Answer::Status(EntryStatus::InService),
                Answer::AlarmDetails {
                    company: "Bell".into(),
                    location: "123 Main St".into(),
                },
            ],
        );
        assert_eq!(kinds, ["next", "arrived"]);
        assert_eq!(state.step, Step::Outcome);
        assert_eq!(state.flow, Some(Flow::AlarmResponse));
    }

    #[test]
    fn interchange_yes_selects_location() {
        let state = WizardState::new(ShiftMode::Interchange, "03:00");
        let (state, kinds) = run(
            state,
            vec![
                Answer::Status(EntryStatus::OutOfService),
                Answer::YesNo(true),
                text("Hwy 401 / 427"),
            ],
        );
        assert_eq!(kinds, ["next", "next", "arrived"]);
        assert_eq!(state.flow, Some(Flow::InterchangeAssist));
        assert_eq!(state.fields.location.as_deref(), Some("Hwy 401 / 427"));
    }

    #[test]
    fn interchange_no_can_branch_to_patrol() {
        let state = WizardState::new(ShiftMode::Interchange, "03:00");
        let (state, _) = run(
            state,
            vec![
                Answer::Status(EntryStatus::InService),
                Answer::YesNo(false),
                Answer::Route(Route::Patrol),
            ],
        );
        assert_eq!(state.flow, Some(Flow::SitePatrol));
        assert_eq!(state.step, Step::Site);
    }

    #[test]
    fn interchange_no_can_branch_to_alarm() {
        let state = WizardState::new(ShiftMode::Interchange, "03:00");
        let (state, _) = run(
            state,
            vec![
                Answer::Status(EntryStatus::InService),
                Answer::YesNo(false),
                Answer::Route(Route::Alarm),
            ],
        );
        assert_eq!(state.flow, Some(Flow::AlarmResponse));
        assert_eq!(state.step, Step::AlarmDetails);
    }

    #[test]
    fn parking_requires_every_field() {
        let mut state = WizardState::new(ShiftMode::ParkingEnforcement, "01:10");
        state.flow = Some(Flow::ParkingEnforcement);
        state.step = Step::ParkingDetails;
        let err = transition(
            &state,
            Answer::ParkingDetails {
                site: "Lot B".into(),
                vehicle: " ".into(),
                action: "Ticketed".into(),
            },
        )
        .unwrap_err();
        assert_eq!(err, WizardError::MissingField("vehicle"));
    }

    #[test]
    fn empty_site_blocks_the_transition() {
        let mut state = WizardState::new(ShiftMode::SitePatrol, "21:05");
        state.flow = Some(Flow::SitePatrol);
        state.step = Step::Site;
        let before = state.clone();
        let err = transition(&state, text("   ")).unwrap_err();
        assert_eq!(err, WizardError::MissingField("site"));
        assert_eq!(state, before);
    }

    #[test]
    fn blank_staff_name_counts_as_skipped() {
        let mut state = WizardState::new(ShiftMode::SitePatrol, "21:05");
        state.flow = Some(Flow::SitePatrol);
        state.step = Step::StaffName;
        let t = transition(&state, text("  ")).unwrap();
        assert!(matches!(t, Transition::Arrived(_)));
        assert!(t.state().fields.staff_name.is_none());
    }

    #[test]
    fn issue_path_requires_description() {
        let mut state = WizardState::new(ShiftMode::AlarmResponse, "22:15");
        state.flow = Some(Flow::AlarmResponse);
        state.step = Step::Outcome;
        let t = transition(&state, Answer::YesNo(false)).unwrap();
        assert_eq!(t.state().step, Step::IssueDescription);
        let err = transition(t.state(), text("")).unwrap_err();
        assert_eq!(err, WizardError::MissingField("issue description"));
        let done = transition(t.state(), text("door forced")).unwrap();
        assert!(matches!(done, Transition::Finished(_)));
        assert_eq!(done.state().fields.ok, Some(false));
    }

    #[test]
    fn wrong_answer_kind_is_rejected() {
        let state = WizardState::new(ShiftMode::SitePatrol, "21:05");
        let err = transition(&state, Answer::YesNo(true)).unwrap_err();
        assert_eq!(
            err,
            WizardError::UnexpectedAnswer {
                step: Step::Status,
                answer: "yes/no"
            }
        );
    }

    #[test]
    fn acknowledgement_is_not_a_wizard_status() {
        let state = WizardState::new(ShiftMode::SitePatrol, "21:05");
        assert!(transition(&state, Answer::Status(EntryStatus::Acknowledged)).is_err());
    }

    #[test]
    fn done_accepts_nothing() {
        let mut state = WizardState::new(ShiftMode::SitePatrol, "21:05");
        state.step = Step::Done;
        assert!(transition(&state, Answer::YesNo(true)).is_err());
    }
}
