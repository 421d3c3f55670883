// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wizard sessions over the pure transition tables.

use shiftlog_composer::Composer;
use shiftlog_core::model::is_valid_time;
use shiftlog_core::{Entry, EntryDetails, EntryId, EntryStatus, Mutation, Shift};
use tracing::{debug, info};

use crate::error::WizardError;
use crate::narrative;
use crate::state::{Answer, Continuation, Fields, Flow, Step, WizardState};
use crate::transition::{Transition, transition};

/// An entry mutation produced by the wizard.
#[derive(Debug, Clone, PartialEq)]
pub enum Emission {
    /// A new entry to append to the shift.
    Append(Entry),
    /// A replacement for the entry at `index`.
    Update { index: usize, entry: Entry },
}

impl Emission {
    pub fn entry(&self) -> &Entry {
        match self {
            Emission::Append(entry) | Emission::Update { entry, .. } => entry,
        }
    }

    pub fn into_mutation(self) -> Mutation {
        match self {
            Emission::Append(entry) => Mutation::Append { entry },
            Emission::Update { index, entry } => Mutation::Update { index, entry },
        }
    }
}

#[derive(Debug, Clone)]
struct Draft {
    index: usize,
    entry: Entry,
    prefix: String,
}

/// One operator session building a single entry.
///
/// A session started with [`Wizard::begin`] runs from the status question to
/// the end; once the arrival fields are known it emits the in-progress entry
/// and keeps going. A session started with [`Wizard::resume`] picks up an
/// entry left in progress by an earlier, interrupted session.
#[derive(Debug)]
pub struct Wizard {
    state: WizardState,
    composer: Composer,
    append_index: usize,
    draft: Option<Draft>,
}

impl Wizard {
    /// Starts a new entry for `shift` at `time` (`HH:mm`).
    pub fn begin(
        shift: &Shift,
        time: impl Into<String>,
        composer: Composer,
    ) -> Result<Self, WizardError> {
        if shift.is_completed() {
            return Err(WizardError::ShiftCompleted);
        }
        if shift.in_progress_entry().is_some() {
            return Err(WizardError::EntryInProgress);
        }
        let time = time.into();
        if !is_valid_time(&time) {
            return Err(WizardError::InvalidTime(time));
        }
        debug!(shift_id = %shift.id, mode = ?shift.mode, "wizard session started");
        Ok(Self {
            state: WizardState::new(shift.mode, time),
            composer,
            append_index: shift.entries.len(),
            draft: None,
        })
    }

    /// Reopens the shift's in-progress entry at its first unanswered step.
    pub fn resume(shift: &Shift, composer: Composer) -> Result<Self, WizardError> {
        if shift.is_completed() {
            return Err(WizardError::ShiftCompleted);
        }
        let (index, entry) = shift
            .in_progress_entry()
            .ok_or(WizardError::NothingToResume)?;
        let flow = Flow::for_entry_type(entry.entry_type).ok_or_else(|| {
            WizardError::InvalidContinuation(format!(
                "{:?} entries are not built by the wizard",
                entry.entry_type
            ))
        })?;

        let continuation = match &entry.continuation {
            Some(value) => Continuation::from_value(value)
                .map_err(|e| WizardError::InvalidContinuation(e.to_string()))?,
            None => {
                let mut fields = Fields::from_details(&entry.details);
                fields.staff_name = entry.staff_name.clone();
                Continuation {
                    flow,
                    step: flow.resume_step(),
                    prefix: narrative::prefix(flow, &entry.time, entry.status, &fields)?,
                    fields,
                }
            }
        };
        if !is_resume_step(continuation.step) {
            return Err(WizardError::InvalidContinuation(format!(
                "cannot resume at step {}",
                continuation.step
            )));
        }

        debug!(shift_id = %shift.id, index, step = %continuation.step, "wizard session resumed");
        Ok(Self {
            state: WizardState {
                mode: shift.mode,
                flow: Some(continuation.flow),
                step: continuation.step,
                time: entry.time.clone(),
                status: Some(entry.status),
                fields: continuation.fields,
            },
            composer,
            append_index: shift.entries.len(),
            draft: Some(Draft {
                index,
                entry: entry.clone(),
                prefix: continuation.prefix,
            }),
        })
    }

    pub fn step(&self) -> Step {
        self.state.step
    }

    pub fn prompt(&self) -> &'static str {
        self.state.step.prompt()
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn is_done(&self) -> bool {
        self.state.step == Step::Done
    }

    /// Id of the in-progress entry this session has emitted or resumed.
    pub fn entry_id(&self) -> Option<EntryId> {
        self.draft.as_ref().map(|d| d.entry.id)
    }

    /// Feeds one answer. Returns the mutation to apply when the answer
    /// crossed the arrival threshold or finished the entry.
    ///
    /// A refused answer leaves the session untouched.
    pub async fn answer(&mut self, answer: Answer) -> Result<Option<Emission>, WizardError> {
        match transition(&self.state, answer)? {
            Transition::Next(state) => {
                debug!(from = %self.state.step, to = %state.step, "wizard advanced");
                self.state = state;
                Ok(None)
            }
            Transition::Arrived(state) => {
                let draft = self.arrival_entry(&state)?;
                let emission = Emission::Append(draft.entry.clone());
                info!(entry_id = %draft.entry.id, site = %draft.entry.site, "entry started");
                self.state = state;
                self.draft = Some(draft);
                Ok(Some(emission))
            }
            Transition::Finished(state) => {
                let emission = self.finalize(&state).await?;
                info!(entry_id = %emission.entry().id, "entry finalized");
                self.state = state;
                Ok(Some(emission))
            }
        }
    }

    /// Abandons the session. Nothing is emitted; an entry already started by
    /// this session stays in progress and its id is returned.
    pub fn cancel(self) -> Option<EntryId> {
        debug!(step = %self.state.step, "wizard session cancelled");
        self.entry_id()
    }

    fn arrival_entry(&self, state: &WizardState) -> Result<Draft, WizardError> {
        let flow = state
            .flow
            .ok_or_else(|| WizardError::InvalidContinuation("flow not selected".into()))?;
        let status = state.status.ok_or(WizardError::MissingField("status"))?;
        let details = narrative::details(flow, &state.fields)?;
        let prefix = narrative::prefix(flow, &state.time, status, &state.fields)?;

        let mut entry = Entry::new(
            state.time.clone(),
            status,
            details,
            narrative::provisional_text(&prefix),
        );
        entry.in_progress = true;
        entry.staff_name = state.fields.staff_name.clone();
        entry.continuation = Some(
            Continuation {
                flow,
                step: state.step,
                prefix: prefix.clone(),
                fields: state.fields.clone(),
            }
            .to_value(),
        );
        Ok(Draft {
            index: self.append_index,
            entry,
            prefix,
        })
    }

    async fn finalize(&self, state: &WizardState) -> Result<Emission, WizardError> {
        let draft = self
            .draft
            .as_ref()
            .ok_or_else(|| WizardError::InvalidContinuation("entry was never started".into()))?;
        let flow = state
            .flow
            .ok_or_else(|| WizardError::InvalidContinuation("flow not selected".into()))?;

        let narrative = self
            .composer
            .compose(&narrative::note(flow, &state.fields))
            .await;

        let mut entry = draft.entry.clone();
        entry.ok = state.fields.ok.unwrap_or(true);
        entry.text = narrative::final_text(&draft.prefix, &narrative);
        entry.in_progress = false;
        entry.staff_name = state.fields.staff_name.clone();
        entry.guard_name = state.fields.guard_name.clone();
        entry.guard_checks = state.fields.guard_checks.clone();
        entry.continuation = None;
        // An acknowledgement given while the entry was open survives the rewrite.
        let acknowledged = entry.ten_four;
        entry.set_ten_four(acknowledged);

        Ok(Emission::Update {
            index: draft.index,
            entry,
        })
    }
}

fn is_resume_step(step: Step) -> bool {
    matches!(
        step,
        Step::GuardPresent
            | Step::GuardName
            | Step::GuardCheck(_)
            | Step::Outcome
            | Step::IssueDescription
    )
}

/// Builds a complete entry from a free-text note, bypassing the wizard.
pub async fn manual_entry(
    note: &str,
    time: &str,
    composer: &Composer,
) -> Result<Emission, WizardError> {
    if note.trim().is_empty() {
        return Err(WizardError::MissingField("note"));
    }
    if !is_valid_time(time) {
        return Err(WizardError::InvalidTime(time.to_string()));
    }
    let polished = composer.compose(note).await;
    let entry = Entry::new(
        time,
        EntryStatus::InService,
        EntryDetails::Manual {
            note: note.trim().to_string(),
        },
        format!("{time} {polished}"),
    );
    info!(entry_id = %entry.id, "manual entry composed");
    Ok(Emission::Append(entry))
}
