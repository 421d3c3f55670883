// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Begin/resume lifecycle across an interrupted session.

use std::sync::Arc;

use shiftlog_composer::Composer;
use shiftlog_core::{EntryStatus, Shift, ShiftMode};
use shiftlog_test_utils::MockPolisher;
use shiftlog_test_utils::fixtures::{finished_entry, patrol_shift, shift};
use shiftlog_wizard::{Answer, Emission, GUARD_CHECKS, Route, Step, Wizard, WizardError};

fn apply(shift: &mut Shift, emission: Emission) {
    shift.apply_mutation(&emission.into_mutation()).unwrap();
}

/// Round-trips the shift through JSON, as a restart from a stored snapshot
/// would.
fn reload(shift: &Shift) -> Shift {
    serde_json::from_str(&serde_json::to_string(shift).unwrap()).unwrap()
}

#[tokio::test]
async fn interrupted_patrol_is_resumed_at_guard_branch() {
    let polisher = Arc::new(MockPolisher::new());
    polisher
        .push_reply("M/S patrolled the site; S/G \"Sam\" failed the logbook check.")
        .await;
    let composer = Composer::new(polisher.clone());

    let mut shift = patrol_shift("s-1");
    shift.entries.push(finished_entry("Gate"));

    let mut first = Wizard::begin(&shift, "21:05", composer.clone()).unwrap();
    first
        .answer(Answer::Status(EntryStatus::InService))
        .await
        .unwrap();
    first.answer(Answer::Text("Dock 4".into())).await.unwrap();
    let started = first.answer(Answer::Skip).await.unwrap().unwrap();
    let entry_id = started.entry().id;
    apply(&mut shift, started);
    assert_eq!(first.cancel(), Some(entry_id));

    let shift_after_restart = reload(&shift);
    let mut second = Wizard::resume(&shift_after_restart, composer).unwrap();
    assert_eq!(second.step(), Step::GuardPresent);
    assert_eq!(second.state().fields.site.as_deref(), Some("Dock 4"));

    second.answer(Answer::YesNo(true)).await.unwrap();
    second.answer(Answer::Text("Sam".into())).await.unwrap();
    for (i, passed) in [true, true, false, true].into_iter().enumerate() {
        assert_eq!(second.prompt(), GUARD_CHECKS[i]);
        second.answer(Answer::YesNo(passed)).await.unwrap();
    }
    assert_eq!(second.step(), Step::Outcome);
    let finished = second.answer(Answer::YesNo(true)).await.unwrap().unwrap();

    let Emission::Update { index, entry } = &finished else {
        panic!("expected update, got {finished:?}");
    };
    assert_eq!(*index, 1);
    assert_eq!(entry.id, entry_id);
    assert_eq!(entry.guard_name.as_deref(), Some("Sam"));
    assert_eq!(entry.guard_checks, vec![true, true, false, true]);
    assert_eq!(
        entry.text,
        "21:05 10-8 at Dock 4 — M/S patrolled the site; S/G \"Sam\" failed the logbook check."
    );

    let mut shift = shift_after_restart;
    apply(&mut shift, finished);
    assert!(shift.in_progress_entry().is_none());
    assert_eq!(shift.entries.len(), 2);

    let requests = polisher.requests().await;
    assert_eq!(requests.len(), 1);
    assert!(requests[0].text.contains("Guard checks failed: Logbook up to date"));
}

#[tokio::test]
async fn composer_failure_never_blocks_finalize() {
    let polisher = Arc::new(MockPolisher::new());
    polisher.push_failure("upstream 500").await;
    let composer = Composer::new(polisher);

    let mut shift = shift("s-2", ShiftMode::Interchange);
    let mut w = Wizard::begin(&shift, "03:10", composer).unwrap();
    w.answer(Answer::Status(EntryStatus::InService))
        .await
        .unwrap();
    w.answer(Answer::YesNo(false)).await.unwrap();
    w.answer(Answer::Route(Route::Alarm)).await.unwrap();
    let started = w
        .answer(Answer::AlarmDetails {
            company: "Bell".into(),
            location: "12 King St".into(),
        })
        .await
        .unwrap()
        .unwrap();
    apply(&mut shift, started);

    w.answer(Answer::YesNo(false)).await.unwrap();
    let finished = w
        .answer(Answer::Text("window smashed at rear, police called".into()))
        .await
        .unwrap()
        .unwrap();
    let entry = finished.entry().clone();
    apply(&mut shift, finished);

    assert!(!entry.ok);
    assert_eq!(
        entry.text,
        "03:10 10-8 alarm response for Bell at 12 King St — Responded to an alarm from Bell \
         at 12 King St. Window smashed at rear, police called."
    );
    entry.validate().unwrap();
}

#[tokio::test]
async fn only_one_entry_may_be_in_progress() {
    let composer = Composer::local_only();
    let mut shift = shift("s-3", ShiftMode::ParkingEnforcement);

    let mut w = Wizard::begin(&shift, "01:00", composer.clone()).unwrap();
    w.answer(Answer::Status(EntryStatus::InService))
        .await
        .unwrap();
    let started = w
        .answer(Answer::ParkingDetails {
            site: "Lot B".into(),
            vehicle: "ABCD 123".into(),
            action: "Ticket issued".into(),
        })
        .await
        .unwrap()
        .unwrap();
    apply(&mut shift, started);

    assert_eq!(
        Wizard::begin(&shift, "01:30", composer.clone()).unwrap_err(),
        WizardError::EntryInProgress
    );

    let mut resumed = Wizard::resume(&shift, composer.clone()).unwrap();
    let finished = resumed.answer(Answer::YesNo(true)).await.unwrap().unwrap();
    apply(&mut shift, finished);
    assert!(Wizard::begin(&shift, "01:30", composer).is_ok());
}
