// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Properties of the local fallback transform.

use proptest::prelude::*;
use shiftlog_composer::{DEFAULT_MAX_CHARS, local_polish};

proptest! {
    #[test]
    fn fallback_stabilizes_after_one_application(note in "[ a-zA-Z0-9,.!?'\\-]{0,400}") {
        let once = local_polish(&note, DEFAULT_MAX_CHARS);
        let twice = local_polish(&once, DEFAULT_MAX_CHARS);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn fallback_respects_length_bound(note in "[ a-z]{0,600}") {
        let out = local_polish(&note, DEFAULT_MAX_CHARS);
        prop_assert!(out.chars().count() <= DEFAULT_MAX_CHARS);
    }

    #[test]
    fn non_blank_input_gets_terminal_punctuation(note in "[a-z][ a-z]{0,300}") {
        let out = local_polish(&note, DEFAULT_MAX_CHARS);
        prop_assert!(out.ends_with(['.', '!', '?', '…']));
        prop_assert!(!out.contains("  "));
    }
}
