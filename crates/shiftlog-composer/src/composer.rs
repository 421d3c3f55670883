// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Polish delegation with fallback, and end-of-shift summaries.

use std::sync::Arc;
use std::time::Duration;

use shiftlog_core::{PolishAdapter, PolishRequest, Shift};
use tracing::{debug, warn};

use crate::local::{DEFAULT_MAX_CHARS, local_polish};

/// Style directive sent with every note rewrite.
pub const POLISH_DIRECTIVE: &str = "You rewrite raw security notes into a professional, \
third-person shift log entry. Reply with a single, concise sentence of at most 220 characters. \
Stay factual and objective; never use 'I' or 'we'. If the note mentions a guard, refer to them \
as S/G \"Name\"; otherwise the actor is the Mobile Supervisor (M/S). Always keep the full \
location. For an alarm, write 'responded to an alarm from [Company] at [Location]'. For guard \
visits, state the result of each check. Output only the rewritten entry.";

/// Directive used for end-of-shift summaries.
pub const SUMMARY_DIRECTIVE: &str =
    "Summarize the shift log into 2-4 concise, professional sentences. No preface.";

/// Summary used when a shift has no finalized entries.
pub const NO_ENTRIES_SUMMARY: &str = "No entries were logged during this shift. All was quiet.";

/// Summary used when no collaborator could produce one.
pub const SUMMARY_UNAVAILABLE: &str = "Shift completed. AI summary not available.";

/// Upper bound on a polish round trip.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

const SUMMARY_MAX_CHARS: usize = 1000;

/// Composes narrative text for entries and shifts.
///
/// Cheap to clone; the polish collaborator is shared.
#[derive(Clone)]
pub struct Composer {
    polisher: Option<Arc<dyn PolishAdapter>>,
    timeout: Duration,
    max_chars: usize,
}

impl std::fmt::Debug for Composer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Composer")
            .field("polisher", &self.polisher.as_ref().map(|p| p.name().to_string()))
            .field("timeout", &self.timeout)
            .field("max_chars", &self.max_chars)
            .finish()
    }
}

impl Default for Composer {
    fn default() -> Self {
        Self::local_only()
    }
}

impl Composer {
    pub fn new(polisher: Arc<dyn PolishAdapter>) -> Self {
        Self {
            polisher: Some(polisher),
            timeout: DEFAULT_TIMEOUT,
            max_chars: DEFAULT_MAX_CHARS,
        }
    }

    /// A composer that never leaves the process.
    pub fn local_only() -> Self {
        Self {
            polisher: None,
            timeout: DEFAULT_TIMEOUT,
            max_chars: DEFAULT_MAX_CHARS,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Rewrites a note into a log sentence.
    ///
    /// Blank notes return `""` without contacting the collaborator. The
    /// collaborator's reply is passed through [`local_polish`] so the length
    /// bound and terminal punctuation hold either way.
    pub async fn compose(&self, note: &str) -> String {
        if note.trim().is_empty() {
            return String::new();
        }

        let request = PolishRequest {
            directive: POLISH_DIRECTIVE.to_string(),
            text: note.to_string(),
            max_chars: self.max_chars,
        };
        match self.delegate(request).await {
            Some(reply) => local_polish(&reply, self.max_chars),
            None => local_polish(note, self.max_chars),
        }
    }

    /// Produces the end-of-shift narrative.
    pub async fn summarize(&self, shift: &Shift) -> String {
        let lines: Vec<&str> = shift
            .entries
            .iter()
            .filter(|e| !e.in_progress)
            .map(|e| e.text.as_str())
            .collect();
        if lines.is_empty() {
            return NO_ENTRIES_SUMMARY.to_string();
        }

        let body = format!(
            "Date: {}\nShift: {}\nDesignation: {}\n\n{}",
            shift.date,
            shift.timings,
            shift.designation,
            lines.join("\n")
        );
        let request = PolishRequest {
            directive: SUMMARY_DIRECTIVE.to_string(),
            text: body,
            max_chars: SUMMARY_MAX_CHARS,
        };
        self.delegate(request)
            .await
            .unwrap_or_else(|| SUMMARY_UNAVAILABLE.to_string())
    }

    /// Asks the collaborator, returning `None` on any kind of failure.
    async fn delegate(&self, request: PolishRequest) -> Option<String> {
        let polisher = self.polisher.as_ref()?;
        match tokio::time::timeout(self.timeout, polisher.polish(request)).await {
            Ok(Ok(reply)) => {
                let reply = reply.trim();
                if reply.is_empty() {
                    debug!(adapter = polisher.name(), "polish returned blank text, using fallback");
                    None
                } else {
                    Some(reply.to_string())
                }
            }
            Ok(Err(e)) => {
                warn!(adapter = polisher.name(), error = %e, "polish failed, using fallback");
                None
            }
            Err(_) => {
                warn!(
                    adapter = polisher.name(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    "polish timed out, using fallback"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shiftlog_core::{Entry, EntryDetails, EntryStatus, ShiftMode};
    use shiftlog_test_utils::MockPolisher;
    use tracing_test::traced_test;

    fn shift_with(texts: &[&str]) -> Shift {
        let mut shift = Shift::new("s", "o", "2026-10-18", "18:00–06:00", "M/S", ShiftMode::SitePatrol);
        for text in texts {
            shift.entries.push(Entry::new(
                "19:00",
                EntryStatus::InService,
                EntryDetails::SitePatrol { site: "Gate".into() },
                *text,
            ));
        }
        shift
    }

    #[tokio::test]
    async fn local_only_composer_falls_back() {
        let composer = Composer::local_only();
        assert_eq!(composer.compose("all secure").await, "All secure.");
    }

    #[tokio::test]
    async fn polished_reply_is_used() {
        let polisher = Arc::new(MockPolisher::new());
        polisher.push_reply("M/S patrolled Lobby A and found all secure.").await;
        let composer = Composer::new(polisher.clone());

        let out = composer.compose("lobby a ok").await;
        assert_eq!(out, "M/S patrolled Lobby A and found all secure.");

        let requests = polisher.requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].text, "lobby a ok");
        assert_eq!(requests[0].directive, POLISH_DIRECTIVE);
        assert_eq!(requests[0].max_chars, DEFAULT_MAX_CHARS);
    }

    #[tokio::test]
    async fn blank_note_never_reaches_the_collaborator() {
        let polisher = Arc::new(MockPolisher::new());
        let composer = Composer::new(polisher.clone());
        assert_eq!(composer.compose("  ").await, "");
        assert!(polisher.requests().await.is_empty());
    }

    #[tokio::test]
    #[traced_test]
    async fn collaborator_error_falls_back() {
        let polisher = Arc::new(MockPolisher::new());
        polisher.push_failure("service unavailable").await;
        let composer = Composer::new(polisher);
        assert_eq!(composer.compose("gate   locked").await, "Gate locked.");
        assert!(logs_contain("polish failed, using fallback"));
    }

    #[tokio::test]
    async fn blank_reply_falls_back() {
        let polisher = Arc::new(MockPolisher::new());
        polisher.push_reply("   ").await;
        let composer = Composer::new(polisher);
        assert_eq!(composer.compose("gate locked").await, "Gate locked.");
    }

    #[tokio::test(start_paused = true)]
    async fn slow_collaborator_times_out_to_fallback() {
        let polisher = Arc::new(MockPolisher::new().with_delay(Duration::from_secs(60)));
        polisher.push_reply("too late").await;
        let composer = Composer::new(polisher).with_timeout(Duration::from_secs(2));
        assert_eq!(composer.compose("door secured").await, "Door secured.");
    }

    #[tokio::test(start_paused = true)]
    async fn empty_input_after_timeout_is_empty() {
        let polisher = Arc::new(MockPolisher::new().with_delay(Duration::from_secs(60)));
        polisher.push_reply("too late").await;
        let composer = Composer::new(polisher).with_timeout(Duration::from_secs(2));
        assert_eq!(composer.compose("door").await, "Door.");
        assert_eq!(composer.compose("").await, "");
    }

    #[tokio::test]
    async fn overlong_reply_is_bounded() {
        let polisher = Arc::new(MockPolisher::new());
        polisher.push_reply(&"word ".repeat(80)).await;
        let composer = Composer::new(polisher).with_max_chars(100);
        let out = composer.compose("note").await;
        assert!(out.chars().count() <= 100);
        assert!(out.ends_with('…'));
    }

    #[tokio::test]
    async fn summary_of_empty_shift_is_quiet() {
        let polisher = Arc::new(MockPolisher::new());
        let composer = Composer::new(polisher.clone());
        assert_eq!(composer.summarize(&shift_with(&[])).await, NO_ENTRIES_SUMMARY);
        assert!(polisher.requests().await.is_empty());
    }

    #[tokio::test]
    async fn summary_ignores_in_progress_entries() {
        let mut shift = shift_with(&["19:00 10-8 at Gate — in progress"]);
        shift.entries[0].in_progress = true;
        let composer = Composer::local_only();
        assert_eq!(composer.summarize(&shift).await, NO_ENTRIES_SUMMARY);
    }

    #[tokio::test]
    async fn summary_without_collaborator_is_unavailable() {
        let composer = Composer::local_only();
        let shift = shift_with(&["19:00 10-8 at Gate — All secure."]);
        assert_eq!(composer.summarize(&shift).await, SUMMARY_UNAVAILABLE);
    }

    #[tokio::test]
    async fn summary_sends_header_and_entries() {
        let polisher = Arc::new(MockPolisher::new());
        polisher.push_reply("Quiet patrol shift.").await;
        let composer = Composer::new(polisher.clone());
        let shift = shift_with(&["19:00 10-8 at Gate — All secure.", "20:00 10-8 at Dock — All secure."]);

        assert_eq!(composer.summarize(&shift).await, "Quiet patrol shift.");
        let requests = polisher.requests().await;
        assert_eq!(requests[0].directive, SUMMARY_DIRECTIVE);
        assert!(requests[0].text.starts_with("Date: 2026-10-18\nShift: 18:00–06:00\nDesignation: M/S\n\n"));
        assert!(requests[0].text.ends_with("20:00 10-8 at Dock — All secure."));
    }
}
