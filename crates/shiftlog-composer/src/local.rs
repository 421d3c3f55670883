// SPDX-FileCopyrightText: 2026 Shiftlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic offline formatting of a note.

/// Default upper bound on a composed sentence, in characters.
pub const DEFAULT_MAX_CHARS: usize = 220;

const ELLIPSIS: char = '…';

/// Normalizes a note without any external help.
///
/// Trims and collapses whitespace, capitalizes the first letter, and ensures
/// the text ends in `.`, `!`, `?` or `…`. Text longer than `max_chars`
/// characters is cut to `max_chars - 3`, the trailing partial word dropped,
/// and an ellipsis appended. Applying it twice gives the same result as once.
pub fn local_polish(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return String::new();
    }

    let mut chars = collapsed.chars();
    let mut polished: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => return String::new(),
    };

    if !polished.ends_with(['.', '!', '?', ELLIPSIS]) {
        polished.push('.');
    }

    if polished.chars().count() > max_chars {
        polished = truncate_words(&polished, max_chars.saturating_sub(3));
        polished.push(ELLIPSIS);
    }

    polished
}

/// Keeps the first `keep` characters, then drops a trailing partial word
/// together with the whitespace before it.
fn truncate_words(text: &str, keep: usize) -> String {
    let head: String = text.chars().take(keep).collect();
    match head.rfind(char::is_whitespace) {
        Some(pos) => head[..pos].trim_end().to_string(),
        None => head,
    }
}
