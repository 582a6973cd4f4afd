//! Decides whether a file already starts with "the same" preamble.
//!
//! Lines are compared pairwise over the expected preamble's length:
//!
//! 1. a file line starting with the sentinel ends the scan: everything up to
//!    it has been validated and the trailing spacing/rule lines are not
//!    checked;
//! 2. a file line starting with the date prefix is accepted whatever the date;
//! 3. any other line must equal the expected line exactly.
//!
//! Line terminators are ignored.

use preamble_core::types::{line_content, Preamble, DATE_PREFIX, SENTINEL};

/// `true` when the head of `file_lines` matches `preamble` modulo the date.
pub fn matches<S: AsRef<str>>(file_lines: &[S], preamble: &Preamble) -> bool {
    if file_lines.len() < preamble.len() {
        return false;
    }

    for (actual, expected) in file_lines.iter().zip(preamble.lines()) {
        let actual = line_content(actual.as_ref());
        if actual.starts_with(SENTINEL) {
            return true;
        }
        if actual.starts_with(DATE_PREFIX) {
            continue;
        }
        if actual != line_content(expected) {
            return false;
        }
    }
    true
}
