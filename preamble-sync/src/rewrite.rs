//! Pure planning step of a file sync: snapshot in, new content out.
//!
//! No I/O happens here; the date is passed in explicitly.

use preamble_core::types::{
    line_content, line_ending, FileSnapshot, Preamble, PreambleDate, SyncOutcome, DATE_PREFIX,
    SENTINEL,
};

use crate::matcher;

/// Where the date-refresh loop is in the file.
///
/// `InPreamble → Verbatim` is one-way: once a line leaves the generated-block
/// contract nothing after it is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteState {
    /// Still inside comment lines before the sentinel; date lines are refreshed.
    InPreamble,
    /// Every remaining line is copied unchanged.
    Verbatim,
}

impl RewriteState {
    /// State in which `line` itself is handled.
    pub fn observe(self, line: &str) -> Self {
        match self {
            RewriteState::Verbatim => RewriteState::Verbatim,
            RewriteState::InPreamble => {
                if !line.starts_with('#') || line_content(line).starts_with(SENTINEL) {
                    RewriteState::Verbatim
                } else {
                    RewriteState::InPreamble
                }
            }
        }
    }
}

/// Replace the date in every date line that precedes the first non-comment
/// line or the sentinel. Terminators are kept.
pub fn refresh_date<S: AsRef<str>>(lines: &[S], date: &PreambleDate) -> Vec<String> {
    let mut state = RewriteState::InPreamble;
    let mut out = Vec::with_capacity(lines.len());
    for line in lines {
        let line = line.as_ref();
        state = state.observe(line);
        if state == RewriteState::InPreamble && line.starts_with(DATE_PREFIX) {
            out.push(format!("{}{}", date.line(), line_ending(line)));
        } else {
            out.push(line.to_string());
        }
    }
    out
}

/// New file content and the outcome that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub outcome: SyncOutcome,
    pub content: String,
}

/// Decide what `snapshot` becomes given the expected `preamble`.
pub fn plan(
    snapshot: &FileSnapshot,
    preamble: &Preamble,
    date: &PreambleDate,
    insert_missing: bool,
) -> Plan {
    if matcher::matches(&snapshot.body, preamble) {
        let body = refresh_date(&snapshot.body, date);
        return Plan {
            outcome: SyncOutcome::Updated,
            content: snapshot.render_with(&body),
        };
    }

    if insert_missing {
        let mut body: Vec<&str> = preamble.lines().iter().map(String::as_str).collect();
        body.extend(snapshot.body.iter().map(String::as_str));
        return Plan {
            outcome: SyncOutcome::Inserted,
            content: snapshot.render_with(&body),
        };
    }

    Plan {
        outcome: SyncOutcome::Skipped,
        content: snapshot.to_text(),
    }
}
