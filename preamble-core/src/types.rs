//! Domain types for preamble synchronization.
//!
//! Lines are stored with their original terminators (`\n` or `\r\n`) so a
//! rewritten file reproduces untouched content byte for byte. Comparisons go
//! through [`line_content`], which ignores the terminator.

use std::fmt;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Local};

// ---------------------------------------------------------------------------
// Format constants
// ---------------------------------------------------------------------------

/// Width of the `#` rule lines that open and close a preamble.
pub const RULE_WIDTH: usize = 80;

/// Every preamble line that carries a date starts with this token.
pub const DATE_PREFIX: &str = "#     Last Updated: ";

/// Prefix put in front of the product label.
pub const LABEL_PREFIX: &str = "#     ";

/// Prefix put in front of every rendered banner row.
pub const BANNER_ROW_PREFIX: &str = "#  ";

/// End-of-preamble marker. Nothing after it is ever rewritten.
pub const SENTINEL: &str =
    "# The above is automatically generated  - DO NOT TOUCH ABOVE THIS LINE.";

/// Blank comment line used as spacing inside the preamble.
pub const BLANK_COMMENT: &str = "#";

/// First two characters of an interpreter directive line.
pub const DIRECTIVE_MARKER: &str = "#!";

/// Display format of the date shown in the preamble.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Suffix of the transient pre-rewrite snapshot.
pub const TEMP_SUFFIX: &str = ".~temp~";

/// Suffix of the durable last-meaningful-version snapshot.
pub const BACKUP_SUFFIX: &str = ".~backup~";

/// Suffix of the transient file a rewrite is staged in before the rename.
pub const WRITE_SUFFIX: &str = ".~write~";

/// Product label used when the configuration does not name one.
pub const DEFAULT_LABEL: &str = "SFL Scientific";

/// The `#` rule line without terminator.
pub fn rule_line() -> String {
    "#".repeat(RULE_WIDTH)
}

// ---------------------------------------------------------------------------
// Line helpers
// ---------------------------------------------------------------------------

/// Split `content` into lines, keeping each line's terminator.
///
/// A final line without a trailing newline is kept as-is. An empty input
/// yields no lines.
pub fn split_lines(content: &str) -> Vec<String> {
    content.split_inclusive('\n').map(str::to_owned).collect()
}

/// A line with its `\n` / `\r\n` terminator removed.
pub fn line_content(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// The terminator of `line` (`"\r\n"`, `"\n"` or `""`).
pub fn line_ending(line: &str) -> &str {
    &line[line_content(line).len()..]
}

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Banner title derived from a file's base name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Title(pub String);

impl Title {
    /// Base file name with the last extension stripped (`train.py` → `train`,
    /// `data.tar.gz` → `data.tar`, `.envrc` → `.envrc`).
    pub fn from_path(path: &Path) -> Option<Self> {
        let stem = path.file_stem()?.to_string_lossy();
        if stem.is_empty() {
            return None;
        }
        Some(Self(stem.into_owned()))
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for Title {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Date string shown in the preamble's date line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreambleDate(pub String);

impl PreambleDate {
    /// Format a modification time as a local calendar date.
    pub fn from_system_time(time: SystemTime) -> Self {
        let local: DateTime<Local> = time.into();
        Self(local.format(DATE_FORMAT).to_string())
    }

    /// The full date line, without terminator.
    pub fn line(&self) -> String {
        format!("{DATE_PREFIX}{}", self.0)
    }
}

impl fmt::Display for PreambleDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for PreambleDate {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Preamble
// ---------------------------------------------------------------------------

/// A freshly built preamble block. Every line ends in `\n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preamble {
    lines: Vec<String>,
}

impl Preamble {
    /// Wrap already-framed lines. Missing terminators are added.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines = lines
            .into_iter()
            .map(|l| {
                let mut l = l.into();
                if !l.ends_with('\n') {
                    l.push('\n');
                }
                l
            })
            .collect();
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The preamble as one string, as it appears at the head of a file.
    pub fn to_text(&self) -> String {
        self.lines.concat()
    }
}

// ---------------------------------------------------------------------------
// FileSnapshot
// ---------------------------------------------------------------------------

/// A file's lines at one point in time, with a leading directive detached.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileSnapshot {
    /// `#!...` first line, if the file had one. Never part of the preamble.
    pub directive: Option<String>,
    /// All remaining lines, terminators preserved.
    pub body: Vec<String>,
}

impl FileSnapshot {
    pub fn parse(content: &str) -> Self {
        let mut body = split_lines(content);
        let directive = match body.first() {
            Some(first) if first.starts_with(DIRECTIVE_MARKER) => Some(body.remove(0)),
            _ => None,
        };
        Self { directive, body }
    }

    /// Reassemble the file with the directive (if any) in front of `body`.
    ///
    /// An unterminated directive gets a `\n` when lines follow it, so it
    /// stays a line of its own.
    pub fn render_with<S: AsRef<str>>(&self, body: &[S]) -> String {
        let mut out = String::new();
        if let Some(directive) = &self.directive {
            out.push_str(directive);
            if line_ending(directive).is_empty() && !body.is_empty() {
                out.push('\n');
            }
        }
        for line in body {
            out.push_str(line.as_ref());
        }
        out
    }

    /// The snapshot's own content.
    pub fn to_text(&self) -> String {
        self.render_with(&self.body)
    }
}

// ---------------------------------------------------------------------------
// SyncOutcome
// ---------------------------------------------------------------------------

/// What a synchronization pass did with a file's preamble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncOutcome {
    /// Preamble present; date line refreshed.
    Updated,
    /// Preamble absent; full preamble prepended.
    Inserted,
    /// Preamble absent and insertion disabled; content untouched.
    Skipped,
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SyncOutcome::Updated => "updated",
            SyncOutcome::Inserted => "inserted",
            SyncOutcome::Skipped => "skipped",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn split_lines_keeps_terminators_and_unterminated_tail() {
        let lines = split_lines("a\nb\r\nc");
        assert_eq!(lines, vec!["a\n", "b\r\n", "c"]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn line_content_strips_lf_and_crlf() {
        assert_eq!(line_content("x\n"), "x");
        assert_eq!(line_content("x\r\n"), "x");
        assert_eq!(line_content("x"), "x");
        assert_eq!(line_ending("x\r\n"), "\r\n");
        assert_eq!(line_ending("x"), "");
    }

    #[test]
    fn title_strips_only_last_extension() {
        assert_eq!(
            Title::from_path(&PathBuf::from("/src/train.py")),
            Some(Title::from("train"))
        );
        assert_eq!(
            Title::from_path(&PathBuf::from("data.tar.gz")),
            Some(Title::from("data.tar"))
        );
        assert_eq!(
            Title::from_path(&PathBuf::from(".envrc")),
            Some(Title::from(".envrc"))
        );
        assert_eq!(Title::from_path(&PathBuf::from("/")), None);
    }

    #[test]
    fn snapshot_detaches_directive_line() {
        let snap = FileSnapshot::parse("#!/usr/bin/env python\nimport os\n");
        assert_eq!(snap.directive.as_deref(), Some("#!/usr/bin/env python\n"));
        assert_eq!(snap.body, vec!["import os\n"]);
        assert_eq!(snap.to_text(), "#!/usr/bin/env python\nimport os\n");
    }

    #[test]
    fn unterminated_directive_is_kept_on_its_own_line() {
        let snap = FileSnapshot::parse("#!/usr/bin/env tool");
        assert_eq!(snap.directive.as_deref(), Some("#!/usr/bin/env tool"));
        assert!(snap.body.is_empty());
        assert_eq!(snap.to_text(), "#!/usr/bin/env tool");
        assert_eq!(
            snap.render_with(&["####\n"]),
            "#!/usr/bin/env tool\n####\n"
        );
    }

    #[test]
    fn snapshot_without_directive_keeps_all_lines() {
        let snap = FileSnapshot::parse("# comment\nx = 1\n");
        assert!(snap.directive.is_none());
        assert_eq!(snap.body.len(), 2);
    }

    #[test]
    fn preamble_from_lines_terminates_every_line() {
        let p = Preamble::from_lines(["a", "b\n"]);
        assert_eq!(p.lines(), &["a\n".to_string(), "b\n".to_string()]);
        assert_eq!(p.to_text(), "a\nb\n");
        assert_eq!(p.len(), 2);
    }

    #[test]
    fn date_line_concatenates_prefix() {
        let d = PreambleDate::from("2024-03-01");
        assert_eq!(d.line(), "#     Last Updated: 2024-03-01");
    }

    #[test]
    fn outcome_display_is_lowercase() {
        assert_eq!(SyncOutcome::Inserted.to_string(), "inserted");
        assert_eq!(SyncOutcome::Updated.to_string(), "updated");
        assert_eq!(SyncOutcome::Skipped.to_string(), "skipped");
    }
}
