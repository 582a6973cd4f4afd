//! Backup drift tracking.
//!
//! Two snapshots are compared as *sets* of lines: the lines present in the
//! first and absent from the second. Order and duplicates are ignored. A
//! difference made of a single date line is date drift and does not count.

use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use preamble_core::types::{BACKUP_SUFFIX, DATE_PREFIX, TEMP_SUFFIX};

use crate::error::read_err;
use crate::SyncError;

/// `<path>.~temp~`
pub fn temp_path(path: &Path) -> PathBuf {
    with_suffix(path, TEMP_SUFFIX)
}

/// `<path>.~backup~`
pub fn backup_path(path: &Path) -> PathBuf {
    with_suffix(path, BACKUP_SUFFIX)
}

pub(crate) fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(suffix);
    PathBuf::from(os)
}

/// How snapshot `a` differs from snapshot `b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// Every line of `a` is present in `b`.
    None,
    /// The only line of `a` missing from `b` is a date line.
    DateOnly,
    /// Lines of `a` missing from `b`, sorted.
    Meaningful(Vec<String>),
    /// One of the snapshots does not exist.
    Unavailable,
}

impl Change {
    /// `true` when the backup has to be replaced.
    pub fn is_meaningful(&self) -> bool {
        matches!(self, Change::Meaningful(_) | Change::Unavailable)
    }
}

/// Lines of `a` that do not occur anywhere in `b`. Terminators are part of
/// the line.
pub fn line_difference<'a>(a: &'a str, b: &str) -> BTreeSet<&'a str> {
    let b: BTreeSet<&str> = b.split_inclusive('\n').collect();
    a.split_inclusive('\n').filter(|l| !b.contains(l)).collect()
}

pub fn classify(a: &str, b: &str) -> Change {
    let diff = line_difference(a, b);
    if diff.is_empty() {
        return Change::None;
    }
    if diff.len() == 1 && diff.iter().all(|l| l.starts_with(DATE_PREFIX)) {
        return Change::DateOnly;
    }
    Change::Meaningful(diff.into_iter().map(str::to_owned).collect())
}

/// `false` for identical snapshots and for date-only drift.
pub fn is_meaningful_change(a: &str, b: &str) -> bool {
    classify(a, b).is_meaningful()
}

/// Compare two snapshot files. A missing file yields [`Change::Unavailable`].
pub fn compare_files(a: &Path, b: &Path) -> Result<Change, SyncError> {
    let (Some(a_text), Some(b_text)) = (read_if_exists(a)?, read_if_exists(b)?) else {
        return Ok(Change::Unavailable);
    };
    Ok(classify(&a_text, &b_text))
}

fn read_if_exists(path: &Path) -> Result<Option<String>, SyncError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(read_err(path, err)),
    }
}
