//! Read-only preamble status per file.
//!
//! Signal precedence:
//! 1. `Missing` (no matching preamble at the head of the file)
//! 2. `Drifted` (a backup exists and the file has lines the backup lacks,
//!    not counting lines of the generated preamble)
//! 3. `Stale` (preamble date differs from the file's modification date)
//! 4. `Current`

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use preamble_banner::BannerRenderer;
use preamble_core::types::{line_content, PreambleDate, SyncOutcome, DATE_PREFIX};

use crate::backup::{backup_path, classify, Change};
use crate::pipeline::{candidates, glob_error_path, FileFilter};
use crate::writer::FileSynchronizer;
use crate::SyncError;

/// Status of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    Missing,
    Drifted { lines: Vec<String> },
    Stale { date: PreambleDate },
    Current,
}

/// Status of one candidate, or why it could not be determined.
#[derive(Debug)]
pub struct StatusReport {
    pub path: PathBuf,
    pub status: Result<FileStatus, SyncError>,
}

/// Classify `path`. Nothing is written.
pub fn check<R: BannerRenderer>(
    synchronizer: &FileSynchronizer<R>,
    path: &Path,
) -> Result<FileStatus, SyncError> {
    let planned = synchronizer.plan_file(path)?;
    if planned.plan.outcome != SyncOutcome::Updated {
        return Ok(FileStatus::Missing);
    }

    let backup = backup_path(path);
    match std::fs::read_to_string(&backup) {
        Ok(previous) => {
            if let Change::Meaningful(mut lines) = classify(&planned.original, &previous) {
                let generated: HashSet<&str> =
                    planned.preamble.lines().iter().map(|l| line_content(l)).collect();
                lines.retain(|l| {
                    !l.starts_with(DATE_PREFIX) && !generated.contains(line_content(l))
                });
                if !lines.is_empty() {
                    return Ok(FileStatus::Drifted { lines });
                }
            }
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => return Err(crate::error::read_err(&backup, err)),
    }

    if planned.changed() {
        return Ok(FileStatus::Stale { date: planned.date });
    }
    Ok(FileStatus::Current)
}

/// [`check`] for every candidate of `pattern`.
pub fn check_all<R: BannerRenderer>(
    synchronizer: &FileSynchronizer<R>,
    pattern: &str,
    filter: &FileFilter,
) -> Result<Vec<StatusReport>, SyncError> {
    let mut reports = Vec::new();
    for candidate in candidates(pattern, filter)? {
        let report = match candidate {
            Ok(path) => {
                let status = check(synchronizer, &path);
                StatusReport { path, status }
            }
            Err(err) => StatusReport {
                path: glob_error_path(&err),
                status: Err(err),
            },
        };
        reports.push(report);
    }
    Ok(reports)
}
