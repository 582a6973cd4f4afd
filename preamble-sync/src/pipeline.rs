//! Batch entrypoint shared by `preamble sync`, `diff` and `status`.
//!
//! A pattern is expanded with recursive `**` support; a pattern naming an
//! existing directory means every file below it. Candidates are filtered by
//! [`FileFilter`] and handed to the per-file step one at a time. A failing
//! file is recorded and the batch moves on.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

use preamble_banner::BannerRenderer;
use preamble_core::config::{default_exclude, default_include};
use preamble_core::types::SyncOutcome;

use crate::writer::{BackupAction, FileSyncResult, FileSynchronizer};
use crate::SyncError;

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Path-substring filter.
///
/// A path is skipped when it lacks ANY include token or contains ANY exclude
/// token. Tokens are plain substrings of the full path, not globs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    include: Vec<String>,
    exclude: Vec<String>,
}

impl Default for FileFilter {
    fn default() -> Self {
        Self::new(default_include(), default_exclude())
    }
}

impl FileFilter {
    pub fn new(include: Vec<String>, exclude: Vec<String>) -> Self {
        Self { include, exclude }
    }

    pub fn skip(&self, path: &Path) -> bool {
        let p = path.to_string_lossy();
        self.include.iter().any(|token| !p.contains(token.as_str()))
            || self.exclude.iter().any(|token| p.contains(token.as_str()))
    }
}

// ---------------------------------------------------------------------------
// Expansion
// ---------------------------------------------------------------------------

/// The glob actually walked for `pattern`.
pub fn effective_pattern(pattern: &str) -> String {
    let path = Path::new(pattern);
    if path.is_dir() {
        let escaped = Pattern::escape(pattern.trim_end_matches(['/', '\\']));
        format!("{escaped}/**/*")
    } else {
        pattern.to_string()
    }
}

/// Files matched by `pattern` that pass `filter`, in walk order.
///
/// Directories are dropped. Paths that could not be inspected during the walk
/// come back as errors so the caller can report them per path.
pub fn candidates(
    pattern: &str,
    filter: &FileFilter,
) -> Result<Vec<Result<PathBuf, SyncError>>, SyncError> {
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };
    let walked = effective_pattern(pattern);
    let mut out = Vec::new();
    for entry in glob::glob_with(&walked, options)? {
        match entry {
            Ok(path) => {
                if !path.is_file() {
                    continue;
                }
                if filter.skip(&path) {
                    tracing::debug!("filtered out: {}", path.display());
                    continue;
                }
                out.push(Ok(path));
            }
            Err(err) => out.push(Err(SyncError::from(err))),
        }
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Batch run
// ---------------------------------------------------------------------------

/// One candidate's result.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub result: Result<FileSyncResult, SyncError>,
}

/// Everything a batch did.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub reports: Vec<FileReport>,
}

impl BatchSummary {
    pub fn count(&self, outcome: SyncOutcome) -> usize {
        self.successes().filter(|r| r.outcome == outcome).count()
    }

    pub fn written(&self) -> usize {
        self.successes().filter(|r| r.written).count()
    }

    /// Files whose backup was refreshed because of a meaningful change.
    pub fn drifted(&self) -> usize {
        self.successes()
            .filter(|r| r.backup == Some(BackupAction::Refreshed))
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileReport> {
        self.reports.iter().filter(|r| r.result.is_err())
    }

    pub fn successes(&self) -> impl Iterator<Item = &FileSyncResult> {
        self.reports.iter().filter_map(|r| r.result.as_ref().ok())
    }
}

/// Synchronize every candidate of `pattern`, sequentially.
///
/// Only an invalid pattern fails the whole batch.
pub fn run<R: BannerRenderer>(
    synchronizer: &FileSynchronizer<R>,
    pattern: &str,
    filter: &FileFilter,
) -> Result<BatchSummary, SyncError> {
    let mut summary = BatchSummary::default();
    for candidate in candidates(pattern, filter)? {
        let report = match candidate {
            Ok(path) => {
                let result = synchronizer.sync(&path);
                if let Err(err) = &result {
                    tracing::error!("{err}");
                }
                FileReport { path, result }
            }
            Err(err) => {
                tracing::error!("{err}");
                FileReport {
                    path: glob_error_path(&err),
                    result: Err(err),
                }
            }
        };
        summary.reports.push(report);
    }
    tracing::info!(
        "processed {} file(s): {} inserted, {} updated, {} skipped, {} failed",
        summary.reports.len(),
        summary.count(SyncOutcome::Inserted),
        summary.count(SyncOutcome::Updated),
        summary.count(SyncOutcome::Skipped),
        summary.failures().count()
    );
    Ok(summary)
}

pub(crate) fn glob_error_path(err: &SyncError) -> PathBuf {
    match err {
        SyncError::Glob(e) => e.path().to_path_buf(),
        _ => PathBuf::new(),
    }
}
