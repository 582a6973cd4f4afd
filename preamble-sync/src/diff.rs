//! Dry-run unified diff support for `preamble diff`.

use std::path::{Path, PathBuf};

use similar::TextDiff;

use preamble_banner::BannerRenderer;

use crate::pipeline::{candidates, glob_error_path, FileFilter};
use crate::writer::FileSynchronizer;
use crate::SyncError;

/// A single planned file diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub path: PathBuf,
    pub unified_diff: String,
}

/// Diffs for a whole pattern. Files without changes are omitted.
#[derive(Debug, Default)]
pub struct DiffSummary {
    pub diffs: Vec<FileDiff>,
    pub errors: Vec<(PathBuf, SyncError)>,
}

/// Plan `path` and compare it to its on-disk content.
///
/// No files are written. Returns `None` when sync would leave it unchanged.
pub fn diff_file<R: BannerRenderer>(
    synchronizer: &FileSynchronizer<R>,
    path: &Path,
) -> Result<Option<FileDiff>, SyncError> {
    let planned = synchronizer.plan_file(path)?;
    if !planned.changed() {
        return Ok(None);
    }

    let old_header = format!("a/{}", path.display());
    let new_header = format!("b/{}", path.display());
    let unified = TextDiff::from_lines(&planned.original, &planned.plan.content)
        .unified_diff()
        .header(&old_header, &new_header)
        .context_radius(3)
        .to_string();

    Ok(Some(FileDiff {
        path: path.to_path_buf(),
        unified_diff: unified,
    }))
}

/// [`diff_file`] for every candidate of `pattern`.
pub fn diff_all<R: BannerRenderer>(
    synchronizer: &FileSynchronizer<R>,
    pattern: &str,
    filter: &FileFilter,
) -> Result<DiffSummary, SyncError> {
    let mut summary = DiffSummary::default();
    for candidate in candidates(pattern, filter)? {
        let path = match candidate {
            Ok(path) => path,
            Err(err) => {
                summary.errors.push((glob_error_path(&err), err));
                continue;
            }
        };
        match diff_file(synchronizer, &path) {
            Ok(Some(diff)) => summary.diffs.push(diff),
            Ok(None) => {}
            Err(err) => summary.errors.push((path, err)),
        }
    }
    Ok(summary)
}
