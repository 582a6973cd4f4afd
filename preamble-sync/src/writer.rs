//! Per-file synchronization.
//!
//! ## `FileSynchronizer::sync` — protocol
//!
//! 1. Read the file, capture mtime + permissions, write `<path>.~temp~`.
//! 2. Plan the new content (see [`crate::rewrite`]) with the date taken from
//!    the captured mtime.
//! 3. If the content changed: write `<path>.~write~`, rename it over the
//!    file. Either way the mtime ends up at the captured value floored to
//!    the whole minute.
//! 4. Compare temp against `<path>.~backup~`; a missing backup or a
//!    meaningful change makes temp the new backup.
//! 5. Remove temp (also on early failure).

use std::fs::Permissions;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use filetime::FileTime;

use preamble_banner::BannerRenderer;
use preamble_core::types::{
    FileSnapshot, Preamble, PreambleDate, SyncOutcome, Title, WRITE_SUFFIX,
};

use crate::backup::{self, backup_path, temp_path, with_suffix, Change};
use crate::builder::PreambleBuilder;
use crate::error::{read_err, write_err, SyncError};
use crate::rewrite::{self, Plan};

// ---------------------------------------------------------------------------
// Options and results
// ---------------------------------------------------------------------------

/// Per-run switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOptions {
    /// Prepend a preamble to files that have none (otherwise `Skipped`).
    pub insert_missing: bool,
    /// Plan only; no file or artifact is created, changed or removed.
    pub dry_run: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            insert_missing: true,
            dry_run: false,
        }
    }
}

/// What happened to `<path>.~backup~`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupAction {
    /// No backup existed; the pre-sync snapshot became the first one.
    Created,
    /// The pre-sync snapshot differed meaningfully and replaced the backup.
    Refreshed,
    /// No difference, or only the date line; backup left untouched.
    Kept,
}

/// Outcome of synchronizing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSyncResult {
    pub path: PathBuf,
    pub outcome: SyncOutcome,
    /// Date shown in the preamble after the pass.
    pub date: PreambleDate,
    /// The planned content differs from the current content.
    pub changed: bool,
    /// The new content was persisted (never in dry-run).
    pub written: bool,
    /// `None` in dry-run.
    pub backup: Option<BackupAction>,
    /// Lines of the pre-sync snapshot missing from the previous backup, when
    /// that difference was meaningful.
    pub drift: Vec<String>,
}

/// A file read and planned, nothing written.
#[derive(Debug, Clone)]
pub struct PlannedFile {
    pub path: PathBuf,
    pub original: String,
    pub date: PreambleDate,
    /// The preamble expected at the head of this file.
    pub preamble: Preamble,
    pub plan: Plan,
    pub(crate) mtime: SystemTime,
    pub(crate) permissions: Permissions,
}

impl PlannedFile {
    pub fn changed(&self) -> bool {
        self.plan.content != self.original
    }
}

// ---------------------------------------------------------------------------
// FileSynchronizer
// ---------------------------------------------------------------------------

/// Synchronizes single files against preambles from one builder.
pub struct FileSynchronizer<R> {
    builder: PreambleBuilder<R>,
    options: SyncOptions,
}

impl<R: BannerRenderer> FileSynchronizer<R> {
    pub fn new(builder: PreambleBuilder<R>, options: SyncOptions) -> Self {
        Self { builder, options }
    }

    pub fn options(&self) -> SyncOptions {
        self.options
    }

    /// Read `path` and compute its new content. No side effects.
    pub fn plan_file(&self, path: &Path) -> Result<PlannedFile, SyncError> {
        let meta = std::fs::metadata(path).map_err(|e| read_err(path, e))?;
        let mtime = meta.modified().map_err(|e| read_err(path, e))?;
        let original = std::fs::read_to_string(path).map_err(|e| read_err(path, e))?;

        let title = Title::from_path(path).ok_or_else(|| SyncError::NoTitle {
            path: path.to_path_buf(),
        })?;
        let date = PreambleDate::from_system_time(mtime);
        let preamble = self.builder.build(&title, &date)?;
        let snapshot = FileSnapshot::parse(&original);
        let plan = rewrite::plan(&snapshot, &preamble, &date, self.options.insert_missing);

        Ok(PlannedFile {
            path: path.to_path_buf(),
            original,
            date,
            preamble,
            plan,
            mtime,
            permissions: meta.permissions(),
        })
    }

    /// Synchronize one file. See the module docs for the protocol.
    pub fn sync(&self, path: &Path) -> Result<FileSyncResult, SyncError> {
        let planned = self.plan_file(path)?;
        let changed = planned.changed();

        if self.options.dry_run {
            tracing::info!(
                "[dry-run] would {}: {}",
                verb(planned.plan.outcome, changed),
                path.display()
            );
            return Ok(FileSyncResult {
                path: path.to_path_buf(),
                outcome: planned.plan.outcome,
                date: planned.date,
                changed,
                written: false,
                backup: None,
                drift: Vec::new(),
            });
        }

        // Pre-mutation snapshot.
        let temp = temp_path(path);
        std::fs::write(&temp, &planned.original).map_err(|e| write_err(&temp, e))?;
        let mut temp_guard = ArtifactGuard::new(temp.clone());

        if changed {
            let target = write_target(path)?;
            atomic_write(&target, &planned.plan.content, &planned.permissions)?;
            restore_mtime(&target, planned.mtime)?;
        } else if has_sub_minute_part(planned.mtime) {
            restore_mtime(path, planned.mtime)?;
        }
        log_outcome(path, &planned, changed);

        let backup = backup_path(path);
        let change = backup::compare_files(&temp, &backup)?;
        let (action, drift) = match change {
            Change::Unavailable => (BackupAction::Created, Vec::new()),
            Change::Meaningful(lines) => {
                tracing::warn!(
                    "{} changed since the last backup; differing lines: {:?}",
                    path.display(),
                    lines
                );
                (BackupAction::Refreshed, lines)
            }
            Change::DateOnly => {
                tracing::debug!("date line is the only difference from backup: {}", path.display());
                (BackupAction::Kept, Vec::new())
            }
            Change::None => (BackupAction::Kept, Vec::new()),
        };
        if action != BackupAction::Kept {
            std::fs::rename(&temp, &backup).map_err(|e| write_err(&backup, e))?;
            temp_guard.disarm();
        }

        Ok(FileSyncResult {
            path: path.to_path_buf(),
            outcome: planned.plan.outcome,
            date: planned.date,
            changed,
            written: changed,
            backup: Some(action),
            drift,
        })
    }
}

fn verb(outcome: SyncOutcome, changed: bool) -> &'static str {
    match (outcome, changed) {
        (SyncOutcome::Inserted, _) => "insert preamble",
        (SyncOutcome::Updated, true) => "update preamble date",
        (SyncOutcome::Updated, false) => "keep current preamble",
        (SyncOutcome::Skipped, _) => "skip (no preamble)",
    }
}

fn log_outcome(path: &Path, planned: &PlannedFile, changed: bool) {
    match (planned.plan.outcome, changed) {
        (SyncOutcome::Inserted, _) => {
            tracing::info!("inserted preamble: {}", path.display())
        }
        (SyncOutcome::Updated, true) => tracing::info!(
            "updated preamble date to {}: {}",
            planned.date,
            path.display()
        ),
        (SyncOutcome::Updated, false) => {
            tracing::debug!("preamble current: {}", path.display())
        }
        (SyncOutcome::Skipped, _) => {
            tracing::info!("no preamble, insertion disabled: {}", path.display())
        }
    }
}

// ---------------------------------------------------------------------------
// Artifacts
// ---------------------------------------------------------------------------

/// Removes its file on drop unless disarmed.
struct ArtifactGuard {
    path: PathBuf,
    armed: bool,
}

impl ArtifactGuard {
    fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for ArtifactGuard {
    fn drop(&mut self) {
        if self.armed {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}

/// The file a rewrite lands in: the link target for symlinks, so the link
/// survives the rename.
fn write_target(path: &Path) -> Result<PathBuf, SyncError> {
    let meta = std::fs::symlink_metadata(path).map_err(|e| read_err(path, e))?;
    if meta.file_type().is_symlink() {
        std::fs::canonicalize(path).map_err(|e| read_err(path, e))
    } else {
        Ok(path.to_path_buf())
    }
}

/// Replace `path` with `content` in one rename. On failure the original file
/// is untouched and the staging file is removed.
pub(crate) fn atomic_write(
    path: &Path,
    content: &str,
    permissions: &Permissions,
) -> Result<(), SyncError> {
    let staging = with_suffix(path, WRITE_SUFFIX);
    atomic_write_with_staging(path, content, permissions, &staging)
}

fn atomic_write_with_staging(
    path: &Path,
    content: &str,
    permissions: &Permissions,
    staging: &Path,
) -> Result<(), SyncError> {
    std::fs::write(staging, content).map_err(|e| write_err(staging, e))?;

    if let Err(e) = std::fs::set_permissions(staging, permissions.clone()) {
        let _ = std::fs::remove_file(staging);
        return Err(write_err(staging, e));
    }

    if let Err(e) = std::fs::rename(staging, path) {
        let _ = std::fs::remove_file(staging);
        return Err(write_err(path, e));
    }
    Ok(())
}

/// `time` rounded down to the whole minute.
pub fn minute_floor(time: SystemTime) -> FileTime {
    let secs = FileTime::from_system_time(time).unix_seconds();
    FileTime::from_unix_time(secs - secs.rem_euclid(60), 0)
}

fn has_sub_minute_part(time: SystemTime) -> bool {
    minute_floor(time) != FileTime::from_system_time(time)
}

/// Set the modification time of `path` back to `original`, whole minutes.
pub fn restore_mtime(path: &Path, original: SystemTime) -> Result<(), SyncError> {
    filetime::set_file_mtime(path, minute_floor(original)).map_err(|e| write_err(path, e))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
