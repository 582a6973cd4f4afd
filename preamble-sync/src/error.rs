//! Error types for preamble-sync.

use std::path::PathBuf;

use thiserror::Error;

use preamble_banner::RenderError;

/// All errors that can arise from sync operations.
///
/// A missing backup is not an error: it counts as a meaningful change and a
/// fresh backup is taken.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The file (or one of its snapshots) could not be read.
    #[error("read failed at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The rewrite, the timestamp reset or an artifact could not be
    /// persisted. The target file is left as it was.
    #[error("write failed at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The banner collaborator failed.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// The file name yields no banner title.
    #[error("no title can be derived from {path}")]
    NoTitle { path: PathBuf },

    /// The batch pattern is not a valid glob.
    #[error("invalid path pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// A path could not be inspected while expanding the pattern.
    #[error("cannot expand pattern: {0}")]
    Glob(#[from] glob::GlobError),
}

/// Convenience constructor for [`SyncError::Read`].
pub(crate) fn read_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Read {
        path: path.into(),
        source,
    }
}

/// Convenience constructor for [`SyncError::Write`].
pub(crate) fn write_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Write {
        path: path.into(),
        source,
    }
}
