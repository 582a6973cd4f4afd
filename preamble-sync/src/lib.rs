//! # preamble-sync
//!
//! Keeps the generated banner preamble at the head of source files in sync
//! with each file's modification date.
//!
//! Call [`FileSynchronizer::sync`] for a single file or [`pipeline::run`]
//! for every file matched by a glob pattern.

pub mod backup;
pub mod builder;
pub mod diff;
pub mod error;
pub mod matcher;
pub mod pipeline;
pub mod rewrite;
pub mod status;
pub mod writer;

pub use backup::{is_meaningful_change, Change};
pub use builder::PreambleBuilder;
pub use diff::{diff_all, diff_file, DiffSummary, FileDiff};
pub use error::SyncError;
pub use pipeline::{BatchSummary, FileFilter, FileReport};
pub use status::{FileStatus, StatusReport};
pub use writer::{BackupAction, FileSyncResult, FileSynchronizer, SyncOptions};
