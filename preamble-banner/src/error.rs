//! Error types for preamble-banner.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from banner rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The FIGlet font could not be parsed.
    #[error("invalid FIGlet font: {0}")]
    Font(String),

    /// Filesystem error while loading a user font.
    #[error("font io error at {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    /// The font produced no output for the title.
    #[error("cannot render banner for title {title:?}")]
    Unrenderable { title: String },
}
