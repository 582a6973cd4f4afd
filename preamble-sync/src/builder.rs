//! Preamble assembly.
//!
//! ```text
//! ################################################################################
//! #  <banner row 1>
//! #  ...
//! #  <banner row n>                  (blank rows included)
//! #     <label>
//! #     Last Updated: <date>
//! #
//! # The above is automatically generated  - DO NOT TOUCH ABOVE THIS LINE.
//! #
//! #
//! ################################################################################
//! ```

use preamble_banner::BannerRenderer;
use preamble_core::types::{
    rule_line, Preamble, PreambleDate, Title, BANNER_ROW_PREFIX, BLANK_COMMENT, LABEL_PREFIX,
    SENTINEL,
};

use crate::SyncError;

/// Builds preambles for one label with one banner renderer.
pub struct PreambleBuilder<R> {
    renderer: R,
    label: String,
}

impl<R: BannerRenderer> PreambleBuilder<R> {
    pub fn new(renderer: R, label: impl Into<String>) -> Self {
        Self {
            renderer,
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Render the banner for `title` and frame it.
    pub fn build(&self, title: &Title, date: &PreambleDate) -> Result<Preamble, SyncError> {
        let banner = self.renderer.render(&title.0)?;
        Ok(frame(&banner, &self.label, date))
    }
}

/// Frame already-rendered banner text. Pure.
///
/// The banner is split on `\n`, so text ending in a newline contributes a
/// trailing blank row.
pub fn frame(banner: &str, label: &str, date: &PreambleDate) -> Preamble {
    let rule = rule_line();
    let mut lines = Vec::new();
    lines.push(rule.clone());
    for row in banner.split('\n') {
        let row = row.strip_suffix('\r').unwrap_or(row);
        lines.push(format!("{BANNER_ROW_PREFIX}{row}"));
    }
    lines.push(format!("{LABEL_PREFIX}{label}"));
    lines.push(date.line());
    lines.push(BLANK_COMMENT.to_string());
    lines.push(SENTINEL.to_string());
    lines.push(BLANK_COMMENT.to_string());
    lines.push(BLANK_COMMENT.to_string());
    lines.push(rule);
    Preamble::from_lines(lines)
}
