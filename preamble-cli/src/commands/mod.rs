//! Subcommands and the target/config arguments they share.

pub mod diff;
pub mod status;
pub mod sync;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use preamble_banner::FigletRenderer;
use preamble_core::{config, SyncConfig};
use preamble_sync::{FileFilter, FileSynchronizer, PreambleBuilder, SyncOptions};

/// Which files to process and how their preamble looks.
#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Glob pattern (`**` recurses) or directory.
    pub pattern: String,

    /// Config file (default: ./.preamble.yaml when present).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path token every file must contain; repeatable. Replaces the config list.
    #[arg(long = "include", value_name = "TOKEN")]
    pub include: Vec<String>,

    /// Path token that excludes a file; repeatable. Replaces the config list.
    #[arg(long = "exclude", value_name = "TOKEN")]
    pub exclude: Vec<String>,

    /// Product label shown under the banner.
    #[arg(long)]
    pub label: Option<String>,

    /// FIGlet font file (.flf) for the banner.
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Leave files without a preamble untouched.
    #[arg(long)]
    pub no_insert: bool,
}

impl TargetArgs {
    /// Config file values with command-line overrides applied.
    pub fn config(&self) -> Result<SyncConfig> {
        let mut cfg = match &self.config {
            Some(path) => config::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => {
                let cwd = std::env::current_dir().context("could not determine current directory")?;
                config::load_or_default_at(&cwd).context("failed to load ./.preamble.yaml")?
            }
        };
        if !self.include.is_empty() {
            cfg.include = self.include.clone();
        }
        if !self.exclude.is_empty() {
            cfg.exclude = self.exclude.clone();
        }
        if let Some(label) = &self.label {
            cfg.label = label.clone();
        }
        if let Some(font) = &self.font {
            cfg.font = Some(font.clone());
        }
        if self.no_insert {
            cfg.insert_missing = false;
        }
        Ok(cfg)
    }

    pub fn synchronizer(
        &self,
        dry_run: bool,
    ) -> Result<(FileSynchronizer<FigletRenderer>, FileFilter)> {
        let cfg = self.config()?;
        tracing::debug!(?cfg, "resolved configuration");
        let renderer =
            FigletRenderer::with_font(cfg.font.as_deref()).context("failed to load banner font")?;
        let options = SyncOptions {
            insert_missing: cfg.insert_missing,
            dry_run,
        };
        let synchronizer = FileSynchronizer::new(PreambleBuilder::new(renderer, cfg.label), options);
        Ok((synchronizer, FileFilter::new(cfg.include, cfg.exclude)))
    }
}
