//! `preamble sync` — insert and refresh preambles.

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

use preamble_core::SyncOutcome;
use preamble_sync::{pipeline, BackupAction, BatchSummary, FileSyncResult};

use super::TargetArgs;

/// Arguments for `preamble sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Show what would be written without touching any file.
    #[arg(long)]
    pub dry_run: bool,

    /// Exit with status 1 if any file failed.
    #[arg(long)]
    pub strict: bool,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let (synchronizer, filter) = self.target.synchronizer(self.dry_run)?;
        let summary = pipeline::run(&synchronizer, &self.target.pattern, &filter)
            .with_context(|| format!("sync failed for '{}'", self.target.pattern))?;

        print_summary(&summary, self.dry_run);

        let failed = summary.failures().count();
        if self.strict && failed > 0 {
            bail!("{failed} file(s) failed");
        }
        Ok(())
    }
}

fn print_summary(summary: &BatchSummary, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };

    if summary.reports.is_empty() {
        println!("{prefix}No matching files.");
        return;
    }

    for report in &summary.reports {
        match &report.result {
            Ok(result) => print_result(result),
            Err(err) => println!("  {}  {}: {err}", "✗".red(), report.path.display()),
        }
    }

    println!(
        "{prefix}✓ {} file(s): {} inserted, {} updated, {} skipped, {} failed",
        summary.reports.len(),
        summary.count(SyncOutcome::Inserted),
        summary.count(SyncOutcome::Updated),
        summary.count(SyncOutcome::Skipped),
        summary.failures().count(),
    );

    let drifted = summary.drifted();
    if drifted > 0 {
        println!(
            "{} {drifted} file(s) changed since their last backup; review the .~backup~ copies.",
            "!".yellow().bold()
        );
    }
}

fn print_result(result: &FileSyncResult) {
    let path = result.path.display();
    match (result.outcome, result.changed) {
        (SyncOutcome::Inserted, _) => println!("  {}  {path} (inserted)", "+".green()),
        (SyncOutcome::Updated, true) => {
            println!("  ✎  {path} (date {})", result.date)
        }
        (SyncOutcome::Updated, false) => println!("  ·  {path} (current)"),
        (SyncOutcome::Skipped, _) => println!("  -  {path} (skipped)"),
    }
    if result.backup == Some(BackupAction::Refreshed) {
        println!(
            "     {} changed since last backup: {}",
            "!".yellow().bold(),
            summarize_lines(&result.drift)
        );
    }
}

fn summarize_lines(lines: &[String]) -> String {
    let mut shown: Vec<String> = lines
        .iter()
        .take(2)
        .map(|l| format!("{:?}", l.trim_end()))
        .collect();
    if lines.len() > shown.len() {
        shown.push(format!("+{} more", lines.len() - shown.len()));
    }
    shown.join(", ")
}
