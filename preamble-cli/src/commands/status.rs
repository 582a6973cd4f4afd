//! `preamble status` — per-file preamble state, nothing written.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use preamble_sync::{status::check_all, FileStatus, StatusReport};

use super::TargetArgs;

/// Arguments for `preamble status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl StatusArgs {
    pub fn run(self) -> Result<()> {
        let (synchronizer, filter) = self.target.synchronizer(true)?;
        let reports = check_all(&synchronizer, &self.target.pattern, &filter)
            .with_context(|| format!("status failed for '{}'", self.target.pattern))?;

        let rows: Vec<FileRow> = reports.into_iter().map(FileRow::from).collect();
        if self.json {
            print_json(&rows)?;
            return Ok(());
        }

        print_table(rows);
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
struct FileRow {
    path: String,
    status: &'static str,
    detail: String,
}

impl From<StatusReport> for FileRow {
    fn from(report: StatusReport) -> Self {
        let path = report.path.display().to_string();
        match report.status {
            Ok(status) => Self {
                path,
                status: status_key(&status),
                detail: status_detail(&status),
            },
            Err(err) => Self {
                path,
                status: "error",
                detail: err.to_string(),
            },
        }
    }
}

#[derive(Serialize)]
struct StatusJson<'a> {
    summary: SummaryJson,
    files: &'a [FileRow],
}

#[derive(Serialize)]
struct SummaryJson {
    files: usize,
    needs_sync: usize,
    drifted: usize,
}

#[derive(Tabled)]
struct StatusTableRow {
    #[tabled(rename = "")]
    indicator: String,
    #[tabled(rename = "file")]
    path: String,
    #[tabled(rename = "status")]
    status: String,
    #[tabled(rename = "detail")]
    detail: String,
}

fn needs_sync(rows: &[FileRow]) -> usize {
    rows.iter()
        .filter(|r| matches!(r.status, "missing" | "stale" | "drifted"))
        .count()
}

fn drifted(rows: &[FileRow]) -> usize {
    rows.iter().filter(|r| r.status == "drifted").count()
}

fn print_json(rows: &[FileRow]) -> Result<()> {
    let payload = StatusJson {
        summary: SummaryJson {
            files: rows.len(),
            needs_sync: needs_sync(rows),
            drifted: drifted(rows),
        },
        files: rows,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize status JSON")?
    );
    Ok(())
}

fn print_table(rows: Vec<FileRow>) {
    println!(
        "Preamble v{} | {} files | {} need sync | {} drifted",
        env!("CARGO_PKG_VERSION"),
        rows.len(),
        needs_sync(&rows),
        drifted(&rows),
    );

    if rows.is_empty() {
        println!("No matching files.");
        return;
    }

    let needs = needs_sync(&rows);
    let table_rows: Vec<StatusTableRow> = rows
        .into_iter()
        .map(|row| StatusTableRow {
            indicator: indicator(row.status),
            path: row.path,
            status: row.status.to_uppercase(),
            detail: row.detail,
        })
        .collect();
    let mut table = Table::new(table_rows);
    table.with(Style::rounded());
    println!("{table}");

    if needs > 0 {
        println!("Run 'preamble sync <pattern>' to update these files.");
    }
}

fn status_key(status: &FileStatus) -> &'static str {
    match status {
        FileStatus::Missing => "missing",
        FileStatus::Drifted { .. } => "drifted",
        FileStatus::Stale { .. } => "stale",
        FileStatus::Current => "current",
    }
}

fn status_detail(status: &FileStatus) -> String {
    match status {
        FileStatus::Missing => "no preamble".to_string(),
        FileStatus::Drifted { lines } => format!("{} line(s) differ from backup", lines.len()),
        FileStatus::Stale { date } => format!("date becomes {date}"),
        FileStatus::Current => "up to date".to_string(),
    }
}

fn indicator(status: &str) -> String {
    match status {
        "current" => "■".green().bold().to_string(),
        "stale" => "■".yellow().bold().to_string(),
        "drifted" => "■".red().bold().to_string(),
        "missing" => "■".bright_black().bold().to_string(),
        _ => "■".magenta().bold().to_string(),
    }
}
