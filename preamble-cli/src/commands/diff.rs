//! `preamble diff <pattern>` — show unified diffs for what sync would write.

use anyhow::{Context, Result};
use clap::Args;

use preamble_sync::diff_all;

use super::TargetArgs;

/// Arguments for `preamble diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

impl DiffArgs {
    pub fn run(self) -> Result<()> {
        let (synchronizer, filter) = self.target.synchronizer(true)?;

        let result = diff_all(&synchronizer, &self.target.pattern, &filter)
            .with_context(|| format!("diff failed for '{}'", self.target.pattern))?;

        for (path, err) in &result.errors {
            eprintln!("{}: {err}", path.display());
        }

        if result.diffs.is_empty() {
            println!("No differences for '{}'.", self.target.pattern);
            return Ok(());
        }

        for diff in result.diffs {
            print!("{}", diff.unified_diff);
            if !diff.unified_diff.ends_with('\n') {
                println!();
            }
        }

        Ok(())
    }
}
