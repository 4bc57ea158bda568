//! `hbsbuild build` — run the full pipeline.

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

use hbsbuild_pipeline::{BuildReport, WriteResult};

use super::ConfigArgs;

/// Arguments for `hbsbuild build`.
#[derive(Args, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Render every page but do not write any files.
    #[arg(long)]
    pub dry_run: bool,
}

impl BuildArgs {
    pub fn run(self) -> Result<()> {
        let mut config = self.config.resolve()?;
        config.dry_run |= self.dry_run;

        let report = hbsbuild_pipeline::build_with_fresh_engine(&config)
            .with_context(|| format!("build of '{}' failed", config.input_dir))?;

        print_report(&report, config.dry_run);

        if !report.is_success() {
            bail!("{} page(s) failed to compile", report.failures.len());
        }
        Ok(())
    }
}

fn print_report(report: &BuildReport, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };
    println!(
        "{prefix}{} {} page(s) compiled ({} JSON, {} helper(s), {} partial(s))",
        "✓".green(),
        report.writes.len(),
        report.json_loaded,
        report.helpers_loaded,
        report.partials_loaded,
    );

    for w in &report.writes {
        match w {
            WriteResult::Written { path, .. } => println!("  ✎  {}", path.display()),
            WriteResult::WouldWrite { path, .. } => println!("  ~  {}", path.display()),
        }
    }
    for failure in &report.failures {
        println!(
            "  {}  {}: {}",
            "✗".red(),
            failure.template,
            failure.error
        );
    }
}
