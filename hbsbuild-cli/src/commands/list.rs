//! `hbsbuild list` — show discovered files per stage.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use super::ConfigArgs;

/// Arguments for `hbsbuild list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

impl ListArgs {
    pub fn run(self) -> Result<()> {
        let config = self.config.resolve()?;
        let found = hbsbuild_pipeline::discover(&config).context("discovery failed")?;

        let stages = [
            ("json", config.json_path(), &found.json),
            ("helpers", config.helpers_path(), &found.helpers),
            ("partials", config.partials_path(), &found.partials),
            ("templates", config.templates_path(), &found.templates),
        ];
        for (label, dir, files) in stages {
            println!("{} {} ({})", label.bold(), dir.dimmed(), files.len());
            for file in files {
                println!("  {file}");
            }
        }
        Ok(())
    }
}
