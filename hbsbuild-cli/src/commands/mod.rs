pub mod build;
pub mod init;
pub mod list;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use hbsbuild_core::{BuildConfig, CONFIG_FILE_NAME};

/// Config file selection plus per-field overrides, shared by `build` and `list`.
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Config file (YAML or JSON). Defaults to ./hbsbuild.yaml when present.
    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Root directory every stage directory is appended to.
    #[arg(long, value_name = "DIR")]
    pub input_dir: Option<String>,

    /// Root directory output files are written under.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<String>,

    #[arg(long, value_name = "DIR")]
    pub helpers_dir: Option<String>,

    #[arg(long, value_name = "DIR")]
    pub partials_dir: Option<String>,

    #[arg(long, value_name = "DIR")]
    pub templates_dir: Option<String>,

    #[arg(long, value_name = "DIR")]
    pub json_dir: Option<String>,

    /// Output extension including the dot, e.g. `.html`.
    #[arg(long, value_name = "EXT")]
    pub ext: Option<String>,

    /// Only compile this page template (path relative to the templates dir).
    /// Repeatable; replaces any filter from the config file.
    #[arg(long = "filter", value_name = "PATH")]
    pub filter: Vec<String>,

    /// Treat references to missing fields as errors.
    #[arg(long)]
    pub strict: bool,
}

impl ConfigArgs {
    /// Load the config file (if any) and apply command-line overrides.
    pub fn resolve(&self) -> Result<BuildConfig> {
        let mut config = match &self.config {
            Some(path) => BuildConfig::load(path)
                .with_context(|| format!("cannot load config '{}'", path.display()))?,
            None => BuildConfig::load_or_default(Path::new(CONFIG_FILE_NAME))
                .with_context(|| format!("cannot load {CONFIG_FILE_NAME}"))?,
        };

        let overrides = [
            (&self.input_dir, &mut config.input_dir),
            (&self.output_dir, &mut config.output_dir),
            (&self.helpers_dir, &mut config.helpers_dir),
            (&self.partials_dir, &mut config.partials_dir),
            (&self.templates_dir, &mut config.templates_dir),
            (&self.json_dir, &mut config.json_dir),
            (&self.ext, &mut config.ext),
        ];
        for (arg, field) in overrides {
            if let Some(value) = arg {
                *field = value.clone();
            }
        }
        if !self.filter.is_empty() {
            config.filter = self.filter.clone();
        }
        config.strict |= self.strict;
        Ok(config)
    }
}
