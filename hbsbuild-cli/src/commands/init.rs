//! `hbsbuild init [DIR]` — scaffold a config file and a starter views tree.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use hbsbuild_core::{BuildConfig, CONFIG_FILE_NAME};

const STARTER_FILES: &[(&str, &str)] = &[
    (
        "views/templates/index.hbs",
        "<!doctype html>\n<html>\n<head>{{> header}}</head>\n<body>\n  <h1>{{site.title}}</h1>\n  {{#equals site.stage \"draft\"}}<p>Draft build</p>{{else}}<p>{{site.tagline}}</p>{{/equals}}\n</body>\n</html>\n",
    ),
    (
        "views/partials/header.hbs",
        "<meta charset=\"utf-8\">\n<title>{{site.title}}</title>\n",
    ),
    (
        "views/json/site.json",
        "{\n  \"title\": \"My Site\",\n  \"tagline\": \"Built with hbsbuild\",\n  \"stage\": \"live\"\n}\n",
    ),
    ("views/helpers/equals.rhai", "params[0] == params[1]\n"),
];

/// Scaffold an hbsbuild project.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to scaffold into (created if missing).
    #[arg(default_value = ".")]
    pub dir: PathBuf,
}

impl InitArgs {
    pub fn run(self) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("cannot create '{}'", self.dir.display()))?;

        let config_path = self.dir.join(CONFIG_FILE_NAME);
        BuildConfig::default()
            .save_new(&config_path)
            .with_context(|| format!("cannot write '{}'", config_path.display()))?;
        println!("✓ Wrote {}", config_path.display());

        for (rel, contents) in STARTER_FILES {
            let path = self.dir.join(rel);
            if write_if_absent(&path, contents)? {
                println!("  ✎  {}", path.display());
            } else {
                println!("  ·  {} (exists, kept)", path.display());
            }
        }
        println!("Run `hbsbuild build` from {} to compile.", self.dir.display());
        Ok(())
    }
}

fn write_if_absent(path: &Path, contents: &str) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("cannot create '{}'", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("cannot write '{}'", path.display()))?;
    Ok(true)
}
