//! Build configuration.
//!
//! Every stage directory is derived by plain string concatenation of
//! `input_dir` and the stage's sub-directory name, and output files by
//! concatenating `output_dir`, the page's base name and `ext`. Nothing is
//! normalised, so `"./views"` + `"partials/"` yields `"./viewspartials/"`.
//! Trailing separators are the caller's business.
//!
//! # File format
//!
//! ```yaml
//! inputDir: ./views/
//! outputDir: ./out/
//! helpersDir: helpers/
//! partialsDir: partials/
//! templatesDir: templates/
//! jsonDir: json/        # `JSONDir` is accepted too
//! ext: .html
//! filter:
//!   - page.hbs
//! ```
//!
//! JSON documents parse as well, since serde_yaml accepts them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Conventional config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "hbsbuild.yaml";

/// Configuration for a single build invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildConfig {
    /// Root that every stage directory is appended to.
    pub input_dir: String,
    /// Root that every output path is appended to.
    pub output_dir: String,
    pub helpers_dir: String,
    pub partials_dir: String,
    pub templates_dir: String,
    #[serde(alias = "JSONDir")]
    pub json_dir: String,
    /// Output extension, including the leading dot.
    pub ext: String,
    /// Relative page template paths to compile. Empty means all of them.
    /// Only the template stage is filtered.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filter: Vec<String>,
    /// Fail rendering on missing fields instead of printing nothing.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub strict: bool,
    /// Render pages without writing them.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub dry_run: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            input_dir: "./views/".to_string(),
            output_dir: "./out/".to_string(),
            helpers_dir: "helpers/".to_string(),
            partials_dir: "partials/".to_string(),
            templates_dir: "templates/".to_string(),
            json_dir: "json/".to_string(),
            ext: ".html".to_string(),
            filter: Vec::new(),
            strict: false,
            dry_run: false,
        }
    }
}

impl BuildConfig {
    /// `input_dir + helpers_dir`
    pub fn helpers_path(&self) -> String {
        format!("{}{}", self.input_dir, self.helpers_dir)
    }

    /// `input_dir + partials_dir`
    pub fn partials_path(&self) -> String {
        format!("{}{}", self.input_dir, self.partials_dir)
    }

    /// `input_dir + templates_dir`
    pub fn templates_path(&self) -> String {
        format!("{}{}", self.input_dir, self.templates_dir)
    }

    /// `input_dir + json_dir`
    pub fn json_path(&self) -> String {
        format!("{}{}", self.input_dir, self.json_dir)
    }

    /// `output_dir + base + ext` for a page whose extension-less relative
    /// path is `base`.
    pub fn output_path(&self, base: &str) -> String {
        format!("{}{}{}", self.output_dir, base, self.ext)
    }

    /// Parse a config from a YAML or JSON file. Missing fields take defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        // An empty file is a valid "all defaults" config.
        if text.trim().is_empty() {
            return Ok(BuildConfig::default());
        }
        serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Like [`BuildConfig::load`], but falls back to defaults when `path`
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(BuildConfig::default());
        }
        Self::load(path)
    }

    /// Write the config as YAML, refusing to replace an existing file.
    pub fn save_new(&self, path: &Path) -> Result<(), ConfigError> {
        if path.exists() {
            return Err(ConfigError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
