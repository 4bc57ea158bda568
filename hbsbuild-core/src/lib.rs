//! hbsbuild core library — build configuration and its errors.
//!
//! - [`config`] — [`BuildConfig`], config file load / save
//! - [`error`] — [`ConfigError`]

pub mod config;
pub mod error;

pub use config::{BuildConfig, CONFIG_FILE_NAME};
pub use error::ConfigError;
