//! # hbsbuild-pipeline
//!
//! Directory discovery, context assembly and page compilation.
//!
//! Call [`build`] with a [`BuildConfig`](hbsbuild_core::BuildConfig) and a
//! [`TemplateEngine`](hbsbuild_renderer::TemplateEngine) to run all four
//! stages, or [`build_with_fresh_engine`] to let the pipeline create the
//! engine.

pub mod error;
pub mod loaders;
pub mod pipeline;
pub mod walker;
pub mod writer;

pub use error::BuildError;
pub use pipeline::{
    build, build_with_fresh_engine, build_with_store, discover, BuildReport, Discovery,
};
pub use writer::{PageFailure, WriteResult};
