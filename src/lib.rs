//! Gravel - a YAML-driven asset pipeline and build task runner
//!
//! Gravel reads a `gravel.yml` configuration describing named build tasks
//! (copy, concat, minify, image derivation, archiving, watching, external
//! commands) and runs them as strictly sequential chains.

// Public modules
pub mod cli;
pub mod config;
pub mod error;
pub mod ops;
pub mod runner;

// Re-export commonly used types
pub use error::{GravelError, Result};

/// Current version of Gravel
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
