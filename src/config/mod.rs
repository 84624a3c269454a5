//! Configuration parsing and validation
//!
//! This module handles parsing of gravel.yml configuration files,
//! package metadata resolution and validation of configuration structure.

pub mod manifest;
pub mod parse;
pub mod schema;
pub mod types;

// Re-export main types
pub use manifest::*;
pub use parse::*;
pub use schema::*;
pub use types::*;
