//! Task execution engine
//!
//! This module holds the execution context, the task registry and the
//! `${var}` interpolation used by operation parameters.

pub mod context;
pub mod interpolate;
pub mod registry;

// Re-export main types
pub use context::*;
pub use interpolate::*;
pub use registry::*;
