//! Cleanup operation
//!
//! Deletes the configured directories recursively. Idempotent: an
//! already-absent directory is not an error.

use crate::config::CleanSpec;
use crate::error::{ExecutionError, ExecutionResult};
use crate::runner::{interpolate, Context};
use std::fs;
use std::io;

/// Run a clean step
pub fn run(spec: &CleanSpec, ctx: &Context) -> ExecutionResult<()> {
    for dir in &spec.dirs {
        let path = ctx.working_dir.join(interpolate(dir, &ctx.vars));

        match fs::remove_dir_all(&path) {
            Ok(()) => ctx.print_step("clean", &format!("removed {}", path.display())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                ctx.print_debug(&format!("already absent: {}", path.display()));
            }
            Err(e) => {
                return Err(ExecutionError::Write { path, error: e });
            }
        }
    }

    Ok(())
}
