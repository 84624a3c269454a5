//! File copy operation
//!
//! Expands each mapping's patterns under its source root and copies the
//! matched files byte-for-byte to the destination root, mirroring
//! relative paths and creating intermediate directories.

use crate::config::CopySpec;
use crate::error::{ExecutionError, ExecutionResult};
use crate::ops::fileset;
use crate::runner::{interpolate, interpolate_list, Context};
use std::fs;

/// Run a copy step
pub fn run(spec: &CopySpec, ctx: &Context) -> ExecutionResult<()> {
    for mapping in &spec.files {
        let base = ctx.working_dir.join(interpolate(&mapping.cwd, &ctx.vars));
        let dest_root = ctx.working_dir.join(interpolate(&mapping.dest, &ctx.vars));
        let patterns = interpolate_list(&mapping.src, &ctx.vars);

        let matched = fileset::expand_patterns(&base, &patterns)?;

        for file in &matched {
            let target = dest_root.join(&file.relative);

            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| ExecutionError::Write {
                    path: parent.to_path_buf(),
                    error: e,
                })?;
            }

            fs::copy(&file.path, &target).map_err(|e| ExecutionError::Copy {
                from: file.path.clone(),
                to: target.clone(),
                error: e,
            })?;
        }

        ctx.print_step(
            "copy",
            &format!("{} files -> {}", matched.len(), dest_root.display()),
        );
    }

    Ok(())
}
