//! Concatenation operation
//!
//! Joins glob-matched files in enumeration order with a separator and
//! rewrites the destination in one shot. No append semantics.

use crate::config::ConcatSpec;
use crate::error::{ExecutionError, ExecutionResult};
use crate::ops::fileset;
use crate::runner::{interpolate, interpolate_list, Context};
use std::fs;

/// Run a concat step
pub fn run(spec: &ConcatSpec, ctx: &Context) -> ExecutionResult<()> {
    let patterns = interpolate_list(&spec.src, &ctx.vars);
    let matched = fileset::expand_patterns(&ctx.working_dir, &patterns)?;

    let mut pieces = Vec::with_capacity(matched.len());
    for file in &matched {
        let contents = fs::read_to_string(&file.path).map_err(|e| ExecutionError::Read {
            path: file.path.clone(),
            error: e,
        })?;
        pieces.push(contents);
    }

    let dest = ctx.working_dir.join(interpolate(&spec.dest, &ctx.vars));
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| ExecutionError::Write {
            path: parent.to_path_buf(),
            error: e,
        })?;
    }

    fs::write(&dest, pieces.join(&spec.separator)).map_err(|e| ExecutionError::Write {
        path: dest.clone(),
        error: e,
    })?;

    ctx.print_step(
        "concat",
        &format!("{} files -> {}", matched.len(), dest.display()),
    );

    Ok(())
}
