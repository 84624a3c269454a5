//! Cross-language compilation operation
//!
//! Hands the glob-matched source files of a secondary language to an
//! external compiler producing one generated script file.

use crate::config::CompileSpec;
use crate::error::{ExecutionError, ExecutionResult};
use crate::ops::{exec, fileset, program_and_args};
use crate::runner::{interpolate, interpolate_list, Context};
use std::fs;

/// Run a compile step
pub fn run(spec: &CompileSpec, ctx: &Context) -> ExecutionResult<()> {
    let patterns = interpolate_list(&spec.src, &ctx.vars);
    let matched = fileset::expand_patterns(&ctx.working_dir, &patterns)?;

    let output = interpolate(&spec.output, &ctx.vars);
    let out_path = ctx.working_dir.join(&output);
    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent).map_err(|e| ExecutionError::Write {
            path: parent.to_path_buf(),
            error: e,
        })?;
    }

    let (program, mut args) = program_and_args(&spec.command);
    args.extend(compiler_args(&matched, &output));

    ctx.print_step(
        "compile",
        &format!("{} sources -> {}", matched.len(), output),
    );

    exec::run_program(&program, &args, ctx)
}

/// Source files in enumeration order followed by the output flag
fn compiler_args(matched: &[fileset::MatchedFile], output: &str) -> Vec<String> {
    let mut args: Vec<String> = matched
        .iter()
        .map(|m| m.relative.to_string_lossy().into_owned())
        .collect();
    args.push("--output".to_string());
    args.push(output.to_string());
    args
}
