//! Minification operation
//!
//! Delegates to an external minifier, treated as a black box producing a
//! functionally equivalent, smaller script. Identifier renaming follows
//! the `mangle` flag.

use crate::config::MinifySpec;
use crate::error::{ExecutionError, ExecutionResult};
use crate::ops::{exec, program_and_args};
use crate::runner::{interpolate, Context};
use std::fs;

/// Run a minify step
pub fn run(spec: &MinifySpec, ctx: &Context) -> ExecutionResult<()> {
    let input = interpolate(&spec.input, &ctx.vars);
    let output = interpolate(&spec.output, &ctx.vars);

    let out_path = ctx.working_dir.join(&output);
    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent).map_err(|e| ExecutionError::Write {
            path: parent.to_path_buf(),
            error: e,
        })?;
    }

    let (program, mut args) = program_and_args(&spec.command);
    args.extend(minifier_args(&input, &output, spec.mangle));

    ctx.print_step("minify", &format!("{} -> {}", input, output));

    exec::run_program(&program, &args, ctx)
}

/// Argument list handed to the minifier after any configured leading args
fn minifier_args(input: &str, output: &str, mangle: bool) -> Vec<String> {
    let mut args = vec![input.to_string(), "-o".to_string(), output.to_string()];
    if mangle {
        args.push("-m".to_string());
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_minifier_args_with_mangling() {
        let args = minifier_args("app/site.js", "app/site.min.js", true);
        assert_eq!(args, vec!["app/site.js", "-o", "app/site.min.js", "-m"]);
    }

    #[test]
    fn test_minifier_args_without_mangling() {
        let args = minifier_args("a.js", "b.js", false);
        assert_eq!(args, vec!["a.js", "-o", "b.js"]);
    }

    #[test]
    fn test_missing_minifier_fails_step() {
        let temp = TempDir::new().unwrap();
        let ctx = Context::new().with_working_dir(temp.path().to_path_buf());
        let spec = MinifySpec {
            input: "app/site.js".to_string(),
            output: "app/site.min.js".to_string(),
            mangle: true,
            command: "gravel-no-such-minifier".to_string(),
        };

        let result = run(&spec, &ctx);
        assert!(matches!(result, Err(ExecutionError::CommandSpawn { .. })));
    }

    #[test]
    fn test_minify_with_stand_in_command() {
        // `true` ignores its arguments and exits 0, which is enough to
        // exercise the success path without a real minifier installed.
        let temp = TempDir::new().unwrap();
        let ctx = Context::new().with_working_dir(temp.path().to_path_buf());
        let spec = MinifySpec {
            input: "in.js".to_string(),
            output: "out/app.min.js".to_string(),
            mangle: false,
            command: "true".to_string(),
        };

        run(&spec, &ctx).unwrap();
        // output parent is prepared for the minifier
        assert!(temp.path().join("out").is_dir());
    }
}
