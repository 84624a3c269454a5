//! External command execution
//!
//! Shell steps run through the context interpreter with inherited stdio;
//! a non-zero exit status fails the containing task chain.

use crate::config::ExecSpec;
use crate::error::{ExecutionError, ExecutionResult};
use crate::runner::{interpolate, Context};
use std::process::{Command as StdCommand, Stdio};

/// Run an exec step
pub fn run(spec: &ExecSpec, ctx: &Context) -> ExecutionResult<()> {
    run_shell(spec.command(), spec.dir(), spec.is_quiet(), ctx)
}

/// Run a command line through the context interpreter
pub(crate) fn run_shell(
    command: &str,
    dir: Option<&str>,
    quiet: bool,
    ctx: &Context,
) -> ExecutionResult<()> {
    let command = interpolate(command, &ctx.vars);

    if !quiet {
        ctx.print_step("run", &command);
    }

    let working_dir = match dir {
        Some(dir) => ctx.working_dir.join(interpolate(dir, &ctx.vars)),
        None => ctx.working_dir.clone(),
    };

    let mut cmd = StdCommand::new(&ctx.interpreter[0]);
    if ctx.interpreter.len() > 1 {
        cmd.args(&ctx.interpreter[1..]);
    }
    cmd.arg(&command);
    cmd.current_dir(&working_dir);
    cmd.stdin(Stdio::inherit());
    cmd.stdout(Stdio::inherit());
    cmd.stderr(Stdio::inherit());

    let status = cmd.status().map_err(|e| ExecutionError::CommandSpawn {
        command: command.clone(),
        error: e,
    })?;

    if !status.success() {
        return Err(ExecutionError::CommandFailed(status.code()));
    }

    Ok(())
}

/// Spawn a program directly with an explicit argument list
pub(crate) fn run_program(
    program: &str,
    args: &[String],
    ctx: &Context,
) -> ExecutionResult<()> {
    let status = StdCommand::new(program)
        .args(args)
        .current_dir(&ctx.working_dir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| ExecutionError::CommandSpawn {
            command: program.to_string(),
            error: e,
        })?;

    if !status.success() {
        return Err(ExecutionError::CommandFailed(status.code()));
    }

    Ok(())
}
