//! Built-in operations
//!
//! One module per operation. Each exposes a `run` function taking its
//! parameter block and the execution context; the watch operation also
//! takes the registry so it can re-run task chains.

pub mod archive;
pub mod clean;
pub mod compile;
pub mod concat;
pub mod copy;
pub mod exec;
pub mod fileset;
pub mod images;
pub mod minify;
pub mod vendor;
pub mod watch;

use crate::config::Step;
use crate::error::ExecutionResult;
use crate::runner::{Context, Registry};

/// Dispatch a single configured step
pub fn execute(step: &Step, registry: &Registry, ctx: &mut Context) -> ExecutionResult<()> {
    match step {
        Step::Task(name) => registry.run(name, ctx),
        Step::Exec(spec) => exec::run(spec, ctx),
        Step::Copy(spec) => copy::run(spec, ctx),
        Step::Concat(spec) => concat::run(spec, ctx),
        Step::Minify(spec) => minify::run(spec, ctx),
        Step::Images(spec) => images::run(spec, ctx),
        Step::Archive(spec) => archive::run(spec, ctx),
        Step::Watch(spec) => watch::run(spec, registry, ctx),
        Step::Clean(spec) => clean::run(spec, ctx),
        Step::Vendor(spec) => vendor::run(spec, ctx),
        Step::Compile(spec) => compile::run(spec, ctx),
    }
}

/// Split a configured command string into program and leading arguments
pub(crate) fn program_and_args(command: &str) -> (String, Vec<String>) {
    let mut parts = command.split_whitespace().map(str::to_string);
    let program = parts.next().unwrap_or_default();
    (program, parts.collect())
}
