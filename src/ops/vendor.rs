//! Dependency sync operation
//!
//! Installs external front-end packages into a target directory by
//! invoking the configured package-manager command.

use crate::config::VendorSpec;
use crate::error::{ExecutionError, ExecutionResult};
use crate::ops::exec;
use crate::runner::{interpolate, Context};
use std::fs;
use std::io;

/// Run a vendor step
pub fn run(spec: &VendorSpec, ctx: &Context) -> ExecutionResult<()> {
    if let Some(target_dir) = &spec.target_dir {
        let target = ctx.working_dir.join(interpolate(target_dir, &ctx.vars));

        if spec.clean_target_dir {
            match fs::remove_dir_all(&target) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(ExecutionError::Write {
                        path: target.clone(),
                        error: e,
                    });
                }
            }
        }

        fs::create_dir_all(&target).map_err(|e| ExecutionError::Write {
            path: target.clone(),
            error: e,
        })?;
    }

    ctx.print_step("vendor", &spec.command);

    exec::run_shell(&spec.command, None, true, ctx)
}
