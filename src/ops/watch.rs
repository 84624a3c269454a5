//! Watch operation
//!
//! Monitors the configured paths with a debounced filesystem watcher and
//! re-runs the designated task chain on every batch of relevant changes.
//! The chain runs synchronously on the watch loop; events arriving while
//! it runs queue in the channel and coalesce into a single follow-up
//! run. A failing triggered run is reported and watching continues.

use crate::config::WatchSpec;
use crate::error::ExecutionResult;
use crate::runner::{interpolate_list, Context, Registry};
use globset::{Glob, GlobSet, GlobSetBuilder};
use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebouncedEventKind};
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::Duration;

/// Run a watch step; blocks until the watcher shuts down
pub fn run(spec: &WatchSpec, registry: &Registry, ctx: &mut Context) -> ExecutionResult<()> {
    let patterns = interpolate_list(&spec.paths, &ctx.vars);
    let matcher = build_matcher(&patterns)?;
    let roots = watch_roots(&patterns);

    let (tx, rx) = channel();
    let mut debouncer = new_debouncer(Duration::from_millis(spec.debounce_ms), tx)?;

    let mut watching = 0usize;
    for root in &roots {
        let path = ctx.working_dir.join(root);
        if !path.exists() {
            ctx.print_debug(&format!("watch root absent: {}", path.display()));
            continue;
        }
        let mode = if path.is_dir() {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        debouncer.watcher().watch(&path, mode)?;
        watching += 1;
    }

    if spec.at_begin {
        run_triggered(spec, registry, ctx);
    }

    ctx.print_step(
        "watch",
        &format!("{} roots, re-running '{}' on change", watching, spec.task),
    );

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let changed: Vec<&PathBuf> = events
                    .iter()
                    .filter(|e| matches!(e.kind, DebouncedEventKind::Any))
                    .map(|e| &e.path)
                    .filter(|p| is_relevant(p, &matcher, &ctx.working_dir))
                    .collect();

                if changed.is_empty() {
                    continue;
                }

                for path in &changed {
                    if let Some(name) = path.file_name() {
                        ctx.print_info(&format!("changed: {}", name.to_string_lossy()));
                    }
                }

                run_triggered(spec, registry, ctx);
            }
            Ok(Err(error)) => {
                // Watcher hiccup; keep going
                ctx.print_error(&format!("watch error: {:?}", error));
            }
            Err(_) => return Ok(()),
        }
    }
}

/// Run the designated chain, reporting failure without leaving the loop
fn run_triggered(spec: &WatchSpec, registry: &Registry, ctx: &mut Context) {
    if let Err(e) = registry.run(&spec.task, ctx) {
        ctx.print_error(&format!("task '{}' failed: {}", spec.task, e));
    }
}

/// Build the relevance matcher from the watch patterns
fn build_matcher(patterns: &[String]) -> Result<GlobSet, globset::Error> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    builder.build()
}

/// Literal prefixes of the patterns, deduplicated: these are the paths
/// handed to the watcher, while the globset filters individual events.
fn watch_roots(patterns: &[String]) -> Vec<PathBuf> {
    let mut roots: Vec<PathBuf> = Vec::new();

    for pattern in patterns {
        let literal: String = pattern
            .chars()
            .take_while(|c| !matches!(c, '*' | '?' | '[' | '{'))
            .collect();

        let mut root = if literal.len() == pattern.len() {
            PathBuf::from(literal)
        } else {
            match literal.rfind('/') {
                Some(idx) => PathBuf::from(&literal[..idx]),
                None => PathBuf::from("."),
            }
        };

        if root.as_os_str().is_empty() {
            root = PathBuf::from(".");
        }
        if !roots.contains(&root) {
            roots.push(root);
        }
    }

    roots
}

/// Does an event path fall under one of the watch patterns?
fn is_relevant(path: &Path, matcher: &GlobSet, working_dir: &Path) -> bool {
    let relative = path.strip_prefix(working_dir).unwrap_or(path);
    matcher.is_match(relative)
}
