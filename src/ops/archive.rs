//! Archive operation
//!
//! Bundles all glob-matched regular files into one deflate-compressed
//! zip archive at a version-interpolated path. Any existing archive at
//! that path is overwritten.

use crate::config::ArchiveSpec;
use crate::error::{ExecutionError, ExecutionResult};
use crate::ops::fileset;
use crate::runner::{interpolate_list, interpolate_strict, Context};
use std::fs::{self, File};
use std::io;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Run an archive step
pub fn run(spec: &ArchiveSpec, ctx: &Context) -> ExecutionResult<()> {
    // The archive path must resolve fully; a half-interpolated name like
    // `dist/${pkg.name}-.zip` is a config bug, not an output file.
    let archive_rel = interpolate_strict(&spec.archive, &ctx.vars)?;
    let archive_path = ctx.working_dir.join(&archive_rel);

    let patterns = interpolate_list(&spec.src, &ctx.vars);
    let matched = fileset::expand_patterns(&ctx.working_dir, &patterns)?;

    if let Some(parent) = archive_path.parent() {
        fs::create_dir_all(parent).map_err(|e| ExecutionError::Write {
            path: parent.to_path_buf(),
            error: e,
        })?;
    }

    let file = File::create(&archive_path).map_err(|e| ExecutionError::Write {
        path: archive_path.clone(),
        error: e,
    })?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in &matched {
        writer.start_file(fileset::slash_path(&entry.relative), options)?;

        let mut source = File::open(&entry.path).map_err(|e| ExecutionError::Read {
            path: entry.path.clone(),
            error: e,
        })?;
        io::copy(&mut source, &mut writer).map_err(|e| ExecutionError::Write {
            path: archive_path.clone(),
            error: e,
        })?;
    }

    writer.finish()?;

    ctx.print_step(
        "archive",
        &format!("{} files -> {}", matched.len(), archive_path.display()),
    );

    Ok(())
}
