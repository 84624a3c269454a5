//! Glob expansion for file-set mappings
//!
//! Patterns expand relative to a base directory; only regular files are
//! returned, each paired with its base-relative path so destinations can
//! mirror the source layout. The glob crate enumerates matches in
//! lexicographic order per directory, which keeps concatenation and
//! archive contents reproducible between runs.

use crate::error::ExecutionResult;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// A matched regular file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedFile {
    /// Full path on disk
    pub path: PathBuf,

    /// Path relative to the expansion base
    pub relative: PathBuf,
}

/// Expand patterns under `base`, preserving pattern order and dropping
/// duplicates matched by more than one pattern.
pub fn expand_patterns(base: &Path, patterns: &[String]) -> ExecutionResult<Vec<MatchedFile>> {
    let mut matched = Vec::new();
    let mut seen = HashSet::new();

    for pattern in patterns {
        let full_pattern = base.join(pattern);
        for entry in glob::glob(&full_pattern.to_string_lossy())? {
            let path = entry?;
            if !path.is_file() {
                continue;
            }

            let relative = path
                .strip_prefix(base)
                .map(Path::to_path_buf)
                .unwrap_or_else(|_| path.clone());

            if seen.insert(path.clone()) {
                matched.push(MatchedFile { path, relative });
            }
        }
    }

    Ok(matched)
}

/// Render a relative path with forward slashes (archive entry names)
pub fn slash_path(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
