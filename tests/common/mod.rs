//! Common test utilities

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a temporary project with a gravel.yml file
pub fn create_test_project(config: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("gravel.yml");
    fs::write(&config_path, config).unwrap();
    (temp_dir, config_path)
}

/// Write a file, creating parent directories
pub fn write_file(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}
