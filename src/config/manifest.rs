//! Package metadata resolution
//!
//! The `package:` section can name things inline or point at a JSON
//! manifest (a package.json-style file). The metadata is read once at
//! startup and feeds `${pkg.name}` / `${pkg.version}` interpolation.

use crate::config::types::PackageConfig;
use crate::error::{ConfigError, ConfigResult};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Resolved package metadata
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageMeta {
    pub name: Option<String>,
    pub version: Option<String>,
}

/// The subset of a JSON manifest we care about
#[derive(Debug, Deserialize)]
struct ManifestFile {
    #[serde(default)]
    name: Option<String>,

    #[serde(default)]
    version: Option<String>,
}

impl PackageMeta {
    /// Resolve metadata from the config section, reading the manifest
    /// file (relative to `base_dir`) when one is given. Inline fields
    /// override manifest values.
    pub fn resolve(config: Option<&PackageConfig>, base_dir: &Path) -> ConfigResult<Self> {
        let Some(config) = config else {
            return Ok(PackageMeta::default());
        };

        let mut meta = PackageMeta::default();

        if let Some(manifest) = &config.manifest {
            let path = base_dir.join(manifest);
            let contents = fs::read_to_string(&path).map_err(|e| ConfigError::Manifest {
                path: path.clone(),
                error: e.to_string(),
            })?;
            let parsed: ManifestFile =
                serde_json::from_str(&contents).map_err(|e| ConfigError::Manifest {
                    path: path.clone(),
                    error: e.to_string(),
                })?;
            meta.name = parsed.name;
            meta.version = parsed.version;
        }

        if config.name.is_some() {
            meta.name = config.name.clone();
        }
        if config.version.is_some() {
            meta.version = config.version.clone();
        }

        Ok(meta)
    }

    /// Interpolation variables contributed by this metadata
    pub fn vars(&self) -> Vec<(String, String)> {
        let mut vars = Vec::new();
        if let Some(name) = &self.name {
            vars.push(("pkg.name".to_string(), name.clone()));
        }
        if let Some(version) = &self.version {
            vars.push(("pkg.version".to_string(), version.clone()));
        }
        vars
    }
}
