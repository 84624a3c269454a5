//! Core configuration types
//!
//! This module defines the data structures that represent a gravel.yml
//! configuration file: the task registry and the parameter blocks of every
//! built-in operation.

use serde::Deserialize;
use std::collections::HashMap;

/// Top-level configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Application name shown in help output (optional)
    #[serde(default)]
    pub name: Option<String>,

    /// Application usage description (optional)
    #[serde(default)]
    pub usage: Option<String>,

    /// Package metadata for `${pkg.name}` / `${pkg.version}` interpolation
    #[serde(default)]
    pub package: Option<PackageConfig>,

    /// Global interpreter for shell steps (e.g. ["bash", "-c"])
    #[serde(default)]
    pub interpreter: Option<Vec<String>>,

    /// Tasks defined in the configuration
    #[serde(default)]
    pub tasks: HashMap<String, Task>,
}

/// Package metadata declaration
///
/// Inline `name`/`version` win over values read from the manifest file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageConfig {
    /// Path to a JSON manifest providing `name` and `version`
    #[serde(default)]
    pub manifest: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub version: Option<String>,
}

/// A task definition: an ordered list of steps
#[derive(Debug, Clone, Deserialize)]
pub struct Task {
    /// Usage description for help text
    #[serde(default)]
    pub usage: Option<String>,

    /// Longer description for help text
    #[serde(default)]
    pub description: Option<String>,

    /// Whether this task is hidden from the CLI
    #[serde(default)]
    pub private: bool,

    /// Steps to execute, in order
    #[serde(default, deserialize_with = "deserialize_steps")]
    pub steps: Vec<Step>,
}

/// A single step: a sub-task reference or a built-in operation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Run another task by name
    Task(String),

    /// Run an external shell command
    Exec(ExecSpec),

    /// Copy glob-matched files, preserving relative paths
    Copy(CopySpec),

    /// Concatenate glob-matched files into one output
    Concat(ConcatSpec),

    /// Minify one script file with an external minifier
    Minify(MinifySpec),

    /// Derive resized image variants
    Images(ImagesSpec),

    /// Bundle glob-matched paths into a zip archive
    Archive(ArchiveSpec),

    /// Watch paths and re-run a task chain on change
    Watch(WatchSpec),

    /// Delete generated directories
    Clean(CleanSpec),

    /// Install external front-end packages
    Vendor(VendorSpec),

    /// Compile secondary-language sources into one script
    Compile(CompileSpec),
}

/// An external command, either a bare string or with options
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ExecSpec {
    /// Plain command line run through the interpreter
    Simple(String),

    /// Command with additional options
    Detailed {
        command: String,

        /// Working directory, relative to the project root
        #[serde(default)]
        dir: Option<String>,

        /// Suppress the `[run]` progress line
        #[serde(default)]
        quiet: bool,
    },
}

impl ExecSpec {
    /// The command line to execute
    pub fn command(&self) -> &str {
        match self {
            ExecSpec::Simple(cmd) => cmd,
            ExecSpec::Detailed { command, .. } => command,
        }
    }

    /// The working subdirectory, if any
    pub fn dir(&self) -> Option<&str> {
        match self {
            ExecSpec::Simple(_) => None,
            ExecSpec::Detailed { dir, .. } => dir.as_deref(),
        }
    }

    /// Whether the progress line is suppressed
    pub fn is_quiet(&self) -> bool {
        match self {
            ExecSpec::Simple(_) => false,
            ExecSpec::Detailed { quiet, .. } => *quiet,
        }
    }
}

/// A (cwd, glob patterns, destination) triple describing a file set
#[derive(Debug, Clone, Deserialize)]
pub struct FileMapping {
    /// Root the patterns are expanded under
    #[serde(default = "default_cwd")]
    pub cwd: String,

    /// Glob patterns relative to `cwd`
    #[serde(deserialize_with = "string_or_seq")]
    pub src: Vec<String>,

    /// Destination root the relative paths are mirrored under
    pub dest: String,
}

/// Parameters of the copy operation
#[derive(Debug, Clone, Deserialize)]
pub struct CopySpec {
    pub files: Vec<FileMapping>,
}

/// Parameters of the concat operation
#[derive(Debug, Clone, Deserialize)]
pub struct ConcatSpec {
    /// Ordered glob patterns relative to the project root
    #[serde(deserialize_with = "string_or_seq")]
    pub src: Vec<String>,

    /// Output file, fully rewritten each run
    pub dest: String,

    /// Separator placed between joined files
    #[serde(default = "default_separator")]
    pub separator: String,
}

/// Parameters of the minify operation
#[derive(Debug, Clone, Deserialize)]
pub struct MinifySpec {
    pub input: String,

    pub output: String,

    /// Rename identifiers in the output
    #[serde(default = "default_true")]
    pub mangle: bool,

    /// Minifier program to invoke
    #[serde(default = "default_minifier")]
    pub command: String,
}

/// Parameters of the image derivation operation
#[derive(Debug, Clone, Deserialize)]
pub struct ImagesSpec {
    pub files: Vec<FileMapping>,

    /// One output variant is produced per source image and size
    pub sizes: Vec<SizeSpec>,

    /// JPEG quality, 1-100
    #[serde(default = "default_quality")]
    pub quality: u8,
}

/// A single image size: proportional or fixed width plus naming
#[derive(Debug, Clone, Deserialize)]
pub struct SizeSpec {
    /// Either a pixel count ("480") or a percentage ("66%")
    pub width: String,

    /// Logical name inserted into the variant filename
    pub name: String,

    /// Optional extra filename suffix (e.g. ".x2")
    #[serde(default)]
    pub suffix: String,
}

/// A parsed size width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    /// Percentage of the source image width
    Percent(u32),

    /// Fixed pixel width
    Pixels(u32),
}

impl SizeSpec {
    /// Parse the declared width; `None` if it is neither a positive pixel
    /// count nor a positive percentage.
    pub fn parsed_width(&self) -> Option<Width> {
        let raw = self.width.trim();
        let (digits, percent) = match raw.strip_suffix('%') {
            Some(digits) => (digits, true),
            None => (raw, false),
        };

        match digits.parse::<u32>() {
            Ok(n) if n > 0 => Some(if percent {
                Width::Percent(n)
            } else {
                Width::Pixels(n)
            }),
            _ => None,
        }
    }
}

/// Parameters of the archive operation
#[derive(Debug, Clone, Deserialize)]
pub struct ArchiveSpec {
    /// Archive path; interpolated, must resolve fully
    pub archive: String,

    /// Glob patterns and fixed paths to include
    #[serde(deserialize_with = "string_or_seq")]
    pub src: Vec<String>,
}

/// Parameters of the watch operation
#[derive(Debug, Clone, Deserialize)]
pub struct WatchSpec {
    /// Paths and glob patterns to monitor
    #[serde(deserialize_with = "string_or_seq")]
    pub paths: Vec<String>,

    /// Task chain re-run on every relevant change
    pub task: String,

    /// Run the chain once before entering the watch loop
    #[serde(default)]
    pub at_begin: bool,

    /// Event debounce window in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

/// Parameters of the clean operation
#[derive(Debug, Clone, Deserialize)]
pub struct CleanSpec {
    /// Directories deleted recursively; absent directories are fine
    #[serde(deserialize_with = "string_or_seq")]
    pub dirs: Vec<String>,
}

/// Parameters of the vendor (dependency sync) operation
#[derive(Debug, Clone, Deserialize)]
pub struct VendorSpec {
    /// Package-manager install command run through the interpreter
    #[serde(default = "default_vendor_command")]
    pub command: String,

    /// Directory the packages are installed into
    #[serde(default)]
    pub target_dir: Option<String>,

    /// Delete the target directory before installing
    #[serde(default)]
    pub clean_target_dir: bool,
}

/// Parameters of the compile operation
#[derive(Debug, Clone, Deserialize)]
pub struct CompileSpec {
    /// Source glob patterns passed to the compiler
    #[serde(deserialize_with = "string_or_seq")]
    pub src: Vec<String>,

    /// Generated script file
    pub output: String,

    /// Compiler command; whitespace-split, so "elm make" works
    #[serde(default = "default_compiler")]
    pub command: String,
}

fn default_cwd() -> String {
    ".".to_string()
}

fn default_separator() -> String {
    "\n".to_string()
}

fn default_true() -> bool {
    true
}

fn default_minifier() -> String {
    "uglifyjs".to_string()
}

fn default_quality() -> u8 {
    75
}

fn default_debounce_ms() -> u64 {
    250
}

fn default_vendor_command() -> String {
    "bower install".to_string()
}

fn default_compiler() -> String {
    "elm-make".to_string()
}

/// Deserialize a step list, accepting a single string, a single mapping,
/// or a sequence of either. Bare strings are sub-task references.
fn deserialize_steps<'de, D>(deserializer: D) -> Result<Vec<Step>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    use serde_yaml::Value;

    fn step_from_value<E: Error>(value: Value) -> Result<Step, E> {
        match value {
            Value::String(name) => Ok(Step::Task(name)),
            other => Step::deserialize(other).map_err(E::custom),
        }
    }

    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Sequence(seq) => seq.into_iter().map(step_from_value).collect(),
        Value::Null => Ok(Vec::new()),
        other => Ok(vec![step_from_value(other)?]),
    }
}

/// Deserialize either a single string or a sequence of strings
fn string_or_seq<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    use serde_yaml::Value;

    let value = Value::deserialize(deserializer)?;
    match value {
        Value::String(s) => Ok(vec![s]),
        Value::Sequence(seq) => seq
            .into_iter()
            .map(|item| String::deserialize(item).map_err(D::Error::custom))
            .collect(),
        Value::Null => Ok(Vec::new()),
        _ => Err(D::Error::custom("expected a string or a list of strings")),
    }
}
