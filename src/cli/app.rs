//! Main CLI application
//!
//! The subcommand set is built dynamically from the configuration: one
//! subcommand per non-private task, plus a static `completions` command.

use crate::config::{parse_config_auto, parse_config_file, validate_config, Config, PackageMeta};
use crate::error::{ConfigError, GravelError};
use crate::runner::{Context, Registry, Verbosity};
use clap::{Arg, ArgAction, ArgMatches, Command};
use clap_complete::Shell;
use std::env;
use std::io;
use std::path::PathBuf;

/// CLI application
pub struct App {
    /// The clap command
    command: Command,
    /// Parsed configuration
    config: Config,
    /// Config file path
    config_path: PathBuf,
}

impl App {
    /// Create a new app from an auto-discovered configuration file
    pub fn new() -> Result<Self, GravelError> {
        let (config, config_path) = parse_config_auto()?;
        validate_config(&config)?;

        let command = build_command(&config);

        Ok(App {
            command,
            config,
            config_path,
        })
    }

    /// Create app with a specific config file
    pub fn with_config_file(path: PathBuf) -> Result<Self, GravelError> {
        let config = parse_config_file(&path)?;
        validate_config(&config)?;

        let command = build_command(&config);

        Ok(App {
            command,
            config,
            config_path: path,
        })
    }

    /// Run the application with command line arguments
    pub fn run(mut self) -> Result<(), GravelError> {
        let matches = self.command.clone().get_matches();

        let verbosity = get_verbosity(&matches);

        let (task_name, sub_matches) = match matches.subcommand() {
            Some((name, sub_matches)) => (name.to_string(), sub_matches),
            None => {
                // No task specified, show help
                self.command.print_help()?;
                println!();
                return Ok(());
            }
        };

        if task_name == "completions" {
            if let Some(shell) = sub_matches.get_one::<Shell>("shell").copied() {
                let mut command = self.command;
                let bin_name = command.get_name().to_string();
                clap_complete::generate(shell, &mut command, bin_name, &mut io::stdout());
            }
            return Ok(());
        }

        if !self.config.tasks.contains_key(&task_name) {
            return Err(ConfigError::TaskNotFound(task_name).into());
        }

        // All relative paths resolve against the config file's directory
        let project_dir = project_dir(&self.config_path)?;
        let meta = PackageMeta::resolve(self.config.package.as_ref(), &project_dir)?;

        let mut ctx = Context::new()
            .with_working_dir(project_dir)
            .with_config_path(self.config_path.clone())
            .with_package(&meta)
            .with_verbosity(verbosity);

        if let Some(interpreter) = &self.config.interpreter {
            ctx = ctx.with_interpreter(interpreter.clone());
        }

        let registry = Registry::from_config(&self.config);
        registry.run(&task_name, &mut ctx)?;

        Ok(())
    }
}

/// Directory of the config file, falling back to the current directory
fn project_dir(config_path: &PathBuf) -> Result<PathBuf, GravelError> {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(parent.to_path_buf()),
        _ => Ok(env::current_dir()?),
    }
}

/// Build the clap command from configuration
fn build_command(config: &Config) -> Command {
    let mut cmd = Command::new(config.name.clone().unwrap_or_else(|| "gravel".to_string()))
        .version(env!("CARGO_PKG_VERSION"))
        .about(
            config
                .usage
                .clone()
                .unwrap_or_else(|| "A YAML-driven asset pipeline and task runner".to_string()),
        )
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("FILE")
                .help("Path to gravel.yml config file")
                .global(true),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only print command output and errors")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("silent")
                .short('s')
                .long("silent")
                .help("Print no output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print verbose output")
                .action(ArgAction::SetTrue)
                .global(true),
        );

    // Stable ordering for help output
    let mut task_names: Vec<&String> = config.tasks.keys().collect();
    task_names.sort();

    for task_name in task_names {
        let task = &config.tasks[task_name];
        if task.private {
            continue;
        }

        let mut task_cmd =
            Command::new(task_name.clone()).about(task.usage.clone().unwrap_or_default());

        if let Some(desc) = &task.description {
            task_cmd = task_cmd.long_about(desc.clone());
        }

        cmd = cmd.subcommand(task_cmd);
    }

    cmd.subcommand(
        Command::new("completions")
            .about("Generate shell completions")
            .arg(
                Arg::new("shell")
                    .value_name("SHELL")
                    .required(true)
                    .value_parser(clap::value_parser!(Shell)),
            ),
    )
}

/// Get verbosity level from matches
fn get_verbosity(matches: &ArgMatches) -> Verbosity {
    if matches.get_flag("silent") {
        Verbosity::Silent
    } else if matches.get_flag("quiet") {
        Verbosity::Quiet
    } else if matches.get_flag("verbose") {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    }
}

/// Run the CLI application with provided arguments
pub fn run() -> Result<(), GravelError> {
    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    // Check if --file flag is provided first
    let args: Vec<String> = env::args().collect();
    let file_path = extract_file_arg(&args);

    let app = if let Some(path) = file_path {
        App::with_config_file(path)?
    } else {
        App::new()?
    };

    app.run()
}

/// Extract --file argument before clap parsing
fn extract_file_arg(args: &[String]) -> Option<PathBuf> {
    for i in 0..args.len() {
        if (args[i] == "--file" || args[i] == "-f") && i + 1 < args.len() {
            return Some(PathBuf::from(&args[i + 1]));
        }
    }
    None
}
