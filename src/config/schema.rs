//! Configuration validation
//!
//! Structural checks performed once after parsing: every referenced task
//! exists, no task chain references itself cyclically, and operation
//! parameters that cannot be checked by serde are well formed.

use crate::config::types::{Config, Step, Task};
use crate::error::{ConfigError, ConfigResult};
use std::collections::HashSet;

/// Validate a complete configuration
pub fn validate_config(config: &Config) -> ConfigResult<()> {
    for (name, task) in &config.tasks {
        validate_task(config, name, task)?;
    }

    detect_circular_references(config)?;

    Ok(())
}

/// Validate a single task
fn validate_task(config: &Config, task_name: &str, task: &Task) -> ConfigResult<()> {
    for step in &task.steps {
        match step {
            Step::Task(name) => {
                if !config.tasks.contains_key(name) {
                    return Err(ConfigError::TaskNotFound(name.clone()));
                }
            }
            Step::Watch(spec) => {
                // The watch target is re-run at runtime; it only needs
                // to exist, recursion is guarded by the task stack.
                if !config.tasks.contains_key(&spec.task) {
                    return Err(ConfigError::TaskNotFound(spec.task.clone()));
                }
            }
            Step::Concat(spec) => {
                if spec.src.is_empty() {
                    return Err(ConfigError::Invalid(format!(
                        "Task '{}': concat needs at least one source pattern",
                        task_name
                    )));
                }
            }
            Step::Images(spec) => {
                if spec.sizes.is_empty() {
                    return Err(ConfigError::Invalid(format!(
                        "Task '{}': images needs at least one size",
                        task_name
                    )));
                }
                for size in &spec.sizes {
                    if size.parsed_width().is_none() {
                        return Err(ConfigError::Invalid(format!(
                            "Task '{}': invalid image width '{}'",
                            task_name, size.width
                        )));
                    }
                }
                if spec.quality == 0 || spec.quality > 100 {
                    return Err(ConfigError::Invalid(format!(
                        "Task '{}': image quality must be between 1 and 100",
                        task_name
                    )));
                }
            }
            _ => {}
        }
    }

    Ok(())
}

/// Detect cycles among direct task references
///
/// Watch targets are deliberately not edges here: a watch chain pointing
/// back at its own task is caught at runtime, not rejected statically.
fn detect_circular_references(config: &Config) -> ConfigResult<()> {
    for task_name in config.tasks.keys() {
        let mut visited = HashSet::new();
        let mut stack = Vec::new();
        check_task_cycle(config, task_name, &mut visited, &mut stack)?;
    }
    Ok(())
}

fn check_task_cycle(
    config: &Config,
    task_name: &str,
    visited: &mut HashSet<String>,
    stack: &mut Vec<String>,
) -> ConfigResult<()> {
    if stack.iter().any(|t| t == task_name) {
        stack.push(task_name.to_string());
        return Err(ConfigError::CircularReference(stack.join(" -> ")));
    }

    if !visited.insert(task_name.to_string()) {
        return Ok(());
    }

    let task = config
        .tasks
        .get(task_name)
        .ok_or_else(|| ConfigError::TaskNotFound(task_name.to_string()))?;

    stack.push(task_name.to_string());

    for step in &task.steps {
        if let Step::Task(sub) = step {
            check_task_cycle(config, sub, visited, stack)?;
        }
    }

    stack.pop();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;

    #[test]
    fn test_validate_valid_config() {
        let yaml = r#"
tasks:
  loop:
    steps:
      - exec: echo "loop"
  build:
    steps:
      - loop
"#;
        let config = parse_config(yaml).unwrap();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_unknown_task_reference() {
        let yaml = r#"
tasks:
  build:
    steps:
      - missing
"#;
        let config = parse_config(yaml).unwrap();
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::TaskNotFound(name)) if name == "missing"));
    }

    #[test]
    fn test_unknown_watch_target() {
        let yaml = r#"
tasks:
  dev:
    steps:
      - watch:
          paths: ["src/**"]
          task: missing
"#;
        let config = parse_config(yaml).unwrap();
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::TaskNotFound(name)) if name == "missing"));
    }

    #[test]
    fn test_circular_reference_detected() {
        let yaml = r#"
tasks:
  a:
    steps:
      - b
  b:
    steps:
      - a
"#;
        let config = parse_config(yaml).unwrap();
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::CircularReference(_))));
    }

    #[test]
    fn test_self_reference_detected() {
        let yaml = r#"
tasks:
  a:
    steps:
      - a
"#;
        let config = parse_config(yaml).unwrap();
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::CircularReference(_))));
    }

    #[test]
    fn test_watch_target_may_point_upward() {
        // watch:min re-running its own caller is a runtime concern
        let yaml = r#"
tasks:
  minified:
    steps:
      - watch:
          paths: ["src/**"]
          task: minified
"#;
        let config = parse_config(yaml).unwrap();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_concat_without_sources() {
        let yaml = r#"
tasks:
  js:
    steps:
      - concat:
          src: []
          dest: app/site.js
"#;
        let config = parse_config(yaml).unwrap();
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_images_invalid_width() {
        let yaml = r#"
tasks:
  imgs:
    steps:
      - images:
          files:
            - src: "*.png"
              dest: out
          sizes:
            - { width: "wide", name: large }
"#;
        let config = parse_config(yaml).unwrap();
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_images_quality_range() {
        let yaml = r#"
tasks:
  imgs:
    steps:
      - images:
          files:
            - src: "*.png"
              dest: out
          quality: 0
          sizes:
            - { width: "50%", name: small }
"#;
        let config = parse_config(yaml).unwrap();
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::Invalid(_))
        ));
    }
}
