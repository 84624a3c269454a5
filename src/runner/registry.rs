//! The task registry
//!
//! Holds the named task lists from the configuration and executes them:
//! each step runs to completion before the next, task references expand
//! recursively, and the first failing step aborts the whole chain.

use crate::config::{Config, Step, Task};
use crate::error::{ExecutionError, ExecutionResult};
use crate::ops;
use crate::runner::Context;
use std::collections::HashMap;

/// Immutable registry of named tasks
pub struct Registry {
    tasks: HashMap<String, Task>,
}

impl Registry {
    /// Build the registry from a parsed configuration
    pub fn from_config(config: &Config) -> Self {
        Registry {
            tasks: config.tasks.clone(),
        }
    }

    /// Look up a task definition
    pub fn get(&self, name: &str) -> Option<&Task> {
        self.tasks.get(name)
    }

    /// All task names, sorted for stable listings
    pub fn task_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tasks.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Run a named task chain to completion
    ///
    /// Steps execute strictly sequentially; any failure aborts the
    /// remaining steps of every containing chain.
    pub fn run(&self, name: &str, ctx: &mut Context) -> ExecutionResult<()> {
        let task = self
            .tasks
            .get(name)
            .ok_or_else(|| ExecutionError::TaskNotFound(name.to_string()))?;

        if ctx.is_task_in_stack(name) {
            return Err(ExecutionError::RecursiveTask(name.to_string()));
        }

        ctx.push_task(name.to_string());
        ctx.print_task_start(name);

        let result = self.run_steps(&task.steps, ctx);

        ctx.pop_task();

        if result.is_ok() {
            ctx.print_task_complete(name);
        }

        result
    }

    fn run_steps(&self, steps: &[Step], ctx: &mut Context) -> ExecutionResult<()> {
        for step in steps {
            match step {
                Step::Task(sub) => self.run(sub, ctx)?,
                op => ops::execute(op, self, ctx)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use std::fs;
    use tempfile::TempDir;

    fn registry_and_ctx(yaml: &str, dir: &TempDir) -> (Registry, Context) {
        let config = parse_config(yaml).unwrap();
        let registry = Registry::from_config(&config);
        let ctx = Context::new().with_working_dir(dir.path().to_path_buf());
        (registry, ctx)
    }

    #[test]
    fn test_run_unknown_task() {
        let temp = TempDir::new().unwrap();
        let (registry, mut ctx) = registry_and_ctx("tasks: {}", &temp);

        let result = registry.run("missing", &mut ctx);
        assert!(matches!(result, Err(ExecutionError::TaskNotFound(_))));
    }

    #[test]
    fn test_run_nested_tasks_in_order() {
        let temp = TempDir::new().unwrap();
        let yaml = r#"
tasks:
  inner:
    steps:
      - exec: printf inner >> order.txt
  outer:
    steps:
      - exec: printf "outer-" >> order.txt
      - inner
"#;
        let (registry, mut ctx) = registry_and_ctx(yaml, &temp);

        registry.run("outer", &mut ctx).unwrap();

        let order = fs::read_to_string(temp.path().join("order.txt")).unwrap();
        assert_eq!(order, "outer-inner");
    }

    #[test]
    fn test_failing_step_aborts_chain() {
        let temp = TempDir::new().unwrap();
        let yaml = r#"
tasks:
  chain:
    steps:
      - exec: "false"
      - exec: touch should-not-exist.txt
"#;
        let (registry, mut ctx) = registry_and_ctx(yaml, &temp);

        let result = registry.run("chain", &mut ctx);
        assert!(matches!(result, Err(ExecutionError::CommandFailed(Some(1)))));
        assert!(!temp.path().join("should-not-exist.txt").exists());
    }

    #[test]
    fn test_failure_propagates_through_nesting() {
        let temp = TempDir::new().unwrap();
        let yaml = r#"
tasks:
  failing:
    steps:
      - exec: "false"
  outer:
    steps:
      - failing
      - exec: touch should-not-exist.txt
"#;
        let (registry, mut ctx) = registry_and_ctx(yaml, &temp);

        assert!(registry.run("outer", &mut ctx).is_err());
        assert!(!temp.path().join("should-not-exist.txt").exists());
    }

    #[test]
    fn test_runtime_recursion_guard() {
        let temp = TempDir::new().unwrap();
        let yaml = r#"
tasks:
  a:
    steps:
      - exec: "true"
"#;
        let (registry, mut ctx) = registry_and_ctx(yaml, &temp);

        // Simulate re-entry from a watch-triggered run
        ctx.push_task("a".to_string());
        let result = registry.run("a", &mut ctx);
        assert!(matches!(result, Err(ExecutionError::RecursiveTask(_))));
    }

    #[test]
    fn test_task_may_run_twice_sequentially() {
        let temp = TempDir::new().unwrap();
        let yaml = r#"
tasks:
  vendor:
    steps:
      - exec: printf v >> runs.txt
  dev:
    steps:
      - vendor
      - vendor
"#;
        let (registry, mut ctx) = registry_and_ctx(yaml, &temp);

        registry.run("dev", &mut ctx).unwrap();
        let runs = fs::read_to_string(temp.path().join("runs.txt")).unwrap();
        assert_eq!(runs, "vv");
    }

    #[test]
    fn test_task_names_sorted() {
        let temp = TempDir::new().unwrap();
        let yaml = r#"
tasks:
  loop: {}
  build: {}
  dev: {}
"#;
        let (registry, _ctx) = registry_and_ctx(yaml, &temp);
        assert_eq!(registry.task_names(), vec!["build", "dev", "loop"]);
    }
}
