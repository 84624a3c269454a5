//! Variable interpolation for strings
//!
//! Operation paths and command lines may reference `${var}` variables.
//! Context variables (notably `pkg.name` and `pkg.version`) are looked
//! up first, the process environment second.

use crate::error::{InterpolationError, InterpolationResult};
use regex::Regex;
use std::collections::HashMap;
use std::env;

fn var_pattern() -> Regex {
    Regex::new(r"\$\{([^}]+)\}").unwrap()
}

/// Interpolate variables in a string, leaving unknown variables in place
pub fn interpolate(s: &str, vars: &HashMap<String, String>) -> String {
    var_pattern()
        .replace_all(s, |caps: &regex::Captures| {
            let name = &caps[1];
            if let Some(value) = vars.get(name) {
                value.clone()
            } else if let Ok(value) = env::var(name) {
                value
            } else {
                caps[0].to_string()
            }
        })
        .to_string()
}

/// Interpolate variables, erroring on the first unresolved one
///
/// Used for output paths that must resolve fully, e.g. the archive path.
pub fn interpolate_strict(
    s: &str,
    vars: &HashMap<String, String>,
) -> InterpolationResult<String> {
    let result = interpolate(s, vars);

    if let Some(caps) = var_pattern().captures(&result) {
        return Err(InterpolationError::UndefinedVariable(caps[1].to_string()));
    }

    Ok(result)
}

/// Interpolate a list of strings
pub fn interpolate_list(list: &[String], vars: &HashMap<String, String>) -> Vec<String> {
    list.iter().map(|s| interpolate(s, vars)).collect()
}
