//! Variable interpolation for endpoint values.
//!
//! # Syntax
//!
//! - `${NAME}` - replaced with the value of environment variable `NAME`
//! - `$${text}` - produces a literal `${text}`
//!
//! # Example
//!
//! ```yaml
//! endpoint:
//!   password: ${GRAPH_PASSWORD}
//! ```

use crate::error::{BoltrunError, Result};
use std::collections::{HashMap, HashSet};

/// A segment of an interpolated string.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Literal(String),
    Variable(String),
}

/// Split `input` into literal text and `${NAME}` references.
pub fn parse_interpolation(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            literal.push(c);
            continue;
        }

        match chars.peek() {
            Some('$') => {
                chars.next();
                literal.push('$');
                if chars.peek() == Some(&'{') {
                    // $${...} stays literal up to and including the brace
                    for c in chars.by_ref() {
                        literal.push(c);
                        if c == '}' {
                            break;
                        }
                    }
                }
            }
            Some('{') => {
                chars.next();
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                let name: String = chars.by_ref().take_while(|&c| c != '}').collect();
                segments.push(Segment::Variable(name));
            }
            _ => literal.push(c),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    segments
}

/// Unique variable names referenced by `input`.
pub fn extract_variables(input: &str) -> HashSet<String> {
    parse_interpolation(input)
        .into_iter()
        .filter_map(|seg| match seg {
            Segment::Variable(name) => Some(name),
            Segment::Literal(_) => None,
        })
        .collect()
}

/// Whether `input` references any variable.
pub fn has_interpolation(input: &str) -> bool {
    parse_interpolation(input)
        .iter()
        .any(|seg| matches!(seg, Segment::Variable(_)))
}

/// Values available to `${NAME}` references.
///
/// Environment variables win over built-ins (`boltrun_version`).
#[derive(Debug, Default)]
pub struct InterpolationContext {
    pub env: HashMap<String, String>,
    pub builtins: HashMap<String, String>,
}

impl InterpolationContext {
    /// Create a context holding only built-in variables.
    pub fn new() -> Self {
        let mut builtins = HashMap::new();
        builtins.insert(
            "boltrun_version".to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
        );
        Self {
            builtins,
            ..Default::default()
        }
    }

    /// Create a context over the current process environment.
    pub fn from_env() -> Self {
        Self::new().with_env(std::env::vars().collect())
    }

    pub fn with_env(mut self, env: HashMap<String, String>) -> Self {
        self.env = env;
        self
    }

    pub fn resolve(&self, name: &str) -> Option<String> {
        self.env
            .get(name)
            .or_else(|| self.builtins.get(name))
            .cloned()
    }
}

/// Resolve every variable in `input`.
///
/// # Errors
///
/// Returns `ConfigValidationError` naming the first unresolved variable.
pub fn resolve_string(input: &str, context: &InterpolationContext) -> Result<String> {
    let mut result = String::new();

    for segment in parse_interpolation(input) {
        match segment {
            Segment::Literal(text) => result.push_str(&text),
            Segment::Variable(name) => {
                let value =
                    context
                        .resolve(&name)
                        .ok_or_else(|| BoltrunError::ConfigValidationError {
                            message: format!("Unresolved variable: ${{{}}}", name),
                        })?;
                result.push_str(&value);
            }
        }
    }

    Ok(result)
}
