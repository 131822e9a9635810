//! Statements and workflows as data.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::graph::ParamValue;

/// A single query plus its parameters.
///
/// # Example
///
/// ```
/// use boltrun::workflow::Statement;
///
/// let statement = Statement::new("CREATE (n:person {id: $id, name: $name})")
///     .param("id", 1)
///     .param("name", "jack");
/// assert_eq!(statement.params.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    /// Query text.
    pub query: String,

    /// Named parameters referenced as `$name` in the query.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, ParamValue>,
}

impl Statement {
    /// Create a statement without parameters.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            params: BTreeMap::new(),
        }
    }

    /// Bind a parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// First line of the query, shortened for status lines.
    pub fn summary(&self, max_len: usize) -> String {
        let first_line = self.query.trim().lines().next().unwrap_or_default().trim();
        if first_line.chars().count() <= max_len {
            first_line.to_string()
        } else {
            let cut: String = first_line.chars().take(max_len.saturating_sub(1)).collect();
            format!("{}…", cut)
        }
    }
}

/// A named, ordered sequence of statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Workflow {
    pub name: String,
    pub description: Option<String>,
    pub statements: Vec<Statement>,
}

impl Workflow {
    /// Create a workflow.
    pub fn new(name: impl Into<String>, statements: Vec<Statement>) -> Self {
        Self {
            name: name.into(),
            description: None,
            statements,
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
