//! Configuration schema definitions for boltrun.
//!
//! This module contains the struct definitions that map to the YAML
//! configuration file format.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::interpolation::{resolve_string, InterpolationContext};
use crate::error::{BoltrunError, Result};
use crate::graph::Endpoint;
use crate::workflow::{RecordFormat, Statement, Workflow};

/// Root configuration structure for `.boltrun/config.yml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoltrunConfig {
    /// Where and as whom to connect
    pub endpoint: EndpointConfig,

    /// Global settings
    pub settings: Settings,

    /// Workflow definitions, keyed by name
    pub workflows: BTreeMap<String, WorkflowConfig>,
}

impl BoltrunConfig {
    /// Look up a workflow by name.
    ///
    /// # Errors
    ///
    /// Returns `UnknownWorkflow` if no workflow has that name.
    pub fn workflow(&self, name: &str) -> Result<Workflow> {
        self.workflows
            .get(name)
            .map(|wf| wf.to_workflow(name))
            .ok_or_else(|| BoltrunError::UnknownWorkflow {
                name: name.to_string(),
            })
    }

    /// The workflow run when none is named.
    pub fn default_workflow(&self) -> Result<Workflow> {
        self.workflow(&self.settings.default_workflow)
    }
}

/// Connection target as written in config.
///
/// String fields may contain `${VAR}` references that are resolved
/// against the process environment by [`EndpointConfig::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub uri: String,
    pub username: String,
    pub password: String,
    pub database: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            username: "admin".to_string(),
            password: String::new(),
            database: "default".to_string(),
        }
    }
}

/// Endpoint values given on the command line or through `BOLTRUN_*`
/// variables. These win over every config file and are not interpolated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointOverrides {
    pub uri: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
}

impl EndpointOverrides {
    pub fn is_empty(&self) -> bool {
        self.uri.is_none()
            && self.username.is_none()
            && self.password.is_none()
            && self.database.is_none()
    }
}

impl EndpointConfig {
    /// Interpolate variables and apply overrides, producing the endpoint
    /// the runner connects to.
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidationError` for an unresolved `${VAR}` in a field
    /// that is not overridden.
    pub fn resolve(
        &self,
        overrides: &EndpointOverrides,
        context: &InterpolationContext,
    ) -> Result<Endpoint> {
        let field = |over: &Option<String>, raw: &str| -> Result<String> {
            match over {
                Some(value) => Ok(value.clone()),
                None => resolve_string(raw, context),
            }
        };

        Ok(Endpoint::new(
            field(&overrides.uri, &self.uri)?,
            field(&overrides.username, &self.username)?,
            field(&overrides.password, &self.password)?,
            field(&overrides.database, &self.database)?,
        ))
    }
}

/// Global settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Default output verbosity
    pub default_output: OutputMode,

    /// Workflow run when `--workflow` is not given
    pub default_workflow: String,

    /// How emitted records are rendered
    pub record_format: RecordFormat,

    /// Rows fetched per round trip
    pub fetch_size: usize,

    /// Driver connection pool size
    pub max_connections: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_output: OutputMode::default(),
            default_workflow: "basic".to_string(),
            record_format: RecordFormat::default(),
            fetch_size: crate::graph::bolt::DEFAULT_FETCH_SIZE,
            max_connections: crate::graph::bolt::DEFAULT_MAX_CONNECTIONS,
        }
    }
}

/// Output verbosity mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Verbose,
    #[default]
    Normal,
    Quiet,
    Silent,
}

/// A workflow as written in config
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Shown by `boltrun list`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Statements in execution order
    pub statements: Vec<Statement>,
}

impl WorkflowConfig {
    /// Build the runnable workflow under `name`.
    pub fn to_workflow(&self, name: &str) -> Workflow {
        let workflow = Workflow::new(name, self.statements.clone());
        match &self.description {
            Some(description) => workflow.with_description(description.clone()),
            None => workflow,
        }
    }
}
