//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`ProjectContext`] for the project, config file and endpoint overrides
//!   every command shares
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, RunArgs};
use crate::config::{load_config, BoltrunConfig, EndpointOverrides, InterpolationContext};
use crate::error::Result;
use crate::graph::Endpoint;
use crate::ui::{OutputMode, UserInterface};

/// Trait for command implementations.
pub trait Command {
    /// Execute the command, reporting through `ui`.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Where a command finds its configuration.
#[derive(Debug, Clone, Default)]
pub struct ProjectContext {
    pub project_root: PathBuf,

    /// File given by `--config`, replacing `.boltrun/config.yml`
    pub config_path: Option<PathBuf>,

    /// Endpoint values from flags or `BOLTRUN_*` variables
    pub endpoint: EndpointOverrides,
}

impl ProjectContext {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            ..Default::default()
        }
    }

    pub fn with_config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    pub fn with_endpoint(mut self, overrides: EndpointOverrides) -> Self {
        self.endpoint = overrides;
        self
    }

    /// Load the merged configuration.
    pub fn load_config(&self) -> Result<BoltrunConfig> {
        load_config(&self.project_root, self.config_path.as_deref())
    }

    /// Resolve the endpoint from `config` with overrides applied.
    pub fn resolve_endpoint(&self, config: &BoltrunConfig) -> Result<Endpoint> {
        config
            .endpoint
            .resolve(&self.endpoint, &InterpolationContext::from_env())
    }

    /// Apply the config's `default_output` unless a flag already changed it.
    pub fn apply_output_mode(&self, config: &BoltrunConfig, ui: &mut dyn UserInterface) {
        if ui.output_mode() == OutputMode::Normal {
            ui.set_output_mode(config.settings.default_output.into());
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    context: ProjectContext,
}

impl CommandDispatcher {
    pub fn new(context: ProjectContext) -> Self {
        Self { context }
    }

    pub fn project_root(&self) -> &Path {
        &self.context.project_root
    }

    /// Route the CLI subcommand to its implementation and execute it.
    ///
    /// With no subcommand, runs the default workflow.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Run(args)) => {
                super::run::RunCommand::new(&self.context, args.clone()).execute(ui)
            }
            Some(Commands::List(args)) => {
                super::list::ListCommand::new(&self.context, args.clone()).execute(ui)
            }
            Some(Commands::Config(args)) => {
                super::config::ConfigCommand::new(&self.context, args.clone()).execute(ui)
            }
            Some(Commands::Init(args)) => {
                super::init::InitCommand::new(&self.context.project_root, args.clone())
                    .execute(ui)
            }
            Some(Commands::Completions(args)) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
            None => super::run::RunCommand::new(&self.context, RunArgs::default()).execute(ui),
        }
    }
}
