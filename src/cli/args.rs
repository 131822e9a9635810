//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::EndpointOverrides;
use crate::workflow::RecordFormat;

/// boltrun - Run Cypher statement workflows against a Bolt graph database.
#[derive(Debug, Parser)]
#[command(name = "boltrun")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (replaces .boltrun/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(flatten)]
    pub endpoint: EndpointArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Endpoint overrides. These win over every config file.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct EndpointArgs {
    /// Bolt URI, e.g. bolt://localhost:7687
    #[arg(long, global = true, env = "BOLTRUN_URI", value_name = "URI")]
    pub uri: Option<String>,

    /// User name
    #[arg(long, global = true, env = "BOLTRUN_USER", value_name = "NAME")]
    pub user: Option<String>,

    /// Password
    #[arg(
        long,
        global = true,
        env = "BOLTRUN_PASSWORD",
        hide_env_values = true,
        value_name = "PASSWORD"
    )]
    pub password: Option<String>,

    /// Target database
    #[arg(long, global = true, env = "BOLTRUN_DATABASE", value_name = "DB")]
    pub database: Option<String>,
}

impl EndpointArgs {
    pub fn to_overrides(&self) -> EndpointOverrides {
        EndpointOverrides {
            uri: self.uri.clone(),
            username: self.user.clone(),
            password: self.password.clone(),
            database: self.database.clone(),
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a workflow (default if no command specified)
    Run(RunArgs),

    /// List available workflows
    List(ListArgs),

    /// Show resolved configuration
    Config(ConfigArgs),

    /// Write a starter .boltrun/config.yml
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Workflow to run (defaults to settings.default_workflow)
    #[arg(short, long)]
    pub workflow: Option<String>,

    /// Record output format (defaults to settings.record_format)
    #[arg(long, value_enum)]
    pub format: Option<RecordFormat>,

    /// Print the statements without connecting
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `config` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArgs {
    /// Output as JSON instead of YAML
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `init` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InitArgs {
    /// Overwrite an existing config
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
