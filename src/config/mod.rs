//! Configuration loading, parsing, and validation for boltrun.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Embedded defaults and workflows in [`builtin`]
//! - Deep merging in [`merger`]
//! - Validation in [`validator`]
//! - `${VAR}` interpolation in [`interpolation`]
//!
//! # Example
//!
//! ```
//! use boltrun::config::{load_merged_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".boltrun");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "endpoint:\n  database: social\n").unwrap();
//!
//! let config = load_merged_config(temp.path()).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.endpoint.database, "social");
//! assert!(config.workflows.contains_key("basic"));
//! ```
//!
//! # Configuration Layers
//!
//! Later layers override earlier ones:
//! 1. Built-in defaults and workflows
//! 2. Project config (`.boltrun/config.yml`) or the `--config` file
//! 3. Local overrides (`.boltrun/config.local.yml`)
//! 4. `--uri`/`--user`/`--password`/`--database` and `BOLTRUN_*` variables

pub mod builtin;
pub mod interpolation;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use interpolation::{resolve_string, InterpolationContext};
pub use loader::{
    find_project_root, load_config, load_config_value, load_from_paths, load_merged_config,
    parse_config, project_config_path, ConfigPaths, CONFIG_DIR,
};
pub use merger::{deep_merge, merge_configs};
pub use schema::{
    BoltrunConfig, EndpointConfig, EndpointOverrides, OutputMode, Settings, WorkflowConfig,
};
pub use validator::{
    validate, validate_config, validate_endpoint, validate_with_endpoint, ValidationError,
};
