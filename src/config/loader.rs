//! Configuration file discovery and loading.

use crate::config::builtin;
use crate::config::merger::merge_configs;
use crate::config::schema::BoltrunConfig;
use crate::error::{BoltrunError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the per-project configuration directory.
pub const CONFIG_DIR: &str = ".boltrun";

/// Paths to configuration files in merge order (later overrides earlier).
///
/// 1. Built-in defaults (always present, not a path)
/// 2. Project config: `.boltrun/config.yml`, or the file given by `--config`
/// 3. Local overrides: `.boltrun/config.local.yml`
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// Project config, or the explicit file that replaces it
    pub project: Option<PathBuf>,

    /// Local overrides
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        let existing = |name: &str| {
            let path = project_root.join(CONFIG_DIR).join(name);
            path.exists().then_some(path)
        };

        Self {
            project: existing("config.yml"),
            project_local: existing("config.local.yml"),
        }
    }

    /// Use `path` in place of the project config. It must exist when loaded.
    pub fn with_explicit(mut self, path: &Path) -> Self {
        self.project = Some(path.to_path_buf());
        self
    }

    /// Config file paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.project.iter().chain(self.project_local.iter()).collect()
    }

    pub fn has_project_config(&self) -> bool {
        self.project.is_some()
    }
}

/// Path of the project config file under `project_root`.
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR).join("config.yml")
}

/// Find the project root by walking up from `start`.
///
/// The nearest directory holding `.boltrun/` wins, falling back to the
/// nearest one holding `.git`.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut git_root = None;

    for dir in start.ancestors() {
        if dir.join(CONFIG_DIR).is_dir() {
            return Some(dir.to_path_buf());
        }
        if git_root.is_none() && dir.join(".git").exists() {
            git_root = Some(dir.to_path_buf());
        }
    }

    git_root
}

/// Parse YAML content into a config.
pub fn parse_config(content: &str, source_path: &Path) -> Result<BoltrunConfig> {
    serde_yaml::from_str(content).map_err(|e| BoltrunError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a config file as raw YAML for merging.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist, `ConfigParseError`
/// if it is not valid YAML.
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            BoltrunError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            BoltrunError::Io(e)
        }
    })?;

    serde_yaml::from_str(&content).map_err(|e| BoltrunError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Merge the built-in defaults with every file in `paths`.
pub fn load_from_paths(paths: &ConfigPaths) -> Result<BoltrunConfig> {
    let mut layers = vec![builtin::defaults_value()?];
    for path in paths.all_existing() {
        layers.push(load_config_value(path)?);
    }

    let source = paths
        .project
        .clone()
        .unwrap_or_else(|| PathBuf::from("<built-in defaults>"));

    serde_yaml::from_value(merge_configs(&layers)).map_err(|e| BoltrunError::ConfigParseError {
        path: source,
        message: format!("Failed to parse merged config: {}", e),
    })
}

/// Load and merge all config layers for a project.
///
/// A project without `.boltrun/config.yml` runs on the built-in defaults.
pub fn load_merged_config(project_root: &Path) -> Result<BoltrunConfig> {
    load_config(project_root, None)
}

/// Load config, with `config_override` replacing the project config file.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<BoltrunConfig> {
    let mut paths = ConfigPaths::discover(project_root);
    if let Some(path) = config_override {
        paths = paths.with_explicit(path);
    }
    load_from_paths(&paths)
}
