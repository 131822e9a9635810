//! Built-in defaults and workflows embedded at compile time.

use include_dir::{include_dir, Dir, File};
use serde_yaml::{Mapping, Value};
use std::path::Path;

use crate::error::{BoltrunError, Result};

/// Embedded assets directory.
static ASSETS_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/assets");

fn file_contents<'a>(file: &'a File<'a>) -> Result<&'a str> {
    file.contents_utf8()
        .ok_or_else(|| BoltrunError::ConfigParseError {
            path: Path::new("assets").join(file.path()),
            message: "Invalid UTF-8".to_string(),
        })
}

fn parse_asset(file: &File<'_>) -> Result<Value> {
    serde_yaml::from_str(file_contents(file)?).map_err(|e| BoltrunError::ConfigParseError {
        path: Path::new("assets").join(file.path()),
        message: e.to_string(),
    })
}

fn asset(path: &str) -> Result<&'static File<'static>> {
    ASSETS_DIR
        .get_file(path)
        .ok_or_else(|| BoltrunError::ConfigNotFound {
            path: Path::new("assets").join(path),
        })
}

/// The lowest configuration layer: `defaults.yml` with every file under
/// `workflows/` added as a workflow named after its file stem.
pub fn defaults_value() -> Result<Value> {
    let mut root = match parse_asset(asset("defaults.yml")?)? {
        Value::Mapping(map) => map,
        _ => Mapping::new(),
    };

    let mut workflows = Mapping::new();
    if let Some(dir) = ASSETS_DIR.get_dir("workflows") {
        for file in dir.files() {
            let path = file.path();
            let is_yaml = path
                .extension()
                .is_some_and(|ext| ext == "yml" || ext == "yaml");
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if is_yaml {
                workflows.insert(Value::from(stem), parse_asset(file)?);
            }
        }
    }

    root.insert(Value::from("workflows"), Value::Mapping(workflows));
    Ok(Value::Mapping(root))
}

/// Names of the built-in workflows.
pub fn workflow_names() -> Vec<String> {
    let mut names: Vec<String> = ASSETS_DIR
        .get_dir("workflows")
        .map(|dir| {
            dir.files()
                .filter_map(|f| f.path().file_stem()?.to_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}

/// Starter project config written by `boltrun init`.
pub fn init_template() -> Result<&'static str> {
    file_contents(asset("init.yml")?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::BoltrunConfig;

    #[test]
    fn defaults_parse_into_config() {
        let config: BoltrunConfig = serde_yaml::from_value(defaults_value().unwrap()).unwrap();

        assert_eq!(config.endpoint.uri, "bolt://localhost:7687");
        assert_eq!(config.endpoint.username, "admin");
        assert_eq!(config.endpoint.database, "default");
        assert_eq!(config.settings.default_workflow, "basic");
        assert_eq!(config.settings.fetch_size, 200);
    }

    #[test]
    fn basic_workflow_matches_demo_script() {
        let config: BoltrunConfig = serde_yaml::from_value(defaults_value().unwrap()).unwrap();
        let basic = config.workflow("basic").unwrap();

        assert_eq!(basic.len(), 6);
        assert_eq!(basic.statements[0].query, "CALL db.dropDB()");
        assert_eq!(
            basic.statements[2].query,
            r#"CALL db.createEdgeLabel('is_friend','[["person","person"]]')"#
        );
        assert_eq!(basic.statements[5].query, "match (n)-[r]->(m) return n,r,m");
        assert!(basic.statements.iter().all(|s| s.params.is_empty()));
    }

    #[test]
    fn parameterized_workflow_binds_params() {
        let config: BoltrunConfig = serde_yaml::from_value(defaults_value().unwrap()).unwrap();
        let wf = config.workflow("parameterized").unwrap();

        let edge = &wf.statements[5];
        assert!(edge.query.contains("$from"));
        assert_eq!(edge.params.len(), 2);
        assert!(wf.statements[3].params.contains_key("name"));
    }

    #[test]
    fn workflow_names_are_sorted() {
        assert_eq!(workflow_names(), vec!["basic", "parameterized"]);
    }

    #[test]
    fn init_template_parses() {
        let config: BoltrunConfig = serde_yaml::from_str(init_template().unwrap()).unwrap();
        assert_eq!(config.settings.default_workflow, "people");
        assert_eq!(config.workflow("people").unwrap().len(), 4);
    }
}
