//! Configuration validation rules.
//!
//! - Settings: `default_workflow` exists, `fetch_size` and `max_connections`
//!   are positive
//! - Workflows: at least one statement, no blank queries
//! - Endpoint (after interpolation): known URI scheme, non-empty username
//!   and database
//!
//! All errors are collected so several problems can be fixed at once.

use crate::config::schema::BoltrunConfig;
use crate::error::{BoltrunError, Result};
use crate::graph::Endpoint;

/// URI schemes understood by the Bolt driver.
pub const SUPPORTED_SCHEMES: &[&str] = &["bolt", "bolt+s", "bolt+ssc", "neo4j", "neo4j+s", "neo4j+ssc"];

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Workflow name if error is workflow-specific
    pub workflow: Option<String>,
}

impl ValidationError {
    fn new(rule: &str, message: String) -> Self {
        Self {
            rule: rule.to_string(),
            message,
            workflow: None,
        }
    }

    fn in_workflow(rule: &str, workflow: &str, message: String) -> Self {
        Self {
            workflow: Some(workflow.to_string()),
            ..Self::new(rule, message)
        }
    }
}

/// Validate settings and workflow definitions, returning every error.
pub fn validate_config(config: &BoltrunConfig) -> Vec<ValidationError> {
    let mut errors = validate_settings(config);
    errors.extend(validate_workflows(config));
    errors
}

fn validate_settings(config: &BoltrunConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let settings = &config.settings;

    if !config.workflows.contains_key(&settings.default_workflow) {
        errors.push(ValidationError::new(
            "unknown-default-workflow",
            format!(
                "Default workflow '{}' is not defined",
                settings.default_workflow
            ),
        ));
    }

    if settings.fetch_size == 0 {
        errors.push(ValidationError::new(
            "invalid-fetch-size",
            "fetch_size must be greater than 0".to_string(),
        ));
    }

    if settings.max_connections == 0 {
        errors.push(ValidationError::new(
            "invalid-max-connections",
            "max_connections must be greater than 0".to_string(),
        ));
    }

    errors
}

fn validate_workflows(config: &BoltrunConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (name, workflow) in &config.workflows {
        if workflow.statements.is_empty() {
            errors.push(ValidationError::in_workflow(
                "empty-workflow",
                name,
                format!("Workflow '{}' has no statements", name),
            ));
        }

        for (index, statement) in workflow.statements.iter().enumerate() {
            if statement.query.trim().is_empty() {
                errors.push(ValidationError::in_workflow(
                    "blank-query",
                    name,
                    format!("Workflow '{}' statement {} has an empty query", name, index),
                ));
            }
        }
    }

    errors
}

/// Validate a resolved endpoint.
pub fn validate_endpoint(endpoint: &Endpoint) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let scheme = endpoint.uri.split_once("://").map(|(scheme, _)| scheme);
    match scheme {
        Some(s) if SUPPORTED_SCHEMES.contains(&s) => {}
        _ => errors.push(ValidationError::new(
            "invalid-uri",
            format!(
                "Endpoint URI '{}' must start with one of: {}",
                crate::secrets::redact_uri(&endpoint.uri),
                SUPPORTED_SCHEMES
                    .iter()
                    .map(|s| format!("{}://", s))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        )),
    }

    if endpoint.username.trim().is_empty() {
        errors.push(ValidationError::new(
            "missing-username",
            "Endpoint username must not be empty".to_string(),
        ));
    }

    if endpoint.database.trim().is_empty() {
        errors.push(ValidationError::new(
            "missing-database",
            "Endpoint database must not be empty".to_string(),
        ));
    }

    errors
}

fn into_result(errors: Vec<ValidationError>) -> Result<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.into_iter().map(|e| e.message).collect();
        Err(BoltrunError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}

/// Validate a configuration.
///
/// # Errors
///
/// Returns `ConfigValidationError` joining every failed rule.
pub fn validate(config: &BoltrunConfig) -> Result<()> {
    into_result(validate_config(config))
}

/// Validate a configuration together with the endpoint resolved from it.
pub fn validate_with_endpoint(config: &BoltrunConfig, endpoint: &Endpoint) -> Result<()> {
    let mut errors = validate_endpoint(endpoint);
    errors.extend(validate_config(config));
    into_result(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::WorkflowConfig;
    use crate::workflow::Statement;

    fn config_with(name: &str, statements: Vec<Statement>) -> BoltrunConfig {
        let mut config = BoltrunConfig::default();
        config.settings.default_workflow = name.to_string();
        config.workflows.insert(
            name.to_string(),
            WorkflowConfig {
                description: None,
                statements,
            },
        );
        config
    }

    fn endpoint(uri: &str) -> Endpoint {
        Endpoint::new(uri, "admin", "pw", "default")
    }

    #[test]
    fn valid_config_returns_no_errors() {
        let config = config_with("basic", vec![Statement::new("RETURN 1")]);
        assert!(validate_config(&config).is_empty());
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn empty_workflow_is_rejected() {
        let config = config_with("basic", vec![]);
        let errors = validate_config(&config);
        assert!(errors
            .iter()
            .any(|e| e.rule == "empty-workflow" && e.workflow.as_deref() == Some("basic")));
    }

    #[test]
    fn blank_query_is_rejected() {
        let config = config_with("basic", vec![Statement::new("RETURN 1"), Statement::new("  ")]);
        let errors = validate_config(&config);
        assert!(errors
            .iter()
            .any(|e| e.rule == "blank-query" && e.message.contains("statement 1")));
    }

    #[test]
    fn missing_default_workflow_is_rejected() {
        let mut config = config_with("basic", vec![Statement::new("RETURN 1")]);
        config.settings.default_workflow = "nope".to_string();
        let errors = validate_config(&config);
        assert!(errors.iter().any(|e| e.rule == "unknown-default-workflow"));
    }

    #[test]
    fn zero_sizes_are_rejected() {
        let mut config = config_with("basic", vec![Statement::new("RETURN 1")]);
        config.settings.fetch_size = 0;
        config.settings.max_connections = 0;
        let rules: Vec<_> = validate_config(&config).into_iter().map(|e| e.rule).collect();
        assert!(rules.contains(&"invalid-fetch-size".to_string()));
        assert!(rules.contains(&"invalid-max-connections".to_string()));
    }

    #[test]
    fn accepts_all_supported_schemes() {
        for scheme in SUPPORTED_SCHEMES {
            let uri = format!("{}://db:7687", scheme);
            assert!(validate_endpoint(&endpoint(&uri)).is_empty(), "{}", uri);
        }
    }

    #[test]
    fn rejects_unknown_scheme() {
        let errors = validate_endpoint(&endpoint("http://db:7474"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule, "invalid-uri");

        assert!(!validate_endpoint(&endpoint("localhost:7687")).is_empty());
    }

    #[test]
    fn invalid_uri_message_hides_password() {
        let errors = validate_endpoint(&endpoint("http://admin:hunter2@db"));
        assert!(!errors[0].message.contains("hunter2"));
    }

    #[test]
    fn rejects_empty_username_and_database() {
        let ep = Endpoint::new("bolt://db:7687", "", "pw", " ");
        let rules: Vec<_> = validate_endpoint(&ep).into_iter().map(|e| e.rule).collect();
        assert_eq!(rules, vec!["missing-username", "missing-database"]);
    }

    #[test]
    fn collects_errors_from_every_layer() {
        let config = config_with("basic", vec![]);
        let err = validate_with_endpoint(&config, &endpoint("ftp://x")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("ftp://x"));
        assert!(message.contains("no statements"));
    }
}
