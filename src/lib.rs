//! boltrun - Run Cypher statement workflows against a Bolt graph database.
//!
//! A workflow is an ordered list of statements. boltrun connects to the
//! endpoint, opens a session on the target database, runs the statements
//! one after another and stops at the first failure. Only the final
//! statement's records are collected and emitted. The session and then the
//! connection are released exactly once on every path.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, merging, and validation
//! - [`error`] - Error types and result aliases
//! - [`graph`] - Driver capability traits, the Bolt adapter, and a mock
//! - [`secrets`] - Credential masking for diagnostics
//! - [`ui`] - Spinners, status lines, and terminal output
//! - [`workflow`] - Statements, the runner, and record sinks
//!
//! # Example
//!
//! ```
//! use boltrun::graph::{Endpoint, GraphValue, MockConnector, Record};
//! use boltrun::workflow::{Statement, Workflow, WorkflowRunner};
//!
//! let connector = MockConnector::new();
//! connector.script(
//!     "MATCH (n) RETURN count(n) AS count",
//!     vec![Record::from_iter([("count", GraphValue::Int(2))])],
//! );
//!
//! let workflow = Workflow::new(
//!     "count",
//!     vec![
//!         Statement::new("CREATE (:person {id: $id})").param("id", 1),
//!         Statement::new("MATCH (n) RETURN count(n) AS count"),
//!     ],
//! );
//! let endpoint = Endpoint::new("bolt://localhost:7687", "admin", "secret", "default");
//!
//! let mut records: Vec<Record> = Vec::new();
//! let result = WorkflowRunner::new(&connector)
//!     .run(&endpoint, &workflow, &mut records)
//!     .unwrap();
//!
//! assert_eq!(result.records, 1);
//! assert_eq!(records[0].get("count"), Some(&GraphValue::Int(2)));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod secrets;
pub mod ui;
pub mod workflow;

pub use error::{BoltrunError, Result};
