//! Workflow execution.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::error::{BoltrunError, Result};
use crate::graph::{Connector, DriverError, Endpoint};
use crate::secrets::redact_uri;

use super::scope::Scoped;
use super::sink::RecordSink;
use super::statement::{Statement, Workflow};

/// Progress events emitted during a run.
#[derive(Debug)]
pub enum RunProgress<'a> {
    /// The connection is open and authenticated.
    Connected { uri: &'a str },
    /// The session is bound to its database.
    SessionOpened { database: &'a str },
    /// A statement is about to be sent.
    StatementStarting {
        index: usize,
        total: usize,
        statement: &'a Statement,
    },
    /// A statement completed.
    StatementFinished { index: usize, duration: Duration },
    /// A statement failed; nothing after it will run.
    StatementFailed {
        index: usize,
        error: &'a DriverError,
    },
    /// The final statement's records are materialized.
    RecordsCollected { count: usize },
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// Workflow name.
    pub workflow: String,
    /// Number of statements executed.
    pub statements: usize,
    /// Number of records emitted to the sink.
    pub records: usize,
    /// Wall time from connect to release.
    pub duration: Duration,
}

/// Runs a [`Workflow`] against a graph database.
///
/// One run acquires a connection, then a session on the endpoint's
/// database, executes every statement in order, collects the final
/// statement's records and emits them to a sink. The first failure aborts
/// the run. Session and connection are released exactly once, in reverse
/// order, whatever the outcome.
pub struct WorkflowRunner<'a> {
    connector: &'a dyn Connector,
}

impl<'a> WorkflowRunner<'a> {
    /// Create a runner over a connector.
    pub fn new(connector: &'a dyn Connector) -> Self {
        Self { connector }
    }

    /// Run a workflow.
    pub fn run(
        &self,
        endpoint: &Endpoint,
        workflow: &Workflow,
        sink: &mut dyn RecordSink,
    ) -> Result<WorkflowResult> {
        self.run_with_progress(endpoint, workflow, sink, |_| {})
    }

    /// Run a workflow with a progress callback.
    pub fn run_with_progress(
        &self,
        endpoint: &Endpoint,
        workflow: &Workflow,
        sink: &mut dyn RecordSink,
        mut on_progress: impl FnMut(RunProgress<'_>),
    ) -> Result<WorkflowResult> {
        if workflow.is_empty() {
            return Err(BoltrunError::ConfigValidationError {
                message: format!("Workflow '{}' has no statements", workflow.name),
            });
        }

        let start = Instant::now();
        let total = workflow.len();
        info!(
            "Running workflow '{}' ({} statements) against {}",
            workflow.name,
            total,
            redact_uri(&endpoint.uri)
        );

        let connection = self.connector.connect(endpoint).map_err(|cause| {
            BoltrunError::ConnectionError {
                uri: redact_uri(&endpoint.uri),
                cause,
            }
        })?;
        let mut connection = Scoped::new(connection, "connection");
        on_progress(RunProgress::Connected { uri: &endpoint.uri });

        let session = connection
            .open_session(&endpoint.database)
            .map_err(|cause| BoltrunError::SessionError {
                database: endpoint.database.clone(),
                cause,
            })?;
        let mut session = Scoped::new(session, "session");
        on_progress(RunProgress::SessionOpened {
            database: &endpoint.database,
        });

        let mut records = Vec::new();
        for (index, statement) in workflow.statements.iter().enumerate() {
            let is_final = index + 1 == total;
            on_progress(RunProgress::StatementStarting {
                index,
                total,
                statement,
            });
            debug!("Executing statement {}: {}", index, statement.query);

            let started = Instant::now();
            let handle = match session.execute(statement) {
                Ok(handle) => handle,
                Err(cause) => {
                    on_progress(RunProgress::StatementFailed {
                        index,
                        error: &cause,
                    });
                    return Err(BoltrunError::StatementError { index, cause });
                }
            };

            if is_final {
                records = handle
                    .collect_all()
                    .map_err(|cause| BoltrunError::CollectionError { cause })?;
                on_progress(RunProgress::RecordsCollected {
                    count: records.len(),
                });
            } else if let Err(cause) = handle.consume() {
                on_progress(RunProgress::StatementFailed {
                    index,
                    error: &cause,
                });
                return Err(BoltrunError::StatementError { index, cause });
            }

            on_progress(RunProgress::StatementFinished {
                index,
                duration: started.elapsed(),
            });
        }

        for record in &records {
            sink.emit(record)?;
        }
        sink.flush()?;

        drop(session);
        drop(connection);

        let duration = start.elapsed();
        info!(
            "Workflow '{}' emitted {} record(s) in {:?}",
            workflow.name,
            records.len(),
            duration
        );

        Ok(WorkflowResult {
            workflow: workflow.name.clone(),
            statements: total,
            records: records.len(),
            duration,
        })
    }
}
