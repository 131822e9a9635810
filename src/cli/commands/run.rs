//! Run command implementation.
//!
//! The `boltrun run` command executes a workflow and writes the final
//! statement's records to stdout.

use std::io::{self, Write};

use tracing::debug;

use crate::cli::args::RunArgs;
use crate::config::{validate_with_endpoint, BoltrunConfig};
use crate::error::{BoltrunError, Result};
use crate::graph::{BoltConnector, Connector, Endpoint};
use crate::secrets::{redact_uri, SecretMasker};
use crate::ui::{count_label, format_duration, BoltrunTheme, SpinnerHandle, UserInterface};
use crate::workflow::{sink_for, RecordFormat, RunProgress, Workflow, WorkflowRunner};

use super::dispatcher::{Command, CommandResult, ProjectContext};

/// Exit code for a failed workflow or invalid configuration.
pub const EXIT_FAILURE: i32 = 1;

/// Exit code for an unknown workflow name.
pub const EXIT_UNKNOWN_WORKFLOW: i32 = 2;

const SUMMARY_WIDTH: usize = 72;

/// The run command implementation.
pub struct RunCommand {
    context: ProjectContext,
    args: RunArgs,
}

/// Everything needed to run, resolved from config and flags.
#[derive(Debug)]
pub struct RunPlan {
    pub workflow: Workflow,
    pub endpoint: Endpoint,
    pub format: RecordFormat,
}

impl RunCommand {
    pub fn new(context: &ProjectContext, args: RunArgs) -> Self {
        Self {
            context: context.clone(),
            args,
        }
    }

    pub fn args(&self) -> &RunArgs {
        &self.args
    }

    /// Pick the workflow, resolve the endpoint and validate both.
    pub fn plan(&self, config: &BoltrunConfig) -> Result<RunPlan> {
        let name = self
            .args
            .workflow
            .as_deref()
            .unwrap_or(&config.settings.default_workflow);
        let workflow = config.workflow(name)?;
        let endpoint = self.context.resolve_endpoint(config)?;
        validate_with_endpoint(config, &endpoint)?;

        Ok(RunPlan {
            workflow,
            endpoint,
            format: self.args.format.unwrap_or(config.settings.record_format),
        })
    }

    /// Show what would run without connecting.
    pub fn show_plan(&self, plan: &RunPlan, ui: &mut dyn UserInterface) -> Result<()> {
        let theme = BoltrunTheme::plain();
        let total = plan.workflow.len();

        ui.show_run_header(&plan.workflow.name, &target(&plan.endpoint), total);
        for (index, statement) in plan.workflow.statements.iter().enumerate() {
            ui.message(&theme.format_statement(index, total, &statement.query));
            if !statement.params.is_empty() {
                let params = serde_json::to_string(&statement.params)
                    .map_err(|e| BoltrunError::Other(e.into()))?;
                ui.message(&format!("      params: {}", params));
            }
        }
        ui.success(&format!(
            "Dry run: {} not executed",
            count_label(total, "statement")
        ));
        Ok(())
    }

    /// Run `plan` through `connector`, writing records to `out`.
    ///
    /// Workflow failures are reported through `ui` with credentials masked
    /// and turned into exit code 1.
    pub fn run_plan(
        &self,
        plan: &RunPlan,
        connector: &dyn Connector,
        ui: &mut dyn UserInterface,
        out: &mut dyn Write,
    ) -> Result<CommandResult> {
        let masker = SecretMasker::for_endpoint(&plan.endpoint);
        let theme = BoltrunTheme::plain();
        let show_queries = ui.output_mode().shows_queries();
        let total = plan.workflow.len();

        ui.show_run_header(&plan.workflow.name, &target(&plan.endpoint), total);

        let mut sink = sink_for(plan.format, out);
        let mut spinner: Option<(Box<dyn SpinnerHandle>, String)> = None;

        let outcome = WorkflowRunner::new(connector).run_with_progress(
            &plan.endpoint,
            &plan.workflow,
            sink.as_mut(),
            |event| match event {
                RunProgress::Connected { uri } => {
                    ui.message(&format!("Connected to {}", redact_uri(uri)));
                }
                RunProgress::SessionOpened { database } => {
                    ui.message(&format!("Session open on '{}'", database));
                }
                RunProgress::StatementStarting {
                    index,
                    total,
                    statement,
                } => {
                    let text = if show_queries {
                        statement.query.clone()
                    } else {
                        statement.summary(SUMMARY_WIDTH)
                    };
                    let label = theme.format_statement(index, total, &text);
                    spinner = Some((ui.start_spinner(&label), label));
                }
                RunProgress::StatementFinished { duration, .. } => {
                    if let Some((mut handle, label)) = spinner.take() {
                        handle.finish_success(&format!(
                            "{} ({})",
                            label,
                            format_duration(duration)
                        ));
                    }
                }
                RunProgress::StatementFailed { error, .. } => {
                    if let Some((mut handle, label)) = spinner.take() {
                        handle.finish_error(&masker.mask(&format!("{}: {}", label, error)));
                    }
                }
                RunProgress::RecordsCollected { count } => {
                    debug!("Collected {}", count_label(count, "record"));
                }
            },
        );

        if let Some((mut handle, label)) = spinner.take() {
            handle.finish_error(&label);
        }

        match outcome {
            Ok(result) => {
                ui.success(&format!(
                    "Workflow '{}' complete: {}, {} ({})",
                    result.workflow,
                    count_label(result.statements, "statement"),
                    count_label(result.records, "record"),
                    format_duration(result.duration)
                ));
                Ok(CommandResult::success())
            }
            Err(e) if e.is_workflow_failure() || matches!(e, BoltrunError::Io(_)) => {
                ui.error(&masker.mask(&e.to_string()));
                Ok(CommandResult::failure(EXIT_FAILURE))
            }
            Err(e) => Err(e),
        }
    }
}

/// `uri/database` with credentials removed, for headers.
fn target(endpoint: &Endpoint) -> String {
    format!("{}/{}", redact_uri(&endpoint.uri), endpoint.database)
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.context.load_config()?;
        self.context.apply_output_mode(&config, ui);

        let plan = match self.plan(&config) {
            Ok(plan) => plan,
            Err(e @ BoltrunError::UnknownWorkflow { .. }) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(EXIT_UNKNOWN_WORKFLOW));
            }
            Err(e @ BoltrunError::ConfigValidationError { .. }) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(EXIT_FAILURE));
            }
            Err(e) => return Err(e),
        };

        if self.args.dry_run {
            self.show_plan(&plan, ui)?;
            return Ok(CommandResult::success());
        }

        let connector = BoltConnector::with_options(
            config.settings.fetch_size,
            config.settings.max_connections,
        )
        .map_err(|cause| BoltrunError::ConnectionError {
            uri: redact_uri(&plan.endpoint.uri),
            cause,
        })?;

        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_plan(&plan, &connector, ui, &mut out)
    }
}
