//! List command implementation.
//!
//! The `boltrun list` command lists the available workflows.

use std::io::{self, Write};

use serde::Serialize;

use crate::cli::args::ListArgs;
use crate::config::BoltrunConfig;
use crate::error::{BoltrunError, Result};
use crate::ui::{count_label, should_use_colors, BoltrunTheme, UserInterface};

use super::dispatcher::{Command, CommandResult, ProjectContext};

/// The list command implementation.
pub struct ListCommand {
    context: ProjectContext,
    args: ListArgs,
}

/// One workflow as shown by `boltrun list --json`.
#[derive(Debug, Serialize)]
pub struct WorkflowSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub statements: usize,
    pub default: bool,
}

impl ListCommand {
    pub fn new(context: &ProjectContext, args: ListArgs) -> Self {
        Self {
            context: context.clone(),
            args,
        }
    }

    pub fn args(&self) -> &ListArgs {
        &self.args
    }

    /// Workflows in name order.
    pub fn summaries(config: &BoltrunConfig) -> Vec<WorkflowSummary> {
        config
            .workflows
            .iter()
            .map(|(name, wf)| WorkflowSummary {
                name: name.clone(),
                description: wf.description.clone(),
                statements: wf.statements.len(),
                default: *name == config.settings.default_workflow,
            })
            .collect()
    }

    /// Write the listing for `config` to `out`.
    pub fn write_listing(&self, config: &BoltrunConfig, out: &mut dyn Write) -> Result<()> {
        let summaries = Self::summaries(config);

        if self.args.json {
            serde_json::to_writer_pretty(&mut *out, &summaries)
                .map_err(|e| BoltrunError::Other(e.into()))?;
            writeln!(out)?;
            return Ok(());
        }

        let theme = if should_use_colors() {
            BoltrunTheme::new()
        } else {
            BoltrunTheme::plain()
        };
        let width = summaries.iter().map(|s| s.name.len()).max().unwrap_or(0);

        writeln!(out, "{}", theme.key.apply_to("Workflows:"))?;
        for summary in &summaries {
            let marker = if summary.default { "*" } else { " " };
            writeln!(
                out,
                "  {} {}  {}",
                marker,
                theme
                    .highlight
                    .apply_to(format!("{:<width$}", summary.name, width = width)),
                theme
                    .dim
                    .apply_to(count_label(summary.statements, "statement")),
            )?;
            if let Some(description) = &summary.description {
                writeln!(out, "    {}", theme.dim.apply_to(description))?;
            }
        }
        Ok(())
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.context.load_config()?;
        self.context.apply_output_mode(&config, ui);

        let stdout = io::stdout();
        self.write_listing(&config, &mut stdout.lock())?;
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn listing(args: ListArgs, project_yaml: Option<&str>) -> String {
        let temp = TempDir::new().unwrap();
        if let Some(yaml) = project_yaml {
            let dir = temp.path().join(".boltrun");
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("config.yml"), yaml).unwrap();
        }
        let cmd = ListCommand::new(&ProjectContext::new(temp.path()), args);
        let config = cmd.context.load_config().unwrap();
        let mut out = Vec::new();
        cmd.write_listing(&config, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn lists_builtin_workflows() {
        let text = listing(ListArgs::default(), None);
        assert!(text.contains("basic"));
        assert!(text.contains("6 statements"));
        assert!(text.contains("parameterized"));
        assert!(text.contains("* "));
    }

    #[test]
    fn lists_project_workflows_with_description() {
        let text = listing(
            ListArgs::default(),
            Some("workflows:\n  ping:\n    description: Check liveness\n    statements:\n      - query: RETURN 1\n"),
        );
        assert!(text.contains("ping"));
        assert!(text.contains("1 statement"));
        assert!(text.contains("Check liveness"));
    }

    #[test]
    fn json_listing_marks_default() {
        let text = listing(ListArgs { json: true }, None);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let basic = value
            .as_array()
            .unwrap()
            .iter()
            .find(|w| w["name"] == "basic")
            .unwrap();
        assert_eq!(basic["default"], true);
        assert_eq!(basic["statements"], 6);
    }

    #[test]
    fn execute_succeeds_without_project_config() {
        let temp = TempDir::new().unwrap();
        let cmd = ListCommand::new(&ProjectContext::new(temp.path()), ListArgs::default());
        let mut ui = MockUI::new();
        assert!(cmd.execute(&mut ui).unwrap().success);
    }
}
