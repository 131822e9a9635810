//! Init command implementation.
//!
//! The `boltrun init` command writes a starter `.boltrun/config.yml`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::args::InitArgs;
use crate::config::{builtin, project_config_path, CONFIG_DIR};
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The init command implementation.
pub struct InitCommand {
    project_root: PathBuf,
    args: InitArgs,
}

impl InitCommand {
    pub fn new(project_root: &Path, args: InitArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn args(&self) -> &InitArgs {
        &self.args
    }

    fn config_exists(&self) -> bool {
        project_config_path(&self.project_root).exists()
    }

    /// Keep local overrides, which usually hold credentials, out of git.
    fn update_gitignore(&self, ui: &mut dyn UserInterface) -> Result<()> {
        let entry = format!("{}/config.local.yml", CONFIG_DIR);
        let gitignore_path = self.project_root.join(".gitignore");

        if gitignore_path.exists() {
            let content = fs::read_to_string(&gitignore_path)?;
            if !content.lines().any(|line| line.trim() == entry) {
                let separator = if content.is_empty() || content.ends_with('\n') {
                    ""
                } else {
                    "\n"
                };
                fs::write(
                    &gitignore_path,
                    format!("{}{}{}\n", content, separator, entry),
                )?;
                ui.message(&format!("Added {} to .gitignore", entry));
            }
        }

        Ok(())
    }
}

impl Command for InitCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if self.config_exists() && !self.args.force {
            ui.warning("Configuration already exists. Use --force to overwrite.");
            return Ok(CommandResult::failure(1));
        }

        let path = project_config_path(&self.project_root);
        fs::create_dir_all(self.project_root.join(CONFIG_DIR))?;
        fs::write(&path, builtin::init_template()?)?;

        self.update_gitignore(ui)?;

        ui.success(&format!("Created {}/config.yml", CONFIG_DIR));
        ui.message("\nNext steps:");
        ui.message(&format!(
            "  1. Put the password in {}/config.local.yml or BOLTRUN_PASSWORD",
            CONFIG_DIR
        ));
        ui.message("  2. Run `boltrun run --dry-run` to review the statements");
        ui.message("  3. Run `boltrun` to execute the default workflow");

        Ok(CommandResult::success())
    }
}
