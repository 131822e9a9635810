//! Visual theme and styling.

use console::Style;

/// boltrun's visual theme.
#[derive(Debug, Clone)]
pub struct BoltrunTheme {
    /// Success messages (green).
    pub success: Style,
    /// Warning messages (orange).
    pub warning: Style,
    /// Error messages (red bold).
    pub error: Style,
    /// Running elements (cyan).
    pub info: Style,
    /// Secondary text.
    pub dim: Style,
    /// Important text (bold).
    pub highlight: Style,
    /// Headers (cyan bold).
    pub header: Style,
    /// Statement counters like `[2/6]`.
    pub step_number: Style,
    pub duration: Style,
    /// Query text (dim italic).
    pub query: Style,
    /// Key labels in key-value displays (bold).
    pub key: Style,
}

impl Default for BoltrunTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl BoltrunTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            info: Style::new().cyan(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().bold().cyan(),
            step_number: Style::new().dim(),
            duration: Style::new().dim(),
            query: Style::new().dim().italic(),
            key: Style::new().bold(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            info: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            step_number: Style::new(),
            duration: Style::new(),
            query: Style::new(),
            key: Style::new(),
        }
    }

    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!(
            "{} {}",
            self.header.apply_to("⚡"),
            self.highlight.apply_to(title)
        )
    }

    /// Format a statement counter and summary, e.g. `[2/6] CREATE ...`.
    pub fn format_statement(&self, index: usize, total: usize, summary: &str) -> String {
        format!(
            "{} {}",
            self.step_number
                .apply_to(format!("[{}/{}]", index + 1, total)),
            summary
        )
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stderr().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_formats_status_icons() {
        let theme = BoltrunTheme::plain();
        assert_eq!(theme.format_success("Complete"), "✓ Complete");
        assert_eq!(theme.format_warning("Caution"), "⚠ Caution");
        assert_eq!(theme.format_error("Failed"), "✗ Failed");
    }

    #[test]
    fn theme_formats_header() {
        let msg = BoltrunTheme::plain().format_header("basic");
        assert!(msg.contains("basic"));
        assert!(msg.contains("⚡"));
    }

    #[test]
    fn statement_counter_is_one_based() {
        let msg = BoltrunTheme::plain().format_statement(0, 6, "CALL db.dropDB()");
        assert_eq!(msg, "[1/6] CALL db.dropDB()");
    }

    #[test]
    fn colored_theme_formats_without_panic() {
        let theme = BoltrunTheme::default();
        let _ = theme.format_success("test");
        let _ = theme.query.apply_to("RETURN 1");
    }
}
