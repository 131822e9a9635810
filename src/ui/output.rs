//! Output verbosity.

use std::str::FromStr;

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Status plus each statement's query text.
    Verbose,
    /// Progress and status.
    #[default]
    Normal,
    /// Spinners and the final status only.
    Quiet,
    /// Nothing except errors and emitted records.
    Silent,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "verbose" => Ok(Self::Verbose),
            "normal" => Ok(Self::Normal),
            "quiet" => Ok(Self::Quiet),
            "silent" => Ok(Self::Silent),
            _ => Err(format!("unknown output mode: {}", s)),
        }
    }
}

impl From<crate::config::schema::OutputMode> for OutputMode {
    fn from(config_mode: crate::config::schema::OutputMode) -> Self {
        use crate::config::schema::OutputMode as Config;
        match config_mode {
            Config::Verbose => Self::Verbose,
            Config::Normal => Self::Normal,
            Config::Quiet => Self::Quiet,
            Config::Silent => Self::Silent,
        }
    }
}

impl OutputMode {
    /// Whether statement query text is shown as it runs.
    pub fn shows_queries(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    pub fn shows_spinners(&self) -> bool {
        !matches!(self, Self::Silent)
    }

    /// Whether headers and status lines are shown.
    pub fn shows_status(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }
}
