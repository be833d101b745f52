//! Configuration types for sessionup.
//!
//! The optional TOML config file tunes how sessions are built. Every key is
//! optional and the built-in defaults reproduce the standard layout.
//!
//! # Config Format
//!
//! ```toml
//! [defaults]
//! tmux = "tmux"
//! match = "exact"          # or "substring"
//! on_error = "abort"       # or "continue"
//! progress_ticks = 2
//! progress_interval_ms = 1000
//!
//! [layout]
//! focus = "code"
//! windows = [
//!     { name = "code" },
//!     { name = "src", panes = "main-and-stack" },
//!     { name = "notya" },
//! ]
//! ```

use crate::error::{Result, SessionupError};
use crate::layout::{LayoutPlan, PaneArrangement, WindowPlan};
use serde::Deserialize;
use std::time::Duration;

/// How the existence check compares a name against running sessions.
#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// The name must equal one listed session name.
    #[default]
    Exact,
    /// The name may occur anywhere in the `list-sessions` text.
    Substring,
}

/// What the layout builder does when a tmux step fails.
#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop building the session at the first failed step.
    #[default]
    Abort,
    /// Log the failure and carry on with the next step.
    Continue,
}

/// Global settings from the `[defaults]` table.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct Defaults {
    /// Multiplexer binary to invoke.
    pub tmux: Option<String>,
    /// Session name matching mode.
    #[serde(rename = "match")]
    pub match_mode: Option<MatchMode>,
    /// Step failure policy.
    pub on_error: Option<FailurePolicy>,
    /// Number of progress dots printed before each session.
    pub progress_ticks: Option<u32>,
    /// Pause after each progress dot, in milliseconds.
    pub progress_interval_ms: Option<u64>,
}

/// A window entry in the `[layout]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct WindowDef {
    /// Window name.
    pub name: String,
    /// Pane arrangement (defaults to a single pane).
    #[serde(default)]
    pub panes: PaneArrangement,
}

/// The `[layout]` table.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct LayoutConfig {
    /// Window selected once the layout is built.
    pub focus: Option<String>,
    /// Windows in creation order; the first one is the renamed default window.
    pub windows: Option<Vec<WindowDef>>,
}

/// Top-level configuration structure.
///
/// Parsed from `~/.config/sessionup/config.toml` (or XDG equivalent).
#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    /// Global default settings.
    #[serde(default)]
    pub defaults: Defaults,
    /// Layout overrides.
    #[serde(default)]
    pub layout: LayoutConfig,
}

/// Progress indicator timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Number of dots.
    pub ticks: u32,
    /// Pause after each dot.
    pub interval: Duration,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            ticks: 2,
            interval: Duration::from_secs(1),
        }
    }
}

/// Fully resolved runtime settings passed into the orchestrator.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Multiplexer binary.
    pub tmux: String,
    /// Existence check matching mode.
    pub match_mode: MatchMode,
    /// Step failure policy.
    pub on_error: FailurePolicy,
    /// Progress indicator timing.
    pub progress: Progress,
    /// Windows and panes to build.
    pub layout: LayoutPlan,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tmux: "tmux".to_string(),
            match_mode: MatchMode::default(),
            on_error: FailurePolicy::default(),
            progress: Progress::default(),
            layout: LayoutPlan::default(),
        }
    }
}

impl Config {
    /// Parse config from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `toml::de::Error` if the TOML is malformed or doesn't match
    /// the expected structure.
    pub fn from_str(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Resolve the file's values on top of the built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SessionupError::InvalidLayout`] if the `[layout]` table
    /// describes a layout that cannot be built.
    pub fn settings(&self) -> Result<Settings> {
        let base = Settings::default();
        let progress = Progress {
            ticks: self.defaults.progress_ticks.unwrap_or(base.progress.ticks),
            interval: self
                .defaults
                .progress_interval_ms
                .map(Duration::from_millis)
                .unwrap_or(base.progress.interval),
        };

        Ok(Settings {
            tmux: self.defaults.tmux.clone().unwrap_or(base.tmux),
            match_mode: self.defaults.match_mode.unwrap_or(base.match_mode),
            on_error: self.defaults.on_error.unwrap_or(base.on_error),
            progress,
            layout: self.layout_plan(base.layout)?,
        })
    }

    fn layout_plan(&self, base: LayoutPlan) -> Result<LayoutPlan> {
        let windows = match &self.layout.windows {
            Some(defs) => defs
                .iter()
                .map(|d| WindowPlan::new(&d.name, d.panes))
                .collect(),
            None => base.windows,
        };
        let focus = match &self.layout.focus {
            Some(focus) => focus.clone(),
            // A custom window list without `focus` returns to its first window.
            None if self.layout.windows.is_some() => windows
                .first()
                .map(|w| w.name.clone())
                .unwrap_or_default(),
            None => base.focus,
        };

        let plan = LayoutPlan { windows, focus };
        plan.validate().map_err(SessionupError::InvalidLayout)?;
        Ok(plan)
    }
}
