//! Window and pane layout construction.
//!
//! A [`LayoutPlan`] lists the windows of a session in creation order. The
//! default plan is the standard three-window layout:
//!
//! | # | window  | panes                                   |
//! |---|---------|-----------------------------------------|
//! | 1 | `code`  | one                                     |
//! | 2 | `src`   | one left, two stacked on the right      |
//! | 3 | `notya` | one                                     |
//!
//! with `code` selected at the end. [`LayoutBuilder`] turns a plan into the
//! tmux command sequence for one session.

use crate::config::FailurePolicy;
use crate::error::{Result, SessionupError};
use crate::exec::Executor;
use crate::expand::{cd_command, expand_home};
use crate::tmux::{Split, Target, Tmux};
use serde::Deserialize;
use std::collections::HashSet;

/// Pane arrangement inside a window.
#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PaneArrangement {
    /// A single pane.
    #[default]
    Single,
    /// A horizontal split, then a vertical split of the second pane:
    /// one pane on the left and two stacked on the right.
    MainAndStack,
}

/// One window of a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowPlan {
    /// Window name.
    pub name: String,
    /// How the window is split.
    pub panes: PaneArrangement,
}

impl WindowPlan {
    /// Create a window plan.
    pub fn new(name: &str, panes: PaneArrangement) -> Self {
        Self {
            name: name.to_string(),
            panes,
        }
    }
}

/// Windows to build for every session, plus the window focused afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPlan {
    /// Windows in creation order. The first renames tmux's default window.
    pub windows: Vec<WindowPlan>,
    /// Name of the window selected once all windows exist.
    pub focus: String,
}

impl Default for LayoutPlan {
    fn default() -> Self {
        Self {
            windows: vec![
                WindowPlan::new("code", PaneArrangement::Single),
                WindowPlan::new("src", PaneArrangement::MainAndStack),
                WindowPlan::new("notya", PaneArrangement::Single),
            ],
            focus: "code".to_string(),
        }
    }
}

impl LayoutPlan {
    /// Check that the plan can be addressed with tmux targets.
    ///
    /// Window names must be non-empty, unique, free of `:` and `.`, and not
    /// purely numeric (tmux would read them as indices). `focus` must name
    /// one of the windows.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.windows.is_empty() {
            return Err("layout needs at least one window".into());
        }
        let mut seen = HashSet::new();
        for window in &self.windows {
            let name = window.name.as_str();
            if name.trim().is_empty() {
                return Err("window names must not be empty".into());
            }
            if name.contains([':', '.']) {
                return Err(format!("window name '{}' contains ':' or '.'", name));
            }
            if name.chars().all(|c| c.is_ascii_digit()) {
                return Err(format!("window name '{}' is numeric", name));
            }
            if !seen.insert(name) {
                return Err(format!("duplicate window name '{}'", name));
            }
        }
        if !seen.contains(self.focus.as_str()) {
            return Err(format!("focus window '{}' is not in the layout", self.focus));
        }
        Ok(())
    }
}

/// A step that failed while building under [`FailurePolicy::Continue`].
#[derive(Debug)]
pub struct StepFailure {
    /// Short description of the step, e.g. `split-window src`.
    pub step: String,
    /// The error tmux reported.
    pub error: SessionupError,
}

/// Result of a completed build.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Steps that failed but were skipped over.
    pub failures: Vec<StepFailure>,
}

impl BuildReport {
    /// Whether every step succeeded.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Applies the failure policy to each step result.
struct Steps {
    policy: FailurePolicy,
    report: BuildReport,
}

impl Steps {
    fn check<T>(&mut self, step: impl Into<String>, result: Result<T>) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(error) => match self.policy {
                FailurePolicy::Abort => Err(error),
                FailurePolicy::Continue => {
                    let step = step.into();
                    tracing::warn!(%step, %error, "step failed, continuing");
                    self.report.failures.push(StepFailure { step, error });
                    Ok(None)
                }
            },
        }
    }
}

/// Builds a [`LayoutPlan`] inside a new session.
pub struct LayoutBuilder<'a, E: Executor> {
    tmux: &'a Tmux<E>,
    plan: &'a LayoutPlan,
    policy: FailurePolicy,
}

impl<'a, E: Executor> LayoutBuilder<'a, E> {
    /// Create a builder for `plan` issuing commands through `tmux`.
    pub fn new(tmux: &'a Tmux<E>, plan: &'a LayoutPlan, policy: FailurePolicy) -> Self {
        Self { tmux, plan, policy }
    }

    /// Create `session` and build every window, navigating each to `dir`.
    ///
    /// The session must not exist yet. Nothing is rolled back on failure.
    ///
    /// # Errors
    ///
    /// Failure to create the session is always returned. Later failures are
    /// returned under [`FailurePolicy::Abort`] and collected in the
    /// [`BuildReport`] under [`FailurePolicy::Continue`].
    pub fn build(&self, session: &str, dir: &str) -> Result<BuildReport> {
        let dir = expand_home(dir);
        let mut steps = Steps {
            policy: self.policy,
            report: BuildReport::default(),
        };

        // Without the session no later step can succeed.
        self.tmux.new_session(session)?;

        for (i, window) in self.plan.windows.iter().enumerate() {
            if i == 0 {
                steps.check(
                    format!("rename-window {}", window.name),
                    self.tmux.rename_window(&Target::current_window(session), &window.name),
                )?;
            } else {
                steps.check(
                    format!("new-window {}", window.name),
                    self.tmux.new_window(session, &window.name),
                )?;
            }
            self.navigate(&mut steps, session, &window.name, &dir)?;

            if window.panes == PaneArrangement::MainAndStack {
                self.split_main_and_stack(&mut steps, session, &window.name, &dir)?;
            }
        }

        steps.check(
            format!("select-window {}", self.plan.focus),
            self.tmux
                .select_window(&Target::window(session, &self.plan.focus)),
        )?;

        Ok(steps.report)
    }

    fn navigate(&self, steps: &mut Steps, session: &str, window: &str, dir: &str) -> Result<()> {
        let target = Target::window(session, window);
        steps.check(
            format!("cd in {}", window),
            self.tmux.send_keys(&target, &cd_command(dir)),
        )?;
        steps.check(
            format!("clear in {}", window),
            self.tmux.send_keys(&target, "clear"),
        )?;
        Ok(())
    }

    fn split_main_and_stack(&self, steps: &mut Steps, session: &str, window: &str, dir: &str) -> Result<()> {
        let target = Target::window(session, window);
        let second = steps
            .check(
                format!("split-window -h {}", window),
                self.tmux.split_window(&target, Split::Horizontal, Some(dir)),
            )?
            .flatten()
            .unwrap_or(1);

        let right = target.pane(second);
        steps.check(
            format!("select-pane {}.{}", window, second),
            self.tmux.select_pane(&right),
        )?;
        steps.check(
            format!("split-window -v {}.{}", window, second),
            self.tmux.split_window(&right, Split::Vertical, Some(dir)),
        )?;
        Ok(())
    }
}
