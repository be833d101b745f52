//! Tmux session, window and pane commands.
//!
//! [`Tmux`] wraps an [`Executor`] and exposes one method per tmux subcommand
//! sessionup needs. Every method except the session listing treats a
//! non-zero exit as [`SessionupError::CommandFailed`].
//!
//! # Targets
//!
//! Targets are rendered as `=session:window.pane`, or `=session:` for the
//! session's current window. The leading `=` makes tmux match the session
//! name exactly, so `-t =tx:` never resolves to `tx2`. The colon keeps
//! window commands from matching a window of the caller's own session.

use crate::config::MatchMode;
use crate::error::{Result, SessionupError};
use crate::exec::{CommandOutput, Executor, command_line};
use std::fmt;

/// Direction passed to `split-window`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split {
    /// Side-by-side panes (`-h`).
    Horizontal,
    /// Stacked panes (`-v`).
    Vertical,
}

impl Split {
    fn flag(self) -> &'static str {
        match self {
            Split::Horizontal => "-h",
            Split::Vertical => "-v",
        }
    }
}

/// A tmux target: a session, optionally narrowed to a window and pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    session: String,
    window: Option<String>,
    pane: Option<u32>,
}

impl Target {
    /// Target the current window of a session.
    ///
    /// Rendered as `=name:`. Without the colon tmux would first look for a
    /// window called `name` in the caller's own session.
    pub fn current_window(name: &str) -> Self {
        Self {
            session: name.to_string(),
            window: None,
            pane: None,
        }
    }

    /// Target a window of a session by name or index.
    pub fn window(session: &str, window: &str) -> Self {
        Self {
            session: session.to_string(),
            window: Some(window.to_string()),
            pane: None,
        }
    }

    /// Narrow this target to a pane index.
    pub fn pane(mut self, index: u32) -> Self {
        self.pane = Some(index);
        self
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "={}:", self.session)?;
        if let Some(window) = &self.window {
            write!(f, "{}", window)?;
            if let Some(pane) = self.pane {
                write!(f, ".{}", pane)?;
            }
        }
        Ok(())
    }
}

/// Tmux command client.
#[derive(Debug)]
pub struct Tmux<E: Executor> {
    exec: E,
}

impl<E: Executor> Tmux<E> {
    /// Create a client that dispatches through `exec`.
    pub fn new(exec: E) -> Self {
        Self { exec }
    }

    /// The underlying executor.
    pub fn executor(&self) -> &E {
        &self.exec
    }

    /// Run a command and fail on a non-zero exit.
    fn run(&self, args: &[&str]) -> Result<CommandOutput> {
        let output = self.exec.run(args)?;
        if !output.success() {
            return Err(SessionupError::CommandFailed {
                command: command_line(self.exec.program(), args),
                status: output.status,
                stderr: output.stderr.trim().to_string(),
            });
        }
        Ok(output)
    }

    /// Names of all sessions, one per line of `list-sessions -F`.
    ///
    /// A failing listing (typically "no server running") yields an empty list.
    pub fn list_sessions(&self) -> Result<Vec<String>> {
        let output = self
            .exec
            .run(&["list-sessions", "-F", "#{session_name}"])?;
        if !output.success() {
            return Ok(Vec::new());
        }
        Ok(output
            .stdout
            .lines()
            .map(|line| line.trim_end().to_string())
            .filter(|line| !line.is_empty())
            .collect())
    }

    /// The unformatted `list-sessions` text, whatever the exit status.
    pub fn list_sessions_raw(&self) -> Result<String> {
        Ok(self.exec.run(&["list-sessions"])?.stdout)
    }

    /// Check whether a session called `name` exists.
    ///
    /// [`MatchMode::Substring`] reproduces the loose check where `name` only
    /// has to occur somewhere in the listing, so `tx` matches `tx2`.
    pub fn has_session(&self, name: &str, mode: MatchMode) -> Result<bool> {
        let found = match mode {
            MatchMode::Exact => self.list_sessions()?.iter().any(|s| s == name),
            MatchMode::Substring => self.list_sessions_raw()?.contains(name),
        };
        tracing::debug!(session = name, ?mode, found, "existence check");
        Ok(found)
    }

    /// Create a detached session.
    pub fn new_session(&self, name: &str) -> Result<()> {
        self.run(&["new-session", "-d", "-s", name])?;
        Ok(())
    }

    /// Rename the window at `target`.
    pub fn rename_window(&self, target: &Target, name: &str) -> Result<()> {
        let target = target.to_string();
        self.run(&["rename-window", "-t", &target, name])?;
        Ok(())
    }

    /// Type `text` into `target` followed by Enter.
    pub fn send_keys(&self, target: &Target, text: &str) -> Result<()> {
        let target = target.to_string();
        self.run(&["send-keys", "-t", &target, text, "Enter"])?;
        Ok(())
    }

    /// Create a named window in `session`. The new window becomes active.
    pub fn new_window(&self, session: &str, name: &str) -> Result<()> {
        let target = Target::current_window(session).to_string();
        self.run(&["new-window", "-t", &target, "-n", name])?;
        Ok(())
    }

    /// Split the pane at `target`, optionally starting the new pane in `dir`.
    ///
    /// Returns the index of the new pane as reported by tmux, or `None` if
    /// the output could not be parsed.
    pub fn split_window(&self, target: &Target, split: Split, dir: Option<&str>) -> Result<Option<u32>> {
        let target = target.to_string();
        let mut args = vec!["split-window", split.flag(), "-t", target.as_str()];
        if let Some(dir) = dir {
            args.push("-c");
            args.push(dir);
        }
        args.extend(["-P", "-F", "#{pane_index}"]);

        let output = self.run(&args)?;
        Ok(output.stdout.trim().parse().ok())
    }

    /// Focus a pane.
    pub fn select_pane(&self, target: &Target) -> Result<()> {
        let target = target.to_string();
        self.run(&["select-pane", "-t", &target])?;
        Ok(())
    }

    /// Make a window the session's current window.
    pub fn select_window(&self, target: &Target) -> Result<()> {
        let target = target.to_string();
        self.run(&["select-window", "-t", &target])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::Recorder;

    #[test]
    fn test_target_display() {
        assert_eq!(Target::current_window("demo").to_string(), "=demo:");
        assert_eq!(Target::window("demo", "src").to_string(), "=demo:src");
        assert_eq!(Target::window("demo", "src").pane(1).to_string(), "=demo:src.1");
    }

    #[test]
    fn test_window_commands_target_the_named_session() {
        let tmux = Tmux::new(Recorder::new());
        tmux.rename_window(&Target::current_window("work"), "code").unwrap();
        tmux.new_window("work", "src").unwrap();
        assert_eq!(
            tmux.executor().lines(),
            vec!["rename-window -t =work: code", "new-window -t =work: -n src"]
        );
    }

    #[test]
    fn test_has_session_exact_vs_substring() {
        let tmux = Tmux::new(Recorder::new().with_sessions(&["tx2"]));
        assert!(!tmux.has_session("tx", MatchMode::Exact).unwrap());
        assert!(tmux.has_session("tx", MatchMode::Substring).unwrap());
        assert!(tmux.has_session("tx2", MatchMode::Exact).unwrap());
    }

    #[test]
    fn test_has_session_without_server() {
        let tmux = Tmux::new(Recorder::new());
        assert!(!tmux.has_session("demo", MatchMode::Exact).unwrap());
        assert!(!tmux.has_session("demo", MatchMode::Substring).unwrap());
    }

    #[test]
    fn test_non_zero_exit_is_command_failed() {
        let rec = Recorder::new();
        rec.respond("select-window", CommandOutput::failed("can't find window: code\n"));
        let tmux = Tmux::new(rec);

        let err = tmux
            .select_window(&Target::window("demo", "code"))
            .unwrap_err();
        match err {
            SessionupError::CommandFailed { command, status, stderr } => {
                assert_eq!(command, "tmux select-window -t =demo:code");
                assert_eq!(status, 1);
                assert_eq!(stderr, "can't find window: code");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_split_window_reports_pane_index() {
        let tmux = Tmux::new(Recorder::new());
        let pane = tmux
            .split_window(&Target::window("demo", "src"), Split::Horizontal, Some("/tmp/x"))
            .unwrap();
        assert_eq!(pane, Some(1));
        assert_eq!(
            tmux.executor().lines(),
            vec!["split-window -h -t =demo:src -c /tmp/x -P -F #{pane_index}"]
        );
    }
}
