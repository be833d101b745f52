//! Command execution against the multiplexer binary.
//!
//! Every tmux interaction goes through the [`Executor`] trait, which spawns
//! exactly one process per call and hands back its exit status together with
//! the captured output. Judging that status is left to [`crate::tmux`].
//!
//! Two implementations are provided:
//!
//! - [`SystemExecutor`] runs the real binary.
//! - [`Recorder`] records argument vectors and answers like a minimal tmux
//!   server. It backs `--dry-run` and the test suites.

use crate::error::{Result, SessionupError};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::process::Command;

/// Exit status and captured text of one finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, or -1 if the process was terminated by a signal.
    pub status: i32,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl CommandOutput {
    /// A successful run printing `stdout`.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            status: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed run with exit code 1 and the given diagnostic.
    pub fn failed(stderr: impl Into<String>) -> Self {
        Self {
            status: 1,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Whether the command exited with status 0.
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Runs one multiplexer command per call.
pub trait Executor {
    /// Name of the binary commands are issued to, used in messages.
    fn program(&self) -> &str;

    /// Run the binary with `args`, blocking until it exits.
    ///
    /// # Errors
    ///
    /// Returns [`SessionupError::TmuxNotFound`] if the binary cannot be
    /// spawned, or [`SessionupError::IoError`] for other spawn failures.
    /// A non-zero exit is *not* an error at this layer.
    fn run(&self, args: &[&str]) -> Result<CommandOutput>;
}

/// Render a command line for logs and error messages.
///
/// Arguments containing whitespace or quotes are wrapped in single quotes.
pub fn command_line(program: &str, args: &[&str]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        if arg.is_empty() || arg.contains(|c: char| c.is_whitespace() || c == '\'' || c == '"') {
            line.push('\'');
            line.push_str(&arg.replace('\'', r"'\''"));
            line.push('\'');
        } else {
            line.push_str(arg);
        }
    }
    line
}

/// Executes commands by spawning the real multiplexer binary.
#[derive(Debug, Clone)]
pub struct SystemExecutor {
    binary: String,
}

impl SystemExecutor {
    /// Create an executor for the given binary (usually `"tmux"`).
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for SystemExecutor {
    fn default() -> Self {
        Self::new("tmux")
    }
}

impl Executor for SystemExecutor {
    fn program(&self) -> &str {
        &self.binary
    }

    fn run(&self, args: &[&str]) -> Result<CommandOutput> {
        tracing::debug!(command = %command_line(&self.binary, args), "dispatch");

        let output = Command::new(&self.binary).args(args).output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SessionupError::TmuxNotFound(self.binary.clone())
            } else {
                SessionupError::IoError(e)
            }
        })?;

        let result = CommandOutput {
            status: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        if !result.success() {
            tracing::debug!(status = result.status, stderr = %result.stderr.trim(), "non-zero exit");
        }
        Ok(result)
    }
}

/// Records commands instead of running them.
///
/// The recorder keeps a table of session names so that it answers
/// `list-sessions` the way a tmux server would: `new-session -s NAME` adds
/// `NAME`, and an empty table yields the "no server running" failure.
/// `split-window -P` echoes a pane index of 1. Any subcommand can be
/// overridden with [`Recorder::respond`].
#[derive(Debug, Default)]
pub struct Recorder {
    program: String,
    echo: bool,
    calls: RefCell<Vec<Vec<String>>>,
    sessions: RefCell<Vec<String>>,
    scripted: RefCell<HashMap<String, CommandOutput>>,
    fail_after: Cell<Option<usize>>,
}

impl Recorder {
    /// An empty recorder that stays silent.
    pub fn new() -> Self {
        Self {
            program: "tmux".to_string(),
            ..Self::default()
        }
    }

    /// A recorder that prints every command it receives to stdout.
    pub fn echoing(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            echo: true,
            ..Self::default()
        }
    }

    /// Seed the fake session table.
    pub fn with_sessions(self, names: &[&str]) -> Self {
        self.sessions
            .borrow_mut()
            .extend(names.iter().map(|n| n.to_string()));
        self
    }

    /// Answer every call to `subcommand` with `output`.
    pub fn respond(&self, subcommand: &str, output: CommandOutput) {
        self.scripted
            .borrow_mut()
            .insert(subcommand.to_string(), output);
    }

    /// Make every call after the first `n` recorded ones fail.
    pub fn fail_after(&self, n: usize) {
        self.fail_after.set(Some(n));
    }

    /// Recorded calls rendered as space-joined strings.
    pub fn lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.join(" ")).collect()
    }

    /// Recorded subcommand names (first argument of each call).
    pub fn subcommands(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| c.first().cloned())
            .collect()
    }

    /// Forget recorded calls, keeping the session table.
    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    fn simulate(&self, args: &[&str]) -> CommandOutput {
        match args.first().copied() {
            Some("list-sessions") => {
                let sessions = self.sessions.borrow();
                if sessions.is_empty() {
                    return CommandOutput::failed("no server running on /tmp/tmux-1000/default");
                }
                let formatted = args.contains(&"-F");
                let listing: Vec<String> = sessions
                    .iter()
                    .map(|name| {
                        if formatted {
                            name.clone()
                        } else {
                            format!("{}: 1 windows (created Sun Oct 18 09:00:00 2026)", name)
                        }
                    })
                    .collect();
                CommandOutput::ok(listing.join("\n") + "\n")
            }
            Some("new-session") => {
                let name = args
                    .iter()
                    .position(|a| *a == "-s")
                    .and_then(|i| args.get(i + 1));
                match name {
                    Some(name) => {
                        let mut sessions = self.sessions.borrow_mut();
                        if sessions.iter().any(|s| s == name) {
                            return CommandOutput::failed(format!("duplicate session: {}", name));
                        }
                        sessions.push(name.to_string());
                        CommandOutput::ok("")
                    }
                    None => CommandOutput::ok(""),
                }
            }
            Some("split-window") if args.contains(&"-P") => CommandOutput::ok("1\n"),
            _ => CommandOutput::ok(""),
        }
    }
}

impl Executor for Recorder {
    fn program(&self) -> &str {
        &self.program
    }

    fn run(&self, args: &[&str]) -> Result<CommandOutput> {
        if self.echo {
            println!("{}", command_line(&self.program, args));
        }

        let seen = self.calls.borrow().len();
        self.calls
            .borrow_mut()
            .push(args.iter().map(|a| a.to_string()).collect());

        if let Some(limit) = self.fail_after.get() {
            if seen >= limit {
                return Ok(CommandOutput::failed("simulated failure"));
            }
        }

        if let Some(sub) = args.first() {
            if let Some(out) = self.scripted.borrow().get(*sub) {
                return Ok(out.clone());
            }
        }

        Ok(self.simulate(args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_quotes_whitespace() {
        assert_eq!(
            command_line("tmux", &["send-keys", "-t", "=demo:code", "cd /tmp/x", "Enter"]),
            "tmux send-keys -t =demo:code 'cd /tmp/x' Enter"
        );
        assert_eq!(command_line("tmux", &["a'b c"]), r"tmux 'a'\''b c'");
    }

    #[test]
    fn test_recorder_tracks_sessions() {
        let rec = Recorder::new();
        let out = rec.run(&["list-sessions"]).unwrap();
        assert!(!out.success());

        rec.run(&["new-session", "-d", "-s", "demo"]).unwrap();
        let out = rec.run(&["list-sessions", "-F", "#{session_name}"]).unwrap();
        assert_eq!(out.stdout, "demo\n");

        let dup = rec.run(&["new-session", "-d", "-s", "demo"]).unwrap();
        assert_eq!(dup.stderr, "duplicate session: demo");
        assert_eq!(rec.subcommands().len(), 4);
    }

    #[test]
    fn test_recorder_scripted_and_failures() {
        let rec = Recorder::new();
        rec.respond("select-window", CommandOutput::failed("can't find window"));
        assert!(!rec.run(&["select-window", "-t", "x"]).unwrap().success());
        assert!(rec.run(&["send-keys"]).unwrap().success());

        rec.fail_after(2);
        assert!(!rec.run(&["send-keys"]).unwrap().success());
    }

    #[test]
    fn test_system_executor_missing_binary() {
        let exec = SystemExecutor::new("sessionup-definitely-not-a-binary");
        let err = exec.run(&["list-sessions"]).unwrap_err();
        assert!(matches!(err, SessionupError::TmuxNotFound(_)));
    }
}
