//! Session orchestration.
//!
//! For every requested session the orchestrator reports progress, checks
//! whether the session already exists, and builds the layout if it does not.
//! Requests are handled strictly in order, and a failure only affects the
//! request it belongs to.
//!
//! The existence check and the creation are not atomic. If another process
//! creates the same session in between, `new-session` fails with a
//! duplicate-session error and the request is reported as failed.

use crate::config::Settings;
use crate::error::{Result, SessionupError};
use crate::exec::Executor;
use crate::layout::{LayoutBuilder, StepFailure};
use crate::report::Reporter;
use crate::tmux::Tmux;
use std::io::Write;

/// One session to create: its name and the directory every window starts in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRequest {
    /// Session name, unique within the tmux server.
    pub name: String,
    /// Working directory; a leading `~` is expanded.
    pub working_directory: String,
}

impl SessionRequest {
    /// Create a request.
    pub fn new(name: impl Into<String>, working_directory: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            working_directory: working_directory.into(),
        }
    }

    /// Reject names tmux cannot address as a session target.
    fn validate(&self) -> Result<()> {
        let name = self.name.as_str();
        if name.trim().is_empty() || name.contains([':', '.']) {
            return Err(SessionupError::InvalidSessionName(self.name.clone()));
        }
        Ok(())
    }
}

/// What happened to one request.
#[derive(Debug)]
pub enum Outcome {
    /// The session was created with the full layout.
    Created,
    /// The session was created but some layout steps failed.
    CreatedWithWarnings(Vec<StepFailure>),
    /// A session of that name was already running; nothing was done.
    AlreadyExists,
    /// The request could not be completed.
    Failed(SessionupError),
}

impl Outcome {
    /// Whether the request ended in a usable session.
    pub fn is_ok(&self) -> bool {
        !matches!(self, Outcome::Failed(_))
    }
}

/// Outcomes of a batch, in request order.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// `(session name, outcome)` pairs.
    pub results: Vec<(String, Outcome)>,
}

impl BatchSummary {
    /// Whether every request ended in a usable session.
    pub fn all_ok(&self) -> bool {
        self.results.iter().all(|(_, outcome)| outcome.is_ok())
    }

    /// Number of sessions created by this batch.
    pub fn created(&self) -> usize {
        self.results
            .iter()
            .filter(|(_, o)| matches!(o, Outcome::Created | Outcome::CreatedWithWarnings(_)))
            .count()
    }
}

/// Drives existence checks and layout builds for session requests.
pub struct Orchestrator<E: Executor, W: Write> {
    tmux: Tmux<E>,
    settings: Settings,
    reporter: Reporter<W>,
}

impl<E: Executor, W: Write> Orchestrator<E, W> {
    /// Create an orchestrator dispatching through `exec` and reporting to `out`.
    pub fn new(exec: E, settings: Settings, out: W) -> Self {
        let reporter = Reporter::new(out, settings.progress);
        Self {
            tmux: Tmux::new(exec),
            settings,
            reporter,
        }
    }

    /// The tmux client.
    pub fn tmux(&self) -> &Tmux<E> {
        &self.tmux
    }

    /// The reporter.
    pub fn reporter(&self) -> &Reporter<W> {
        &self.reporter
    }

    /// Handle a single request.
    ///
    /// Tmux and validation errors are folded into [`Outcome::Failed`].
    ///
    /// # Errors
    ///
    /// Returns an error only if the report cannot be written.
    pub fn run_one(&mut self, request: &SessionRequest) -> Result<Outcome> {
        let name = request.name.as_str();
        self.reporter.start(name)?;

        let outcome = match self.attempt(request) {
            Ok(outcome) => outcome,
            Err(error) => Outcome::Failed(error),
        };

        match &outcome {
            Outcome::Created => {
                tracing::info!(session = name, "created");
                self.reporter.created(name)?;
            }
            Outcome::CreatedWithWarnings(failures) => {
                tracing::info!(session = name, failed_steps = failures.len(), "created with failures");
                let steps: Vec<String> = failures.iter().map(|f| f.step.clone()).collect();
                self.reporter.created_with_warnings(name, &steps)?;
            }
            Outcome::AlreadyExists => {
                tracing::info!(session = name, "already exists");
                self.reporter.exists(name)?;
            }
            Outcome::Failed(error) => {
                tracing::error!(session = name, %error, "failed");
                self.reporter.failed(name, error)?;
            }
        }
        Ok(outcome)
    }

    /// Handle requests in order; each is fully attempted before the next.
    ///
    /// # Errors
    ///
    /// Returns an error only if the report cannot be written.
    pub fn run_batch(&mut self, requests: &[SessionRequest]) -> Result<BatchSummary> {
        let mut summary = BatchSummary::default();
        for request in requests {
            let outcome = self.run_one(request)?;
            summary.results.push((request.name.clone(), outcome));
        }
        Ok(summary)
    }

    fn attempt(&self, request: &SessionRequest) -> Result<Outcome> {
        request.validate()?;

        if self
            .tmux
            .has_session(&request.name, self.settings.match_mode)?
        {
            return Ok(Outcome::AlreadyExists);
        }

        let builder = LayoutBuilder::new(&self.tmux, &self.settings.layout, self.settings.on_error);
        let report = builder.build(&request.name, &request.working_directory)?;
        if report.is_clean() {
            Ok(Outcome::Created)
        } else {
            Ok(Outcome::CreatedWithWarnings(report.failures))
        }
    }
}
