//! Sessionup CLI entry point.
//!
//! This binary provides the `sessionup` command for creating tmux sessions
//! with the standard window layout.

use clap::{CommandFactory, Parser};
use sessionup::cli::{Cli, Mode};
use sessionup::error::Result;
use sessionup::exec::{Executor, Recorder, SystemExecutor};
use sessionup::{BatchSummary, Orchestrator, SessionRequest, Settings, loader, logging, template};

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Main application logic. Returns whether every session ended up usable.
fn run() -> Result<bool> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let requests = match cli.mode() {
        Mode::Usage => {
            Cli::command().print_help()?;
            return Ok(true);
        }
        // The whole template is parsed before any tmux command runs.
        Mode::Template(path) => template::load_template(&path)?,
        Mode::Single(request) => vec![request],
    };

    let mut settings = loader::load_settings(cli.config.as_deref())?;
    if let Some(mode) = cli.match_mode() {
        settings.match_mode = mode;
    }

    let summary = if cli.dry_run {
        let exec = Recorder::echoing(settings.tmux.clone());
        create_sessions(exec, settings, &requests)?
    } else {
        let exec = SystemExecutor::new(settings.tmux.clone());
        create_sessions(exec, settings, &requests)?
    };

    tracing::info!(
        requested = requests.len(),
        created = summary.created(),
        "done"
    );
    Ok(summary.all_ok())
}

fn create_sessions<E: Executor>(
    exec: E,
    settings: Settings,
    requests: &[SessionRequest],
) -> Result<BatchSummary> {
    let stdout = std::io::stdout();
    let mut orchestrator = Orchestrator::new(exec, settings, stdout.lock());
    orchestrator.run_batch(requests)
}
