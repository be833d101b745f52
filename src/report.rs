//! Console output for session attempts.

use crate::config::Progress;
use std::io::{self, Write};

const SEPARATOR: &str = "-------------------------------";

/// Writes the progress indicator and outcome lines for each session.
#[derive(Debug)]
pub struct Reporter<W: Write> {
    out: W,
    progress: Progress,
}

impl<W: Write> Reporter<W> {
    /// Report to `out`, pausing between progress dots as configured.
    pub fn new(out: W, progress: Progress) -> Self {
        Self { out, progress }
    }

    /// The underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Print the separator and `Creating TMUX session 'name'...`.
    pub fn start(&mut self, name: &str) -> io::Result<()> {
        writeln!(self.out, "{}", SEPARATOR)?;
        write!(self.out, "Creating TMUX session '{}'", name)?;
        for _ in 0..self.progress.ticks {
            write!(self.out, ".")?;
            self.out.flush()?;
            if !self.progress.interval.is_zero() {
                std::thread::sleep(self.progress.interval);
            }
        }
        writeln!(self.out)
    }

    /// The session was built.
    pub fn created(&mut self, name: &str) -> io::Result<()> {
        writeln!(self.out, "Successfully created session '{}'.", name)
    }

    /// The session was built but some steps failed.
    pub fn created_with_warnings(&mut self, name: &str, failed_steps: &[String]) -> io::Result<()> {
        writeln!(
            self.out,
            "Created session '{}' with {} failed step(s): {}",
            name,
            failed_steps.len(),
            failed_steps.join(", ")
        )
    }

    /// A session of that name was already running.
    pub fn exists(&mut self, name: &str) -> io::Result<()> {
        writeln!(self.out, "A TMUX session named '{}' already exists.", name)
    }

    /// Building the session failed.
    pub fn failed(&mut self, name: &str, error: &dyn std::fmt::Display) -> io::Result<()> {
        writeln!(self.out, "Failed to create session '{}': {}", name, error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_progress_line() {
        let progress = Progress {
            ticks: 3,
            interval: Duration::ZERO,
        };
        let mut reporter = Reporter::new(Vec::new(), progress);
        reporter.start("demo").unwrap();
        reporter.created("demo").unwrap();

        let text = String::from_utf8(reporter.get_ref().clone()).unwrap();
        assert_eq!(
            text,
            "-------------------------------\n\
             Creating TMUX session 'demo'...\n\
             Successfully created session 'demo'.\n"
        );
    }
}
