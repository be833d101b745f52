//! Command-line interface for sessionup.
//!
//! Parses arguments using clap and provides the [`Cli`] struct containing
//! all user-specified options.

use crate::config::MatchMode;
use crate::orchestrator::SessionRequest;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for sessionup.
///
/// # Examples
///
/// ```bash
/// # Create one session
/// sessionup -n api -p ~/src/api
///
/// # Create every session listed in a template
/// sessionup -t sessions.json
///
/// # Show the tmux commands without running them
/// sessionup -t sessions.json --dry-run
/// ```
#[derive(Parser, Debug)]
#[command(name = "sessionup")]
#[command(version)]
#[command(about = "Create TMUX sessions based on JSON template or command line arguments.")]
#[command(long_about = "Create TMUX sessions based on JSON template or command line arguments.\n\n\
    Every session gets a 'code' window, a 'src' window split into three panes\n\
    and a 'notya' window, all starting in the session's working directory.")]
pub struct Cli {
    /// Path to JSON template file.
    ///
    /// The template is an array of `{"session-name": "path"}` objects.
    #[arg(short, long, value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Session name.
    #[arg(short, long, value_name = "NAME")]
    pub name: Option<String>,

    /// Path for the session.
    #[arg(short, long, value_name = "DIR")]
    pub path: Option<String>,

    /// Config file (defaults to ~/.config/sessionup/config.toml).
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the tmux commands instead of running them.
    #[arg(long)]
    pub dry_run: bool,

    /// Only treat a session as existing if its name matches exactly.
    #[arg(long, conflicts_with = "substring")]
    pub exact: bool,

    /// Treat a session as existing if its name occurs anywhere in the listing.
    #[arg(long)]
    pub substring: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// What the invocation asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Create the sessions listed in a template file.
    Template(PathBuf),
    /// Create a single session.
    Single(SessionRequest),
    /// Nothing usable was given; print help.
    Usage,
}

impl Cli {
    /// Determine the mode from the flags.
    ///
    /// A template wins over `-n`/`-p`. `-n` and `-p` only count when both
    /// are present.
    pub fn mode(&self) -> Mode {
        if let Some(template) = &self.template {
            return Mode::Template(template.clone());
        }
        match (&self.name, &self.path) {
            (Some(name), Some(path)) => Mode::Single(SessionRequest::new(name, path)),
            _ => Mode::Usage,
        }
    }

    /// Match mode requested on the command line, if any.
    pub fn match_mode(&self) -> Option<MatchMode> {
        if self.exact {
            Some(MatchMode::Exact)
        } else if self.substring {
            Some(MatchMode::Substring)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("sessionup").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_single_session_needs_name_and_path() {
        assert_eq!(
            parse(&["-n", "demo", "-p", "/tmp/x"]).mode(),
            Mode::Single(SessionRequest::new("demo", "/tmp/x"))
        );
        assert_eq!(parse(&["-n", "demo"]).mode(), Mode::Usage);
        assert_eq!(parse(&["--path", "/tmp/x"]).mode(), Mode::Usage);
        assert_eq!(parse(&[]).mode(), Mode::Usage);
    }

    #[test]
    fn test_template_takes_precedence() {
        assert_eq!(
            parse(&["-t", "s.json", "-n", "demo", "-p", "/tmp"]).mode(),
            Mode::Template(PathBuf::from("s.json"))
        );
    }

    #[test]
    fn test_match_mode_flags() {
        assert_eq!(parse(&[]).match_mode(), None);
        assert_eq!(parse(&["--substring"]).match_mode(), Some(MatchMode::Substring));
        assert!(Cli::try_parse_from(["sessionup", "--exact", "--substring"]).is_err());
    }

    #[test]
    fn test_verbose_counts() {
        assert_eq!(parse(&["-vv"]).verbose, 2);
    }
}
