//! Error types for sessionup.
//!
//! All errors are represented by [`SessionupError`], which covers
//! configuration and template problems as well as tmux failures.

use std::path::PathBuf;
use thiserror::Error;

/// All possible errors that can occur in sessionup.
#[derive(Error, Debug)]
pub enum SessionupError {
    /// Config file does not exist at the given path.
    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),

    /// Could not determine the user's config directory.
    #[error("Could not determine config directory")]
    NoConfigDir,

    /// Failed to read a file from disk.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing failed.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Template file does not exist.
    #[error("Template file not found: {0}")]
    TemplateNotFound(PathBuf),

    /// Template is not valid JSON.
    #[error("Error reading JSON file: {0}")]
    TemplateParse(#[from] serde_json::Error),

    /// Template is valid JSON but not an array of name -> path mappings.
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    /// The configured window layout cannot be built.
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    /// Session name is empty or contains a tmux target separator.
    #[error("Invalid session name: '{0}'")]
    InvalidSessionName(String),

    /// The multiplexer binary could not be spawned.
    #[error("tmux binary not found: {0}")]
    TmuxNotFound(String),

    /// A tmux command exited with a non-zero status.
    #[error("`{command}` failed (exit {status}): {stderr}")]
    CommandFailed {
        /// The command line that was run.
        command: String,
        /// Exit code, or -1 when killed by a signal.
        status: i32,
        /// Trimmed stderr of the failing command.
        stderr: String,
    },
}

/// Convenient Result type alias for sessionup operations.
pub type Result<T> = std::result::Result<T, SessionupError>;
