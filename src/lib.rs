//! # Sessionup
//!
//! Creates tmux sessions with a fixed window and pane layout.
//!
//! Every session gets three windows, all starting in the session's working
//! directory:
//!
//! - `code`: the default window, renamed
//! - `src`: split into one left pane and two stacked right panes
//! - `notya`: a single pane
//!
//! and `code` is selected when the build finishes. Sessions come from the
//! command line (`-n NAME -p DIR`) or from a JSON template listing several
//! `{"name": "dir"}` entries. Sessions that already exist are left alone.
//!
//! ## Quick Example
//!
//! ```json
//! [
//!     { "api": "~/src/api" },
//!     { "web": "~/src/web" }
//! ]
//! ```
//!
//! ## Architecture
//!
//! The crate is organized into these modules:
//!
//! - [`cli`]: Command-line argument parsing with clap
//! - [`config`]: TOML configuration and resolved [`Settings`]
//! - [`loader`]: Config file discovery and loading
//! - [`template`]: JSON template parsing
//! - [`orchestrator`]: Per-session existence check and build
//! - [`layout`]: The window/pane layout and its builder
//! - [`tmux`]: Tmux subcommands
//! - [`exec`]: Process execution and the recording executor
//! - [`expand`]: `~` expansion and shell quoting
//! - [`report`]: Console output
//! - [`logging`]: `tracing` setup
//! - [`error`]: Error types

pub mod cli;
pub mod config;
pub mod error;
pub mod exec;
pub mod expand;
pub mod layout;
pub mod loader;
pub mod logging;
pub mod orchestrator;
pub mod report;
pub mod template;
pub mod tmux;

pub use config::{Config, FailurePolicy, MatchMode, Settings};
pub use error::{Result, SessionupError};
pub use layout::{LayoutPlan, PaneArrangement, WindowPlan};
pub use orchestrator::{BatchSummary, Orchestrator, Outcome, SessionRequest};
