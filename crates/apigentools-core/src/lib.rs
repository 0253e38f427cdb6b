//! apigentools core library
//!
//! Shared building blocks for the apigentools commands: configuration
//! loading, subprocess invocation, git helpers and tracing setup.

pub mod config;
pub mod error;
pub mod exec;
pub mod git;
pub mod telemetry;

pub use config::{Config, LanguageConfig, CONFIG_FILE_NAME};
pub use error::{ApigentoolsError, Result};
pub use exec::{run_command, CommandArg, CommandOutcome, ExecOptions};
pub use git::{current_commit, is_git_repo};
pub use telemetry::init_tracing;
