//! Subprocess invocation with logging and typed outcomes.
//!
//! Commands finish with a [`CommandOutcome`] whether or not they exited
//! zero; callers check [`CommandOutcome::success`] explicitly. Only failing
//! to spawn the process at all is an `Err`.

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Instant;

use tokio::process::Command;
use tracing::{debug, info};

use crate::error::{ApigentoolsError, Result};

/// Placeholder written to log lines in place of secret command members.
pub const REDACTED_OUT_SECRET: &str = "<apigentools.redacted>";

/// A single member of a command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandArg {
    /// Logged verbatim.
    Plain(String),

    /// Passed to the subprocess verbatim, redacted in log output.
    Secret(String),
}

impl CommandArg {
    pub fn plain(value: impl Into<String>) -> Self {
        CommandArg::Plain(value.into())
    }

    pub fn secret(value: impl Into<String>) -> Self {
        CommandArg::Secret(value.into())
    }

    /// Value handed to the subprocess.
    pub fn value(&self) -> &str {
        match self {
            CommandArg::Plain(v) | CommandArg::Secret(v) => v,
        }
    }

    /// Value written to log lines.
    pub fn log_value(&self) -> &str {
        match self {
            CommandArg::Plain(v) => v,
            CommandArg::Secret(_) => REDACTED_OUT_SECRET,
        }
    }
}

impl From<&str> for CommandArg {
    fn from(value: &str) -> Self {
        CommandArg::plain(value)
    }
}

impl From<String> for CommandArg {
    fn from(value: String) -> Self {
        CommandArg::Plain(value)
    }
}

/// Render a command line for logging, redacting secret members.
pub fn render_command(cmd: &[CommandArg]) -> String {
    cmd.iter()
        .map(CommandArg::log_value)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Options for [`run_command`].
#[derive(Debug, Clone, Default)]
pub struct ExecOptions {
    /// Environment entries layered over the inherited environment.
    pub additional_env: HashMap<String, String>,

    /// Append stderr to stdout in the outcome (more readable when the
    /// streams interleave).
    pub combine_output: bool,

    /// Working directory for the subprocess.
    pub current_dir: Option<PathBuf>,
}

/// Outcome of a finished subprocess.
#[derive(Debug, Clone)]
pub struct CommandOutcome {
    /// Exit code (-1 when terminated by signal).
    pub exit_code: i32,

    /// Captured stdout (plus stderr when output was combined).
    pub stdout: String,

    /// Captured stderr (empty when output was combined).
    pub stderr: String,

    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

impl CommandOutcome {
    /// Whether the subprocess exited zero.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Run a command to completion, capturing its output.
///
/// The command line is logged before execution (secrets redacted) and the
/// captured output after. A nonzero exit is reported through the returned
/// [`CommandOutcome`], not as an error.
pub async fn run_command(cmd: &[CommandArg], opts: &ExecOptions) -> Result<CommandOutcome> {
    let rendered = render_command(cmd);
    if cmd.is_empty() {
        return Err(ApigentoolsError::CommandSpawn {
            command: rendered,
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty command"),
        });
    }

    info!(command = %rendered, "running command");

    let mut command = Command::new(cmd[0].value());
    command
        .args(cmd[1..].iter().map(CommandArg::value))
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    for (key, value) in &opts.additional_env {
        command.env(key, value);
    }
    if let Some(dir) = &opts.current_dir {
        command.current_dir(dir);
    }

    let start = Instant::now();
    let output = command
        .output()
        .await
        .map_err(|e| ApigentoolsError::CommandSpawn {
            command: rendered.clone(),
            source: e,
        })?;
    let duration_ms = start.elapsed().as_millis() as u64;

    let exit_code = output.status.code().unwrap_or(-1);
    let mut stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let mut stderr = String::from_utf8_lossy(&output.stderr).to_string();
    if opts.combine_output {
        stdout.push_str(&stderr);
        stderr.clear();
    }

    debug!(
        command = %rendered,
        exit_code,
        duration_ms,
        stdout = %stdout,
        stderr = %stderr,
        "command finished"
    );

    Ok(CommandOutcome {
        exit_code,
        stdout,
        stderr,
        duration_ms,
    })
}
