//! Container engine abstraction.
//!
//! The runner talks to the external container tool through the
//! [`ContainerEngine`] trait so tests can substitute a scripted fake
//! (see [`crate::fakes`]).

use std::path::PathBuf;

use async_trait::async_trait;

use apigentools_core::exec::{run_command, CommandArg, CommandOutcome, ExecOptions};
use apigentools_core::Result;

/// Container binary used when none is configured.
pub const DEFAULT_CONTAINER_BINARY: &str = "docker";

/// Request to build one test image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    /// Build context directory.
    pub context_dir: PathBuf,

    /// Dockerfile to build from.
    pub dockerfile: PathBuf,

    /// Tag for the built image.
    pub image: String,

    /// Build without the layer cache.
    pub no_cache: bool,
}

/// Interface to the external container tool.
///
/// A nonzero tool exit is reported through the returned outcome; `Err` is
/// reserved for failures to invoke the tool at all, which abort the whole
/// command.
#[async_trait]
pub trait ContainerEngine: Send + Sync {
    /// Build an image from a Dockerfile.
    async fn build_image(&self, request: &BuildRequest) -> Result<CommandOutcome>;

    /// Run an image to completion.
    async fn run_image(&self, image: &str) -> Result<CommandOutcome>;
}

/// Engine shelling out to a docker-compatible CLI.
#[derive(Debug, Clone)]
pub struct CliContainerEngine {
    binary: String,
}

impl CliContainerEngine {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// The configured container binary.
    pub fn binary(&self) -> &str {
        &self.binary
    }

    // Container tools interleave progress on both streams; a combined
    // capture keeps the logged output readable.
    fn exec_options(&self) -> ExecOptions {
        ExecOptions {
            combine_output: true,
            ..ExecOptions::default()
        }
    }
}

impl Default for CliContainerEngine {
    fn default() -> Self {
        Self::new(DEFAULT_CONTAINER_BINARY)
    }
}

#[async_trait]
impl ContainerEngine for CliContainerEngine {
    async fn build_image(&self, request: &BuildRequest) -> Result<CommandOutcome> {
        let mut cmd: Vec<CommandArg> = vec![
            self.binary.as_str().into(),
            "build".into(),
            request.context_dir.display().to_string().into(),
            "-f".into(),
            request.dockerfile.display().to_string().into(),
            "-t".into(),
            request.image.as_str().into(),
        ];
        if request.no_cache {
            cmd.push("--no-cache".into());
        }
        run_command(&cmd, &self.exec_options()).await
    }

    async fn run_image(&self, image: &str) -> Result<CommandOutcome> {
        let cmd: Vec<CommandArg> = vec![self.binary.as_str().into(), "run".into(), image.into()];
        run_command(&cmd, &self.exec_options()).await
    }
}
