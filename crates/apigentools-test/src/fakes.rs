//! In-memory container engine fake (testing only)
//!
//! Provides [`ScriptedEngine`], which satisfies [`ContainerEngine`] without
//! invoking any external tool. Tests script per-image exit codes and assert
//! on the recorded invocations.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use apigentools_core::exec::CommandOutcome;
use apigentools_core::Result;

use crate::engine::{BuildRequest, ContainerEngine};

/// A recorded engine invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    Build { image: String },
    Run { image: String },
}

/// Scripted in-memory engine recording every invocation.
///
/// Images without a scripted exit code build and run successfully.
#[derive(Debug, Default)]
pub struct ScriptedEngine {
    build_exits: Mutex<HashMap<String, i32>>,
    run_exits: Mutex<HashMap<String, i32>>,
    calls: Mutex<Vec<EngineCall>>,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a nonzero exit for building `image`.
    pub fn with_build_exit(self, image: &str, exit_code: i32) -> Self {
        self.build_exits
            .lock()
            .unwrap()
            .insert(image.to_string(), exit_code);
        self
    }

    /// Script a nonzero exit for running `image`.
    pub fn with_run_exit(self, image: &str, exit_code: i32) -> Self {
        self.run_exits
            .lock()
            .unwrap()
            .insert(image.to_string(), exit_code);
        self
    }

    /// Invocations recorded so far, in order.
    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().unwrap().clone()
    }

    fn outcome(exit_code: i32) -> CommandOutcome {
        CommandOutcome {
            exit_code,
            stdout: String::new(),
            stderr: String::new(),
            duration_ms: 0,
        }
    }
}

#[async_trait]
impl ContainerEngine for ScriptedEngine {
    async fn build_image(&self, request: &BuildRequest) -> Result<CommandOutcome> {
        self.calls.lock().unwrap().push(EngineCall::Build {
            image: request.image.clone(),
        });
        let exit_code = self
            .build_exits
            .lock()
            .unwrap()
            .get(&request.image)
            .copied()
            .unwrap_or(0);
        Ok(Self::outcome(exit_code))
    }

    async fn run_image(&self, image: &str) -> Result<CommandOutcome> {
        self.calls.lock().unwrap().push(EngineCall::Run {
            image: image.to_string(),
        });
        let exit_code = self
            .run_exits
            .lock()
            .unwrap()
            .get(image)
            .copied()
            .unwrap_or(0);
        Ok(Self::outcome(exit_code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn request(image: &str) -> BuildRequest {
        BuildRequest {
            context_dir: PathBuf::from("generated/go"),
            dockerfile: PathBuf::from("generated/go/Dockerfile.test.v1"),
            image: image.to_string(),
            no_cache: false,
        }
    }

    #[tokio::test]
    async fn test_unscripted_images_succeed() {
        let engine = ScriptedEngine::new();
        assert!(engine.build_image(&request("img")).await.unwrap().success());
        assert!(engine.run_image("img").await.unwrap().success());
    }

    #[tokio::test]
    async fn test_scripted_exits_and_recorded_calls() {
        let engine = ScriptedEngine::new()
            .with_build_exit("bad-build", 2)
            .with_run_exit("bad-run", 1);

        assert_eq!(
            engine
                .build_image(&request("bad-build"))
                .await
                .unwrap()
                .exit_code,
            2
        );
        assert_eq!(engine.run_image("bad-run").await.unwrap().exit_code, 1);

        assert_eq!(
            engine.calls(),
            vec![
                EngineCall::Build {
                    image: "bad-build".to_string()
                },
                EngineCall::Run {
                    image: "bad-run".to_string()
                },
            ]
        );
    }
}
