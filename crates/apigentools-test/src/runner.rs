//! The `test` command runner.
//!
//! For every configured (language, spec version) pair: locate the generated
//! test Dockerfile, build an image from it and run that image. A missing
//! Dockerfile skips the target; a nonzero build or run marks the whole run
//! failed but never stops iteration over the remaining targets.

use std::path::PathBuf;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{error, info};

use apigentools_core::{Config, Result};

use crate::engine::{BuildRequest, ContainerEngine};
use crate::target::TestTarget;

/// Options for a test run.
#[derive(Debug, Clone, Default)]
pub struct TestOptions {
    /// Root directory containing the generated per-language output.
    pub generated_code_dir: PathBuf,

    /// Build test images without the container layer cache.
    pub no_cache: bool,
}

/// Outcome of one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetOutcome {
    /// No test Dockerfile was generated; neither pass nor fail.
    Skipped,

    /// The image build exited nonzero; the image was never run.
    BuildFailed { exit_code: i32 },

    /// The image ran and exited nonzero.
    TestFailed { exit_code: i32 },

    /// Image built and ran to a zero exit.
    Passed,
}

impl TargetOutcome {
    /// Whether this outcome flips the aggregate status to failure.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            TargetOutcome::BuildFailed { .. } | TargetOutcome::TestFailed { .. }
        )
    }
}

/// Per-target entry of a [`RunReport`].
#[derive(Debug, Clone)]
pub struct TargetReport {
    pub target: TestTarget,
    pub outcome: TargetOutcome,
}

/// Result of a complete test run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// When the run started.
    pub started_at: DateTime<Utc>,

    /// Total wall-clock duration in milliseconds.
    pub duration_ms: u64,

    /// Per-target outcomes, in iteration order.
    pub targets: Vec<TargetReport>,

    // Aggregate status; monotonic, set to 1 by the first failure.
    status: i32,
}

impl RunReport {
    /// Aggregate status: 0 when every target passed or was skipped,
    /// 1 when any build or run failed. Returned as the command exit code.
    pub fn exit_status(&self) -> i32 {
        self.status
    }

    /// Whether no target failed.
    pub fn success(&self) -> bool {
        self.status == 0
    }

    pub fn passed_count(&self) -> usize {
        self.targets
            .iter()
            .filter(|t| t.outcome == TargetOutcome::Passed)
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.targets.iter().filter(|t| t.outcome.is_failure()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.targets
            .iter()
            .filter(|t| t.outcome == TargetOutcome::Skipped)
            .count()
    }
}

/// Test runner for generated clients.
pub struct TestRunner;

impl TestRunner {
    /// Build and run the test image for every configured target, strictly
    /// in sequence.
    ///
    /// Only the external tool's nonzero exit counts as a target failure;
    /// failing to invoke the tool at all is returned as an error and aborts
    /// the run.
    pub async fn run(
        config: &Config,
        engine: &dyn ContainerEngine,
        options: &TestOptions,
    ) -> Result<RunReport> {
        let started_at = Utc::now();
        let start = Instant::now();
        let mut targets = Vec::new();
        let mut status = 0;

        for (language, lang_config) in config.language_configs() {
            for version in &lang_config.spec_versions {
                let target =
                    TestTarget::new(language, version, lang_config, &options.generated_code_dir);
                info!(
                    dockerfile = %target.dockerfile.display(),
                    language = %language,
                    version = %version,
                    "looking up test Dockerfile"
                );

                if !target.dockerfile.exists() {
                    info!(
                        dockerfile = %target.dockerfile.display(),
                        "PASS: no test Dockerfile, skipping"
                    );
                    targets.push(TargetReport {
                        target,
                        outcome: TargetOutcome::Skipped,
                    });
                    continue;
                }

                let image = target.image_name();
                let build = engine
                    .build_image(&BuildRequest {
                        context_dir: target.context_dir().to_path_buf(),
                        dockerfile: target.dockerfile.clone(),
                        image: image.clone(),
                        no_cache: options.no_cache,
                    })
                    .await?;
                if !build.success() {
                    error!(
                        language = %language,
                        version = %version,
                        exit_code = build.exit_code,
                        "FAIL: failed to build testing image"
                    );
                    status = 1;
                    targets.push(TargetReport {
                        target,
                        outcome: TargetOutcome::BuildFailed {
                            exit_code: build.exit_code,
                        },
                    });
                    continue;
                }
                info!(image = %image, "SUCCESS: built image");

                info!(image = %image, "running tests");
                let run = engine.run_image(&image).await?;
                if !run.success() {
                    error!(
                        language = %language,
                        version = %version,
                        exit_code = run.exit_code,
                        "ERROR: testing failed"
                    );
                    status = 1;
                    targets.push(TargetReport {
                        target,
                        outcome: TargetOutcome::TestFailed {
                            exit_code: run.exit_code,
                        },
                    });
                    continue;
                }
                info!(image = %image, "SUCCESS: ran image");
                targets.push(TargetReport {
                    target,
                    outcome: TargetOutcome::Passed,
                });
            }
        }

        Ok(RunReport {
            started_at,
            duration_ms: start.elapsed().as_millis() as u64,
            targets,
            status,
        })
    }
}
