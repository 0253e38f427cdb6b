//! apigentools test - container-based testing of generated clients
//!
//! Builds and runs the generated test Dockerfiles:
//! - One target per configured (language, spec version) pair
//! - Missing Dockerfiles skip the target
//! - Build and run failures mark the run failed without stopping iteration

pub mod engine;
pub mod fakes;
pub mod runner;
pub mod target;

// Re-export key types
pub use engine::{BuildRequest, CliContainerEngine, ContainerEngine, DEFAULT_CONTAINER_BINARY};
pub use runner::{RunReport, TargetOutcome, TargetReport, TestOptions, TestRunner};
pub use target::{TestTarget, TEST_IMAGE_PREFIX};
