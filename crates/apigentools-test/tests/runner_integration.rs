//! Integration tests for the test runner.
//!
//! The fake-engine tests cover the aggregate-status contract end to end;
//! the CLI-engine tests drive real subprocesses, standing in `true`/`false`
//! for the container binary.

use std::collections::BTreeMap;
use std::path::Path;

use apigentools_core::{Config, LanguageConfig};
use apigentools_test::fakes::ScriptedEngine;
use apigentools_test::{CliContainerEngine, TargetOutcome, TestOptions, TestRunner};

fn config(languages: &[(&str, &[&str])]) -> Config {
    Config {
        spec_versions: vec![],
        languages: languages
            .iter()
            .map(|(name, versions)| {
                (
                    name.to_string(),
                    LanguageConfig {
                        github_repo_name: None,
                        spec_versions: versions.iter().map(|v| v.to_string()).collect(),
                    },
                )
            })
            .collect::<BTreeMap<_, _>>(),
    }
}

fn write_dockerfile(generated: &Path, language: &str, version: &str) {
    let dir = generated.join(language);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join(format!("Dockerfile.test.{version}")),
        "FROM scratch\n",
    )
    .unwrap();
}

/// Test: mixed run over the fake engine — pass, build failure and skip in
/// one sweep, iterated to the end.
#[tokio::test]
async fn test_mixed_run_reports_every_target() {
    let generated = tempfile::tempdir().unwrap();
    write_dockerfile(generated.path(), "go", "v1");
    write_dockerfile(generated.path(), "python", "v1");
    // java has no Dockerfile at all.
    let engine = ScriptedEngine::new().with_build_exit("apigentools-test-go-v1", 1);
    let config = config(&[("go", &["v1"]), ("java", &["v1"]), ("python", &["v1"])]);
    let options = TestOptions {
        generated_code_dir: generated.path().to_path_buf(),
        no_cache: false,
    };

    let report = TestRunner::run(&config, &engine, &options).await.unwrap();

    assert_eq!(report.exit_status(), 1);
    assert_eq!(report.targets.len(), 3);
    assert_eq!(report.failed_count(), 1);
    assert_eq!(report.skipped_count(), 1);
    assert_eq!(report.passed_count(), 1);

    let outcomes: Vec<(&str, &TargetOutcome)> = report
        .targets
        .iter()
        .map(|t| (t.target.language.as_str(), &t.outcome))
        .collect();
    assert_eq!(outcomes[0], ("go", &TargetOutcome::BuildFailed { exit_code: 1 }));
    assert_eq!(outcomes[1], ("java", &TargetOutcome::Skipped));
    assert_eq!(outcomes[2], ("python", &TargetOutcome::Passed));
}

/// Test: real subprocesses through the CLI engine, all targets passing.
#[tokio::test]
async fn test_cli_engine_passing_run() {
    let generated = tempfile::tempdir().unwrap();
    write_dockerfile(generated.path(), "go", "v1");
    let engine = CliContainerEngine::new("true");
    let config = config(&[("go", &["v1"])]);
    let options = TestOptions {
        generated_code_dir: generated.path().to_path_buf(),
        no_cache: true,
    };

    let report = TestRunner::run(&config, &engine, &options).await.unwrap();

    assert!(report.success());
    assert_eq!(report.passed_count(), 1);
}

/// Test: real subprocesses through the CLI engine, tool exits nonzero.
#[tokio::test]
async fn test_cli_engine_failing_run() {
    let generated = tempfile::tempdir().unwrap();
    write_dockerfile(generated.path(), "go", "v1");
    let engine = CliContainerEngine::new("false");
    let config = config(&[("go", &["v1"])]);
    let options = TestOptions {
        generated_code_dir: generated.path().to_path_buf(),
        no_cache: false,
    };

    let report = TestRunner::run(&config, &engine, &options).await.unwrap();

    assert_eq!(report.exit_status(), 1);
    assert_eq!(
        report.targets[0].outcome,
        TargetOutcome::BuildFailed { exit_code: 1 }
    );
}

/// Test: a missing container tool aborts the run instead of counting as a
/// target failure.
#[tokio::test]
async fn test_cli_engine_missing_tool_aborts() {
    let generated = tempfile::tempdir().unwrap();
    write_dockerfile(generated.path(), "go", "v1");
    let engine = CliContainerEngine::new("apigentools-no-such-container-tool");
    let config = config(&[("go", &["v1"])]);
    let options = TestOptions {
        generated_code_dir: generated.path().to_path_buf(),
        no_cache: false,
    };

    assert!(TestRunner::run(&config, &engine, &options).await.is_err());
}
