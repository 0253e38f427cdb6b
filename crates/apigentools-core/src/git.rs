//! Git helpers for stamping runs with repository state.

use std::path::Path;
use std::process::Command;

use crate::error::{ApigentoolsError, Result};

/// Short name of the current commit of the repository at `repo_dir`.
///
/// Runs `git rev-parse --short HEAD`. Fails when the directory is not
/// inside a git work tree or git is unavailable.
pub fn current_commit(repo_dir: &Path) -> Result<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .current_dir(repo_dir)
        .output()
        .map_err(|e| ApigentoolsError::GitError(format!("failed to run git: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ApigentoolsError::GitError(format!(
            "git rev-parse failed: {}",
            stderr.trim()
        )));
    }

    let sha = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if sha.is_empty() {
        return Err(ApigentoolsError::GitError(
            "git rev-parse returned empty output".to_string(),
        ));
    }
    Ok(sha)
}

/// Whether a directory is inside a git work tree.
pub fn is_git_repo(dir: &Path) -> bool {
    Command::new("git")
        .args(["rev-parse", "--is-inside-work-tree"])
        .current_dir(dir)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_git(repo_dir: &Path, args: &[&str]) {
        let output = Command::new("git")
            .args(args)
            .current_dir(repo_dir)
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }

    fn make_git_repo() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        run_git(dir.path(), &["init"]);
        run_git(dir.path(), &["config", "user.name", "test-user"]);
        run_git(dir.path(), &["config", "user.email", "test@example.com"]);
        run_git(dir.path(), &["commit", "--allow-empty", "-m", "initial"]);
        dir
    }

    #[test]
    fn current_commit_returns_short_sha() {
        let repo = make_git_repo();
        let sha = current_commit(repo.path()).unwrap();
        assert!(sha.len() >= 7, "short SHA expected, got: {sha}");
        assert!(sha.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn current_commit_fails_outside_repo() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            current_commit(dir.path()),
            Err(ApigentoolsError::GitError(_))
        ));
    }

    #[test]
    fn is_git_repo_distinguishes_repos() {
        let repo = make_git_repo();
        assert!(is_git_repo(repo.path()));

        let dir = tempfile::tempdir().unwrap();
        assert!(!is_git_repo(dir.path()));
    }
}
