//! System git backend
//!
//! Shells out to the `git` binary on PATH. Each query is one subprocess call
//! with an isolated environment, so user config cannot change the output.

use super::{RevisionError, RevisionQuery};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Revision queries answered by system git
#[derive(Debug, Clone)]
pub struct SystemGit {
  /// Directory the queries run in (the project root)
  pub(crate) repo_path: PathBuf,
}

impl SystemGit {
  /// Query the repository containing `path`
  ///
  /// Never fails: a missing binary or a non-repository surfaces per query.
  pub fn new(path: &Path) -> Self {
    Self {
      repo_path: path.to_path_buf(),
    }
  }

  /// Run git with the given args and return trimmed stdout
  fn run(&self, args: &[&str]) -> Result<String, RevisionError> {
    let command = format!("git {}", args.join(" "));

    let output = self
      .git_cmd()
      .args(args)
      .output()
      .map_err(|e| RevisionError::Spawn {
        command: command.clone(),
        message: e.to_string(),
      })?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(RevisionError::CommandFailed {
        command,
        stderr: stderr.trim().to_string(),
      });
    }

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if stdout.is_empty() {
      return Err(RevisionError::Empty { command });
    }

    Ok(stdout)
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Sets working directory to repo path
  /// - Clears environment variables
  /// - Whitelists only PATH and HOME
  pub(crate) fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(&self.repo_path);

    // Isolated environment (don't trust global config)
    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
      cmd.env("PATH", path);
    }
    if let Ok(home) = std::env::var("HOME") {
      cmd.env("HOME", home);
    }

    cmd.arg("-c").arg("core.quotePath=false");

    cmd
  }
}

impl RevisionQuery for SystemGit {
  fn describe(&self) -> Result<String, RevisionError> {
    self.run(&["describe", "--tags", "--always"])
  }

  fn commit_hash(&self) -> Result<String, RevisionError> {
    self.run(&["rev-parse", "HEAD"])
  }

  fn commit_time(&self) -> Result<String, RevisionError> {
    self.run(&["log", "-1", "--format=%cI"])
  }
}
