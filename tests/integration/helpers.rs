//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A throwaway web project with a package.json
pub struct TestProject {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestProject {
  /// Project without revision control
  pub fn new(package_json: &str) -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();

    std::fs::write(path.join("package.json"), package_json)?;

    Ok(Self { _root: root, path })
  }

  /// Project inside a git repository with one commit
  pub fn with_git(package_json: &str) -> Result<Self> {
    let project = Self::new(package_json)?;

    git(&project.path, &["init", "--initial-branch=main"])?;
    git(&project.path, &["config", "user.name", "Test User"])?;
    git(&project.path, &["config", "user.email", "test@example.com"])?;
    std::fs::write(project.path.join("index.html"), "<!doctype html>\n")?;
    project.commit("Initial commit")?;

    Ok(project)
  }

  /// Commit current changes and return the commit SHA
  pub fn commit(&self, message: &str) -> Result<String> {
    git(&self.path, &["add", "."])?;
    git(&self.path, &["commit", "-m", message])?;
    self.head()
  }

  /// Full SHA of HEAD
  pub fn head(&self) -> Result<String> {
    let output = git(&self.path, &["rev-parse", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Create a lightweight tag at HEAD
  pub fn tag(&self, name: &str) -> Result<()> {
    git(&self.path, &["tag", name])?;
    Ok(())
  }

  /// Create a directory (e.g. the bundler's dist/)
  pub fn mkdir(&self, dir: &str) -> Result<()> {
    std::fs::create_dir_all(self.path.join(dir))?;
    Ok(())
  }

  /// Write a file relative to the project root
  pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
    std::fs::write(self.path.join(path), content)?;
    Ok(())
  }

  /// Check if a file exists
  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }

  /// Read a file and parse it as JSON
  pub fn read_json(&self, path: &str) -> Result<serde_json::Value> {
    let text = std::fs::read_to_string(self.path.join(path))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not JSON:\n{}", path, text))
  }
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run the version-json CLI and return its output, whatever the exit status
pub fn run_version_json_raw(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_version-json");

  Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .env_remove("RUST_LOG")
    .output()
    .context("Failed to run version-json")
}

/// Run the version-json CLI, failing unless it exits successfully
pub fn run_version_json(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_version_json_raw(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "version-json command failed: version-json {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

/// Parse stdout as JSON
pub fn stdout_json(output: &Output) -> Result<serde_json::Value> {
  let stdout = String::from_utf8_lossy(&output.stdout);
  serde_json::from_str(&stdout).with_context(|| format!("stdout is not JSON:\n{}", stdout))
}
