//! Revision-control queries
//!
//! The three queries are independent and best-effort: a failing query is
//! replaced by its sentinel and never affects the other two.

pub mod system_git;

pub use system_git::SystemGit;

use std::fmt;

/// Tag used when `describe` fails
pub const UNTAGGED: &str = "untagged";

/// Commit and commit time used when their queries fail
pub const UNKNOWN: &str = "unknown";

/// Why a single revision query failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevisionError {
  /// The tool could not be started (binary missing, bad working directory)
  Spawn { command: String, message: String },

  /// The tool ran and exited non-zero (not a repository, no commits)
  CommandFailed { command: String, stderr: String },

  /// The tool succeeded but printed nothing
  Empty { command: String },
}

impl fmt::Display for RevisionError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RevisionError::Spawn { command, message } => {
        write!(f, "Failed to run {}: {}", command, message)
      }
      RevisionError::CommandFailed { command, stderr } => {
        write!(f, "Revision command failed: {}\n{}", command, stderr)
      }
      RevisionError::Empty { command } => {
        write!(f, "Revision command produced no output: {}", command)
      }
    }
  }
}

impl std::error::Error for RevisionError {}

/// Capability for reading revision state
pub trait RevisionQuery: Send + Sync {
  /// Most recent tag, or an abbreviated identifier when untagged
  fn describe(&self) -> Result<String, RevisionError>;

  /// Full identifier of the current revision
  fn commit_hash(&self) -> Result<String, RevisionError>;

  /// ISO-8601 commit time of the current revision
  fn commit_time(&self) -> Result<String, RevisionError>;
}

/// Resolved revision strings, sentinels already applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionInfo {
  pub tag: String,
  pub commit: String,
  pub commit_time: String,
}

impl RevisionInfo {
  /// Run all three queries, substituting the sentinel for each one that fails
  pub fn collect(query: &dyn RevisionQuery) -> Self {
    Self {
      tag: or_sentinel("describe", query.describe(), UNTAGGED),
      commit: or_sentinel("commit hash", query.commit_hash(), UNKNOWN),
      commit_time: or_sentinel("commit time", query.commit_time(), UNKNOWN),
    }
  }
}

impl Default for RevisionInfo {
  fn default() -> Self {
    Self {
      tag: UNTAGGED.to_string(),
      commit: UNKNOWN.to_string(),
      commit_time: UNKNOWN.to_string(),
    }
  }
}

fn or_sentinel(query: &str, result: Result<String, RevisionError>, sentinel: &str) -> String {
  match result {
    Ok(value) => value,
    Err(err) => {
      tracing::debug!("revision query '{}' unavailable, using '{}': {}", query, sentinel, err);
      sentinel.to_string()
    }
  }
}

/// In-memory revision source returning fixed answers
///
/// `None` makes the corresponding query fail.
#[derive(Debug, Clone, Default)]
pub struct FixedRevision {
  pub tag: Option<String>,
  pub commit: Option<String>,
  pub commit_time: Option<String>,
}

impl FixedRevision {
  /// All three queries succeed with the given values
  pub fn new(tag: impl Into<String>, commit: impl Into<String>, commit_time: impl Into<String>) -> Self {
    Self {
      tag: Some(tag.into()),
      commit: Some(commit.into()),
      commit_time: Some(commit_time.into()),
    }
  }

  /// Every query fails, as outside a repository
  pub fn unavailable() -> Self {
    Self::default()
  }

  fn answer(value: &Option<String>, command: &str) -> Result<String, RevisionError> {
    value.clone().ok_or_else(|| RevisionError::CommandFailed {
      command: command.to_string(),
      stderr: "fatal: not a git repository".to_string(),
    })
  }
}

impl RevisionQuery for FixedRevision {
  fn describe(&self) -> Result<String, RevisionError> {
    Self::answer(&self.tag, "describe")
  }

  fn commit_hash(&self) -> Result<String, RevisionError> {
    Self::answer(&self.commit, "commit hash")
  }

  fn commit_time(&self) -> Result<String, RevisionError> {
    Self::answer(&self.commit_time, "commit time")
  }
}
