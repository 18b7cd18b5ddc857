//! Contract with the host build tool
//!
//! The host owns lifecycle dispatch, the request chain, and compile-time
//! substitution. These types are what it hands to the coordinator and what the
//! coordinator hands back.

use crate::core::derive::DerivedConstants;
use std::path::{Path, PathBuf};

/// What the host is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
  /// Dev server
  Serve,
  /// Production build
  Build,
}

/// Payload of the configuration-resolved event
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
  /// Project root (where the package descriptor lives)
  pub root: PathBuf,

  /// Build output directory, relative to `root` unless absolute
  pub out_dir: PathBuf,

  pub command: HostCommand,

  /// Mutable define table; constants are merged in, overwriting equal keys
  pub define: DerivedConstants,
}

impl ResolvedConfig {
  pub fn new(root: impl Into<PathBuf>, out_dir: impl Into<PathBuf>, command: HostCommand) -> Self {
    Self {
      root: root.into(),
      out_dir: out_dir.into(),
      command,
      define: DerivedConstants::new(),
    }
  }

  /// Output directory resolved against the root
  pub fn resolved_out_dir(&self) -> PathBuf {
    resolve_against(&self.root, &self.out_dir)
  }
}

fn resolve_against(root: &Path, path: &Path) -> PathBuf {
  if path.is_absolute() {
    path.to_path_buf()
  } else {
    root.join(path)
  }
}

/// JSON body for a dev request the coordinator answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonResponse {
  pub content_type: &'static str,
  pub body: String,
}

/// Outcome of offering a request to the coordinator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DevResponse {
  /// Answered here; further handlers must not run
  Respond(JsonResponse),
  /// Not ours; hand to the next handler in the chain
  Next,
}
