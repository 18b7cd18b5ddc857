//! CLI commands for version-json
//!
//! Each command plays the host build tool for one lifecycle path:
//!
//! - **build**: configuration resolved (build mode), then build finalize
//! - **defines**: configuration resolved, print the define table
//! - **show**: configuration resolved, print the dev snapshot
//! - **serve**: configuration resolved (serve mode), then the dev server

pub mod build;
pub mod defines;
pub mod serve;
pub mod show;

pub use build::run_build;
pub use defines::run_defines;
pub use serve::run_serve;
pub use show::run_show;

use crate::core::config::{DefineMode, ManifestOptions};
use crate::core::coordinator::VersionCoordinator;
use crate::core::error::ManifestResult;
use crate::core::host::{HostCommand, ResolvedConfig};
use std::path::{Path, PathBuf};

/// Command-line overrides for values from version-json.toml
#[derive(Debug, Clone, Default)]
pub struct Overrides {
  pub output: Option<String>,
  pub define: Option<DefineMode>,
  pub namespace: Option<String>,
}

/// Load options from the project root and apply CLI overrides
pub fn load_options(root: &Path, overrides: &Overrides) -> ManifestResult<ManifestOptions> {
  let mut options = ManifestOptions::load(root)?;

  if let Some(output) = &overrides.output {
    options.output = output.clone();
  }
  if let Some(define) = overrides.define {
    options.define = define;
  }
  if let Some(namespace) = &overrides.namespace {
    options.namespace = namespace.clone();
  }

  options.validate()?;
  Ok(options)
}

/// Build a coordinator and fire configuration-resolved for it
pub(crate) fn resolve(
  root: &Path,
  out_dir: PathBuf,
  command: HostCommand,
  overrides: &Overrides,
) -> ManifestResult<(VersionCoordinator, ResolvedConfig)> {
  let options = load_options(root, overrides)?;
  let mut coordinator = VersionCoordinator::new(options);
  let mut config = ResolvedConfig::new(root, out_dir, command);
  coordinator.on_configuration_resolved(&mut config)?;
  Ok((coordinator, config))
}
