use crate::commands::{Overrides, resolve};
use crate::core::error::ManifestResult;
use crate::core::host::HostCommand;
use std::path::{Path, PathBuf};

/// Run the build command
///
/// Expects the bundler to have produced `out_dir` already; a missing
/// directory fails the finalize step.
pub fn run_build(root: &Path, out_dir: PathBuf, overrides: &Overrides) -> ManifestResult<()> {
  let (coordinator, _config) = resolve(root, out_dir, HostCommand::Build, overrides)?;

  if let Some(written) = coordinator.on_build_finalize()? {
    println!("{}", written.display());
  }

  Ok(())
}
