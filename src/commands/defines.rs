use crate::commands::{Overrides, resolve};
use crate::core::error::ManifestResult;
use crate::core::host::HostCommand;
use std::path::{Path, PathBuf};

/// Print the define table the host would receive, as pretty JSON
///
/// Prints `{}` when defines are disabled.
pub fn run_defines(root: &Path, overrides: &Overrides) -> ManifestResult<()> {
  let (_coordinator, config) = resolve(root, PathBuf::from("dist"), HostCommand::Serve, overrides)?;
  println!("{}", serde_json::to_string_pretty(&config.define)?);
  Ok(())
}
