use crate::commands::{Overrides, resolve};
use crate::core::error::{ManifestError, ManifestResult};
use crate::core::host::{DevResponse, HostCommand};
use std::path::{Path, PathBuf};

/// Print the manifest exactly as the dev server would serve it
pub fn run_show(root: &Path, overrides: &Overrides) -> ManifestResult<()> {
  let (coordinator, _config) = resolve(root, PathBuf::from("dist"), HostCommand::Serve, overrides)?;

  let request_path = coordinator.options().request_path();
  match coordinator.on_dev_request(&request_path)? {
    DevResponse::Respond(json) => {
      println!("{}", json.body);
      Ok(())
    }
    DevResponse::Next => Err(ManifestError::with_help(
      format!("No manifest available at {}", request_path),
      "Check that the `output` option names a plain file, e.g. version.json",
    )),
  }
}
