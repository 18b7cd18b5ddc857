use crate::commands::{Overrides, resolve};
use crate::core::error::{ManifestResult, ResultExt};
use crate::core::host::HostCommand;
use crate::server;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Run the dev server over the project root
pub fn run_serve(root: &Path, addr: SocketAddr, overrides: &Overrides) -> ManifestResult<()> {
  let (coordinator, _config) = resolve(root, PathBuf::from("dist"), HostCommand::Serve, overrides)?;
  let coordinator = Arc::new(coordinator);

  let runtime = tokio::runtime::Builder::new_multi_thread()
    .enable_all()
    .build()
    .context("Failed to start async runtime")?;

  runtime.block_on(server::serve(coordinator, root, addr))
}
