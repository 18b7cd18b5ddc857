//! Logging setup for the CLI
//!
//! `RUST_LOG` wins when set; otherwise `-v`/`-q` move the default level
//! up or down from `info`.

use tracing_subscriber::EnvFilter;

/// Default filter directive for a verbosity offset
pub fn default_directive(verbosity: i8) -> &'static str {
  match verbosity {
    i8::MIN..=-2 => "error",
    -1 => "warn",
    0 => "info",
    1 => "debug",
    _ => "trace",
  }
}

/// Install the global subscriber (stderr, no target, compact)
pub fn init(verbosity: i8) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

  // A second init (e.g. from tests) keeps the first subscriber
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .try_init();
}
