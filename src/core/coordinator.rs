//! Lifecycle coordinator
//!
//! # State machine
//!
//! ```text
//! Uninitialized --configuration resolved--> Ready(snapshot)
//! Ready --dev request | build finalize--> Ready
//! ```
//!
//! The snapshot is derived once, at configuration-resolved, and is only read
//! afterwards. Dev requests see it unchanged; build finalize writes a copy
//! with a fresh `created` stamp.

use crate::core::clock::{Clock, SystemClock};
use crate::core::config::ManifestOptions;
use crate::core::derive::{self, DeriveInput, Derived, DerivedConstants, VersionDetails};
use crate::core::error::{ArtifactError, ConfigError, DescriptorError, ManifestError, ManifestResult};
use crate::core::host::{DevResponse, HostCommand, JsonResponse, ResolvedConfig};
use crate::core::vcs::{RevisionInfo, RevisionQuery, SystemGit};
use std::fs;
use std::path::{Path, PathBuf};

/// Content type of the dev endpoint
pub const JSON_CONTENT_TYPE: &str = "application/json";

enum State {
  Uninitialized,
  Ready(Session),
}

/// Everything captured at configuration-resolved
struct Session {
  derived: Derived,
  out_dir: PathBuf,
  command: HostCommand,
}

/// Owns one derivation per session and serves it to the dev server and the build
pub struct VersionCoordinator {
  options: ManifestOptions,
  revision: Option<Box<dyn RevisionQuery>>,
  clock: Box<dyn Clock>,
  state: State,
}

impl VersionCoordinator {
  /// Coordinator using system git (rooted at the resolved project root) and the system clock
  pub fn new(options: ManifestOptions) -> Self {
    Self {
      options,
      revision: None,
      clock: Box::new(SystemClock),
      state: State::Uninitialized,
    }
  }

  /// Replace the revision source
  pub fn with_revision(mut self, revision: impl RevisionQuery + 'static) -> Self {
    self.revision = Some(Box::new(revision));
    self
  }

  /// Replace the clock
  pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
    self.clock = Box::new(clock);
    self
  }

  pub fn options(&self) -> &ManifestOptions {
    &self.options
  }

  pub fn is_ready(&self) -> bool {
    matches!(self.state, State::Ready(_))
  }

  /// Cached snapshot, once configuration is resolved
  pub fn snapshot(&self) -> Option<&VersionDetails> {
    self.session().map(|s| &s.derived.details)
  }

  /// Constants produced at configuration-resolved (`None` when disabled or not ready)
  pub fn defines(&self) -> Option<&DerivedConstants> {
    self.session().and_then(|s| s.derived.defines.as_ref())
  }

  fn session(&self) -> Option<&Session> {
    match &self.state {
      State::Ready(session) => Some(session),
      State::Uninitialized => None,
    }
  }

  /// Handle the host's configuration-resolved event
  ///
  /// Reads the descriptor, queries revision state, derives the snapshot, and
  /// merges constants into `config.define`. A second call keeps the first
  /// snapshot and merges the cached constants again.
  pub fn on_configuration_resolved(&mut self, config: &mut ResolvedConfig) -> ManifestResult<()> {
    if let State::Ready(session) = &self.state {
      tracing::debug!("configuration resolved again; keeping snapshot from first resolution");
      merge_defines(&mut config.define, session.derived.defines.as_ref());
      return Ok(());
    }

    let descriptor_path = config.root.join(&self.options.descriptor);
    let descriptor_text = fs::read_to_string(&descriptor_path).map_err(|source| DescriptorError::Read {
      path: descriptor_path.clone(),
      source,
    })?;

    let revision = match &self.revision {
      Some(query) => RevisionInfo::collect(query.as_ref()),
      None => RevisionInfo::collect(&SystemGit::new(&config.root)),
    };

    let now = self.clock.now_iso();

    let derived = derive::derive(&DeriveInput {
      descriptor_text: &descriptor_text,
      tag: &revision.tag,
      commit: &revision.commit,
      commit_time: &revision.commit_time,
      created: &now,
      fallback_version_timestamp: &now,
      options: &self.options,
    })
    .map_err(|err| attach_descriptor_path(err, &descriptor_path))?;

    tracing::debug!(
      "derived {}@{} (tag {}, commit {})",
      derived.details.name,
      derived.details.version,
      derived.details.tag,
      derived.details.commit
    );

    merge_defines(&mut config.define, derived.defines.as_ref());

    self.state = State::Ready(Session {
      derived,
      out_dir: config.resolved_out_dir(),
      command: config.command,
    });

    Ok(())
  }

  /// Offer a dev-server request
  ///
  /// Precondition: configuration has been resolved. Before that every request
  /// is passed through.
  pub fn on_dev_request(&self, request_path: &str) -> ManifestResult<DevResponse> {
    if request_path != self.options.request_path() {
      return Ok(DevResponse::Next);
    }

    let Some(details) = self.snapshot() else {
      tracing::debug!("{} requested before configuration resolved; passing through", request_path);
      return Ok(DevResponse::Next);
    };

    Ok(DevResponse::Respond(JsonResponse {
      content_type: JSON_CONTENT_TYPE,
      body: details.to_pretty_json()?,
    }))
  }

  /// Handle the host's build-finalize event
  ///
  /// Returns the path written, or `None` when the host is not running a
  /// production build.
  pub fn on_build_finalize(&self) -> ManifestResult<Option<PathBuf>> {
    let session = self.session().ok_or_else(|| {
      ManifestError::Config(ConfigError::NotResolved {
        step: "build finalize".to_string(),
      })
    })?;

    if session.command != HostCommand::Build {
      return Ok(None);
    }

    let payload = session.derived.details.restamped(self.clock.now_iso()).to_pretty_json()?;

    let out_path = session.out_dir.join(&self.options.output);
    fs::write(&out_path, payload).map_err(|source| ArtifactError::Write {
      path: out_path.clone(),
      source,
    })?;

    tracing::info!("📦  wrote {}", out_path.display());

    Ok(Some(out_path))
  }
}

fn merge_defines(table: &mut DerivedConstants, defines: Option<&DerivedConstants>) {
  if let Some(defines) = defines {
    for (key, value) in defines {
      table.insert(key.clone(), value.clone());
    }
  }
}

fn attach_descriptor_path(err: ManifestError, path: &Path) -> ManifestError {
  match err {
    ManifestError::Descriptor(DescriptorError::Malformed { path: None, reason }) => {
      ManifestError::Descriptor(DescriptorError::Malformed {
        path: Some(path.to_path_buf()),
        reason,
      })
    }
    other => other,
  }
}
