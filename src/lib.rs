//! Build/version manifest for web applications
//!
//! Captures package metadata and git state once per build or dev session and
//! exposes it three ways: compile-time constants merged into the host define
//! table, a `GET /version.json` dev endpoint, and a `version.json` artifact
//! written when a production build finishes.
//!
//! ```rust,ignore
//! use version_json::{HostCommand, ManifestOptions, ResolvedConfig, VersionCoordinator};
//!
//! let mut coordinator = VersionCoordinator::new(ManifestOptions::default());
//! let mut config = ResolvedConfig::new(".", "dist", HostCommand::Build);
//! coordinator.on_configuration_resolved(&mut config)?;
//! // ... bundler runs with config.define ...
//! coordinator.on_build_finalize()?;
//! ```

pub mod commands;
pub mod core;
pub mod logging;
pub mod server;

pub use crate::core::config::{DefineMode, ManifestOptions};
pub use crate::core::coordinator::VersionCoordinator;
pub use crate::core::derive::{DeriveInput, Derived, DerivedConstants, VersionDetails, derive};
pub use crate::core::error::{ManifestError, ManifestResult};
pub use crate::core::host::{DevResponse, HostCommand, JsonResponse, ResolvedConfig};
pub use crate::core::vcs::{FixedRevision, RevisionInfo, RevisionQuery, SystemGit};
