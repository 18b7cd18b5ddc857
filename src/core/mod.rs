//! Core engine for version-json
//!
//! - **derive**: pure derivation of `VersionDetails` and the define table
//! - **coordinator**: lifecycle state (configuration resolved, dev request, build finalize)
//! - **host**: types exchanged with the host build tool
//! - **config**: version-json.toml options
//! - **vcs**: best-effort revision queries (system git, fixed fake)
//! - **clock**: timestamp source
//! - **error**: error types with contextual help messages

pub mod clock;
pub mod config;
pub mod coordinator;
pub mod derive;
pub mod error;
pub mod host;
pub mod vcs;
