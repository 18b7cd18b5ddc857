//! version-json.toml options
//!
//! Options are the artifact file name (`output`), which constants to inject
//! (`define`), their name prefix (`namespace`) and the package descriptor file
//! (`descriptor`). The first file found in the project root wins:
//!
//! 1. `version-json.toml`
//! 2. `.version-json.toml`
//! 3. `.config/version-json.toml`
//!
//! With no file, every option takes its default. CLI flags override on top.

use crate::core::error::{ConfigError, ManifestError, ManifestResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default artifact file name
pub const DEFAULT_OUTPUT: &str = "version.json";

/// Default namespace for injected compile-time constants
pub const DEFAULT_NAMESPACE: &str = "import.meta.env";

/// Default package descriptor file name
pub const DEFAULT_DESCRIPTOR: &str = "package.json";

/// Which compile-time constants to inject into the host define table
///
/// In TOML this is written as `define = true`, `define = false` or
/// `define = "minimal"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawDefine", into = "RawDefine")]
pub enum DefineMode {
  /// APP_VERSION and APP_TAG
  #[default]
  Full,
  /// APP_VERSION only
  Minimal,
  /// Nothing
  Disabled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawDefine {
  Flag(bool),
  Mode(String),
}

impl TryFrom<RawDefine> for DefineMode {
  type Error = ConfigError;

  fn try_from(raw: RawDefine) -> Result<Self, Self::Error> {
    match raw {
      RawDefine::Flag(true) => Ok(DefineMode::Full),
      RawDefine::Flag(false) => Ok(DefineMode::Disabled),
      RawDefine::Mode(mode) if mode == "minimal" => Ok(DefineMode::Minimal),
      RawDefine::Mode(value) => Err(ConfigError::InvalidDefine { value }),
    }
  }
}

impl From<DefineMode> for RawDefine {
  fn from(mode: DefineMode) -> Self {
    match mode {
      DefineMode::Full => RawDefine::Flag(true),
      DefineMode::Minimal => RawDefine::Mode("minimal".to_string()),
      DefineMode::Disabled => RawDefine::Flag(false),
    }
  }
}

impl FromStr for DefineMode {
  type Err = ConfigError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "true" | "full" => Ok(DefineMode::Full),
      "minimal" => Ok(DefineMode::Minimal),
      "false" | "disabled" | "off" => Ok(DefineMode::Disabled),
      _ => Err(ConfigError::InvalidDefine { value: s.to_string() }),
    }
  }
}

impl fmt::Display for DefineMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      DefineMode::Full => write!(f, "full"),
      DefineMode::Minimal => write!(f, "minimal"),
      DefineMode::Disabled => write!(f, "disabled"),
    }
  }
}

/// Options for version-json
/// Searched in order: version-json.toml, .version-json.toml, .config/version-json.toml
///
/// # Example
///
/// ```toml
/// output = "build-info.json"
/// define = "minimal"
/// namespace = "process.env"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestOptions {
  /// Artifact file name, written into the build output directory
  #[serde(default = "default_output")]
  pub output: String,

  /// Which constants to inject
  #[serde(default)]
  pub define: DefineMode,

  /// Prefix for constant names, e.g. `import.meta.env` → `import.meta.env.APP_VERSION`
  #[serde(default = "default_namespace")]
  pub namespace: String,

  /// Package descriptor file name, relative to the project root
  #[serde(default = "default_descriptor")]
  pub descriptor: String,
}

fn default_output() -> String {
  DEFAULT_OUTPUT.to_string()
}

fn default_namespace() -> String {
  DEFAULT_NAMESPACE.to_string()
}

fn default_descriptor() -> String {
  DEFAULT_DESCRIPTOR.to_string()
}

impl Default for ManifestOptions {
  fn default() -> Self {
    Self {
      output: default_output(),
      define: DefineMode::default(),
      namespace: default_namespace(),
      descriptor: default_descriptor(),
    }
  }
}

impl ManifestOptions {
  /// Find config file in search order
  pub fn find_config_path(root: &Path) -> Option<PathBuf> {
    let candidates = [
      root.join("version-json.toml"),
      root.join(".version-json.toml"),
      root.join(".config").join("version-json.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load options from the project root, falling back to defaults when no file exists
  pub fn load(root: &Path) -> ManifestResult<Self> {
    let Some(config_path) = Self::find_config_path(root) else {
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let options: ManifestOptions = toml_edit::de::from_str(&content)
      .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

    options.validate()?;

    Ok(options)
  }

  /// Validate option values
  pub fn validate(&self) -> ManifestResult<()> {
    if self.output.trim().is_empty() {
      return Err(invalid("output", "must not be empty"));
    }
    if self.output.contains('/') || self.output.contains('\\') {
      return Err(invalid(
        "output",
        format!("'{}' must be a file name, not a path", self.output),
      ));
    }
    if self.namespace.trim().is_empty() {
      return Err(invalid("namespace", "must not be empty"));
    }
    if self.descriptor.trim().is_empty() {
      return Err(invalid("descriptor", "must not be empty"));
    }
    Ok(())
  }

  /// Request path the dev server answers, e.g. `/version.json`
  pub fn request_path(&self) -> String {
    format!("/{}", self.output)
  }
}

fn invalid(field: &str, reason: impl Into<String>) -> ManifestError {
  ManifestError::Config(ConfigError::InvalidField {
    field: field.to_string(),
    reason: reason.into(),
  })
}
