//! Error types for version-json with contextual messages and exit codes
//!
//! Every fatal error names the lifecycle step that failed (configuration or
//! finalize) and carries a help line for the user. Revision-control failures
//! never reach this type: they degrade to sentinel strings in `core::vcs`.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for version-json
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, bad package descriptor)
  User = 1,
  /// System error (I/O, artifact write)
  System = 2,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for version-json
#[derive(Debug)]
pub enum ManifestError {
  /// Configuration errors
  Config(ConfigError),

  /// Package descriptor errors (fatal at configuration)
  Descriptor(DescriptorError),

  /// Artifact errors (fatal at finalize)
  Artifact(ArtifactError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl ManifestError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ManifestError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    ManifestError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ManifestError::Message { message, context, help } => ManifestError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      ManifestError::Io(err) => ManifestError::Message {
        message: ctx_str,
        context: Some(format!("I/O error: {}", err)),
        help: None,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ManifestError::Config(_) => ExitCode::User,
      ManifestError::Descriptor(_) => ExitCode::User,
      ManifestError::Artifact(_) => ExitCode::System,
      ManifestError::Io(_) => ExitCode::System,
      ManifestError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ManifestError::Config(e) => e.help_message(),
      ManifestError::Descriptor(e) => e.help_message(),
      ManifestError::Artifact(e) => e.help_message(),
      ManifestError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for ManifestError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ManifestError::Config(e) => write!(f, "{}", e),
      ManifestError::Descriptor(e) => write!(f, "{}", e),
      ManifestError::Artifact(e) => write!(f, "{}", e),
      ManifestError::Io(e) => write!(f, "I/O error: {}", e),
      ManifestError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ManifestError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ManifestError::Io(e) => Some(e),
      ManifestError::Descriptor(DescriptorError::Read { source, .. }) => Some(source),
      ManifestError::Artifact(ArtifactError::Write { source, .. }) => Some(source),
      _ => None,
    }
  }
}

impl From<io::Error> for ManifestError {
  fn from(err: io::Error) -> Self {
    ManifestError::Io(err)
  }
}

impl From<ConfigError> for ManifestError {
  fn from(err: ConfigError) -> Self {
    ManifestError::Config(err)
  }
}

impl From<DescriptorError> for ManifestError {
  fn from(err: DescriptorError) -> Self {
    ManifestError::Descriptor(err)
  }
}

impl From<ArtifactError> for ManifestError {
  fn from(err: ArtifactError) -> Self {
    ManifestError::Artifact(err)
  }
}

impl From<toml_edit::de::Error> for ManifestError {
  fn from(err: toml_edit::de::Error) -> Self {
    ManifestError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<serde_json::Error> for ManifestError {
  fn from(err: serde_json::Error) -> Self {
    ManifestError::message(format!("JSON error: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// A field holds a value we cannot use
  InvalidField { field: String, reason: String },

  /// `define` was neither a boolean nor "minimal"
  InvalidDefine { value: String },

  /// A lifecycle step ran before configuration was resolved
  NotResolved { step: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::InvalidField { field, .. } => Some(format!(
        "Fix `{}` in version-json.toml or pass a valid value on the command line.",
        field
      )),
      ConfigError::InvalidDefine { .. } => {
        Some("Use `define = true`, `define = false`, or `define = \"minimal\"`.".to_string())
      }
      ConfigError::NotResolved { .. } => {
        Some("The host must fire the configuration-resolved event before any other step.".to_string())
      }
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::InvalidField { field, reason } => {
        write!(f, "Invalid configuration value for '{}': {}", field, reason)
      }
      ConfigError::InvalidDefine { value } => {
        write!(f, "Invalid define mode '{}'", value)
      }
      ConfigError::NotResolved { step } => {
        write!(f, "Cannot run {}: configuration has not been resolved", step)
      }
    }
  }
}

impl std::error::Error for ConfigError {}

/// Package descriptor errors, fatal to the configuration step
#[derive(Debug)]
pub enum DescriptorError {
  /// Descriptor file missing or unreadable
  Read { path: PathBuf, source: io::Error },

  /// Descriptor text is not a JSON object
  Malformed { path: Option<PathBuf>, reason: String },
}

impl DescriptorError {
  fn help_message(&self) -> Option<String> {
    match self {
      DescriptorError::Read { path, .. } => Some(format!(
        "Run from the project root or pass --root. Expected a package descriptor at {}",
        path.display()
      )),
      DescriptorError::Malformed { .. } => {
        Some("The package descriptor must be a JSON object, e.g. {\"name\": \"app\", \"version\": \"1.0.0\"}".to_string())
      }
    }
  }
}

impl fmt::Display for DescriptorError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      DescriptorError::Read { path, source } => {
        write!(
          f,
          "Configuration failed: cannot read package descriptor {}: {}",
          path.display(),
          source
        )
      }
      DescriptorError::Malformed { path: Some(path), reason } => {
        write!(
          f,
          "Configuration failed: malformed package descriptor {}: {}",
          path.display(),
          reason
        )
      }
      DescriptorError::Malformed { path: None, reason } => {
        write!(f, "Configuration failed: malformed package descriptor: {}", reason)
      }
    }
  }
}

/// Artifact errors, fatal to the build-finalize step
#[derive(Debug)]
pub enum ArtifactError {
  /// Writing the version artifact failed
  Write { path: PathBuf, source: io::Error },
}

impl ArtifactError {
  fn help_message(&self) -> Option<String> {
    match self {
      ArtifactError::Write { path, .. } => Some(format!(
        "Check that the build output directory exists and is writable: {}",
        path.parent().map(|p| p.display().to_string()).unwrap_or_default()
      )),
    }
  }
}

impl fmt::Display for ArtifactError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ArtifactError::Write { path, source } => {
        write!(f, "Build finalize failed: cannot write {}: {}", path.display(), source)
      }
    }
  }
}

/// Result type alias for version-json
pub type ManifestResult<T> = Result<T, ManifestError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ManifestResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ManifestResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ManifestError>,
{
  fn context(self, ctx: impl Into<String>) -> ManifestResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> ManifestResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &ManifestError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
