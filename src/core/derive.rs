//! Pure metadata derivation
//!
//! Turns already-resolved inputs (descriptor text, revision strings,
//! timestamps, options) into a [`VersionDetails`] record and the optional
//! define table. Nothing in here touches the file system, spawns processes, or
//! reads the clock: every input is a parameter, so identical inputs always give
//! identical outputs.

use crate::core::config::{DefineMode, ManifestOptions};
use crate::core::error::{DescriptorError, ManifestResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Name used when the descriptor has no `name`
pub const UNKNOWN_NAME: &str = "unknown";

/// Width of the timestamp-derived fallback version
const FALLBACK_VERSION_WIDTH: usize = 15;

/// Constant name → JSON literal, substituted verbatim at compile time
pub type DerivedConstants = BTreeMap<String, String>;

/// The version manifest
///
/// Field order is the serialized order of the artifact and the dev endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionDetails {
  pub name: String,
  pub version: String,
  pub tag: String,
  pub commit: String,
  pub commit_time: String,
  pub created: String,
}

impl VersionDetails {
  /// Same record with a different `created` stamp
  pub fn restamped(&self, created: impl Into<String>) -> Self {
    Self {
      created: created.into(),
      ..self.clone()
    }
  }

  /// Pretty-printed JSON (2-space indent)
  pub fn to_pretty_json(&self) -> ManifestResult<String> {
    Ok(serde_json::to_string_pretty(self)?)
  }
}

/// Raw inputs to a derivation
#[derive(Debug, Clone)]
pub struct DeriveInput<'a> {
  pub descriptor_text: &'a str,
  pub tag: &'a str,
  pub commit: &'a str,
  pub commit_time: &'a str,
  pub created: &'a str,
  pub fallback_version_timestamp: &'a str,
  pub options: &'a ManifestOptions,
}

/// Result of a derivation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derived {
  pub details: VersionDetails,
  /// `None` when defines are disabled (absent, not empty)
  pub defines: Option<DerivedConstants>,
}

/// Derive the manifest and the define table from raw inputs
pub fn derive(input: &DeriveInput<'_>) -> ManifestResult<Derived> {
  let descriptor = parse_descriptor(input.descriptor_text)?;

  let name = descriptor_field(&descriptor, "name")?.unwrap_or_else(|| UNKNOWN_NAME.to_string());
  let version = descriptor_field(&descriptor, "version")?
    .unwrap_or_else(|| fallback_version(input.fallback_version_timestamp));

  let defines = build_defines(input.options, &version, input.tag)?;

  let details = VersionDetails {
    name,
    version,
    tag: input.tag.to_string(),
    commit: input.commit.to_string(),
    commit_time: input.commit_time.to_string(),
    created: input.created.to_string(),
  };

  Ok(Derived { details, defines })
}

/// Timestamp with `-`, `:` and `T` removed, cut to 15 characters
///
/// `2024-03-05T14:07:09Z` becomes `20240305140709Z`.
pub fn fallback_version(timestamp: &str) -> String {
  timestamp
    .chars()
    .filter(|c| !matches!(c, '-' | ':' | 'T'))
    .take(FALLBACK_VERSION_WIDTH)
    .collect()
}

fn parse_descriptor(text: &str) -> ManifestResult<serde_json::Map<String, Value>> {
  let value: Value = serde_json::from_str(text).map_err(|e| DescriptorError::Malformed {
    path: None,
    reason: e.to_string(),
  })?;

  match value {
    Value::Object(map) => Ok(map),
    other => Err(
      DescriptorError::Malformed {
        path: None,
        reason: format!("expected a JSON object, found {}", json_kind(&other)),
      }
      .into(),
    ),
  }
}

// Null and empty strings count as absent; numbers keep their JSON text.
fn descriptor_field(descriptor: &serde_json::Map<String, Value>, key: &str) -> ManifestResult<Option<String>> {
  match descriptor.get(key) {
    None | Some(Value::Null) => Ok(None),
    Some(Value::String(s)) if s.is_empty() => Ok(None),
    Some(Value::String(s)) => Ok(Some(s.clone())),
    Some(Value::Number(n)) => Ok(Some(n.to_string())),
    Some(other) => Err(
      DescriptorError::Malformed {
        path: None,
        reason: format!("`{}` must be a string or number, found {}", key, json_kind(other)),
      }
      .into(),
    ),
  }
}

fn build_defines(options: &ManifestOptions, version: &str, tag: &str) -> ManifestResult<Option<DerivedConstants>> {
  if options.define == DefineMode::Disabled {
    return Ok(None);
  }

  let mut defines = DerivedConstants::new();
  defines.insert(
    format!("{}.APP_VERSION", options.namespace),
    serde_json::to_string(version)?,
  );
  if options.define != DefineMode::Minimal {
    defines.insert(format!("{}.APP_TAG", options.namespace), serde_json::to_string(tag)?);
  }

  Ok(Some(defines))
}

fn json_kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "an array",
    Value::Object(_) => "an object",
  }
}
