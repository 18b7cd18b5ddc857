//! Integration tests for `version-json build`

use crate::helpers::*;
use anyhow::Result;

const PACKAGE: &str = r#"{ "name": "storefront", "version": "2.1.0" }"#;

#[test]
fn test_build_writes_manifest_into_out_dir() -> Result<()> {
  let project = TestProject::with_git(PACKAGE)?;
  project.tag("v2.1.0")?;
  project.mkdir("dist")?;

  let output = run_version_json(&project.path, &["build"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.trim().ends_with("version.json"), "unexpected stdout: {}", stdout);

  // Finalize logs exactly one line naming the written file
  let stderr = String::from_utf8_lossy(&output.stderr);
  let wrote: Vec<&str> = stderr.lines().filter(|line| line.contains("wrote")).collect();
  assert_eq!(wrote.len(), 1, "stderr: {}", stderr);
  assert!(wrote[0].contains("dist/version.json"), "stderr: {}", stderr);

  let manifest = project.read_json("dist/version.json")?;
  assert_eq!(manifest["name"], "storefront");
  assert_eq!(manifest["version"], "2.1.0");
  assert_eq!(manifest["tag"], "v2.1.0");
  assert_eq!(manifest["commit"], project.head()?);

  let commit_time = manifest["commitTime"].as_str().unwrap_or_default();
  assert!(chrono::DateTime::parse_from_rfc3339(commit_time).is_ok());

  let created = manifest["created"].as_str().unwrap_or_default();
  assert!(created.ends_with('Z'), "created should be UTC: {}", created);
  assert!(chrono::DateTime::parse_from_rfc3339(created).is_ok());

  Ok(())
}

#[test]
fn test_build_manifest_field_order() -> Result<()> {
  let project = TestProject::with_git(PACKAGE)?;
  project.mkdir("dist")?;

  run_version_json(&project.path, &["build"])?;

  let text = std::fs::read_to_string(project.path.join("dist/version.json"))?;
  let positions: Vec<usize> = ["\"name\"", "\"version\"", "\"tag\"", "\"commit\"", "\"commitTime\"", "\"created\""]
    .iter()
    .map(|key| text.find(key).unwrap_or(usize::MAX))
    .collect();

  let mut sorted = positions.clone();
  sorted.sort_unstable();
  assert_eq!(positions, sorted, "fields out of order:\n{}", text);
  assert!(!positions.contains(&usize::MAX));

  Ok(())
}

#[test]
fn test_build_untagged_repo_uses_abbreviated_commit() -> Result<()> {
  let project = TestProject::with_git(PACKAGE)?;
  project.mkdir("dist")?;

  run_version_json(&project.path, &["build"])?;

  let manifest = project.read_json("dist/version.json")?;
  let tag = manifest["tag"].as_str().unwrap_or_default().to_string();
  let head = project.head()?;
  assert!(!tag.is_empty());
  assert!(head.starts_with(&tag), "tag {} should abbreviate {}", tag, head);

  Ok(())
}

#[test]
fn test_build_describes_commits_past_tag() -> Result<()> {
  let project = TestProject::with_git(PACKAGE)?;
  project.tag("v2.1.0")?;
  project.write_file("app.js", "console.log('hi');\n")?;
  project.commit("Add app")?;
  project.mkdir("dist")?;

  run_version_json(&project.path, &["build"])?;

  let manifest = project.read_json("dist/version.json")?;
  let tag = manifest["tag"].as_str().unwrap_or_default();
  assert!(tag.starts_with("v2.1.0-1-g"), "unexpected describe output: {}", tag);

  Ok(())
}

#[test]
fn test_build_outside_git_uses_sentinels() -> Result<()> {
  let project = TestProject::new(PACKAGE)?;
  project.mkdir("dist")?;

  run_version_json(&project.path, &["build"])?;

  let manifest = project.read_json("dist/version.json")?;
  assert_eq!(manifest["tag"], "untagged");
  assert_eq!(manifest["commit"], "unknown");
  assert_eq!(manifest["commitTime"], "unknown");
  assert_eq!(manifest["name"], "storefront");

  Ok(())
}

#[test]
fn test_build_missing_version_falls_back_to_timestamp() -> Result<()> {
  let project = TestProject::new(r#"{ "name": "storefront" }"#)?;
  project.mkdir("dist")?;

  run_version_json(&project.path, &["build"])?;

  let manifest = project.read_json("dist/version.json")?;
  let version = manifest["version"].as_str().unwrap_or_default();
  assert_eq!(version.len(), 15);
  assert!(version[..14].chars().all(|c| c.is_ascii_digit()), "unexpected version {}", version);

  let created = manifest["created"].as_str().unwrap_or_default();
  let stripped: String = created.chars().filter(|c| !matches!(c, '-' | ':' | 'T')).take(15).collect();
  assert_eq!(version, stripped);

  Ok(())
}

#[test]
fn test_build_numeric_version_is_kept() -> Result<()> {
  let project = TestProject::new(r#"{ "name": "storefront", "version": 2 }"#)?;
  project.mkdir("dist")?;

  run_version_json(&project.path, &["build"])?;

  let manifest = project.read_json("dist/version.json")?;
  assert_eq!(manifest["version"], "2");

  Ok(())
}

#[test]
fn test_build_missing_name_is_unknown() -> Result<()> {
  let project = TestProject::new(r#"{ "version": "0.0.1" }"#)?;
  project.mkdir("dist")?;

  run_version_json(&project.path, &["build"])?;

  let manifest = project.read_json("dist/version.json")?;
  assert_eq!(manifest["name"], "unknown");
  assert_eq!(manifest["version"], "0.0.1");

  Ok(())
}

#[test]
fn test_build_custom_out_dir_and_output() -> Result<()> {
  let project = TestProject::new(PACKAGE)?;
  project.mkdir("public/build")?;

  run_version_json(
    &project.path,
    &["build", "--out-dir", "public/build", "--output", "meta.json"],
  )?;

  assert!(project.file_exists("public/build/meta.json"));
  assert!(!project.file_exists("public/build/version.json"));

  Ok(())
}

#[test]
fn test_build_reads_output_from_config_file() -> Result<()> {
  let project = TestProject::new(PACKAGE)?;
  project.write_file("version-json.toml", "output = \"build-info.json\"\n")?;
  project.mkdir("dist")?;

  run_version_json(&project.path, &["build"])?;

  assert!(project.file_exists("dist/build-info.json"));
  let manifest = project.read_json("dist/build-info.json")?;
  assert_eq!(manifest["version"], "2.1.0");

  Ok(())
}

#[test]
fn test_build_with_root_flag() -> Result<()> {
  let project = TestProject::new(PACKAGE)?;
  project.mkdir("dist")?;
  let elsewhere = tempfile::TempDir::new()?;
  let root = project.path.to_string_lossy().to_string();

  run_version_json(elsewhere.path(), &["build", "--root", &root])?;

  assert!(project.file_exists("dist/version.json"));

  Ok(())
}

#[test]
fn test_build_missing_out_dir_is_system_error() -> Result<()> {
  let project = TestProject::new(PACKAGE)?;

  let output = run_version_json_raw(&project.path, &["build"])?;
  assert_eq!(output.status.code(), Some(2));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Build finalize failed"), "stderr: {}", stderr);
  assert!(!project.file_exists("dist/version.json"));

  Ok(())
}

#[test]
fn test_build_missing_package_json_is_user_error() -> Result<()> {
  let project = TestProject::new(PACKAGE)?;
  std::fs::remove_file(project.path.join("package.json"))?;
  project.mkdir("dist")?;

  let output = run_version_json_raw(&project.path, &["build"])?;
  assert_eq!(output.status.code(), Some(1));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Configuration failed"), "stderr: {}", stderr);
  assert!(!project.file_exists("dist/version.json"));

  Ok(())
}

#[test]
fn test_build_malformed_package_json_is_user_error() -> Result<()> {
  let project = TestProject::new("{ not json")?;
  project.mkdir("dist")?;

  let output = run_version_json_raw(&project.path, &["build"])?;
  assert_eq!(output.status.code(), Some(1));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("malformed package descriptor"), "stderr: {}", stderr);

  Ok(())
}
