/// End-to-end tests for config file handling
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CHANGE_LOG: &str = r#"{
    "projectPath": "C:\\P\\P.csproj",
    "batches": [
        {
            "changes": {
                "net6.0": {
                    "added": [
                        { "id": "Declared", "providerType": "NuGetDependency", "resolved": true, "topLevel": true },
                        { "id": "Transitive", "providerType": "NuGetDependency", "resolved": true, "topLevel": true }
                    ]
                }
            }
        },
        {
            "changes": {
                "net6.0": {
                    "added": [
                        { "id": "Declared", "providerType": "NuGetDependency", "resolved": false, "topLevel": true }
                    ]
                }
            }
        }
    ]
}"#;

fn write_project(dir: &Path, config: Option<&str>) {
    fs::write(dir.join("changes.json"), CHANGE_LOG).unwrap();
    if let Some(config) = config {
        fs::write(dir.join("depsnap.config.yml"), config).unwrap();
    }
}

#[test]
fn test_without_config_uses_standard_filters() {
    let dir = TempDir::new().unwrap();
    write_project(dir.path(), None);

    // The unresolved re-report of a resolved package is dropped
    cargo_bin_cmd!("depsnap")
        .arg(dir.path().join("changes.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("unresolved: no"))
        .stdout(predicate::str::contains("[implicit]").not());
}

#[test]
fn test_discovered_config_marks_implicit_dependencies() {
    let dir = TempDir::new().unwrap();
    write_project(
        dir.path(),
        Some(
            r#"
active_target_framework: net6.0
project_item_specs: [Declared]
providers:
  - provider_type: NuGetDependency
"#,
        ),
    );

    cargo_bin_cmd!("depsnap")
        .arg(dir.path().join("changes.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("net6.0 (active, 2 dependencies)"))
        .stdout(predicate::str::contains("Transitive [implicit]"))
        .stdout(predicate::str::contains("Declared [implicit]").not());
}

#[test]
fn test_empty_filter_list_commits_changes_as_reported() {
    let dir = TempDir::new().unwrap();
    write_project(dir.path(), Some("filters: []\n"));

    cargo_bin_cmd!("depsnap")
        .arg(dir.path().join("changes.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Declared [unresolved]"))
        .stdout(predicate::str::contains("unresolved: yes"));
}

#[test]
fn test_explicit_config_path() {
    let dir = TempDir::new().unwrap();
    write_project(dir.path(), Some("filters: [no-such-filter]\n"));
    let explicit = dir.path().join("other.yml");
    fs::write(&explicit, "active_target_framework: net6.0\n").unwrap();

    // The explicit file wins over the broken discovered one
    cargo_bin_cmd!("depsnap")
        .arg(dir.path().join("changes.json"))
        .arg("--config")
        .arg(&explicit)
        .assert()
        .success()
        .stdout(predicate::str::contains("Active target framework: net6.0"));
}

#[test]
fn test_invalid_filter_name_is_an_application_error() {
    let dir = TempDir::new().unwrap();
    write_project(dir.path(), Some("filters: [no-such-filter]\n"));

    cargo_bin_cmd!("depsnap")
        .arg(dir.path().join("changes.json"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Invalid config"))
        .stderr(predicate::str::contains("no-such-filter"));
}

#[test]
fn test_explicit_config_missing_file() {
    let dir = TempDir::new().unwrap();
    write_project(dir.path(), None);

    cargo_bin_cmd!("depsnap")
        .arg(dir.path().join("changes.json"))
        .args(["-c", "/nonexistent/depsnap.config.yml"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Failed to read config file"));
}

#[test]
fn test_unknown_config_field_logs_warning() {
    let dir = TempDir::new().unwrap();
    write_project(dir.path(), Some("check_cve: true\n"));

    cargo_bin_cmd!("depsnap")
        .arg(dir.path().join("changes.json"))
        .env("RUST_LOG", "warn")
        .assert()
        .success()
        .stderr(predicate::str::contains("unknown config field"));
}
