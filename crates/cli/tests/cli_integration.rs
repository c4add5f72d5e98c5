//! CLI integration tests for every subcommand.
//!
//! Uses `assert_cmd` to spawn the `ferry` binary and verify exit codes,
//! stdout content, and stderr content. Commands run from the workspace root
//! so that `fixtures/` resolves; everything they write goes to a temp dir.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Locate the workspace root by walking up from CARGO_MANIFEST_DIR.
fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    // crates/cli -> workspace root is two levels up
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .to_path_buf()
}

fn fixture() -> PathBuf {
    workspace_root().join("fixtures/trucklease")
}

/// Helper: create a Command for the `ferry` binary, rooted at workspace.
fn ferry() -> Command {
    let mut cmd = cargo_bin_cmd!("ferry");
    cmd.current_dir(workspace_root());
    cmd
}

/// Run `analyze` on the fixture and return the intent path.
fn analyzed(tmp: &TempDir) -> PathBuf {
    let out = tmp.path().join("analysis");
    ferry()
        .args(["--quiet", "analyze"])
        .arg(fixture())
        .arg("--out")
        .arg(&out)
        .assert()
        .success();
    out.join("migration_intent.json")
}

// ──────────────────────────────────────────────
// 1. Help and version
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    ferry()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Migrate a Struts web application"));
}

#[test]
fn version_exits_0() {
    ferry()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ferry"));
}

#[test]
fn unknown_subcommand_fails() {
    ferry().arg("deploy").assert().failure();
}

// ──────────────────────────────────────────────
// 2. Analyze
// ──────────────────────────────────────────────

#[test]
fn analyze_writes_both_artifacts() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("analysis");
    ferry()
        .arg("analyze")
        .arg(fixture())
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("action mappings:  7"))
        .stdout(predicate::str::contains("routes:           8"))
        .stdout(predicate::str::contains("no diagnostics"));

    let analysis: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("struts_analysis.json")).unwrap())
            .unwrap();
    assert_eq!(analysis["action_mappings"].as_array().unwrap().len(), 7);
    let intent: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("migration_intent.json")).unwrap())
            .unwrap();
    assert_eq!(intent["routing"][0]["path"], "/");
}

#[test]
fn analyze_json_output() {
    let tmp = TempDir::new().unwrap();
    let output = ferry()
        .args(["--output", "json", "analyze", "--parallel"])
        .arg(fixture())
        .arg("--out")
        .arg(tmp.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["form_beans"], 4);
    assert_eq!(summary["pages"], 7);
    assert_eq!(summary["artifacts"].as_array().unwrap().len(), 2);
    assert_eq!(summary["diagnostics"], serde_json::json!([]));
}

#[test]
fn analyze_missing_root_exits_1() {
    let tmp = TempDir::new().unwrap();
    ferry()
        .args(["analyze", "no/such/app", "--out"])
        .arg(tmp.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("no/such/app"));
    assert!(!tmp.path().join("migration_intent.json").exists());
}

#[test]
fn analyze_missing_root_json_carries_kind() {
    let output = ferry()
        .args(["--output", "json", "analyze", "no/such/app"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let err: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(err["kind"], "input_root_missing");
}

#[test]
fn malformed_config_exits_1() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("ferry.toml");
    fs::write(&config, "[frontend\npackage_name = ").unwrap();
    ferry()
        .arg("--config")
        .arg(&config)
        .arg("analyze")
        .arg(fixture())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("ferry.toml"));
}

// ──────────────────────────────────────────────
// 3. Generate
// ──────────────────────────────────────────────

#[test]
fn generate_reports_every_written_file() {
    let tmp = TempDir::new().unwrap();
    let intent = analyzed(&tmp);
    let frontend = tmp.path().join("web");
    let backend = tmp.path().join("api");
    ferry()
        .arg("generate")
        .arg(&intent)
        .arg("--frontend")
        .arg(&frontend)
        .arg("--backend")
        .arg(&backend)
        .assert()
        .success()
        .stdout(predicate::str::contains("wrote "))
        .stdout(predicate::str::contains("ApplicantInfo.tsx"))
        .stdout(predicate::str::contains("server.ts"));

    assert!(frontend.join("src/AppRouter.tsx").is_file());
    assert!(frontend.join(".ferry-manifest.json").is_file());
    assert!(backend.join("src/routes/applicantInfo.ts").is_file());
    assert!(backend.join("package.json").is_file());
}

#[test]
fn generate_json_summary() {
    let tmp = TempDir::new().unwrap();
    let intent = analyzed(&tmp);
    let output = ferry()
        .args(["--output", "json", "generate"])
        .arg(&intent)
        .arg("--frontend")
        .arg(tmp.path().join("web"))
        .arg("--backend")
        .arg(tmp.path().join("api"))
        .output()
        .unwrap();
    assert!(output.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(summary["frontend"]["written"].as_u64().unwrap() > 7);
    assert!(summary["backend"]["written"].as_u64().unwrap() > 7);
    assert_eq!(summary["frontend"]["removed"], serde_json::json!([]));
}

#[test]
fn generate_missing_intent_exits_1() {
    let tmp = TempDir::new().unwrap();
    ferry()
        .args(["generate", "no/such/migration_intent.json", "--frontend"])
        .arg(tmp.path().join("web"))
        .arg("--backend")
        .arg(tmp.path().join("api"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("migration_intent.json"));
    assert!(!tmp.path().join("web").exists());
}

// ──────────────────────────────────────────────
// 4. Migrate
// ──────────────────────────────────────────────

#[test]
fn migrate_produces_all_three_trees() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("migration");
    ferry()
        .args(["--quiet", "migrate"])
        .arg(fixture())
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(out.join("analysis/struts_analysis.json").is_file());
    assert!(out.join("analysis/migration_intent.json").is_file());
    assert!(out.join("frontend/src/pages/Welcome.tsx").is_file());
    assert!(out.join("backend/src/server.ts").is_file());
}

#[test]
fn migrate_matches_analyze_then_generate() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("migration");
    ferry()
        .args(["--quiet", "migrate"])
        .arg(fixture())
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    let intent = analyzed(&tmp);
    let backend = tmp.path().join("api");
    ferry()
        .args(["--quiet", "generate"])
        .arg(&intent)
        .arg("--frontend")
        .arg(tmp.path().join("web"))
        .arg("--backend")
        .arg(&backend)
        .assert()
        .success();

    for rel in ["src/server.ts", "src/routes/vehiclePreference.ts"] {
        assert_eq!(
            fs::read_to_string(out.join("backend").join(rel)).unwrap(),
            fs::read_to_string(backend.join(rel)).unwrap(),
            "{}",
            rel
        );
    }
}

// ──────────────────────────────────────────────
// 5. Validate and show
// ──────────────────────────────────────────────

#[test]
fn validate_analyzed_intent() {
    let tmp = TempDir::new().unwrap();
    let intent = analyzed(&tmp);
    ferry()
        .arg("validate")
        .arg(&intent)
        .assert()
        .success()
        .stdout(predicate::str::contains("valid"));
    ferry()
        .args(["--output", "json", "validate"])
        .arg(&intent)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"valid\": true"));
}

#[test]
fn validate_rejects_unknown_route_component() {
    let tmp = TempDir::new().unwrap();
    let intent = analyzed(&tmp);
    let mut doc: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&intent).unwrap()).unwrap();
    doc["routing"][0]["component"] = serde_json::json!("Missing");
    let broken = tmp.path().join("broken.json");
    fs::write(&broken, serde_json::to_string(&doc).unwrap()).unwrap();

    ferry()
        .arg("validate")
        .arg(&broken)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid intent"))
        .stderr(predicate::str::contains("unknown component 'Missing'"));
}

#[test]
fn validate_rejects_schema_violation_as_json() {
    let tmp = TempDir::new().unwrap();
    let broken = tmp.path().join("broken.json");
    fs::write(&broken, r#"{"react_components": []}"#).unwrap();
    let output = ferry()
        .args(["--output", "json", "validate"])
        .arg(&broken)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let report: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(report["valid"], false);
    assert!(!report["errors"].as_array().unwrap().is_empty());
}

#[test]
fn show_lists_sections() {
    let tmp = TempDir::new().unwrap();
    let intent = analyzed(&tmp);
    ferry()
        .arg("show")
        .arg(&intent)
        .assert()
        .success()
        .stdout(predicate::str::contains("Components (8)"))
        .stdout(predicate::str::contains("Routes (8)"))
        .stdout(predicate::str::contains("-> ApplicantInfo (protected)"));
}

#[test]
fn show_json() {
    let tmp = TempDir::new().unwrap();
    let intent = analyzed(&tmp);
    let output = ferry()
        .args(["--output", "json", "show"])
        .arg(&intent)
        .output()
        .unwrap();
    assert!(output.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["routes"].as_array().unwrap().len(), 8);
    assert!(summary["endpoints"]
        .as_array()
        .unwrap()
        .contains(&serde_json::json!("POST /applicant-info")));
}
