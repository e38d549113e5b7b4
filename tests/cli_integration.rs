//! CLI integration tests
//!
//! Drive the built binary against manifests written to temporary directories and
//! check output and exit codes.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const READY: &str = r#"
architecture:
  name: shop
  services:
    - name: web
      type: web
      replicas: 2
      resources: { cpu: 250m, memory: 256Mi }
    - name: api
      type: api
      replicas: 1
      resources: { cpu: 500m, memory: 512Mi }
    - name: db
      type: database
      replicas: 1
      resources: { cpu: 500m, memory: 1Gi }
services:
  - name: web
    domain: web-frontend
    source:
      type: upload
      uploadedFiles: { fileId: f1, fileName: web.zip, size: 10 }
  - name: api
    framework: fastapi
    overrides:
      environmentVars:
        - { key: LOG_FORMAT, value: json }
        - { key: DB_PASSWORD, value: hunter2, secret: true }
    source:
      type: git
      gitRepository:
        url: git@github.com:acme/api.git
        deployKey: { publicKey: ssh-ed25519 AAAA, privateKeyId: k1, isConfigured: true }
"#;

fn nokube() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_nokube"));
    command.env_remove("NOKUBE_LOG_LEVEL");
    command.env_remove("NOKUBE_FALLBACK_PORT");
    command.env_remove("RUST_LOG");
    command
}

fn write_manifest(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write manifest");
    path
}

fn run(args: &[&str], manifest: Option<&Path>) -> Output {
    let mut command = nokube();
    command.args(args);
    if let Some(path) = manifest {
        command.arg(path);
    }
    command.output().expect("Failed to execute nokube")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_cli_help() {
    let output = run(&["--help"], None);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("render"));
    assert!(text.contains("check"));
    assert!(text.contains("catalog"));
}

#[test]
fn test_cli_version() {
    let output = run(&["--version"], None);
    assert!(output.status.success());
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_render_json() {
    let dir = TempDir::new().unwrap();
    let manifest = write_manifest(&dir, "deploy.yaml", READY);

    let output = run(&["render", "--format", "json"], Some(&manifest));
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["project"], "shop");
    assert_eq!(report["step"], "review");
    assert_eq!(report["metrics"]["totalServices"], 3);
    assert_eq!(report["services"].as_array().unwrap().len(), 2);
    assert_eq!(report["services"][0]["framework"], "react");
    assert_eq!(report["services"][0]["flavor"], "spa");
    assert_eq!(report["services"][1]["port"], 8000);
    assert!(report.get("blocked").is_none());
}

#[test]
fn test_render_dockerfile_for_one_service() {
    let dir = TempDir::new().unwrap();
    let manifest = write_manifest(&dir, "deploy.yaml", READY);

    let output = run(
        &["render", "--service", "api", "--format", "dockerfile"],
        Some(&manifest),
    );
    assert!(output.status.success());
    let dockerfile = stdout(&output);
    assert!(dockerfile.starts_with("FROM python"));
    assert!(dockerfile.contains("LOG_FORMAT"));
    assert!(!dockerfile.contains("hunter2"));
    assert!(dockerfile.contains("EXPOSE 8000"));
}

#[test]
fn test_render_to_file() {
    let dir = TempDir::new().unwrap();
    let manifest = write_manifest(&dir, "deploy.yaml", READY);
    let target = dir.path().join("report.yaml");

    let output = run(
        &["render", "-f", "yaml", "-o", target.to_str().unwrap()],
        Some(&manifest),
    );
    assert!(output.status.success());
    assert!(stdout(&output).contains("Output written to"));

    let written = fs::read_to_string(&target).unwrap();
    assert!(written.contains("serviceName: web"));
}

#[test]
fn test_render_unknown_service_fails() {
    let dir = TempDir::new().unwrap();
    let manifest = write_manifest(&dir, "deploy.yaml", READY);

    let output = run(&["render", "--service", "db"], Some(&manifest));
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_check_ready() {
    let dir = TempDir::new().unwrap();
    let manifest = write_manifest(&dir, "deploy.yaml", READY);

    let output = run(&["check"], Some(&manifest));
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("ready for review"));
}

#[test]
fn test_check_blocked_on_unacknowledged_key() {
    let dir = TempDir::new().unwrap();
    let manifest = write_manifest(
        &dir,
        "deploy.yaml",
        &READY.replace("isConfigured: true", "isConfigured: false"),
    );

    let output = run(&["check", "--format", "json"], Some(&manifest));
    assert_eq!(output.status.code(), Some(2));

    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["step"], "source");
    assert_eq!(report["ready"], false);
    assert_eq!(report["blocked"]["reason"], "sources_incomplete");
    assert_eq!(report["blocked"]["pending"][0]["service"], "api");
    assert_eq!(report["blocked"]["pending"][0]["status"], "awaiting_acknowledgement");
}

#[test]
fn test_check_json_manifest() {
    let dir = TempDir::new().unwrap();
    let manifest = write_manifest(
        &dir,
        "deploy.json",
        r#"{"architecture": {"name": "solo", "services": []}}"#,
    );

    let output = run(&["check"], Some(&manifest));
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).contains("stopped at the architecture step"));
}

#[test]
fn test_check_missing_manifest() {
    let output = run(&["check", "/nonexistent/deploy.yaml"], None);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_check_malformed_manifest() {
    let dir = TempDir::new().unwrap();
    let manifest = write_manifest(&dir, "deploy.yaml", "architecture: [not, a, map]");

    let output = run(&["check"], Some(&manifest));
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_catalog_domains() {
    let output = run(&["catalog", "--format", "json"], None);
    assert!(output.status.success());

    let listing: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let ids: Vec<&str> = listing["domains"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|d| d["id"].as_str())
        .collect();
    assert!(ids.contains(&"web-frontend"));
    assert!(ids.contains(&"custom"));
}

#[test]
fn test_catalog_frameworks_human() {
    let output = run(&["catalog", "--domain", "web-backend"], None);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Frameworks in web-backend"));
    assert!(text.contains("fastapi"));
}

#[test]
fn test_catalog_unknown_domain() {
    let output = run(&["catalog", "--domain", "underwater"], None);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_invalid_fallback_port_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    let manifest = write_manifest(&dir, "deploy.yaml", READY);

    let output = nokube()
        .env("NOKUBE_FALLBACK_PORT", "not-a-port")
        .arg("check")
        .arg(&manifest)
        .output()
        .expect("Failed to execute nokube");
    assert_eq!(output.status.code(), Some(1));
}
