//! End-to-end tests against the built binary.

use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn cdpdiff() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cdpdiff"));
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn write_logs(dir: &TempDir, a: &str, b: &str) -> (String, String) {
    let log_a = dir.path().join("a.log");
    let log_b = dir.path().join("b.log");
    fs::write(&log_a, a).unwrap();
    fs::write(&log_b, b).unwrap();
    (
        log_a.to_string_lossy().into_owned(),
        log_b.to_string_lossy().into_owned(),
    )
}

#[test]
fn test_wrong_argument_count_is_usage_error() {
    let out = cdpdiff().arg("only-one.log").output().unwrap();
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Usage"));

    let out = cdpdiff().args(["a", "b", "c"]).output().unwrap();
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn test_compare_json() {
    let dir = TempDir::new().unwrap();
    let (a, b) = write_logs(
        &dir,
        "-> {\"id\":1,\"method\":\"Page.enable\"}\n<- {\"id\":1,\"result\":{}}\n",
        "-> {\"id\":1,\"method\":\"Network.enable\"}\n",
    );

    let out = cdpdiff()
        .current_dir(dir.path())
        .args(["--json", &a, &b])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(0));

    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["a"]["matched"], 1);
    assert_eq!(json["b"]["unmatched_requests"][0]["method"], "Network.enable");
    assert_eq!(json["requests_only_in_a"][0]["method"], "Page.enable");
    assert_eq!(json["requests_only_in_b"][0]["method"], "Network.enable");
}

#[test]
fn test_compare_text() {
    let dir = TempDir::new().unwrap();
    let (a, b) = write_logs(&dir, "<- {\"result\":{}}\n", "");

    let out = cdpdiff()
        .current_dir(dir.path())
        .args(["--compact", &a, &b])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("A no-id responses: 1"));
    assert!(stdout.contains("B no-id responses: 0"));
}

#[test]
fn test_decode_error_reports_payload_and_fails() {
    let dir = TempDir::new().unwrap();
    let (a, b) = write_logs(&dir, "-> {\"id\":1,\"method\"\n", "");

    let out = cdpdiff()
        .current_dir(dir.path())
        .args([&a, &b])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Error reading log A"));
    assert!(stderr.contains("{\"id\":1,\"method\""));
}

#[test]
fn test_project_config_markers() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join(".cdpdiff")).unwrap();
    fs::write(
        dir.path().join(".cdpdiff/config.toml"),
        "[markers]\nrequest = \">>\"\nresponse = \"<<\"\n",
    )
    .unwrap();
    let (a, b) = write_logs(&dir, ">> {\"id\":1,\"method\":\"Page.enable\"}\n", "");

    let out = cdpdiff()
        .current_dir(dir.path())
        .args(["--json", &a, &b])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(0));
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["a"]["requests"], 1);
}

#[test]
fn test_malformed_b_fails_without_report() {
    let dir = TempDir::new().unwrap();
    let (a, b) = write_logs(
        &dir,
        "-> {\"id\":1,\"method\":\"Page.enable\"}\n<- {\"id\":1,\"result\":{}}\n",
        "<- {\"id\":2,\"result\":[\n",
    );

    let out = cdpdiff()
        .current_dir(dir.path())
        .args(["--json", &a, &b])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Error reading log B"));
    assert!(stderr.contains("{\"id\":2,\"result\":["));
}

#[test]
fn test_non_utf8_banner_is_ignored() {
    let dir = TempDir::new().unwrap();
    let log_a = dir.path().join("a.log");
    let log_b = dir.path().join("b.log");
    fs::write(
        &log_a,
        b"\xff\xfe capture header\n-> {\"id\":1,\"method\":\"Page.enable\"}\n".as_slice(),
    )
    .unwrap();
    fs::write(&log_b, "").unwrap();

    let out = cdpdiff()
        .current_dir(dir.path())
        .arg("--json")
        .arg(&log_a)
        .arg(&log_b)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(0));
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["a"]["requests"], 1);
}
