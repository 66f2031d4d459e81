//! End-to-end runs of the `shaward` binary against scratch directories.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const HELLO_WORLD_SHA256: &str = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

fn shaward(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_shaward"))
        .args(args)
        .current_dir(cwd)
        .env_remove("SHAWARD_DIR")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run shaward")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

#[test]
fn test_first_run_generates_records() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("report.txt"), b"hello world").unwrap();

    let output = shaward(&[], temp_dir.path());

    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.contains("Generated digest record for report.txt"));
    assert!(text.contains("Records created: 1"));
    assert!(text.contains("Checksums confirmed: 0"));
    assert!(text.contains("Checksums mismatched: 0"));

    let record = fs::read_to_string(temp_dir.path().join("report.txt.sha256")).unwrap();
    assert_eq!(record, HELLO_WORLD_SHA256);
}

#[test]
fn test_second_run_confirms() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.txt"), b"a").unwrap();
    fs::write(temp_dir.path().join("b.txt"), b"b").unwrap();

    shaward(&[], temp_dir.path());
    let output = shaward(&["--json"], temp_dir.path());

    assert_eq!(output.status.code(), Some(0));
    let report = json(&output);
    assert_eq!(report["success"], true);
    assert_eq!(report["summary"]["created"], 0);
    assert_eq!(report["summary"]["confirmed"], 2);
    assert_eq!(report["summary"]["mismatched"], 0);
}

#[test]
fn test_mismatch_sets_exit_code_and_keeps_record() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("report.txt"), b"hello world").unwrap();
    fs::write(temp_dir.path().join("report.txt.sha256"), b"abc123").unwrap();

    let output = shaward(&[], temp_dir.path());

    assert_eq!(output.status.code(), Some(2));
    let text = stdout(&output);
    assert!(text.contains("Checksum mismatch: report.txt"));
    assert!(text.contains("Records created: 0"));
    assert!(text.contains("Checksums mismatched: 1"));

    let record = fs::read_to_string(temp_dir.path().join("report.txt.sha256")).unwrap();
    assert_eq!(record, "abc123");
}

#[test]
fn test_directory_argument_overrides_cwd() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("target");
    fs::create_dir(&target).unwrap();
    fs::write(target.join("x.bin"), b"x").unwrap();

    let output = shaward(&["--json", target.to_str().unwrap()], temp_dir.path());

    assert_eq!(output.status.code(), Some(0));
    let report = json(&output);
    assert_eq!(report["summary"]["created"], 1);
    assert_eq!(report["files"][0]["name"], "x.bin");
    assert_eq!(report["files"][0]["status"], "created");
    assert!(target.join("x.bin.sha256").exists());
}

#[test]
fn test_env_var_selects_directory() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("target");
    fs::create_dir(&target).unwrap();
    fs::write(target.join("x.bin"), b"x").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_shaward"))
        .current_dir(temp_dir.path())
        .env("SHAWARD_DIR", &target)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run shaward");

    assert_eq!(output.status.code(), Some(0));
    assert!(target.join("x.bin.sha256").exists());
}

#[test]
fn test_missing_directory_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing");

    let output = shaward(&[missing.to_str().unwrap()], temp_dir.path());

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("missing"));
}

#[test]
fn test_missing_directory_json_error() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing");

    let output = shaward(&["--json", missing.to_str().unwrap()], temp_dir.path());

    assert_eq!(output.status.code(), Some(1));
    let error: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(error["success"], false);
    assert_eq!(error["result_code"], 1);
}

#[test]
fn test_skipped_files_produce_no_records() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("desktop.ini"), b"[.ShellClassInfo]").unwrap();
    fs::write(temp_dir.path().join("old.md5"), b"d41d8cd98f00b204e9800998ecf8427e").unwrap();

    let output = shaward(&["--json"], temp_dir.path());

    let report = json(&output);
    assert_eq!(report["files"].as_array().unwrap().len(), 0);
    assert!(!temp_dir.path().join("desktop.ini.sha256").exists());
    assert!(!temp_dir.path().join("old.md5.sha256").exists());
}
