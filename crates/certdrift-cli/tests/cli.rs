//! End-to-end runs of the `certdrift` binary against a fake enumeration tool.

#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

const BASELINE: &str = "CN=Example Root,SHA256:abc123\n";

/// Working directory with a baseline and a config pointing at `sh -c <script>`.
fn workdir(script: &str, with_baseline: bool) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    if with_baseline {
        std::fs::write(dir.path().join("ref.csv"), BASELINE).unwrap();
    }
    let config = format!(
        "[tool]\nprogram = \"sh\"\nargs = [\"-c\", \"{script}\"]\ntimeout_secs = 10\n"
    );
    std::fs::write(dir.path().join("certdrift.toml"), config).unwrap();
    dir
}

fn certdrift(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("certdrift").unwrap();
    cmd.env_remove("CERTDRIFT_TOOL")
        .env_remove("CERTDRIFT_WORKDIR")
        .env_remove("RUST_LOG")
        .arg("-C")
        .arg(dir);
    cmd
}

#[test]
fn matching_inventory_exits_zero() {
    let dir = workdir("printf 'CN=Example Root,SHA256:abc123'", true);

    certdrift(dir.path())
        .args(["check", "--headless"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("MATCH"));

    assert_eq!(
        std::fs::read_to_string(dir.path().join("results.csv")).unwrap(),
        BASELINE
    );
}

#[test]
fn drift_exits_one() {
    let dir = workdir("printf 'CN=Example Root,SHA256:def456'", true);

    certdrift(dir.path())
        .args(["check", "--headless"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("DRIFT"));
}

#[test]
fn interactive_alert_without_terminal_prints_banner() {
    let dir = workdir("printf 'CN=Example Root,SHA256:def456'", true);

    certdrift(dir.path())
        .arg("check")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "discrepancy with your computer certificates",
        ));
}

#[test]
fn abnormal_exit_is_fatal() {
    let dir = workdir("exit 3", true);
    std::fs::write(dir.path().join("results.csv"), "previous\n").unwrap();

    certdrift(dir.path())
        .args(["check", "--headless"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("exit code 3"));

    assert_eq!(
        std::fs::read_to_string(dir.path().join("results.csv")).unwrap(),
        "previous\n"
    );
}

#[test]
fn missing_baseline_is_fatal_not_drift() {
    let dir = workdir("printf 'CN=Example Root,SHA256:abc123'", false);

    certdrift(dir.path())
        .args(["check", "--headless"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("baseline artifact not found"))
        .stdout(predicate::str::contains("DRIFT").not());
}

#[test]
fn json_report_is_machine_readable() {
    let dir = workdir("printf 'CN=Example Root,SHA256:abc123'", true);

    let output = certdrift(dir.path())
        .args(["-o", "json", "check", "--headless"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["verdict"], "match");
    assert_eq!(report["records"], 1);
    assert_eq!(report["results_fingerprint"], report["baseline_fingerprint"]);
}

#[test]
fn fingerprint_prints_sha256sum_layout() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("hello.txt");
    std::fs::write(&file, "hello world").unwrap();

    certdrift(dir.path())
        .arg("fingerprint")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9  ",
        ));
}

#[test]
fn config_show_reports_workdir_file() {
    let dir = workdir("true", true);

    certdrift(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("certdrift.toml"))
        .stdout(predicate::str::contains("timeout_secs = 10"));
}
