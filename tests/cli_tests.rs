//! Integration tests for the tidbits CLI
//!
//! These tests run the actual CLI binary and verify output.

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Get the binary to test, isolated from any TIDBITS_* in the environment
fn tidbits_cmd() -> Command {
    let mut cmd = Command::cargo_bin("tidbits").unwrap();
    cmd.env_remove("TIDBITS_POLL_INTERVAL_MS")
        .env_remove("TIDBITS_MAX_ATTEMPTS")
        .env_remove("TIDBITS_REQUEST_TIMEOUT_SECS")
        .env_remove("TIDBITS_USER_AGENT");
    cmd
}

#[test]
fn test_help_flag() {
    tidbits_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("fetch"))
        .stdout(predicate::str::contains("count"));
}

#[test]
fn test_fetch_help() {
    tidbits_cmd()
        .args(["fetch", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--interval-ms"))
        .stdout(predicate::str::contains("--max-attempts"));
}

// ============================================================================
// count
// ============================================================================

#[test]
fn test_count_file_most_common() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("words.txt");
    fs::write(&input, "b a c a\nb a\n").unwrap();

    tidbits_cmd()
        .args(["count", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout("a\t3\nb\t2\nc\t1\n");
}

#[test]
fn test_count_stdin_top_with_seed() {
    tidbits_cmd()
        .args(["count", "--top", "2", "--seed", "zzz"])
        .write_stdin("x y x")
        .assert()
        .success()
        .stdout("x\t2\ny\t1\n");
}

#[test]
fn test_count_seed_reported_at_zero() {
    tidbits_cmd()
        .args(["count", "--seed", "never"])
        .write_stdin("once")
        .assert()
        .success()
        .stdout("once\t1\nnever\t0\n");
}

#[test]
fn test_count_json() {
    let output = tidbits_cmd()
        .args(["count", "--json"])
        .write_stdin("hit hit miss")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let rendered: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(rendered, serde_json::json!({"hit": 2, "miss": 1}));
}

#[test]
fn test_count_missing_file() {
    tidbits_cmd()
        .args(["count", "/nonexistent/words.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("Check file path and permissions"));
}

// ============================================================================
// fetch
// ============================================================================

#[test]
fn test_fetch_invalid_url() {
    tidbits_cmd()
        .args(["fetch", "not-a-url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("TB-001"));
}

#[test]
fn test_fetch_rejects_zero_max_attempts() {
    tidbits_cmd()
        .args(["fetch", "http://127.0.0.1:1/", "--max-attempts", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("TB-010"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_polls_until_ok() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/job"))
        .respond_with(ResponseTemplate::new(202))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/job"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"x": 1})))
        .mount(&server)
        .await;

    let url = format!("{}/job", server.uri());
    let output = tokio::task::spawn_blocking(move || {
        tidbits_cmd()
            .args(["fetch", url.as_str(), "--json", "--interval-ms", "5"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    output
        .assert()
        .success()
        .stdout(predicate::str::contains("\"x\": 1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_error_status_exits_nonzero() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let url = format!("{}/missing", server.uri());
    let output = tokio::task::spawn_blocking(move || {
        tidbits_cmd().args(["fetch", url.as_str()]).output().unwrap()
    })
    .await
    .unwrap();

    output
        .assert()
        .failure()
        .stderr(predicate::str::contains("TB-005"))
        .stderr(predicate::str::contains("not found"));
}
