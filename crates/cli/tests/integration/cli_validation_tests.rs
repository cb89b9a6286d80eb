//! CLI argument validation tests.
//!
//! These tests verify that the CLI properly validates arguments and provides
//! helpful error messages without requiring network access.

use predicates::prelude::*;

use super::helpers::{fixture_path, relay_cmd, HOLDER, RECIPIENT, TOKEN};

// Nothing listens here; every test in this file fails before any request.
const DEAD_RPC: &str = "http://127.0.0.1:1";

#[test]
fn test_help_output() {
    relay_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("relay"))
        .stdout(predicate::str::contains("functions"))
        .stdout(predicate::str::contains("call"))
        .stdout(predicate::str::contains("estimate"))
        .stdout(predicate::str::contains("send"))
        .stdout(predicate::str::contains("tokens"));
}

#[test]
fn test_send_help_lists_tx_flags() {
    relay_cmd()
        .args(["send", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--gas-price"))
        .stdout(predicate::str::contains("--gas-margin"))
        .stdout(predicate::str::contains("--defaults"))
        .stdout(predicate::str::contains("PRIVATE_KEY"));
}

#[test]
fn test_invalid_command() {
    relay_cmd()
        .arg("invalid_command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_call_missing_arguments() {
    relay_cmd()
        .args(["call", &fixture_path("token")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_call_requires_rpc_url() {
    relay_cmd()
        .args(["call", &fixture_path("token"), TOKEN, "balanceOf", HOLDER])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--rpc-url"));
}

#[test]
fn test_invalid_format() {
    relay_cmd()
        .args(["functions", &fixture_path("token"), "--format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_invalid_contract_address() {
    relay_cmd()
        .args([
            "call",
            &fixture_path("token"),
            "not-an-address",
            "balanceOf",
            HOLDER,
            "--rpc-url",
            DEAD_RPC,
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid address"));
}

#[test]
fn test_call_on_write_function_is_rejected() {
    relay_cmd()
        .args([
            "call",
            &fixture_path("token"),
            TOKEN,
            "transfer",
            RECIPIENT,
            "10",
            "--rpc-url",
            DEAD_RPC,
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bound as a write call"));
}

#[test]
fn test_send_on_read_function_is_rejected() {
    relay_cmd()
        .args([
            "estimate",
            &fixture_path("token"),
            TOKEN,
            "balanceOf",
            HOLDER,
            "--rpc-url",
            DEAD_RPC,
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bound as a read call"));
}

#[test]
fn test_unknown_function() {
    relay_cmd()
        .args([
            "call",
            &fixture_path("token"),
            TOKEN,
            "mint",
            "--rpc-url",
            DEAD_RPC,
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown function: mint"));
}

#[test]
fn test_send_requires_private_key() {
    relay_cmd()
        .args([
            "send",
            &fixture_path("token"),
            TOKEN,
            "transfer",
            RECIPIENT,
            "10",
            "--rpc-url",
            DEAD_RPC,
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("private key is required"));
}

#[test]
fn test_send_invalid_private_key() {
    relay_cmd()
        .args([
            "send",
            &fixture_path("token"),
            TOKEN,
            "transfer",
            RECIPIENT,
            "10",
            "--rpc-url",
            DEAD_RPC,
            "--private-key",
            "0xnothex",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid private key"));
}

#[test]
fn test_invalid_defaults() {
    relay_cmd()
        .args([
            "estimate",
            &fixture_path("token"),
            TOKEN,
            "transfer",
            RECIPIENT,
            "10",
            "--rpc-url",
            DEAD_RPC,
            "--defaults",
            r#"{"gasLimit": 1}"#,
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--defaults"));
}

#[test]
fn test_wrong_argument_count() {
    relay_cmd()
        .args([
            "estimate",
            &fixture_path("token"),
            TOKEN,
            "transfer",
            RECIPIENT,
            "--rpc-url",
            DEAD_RPC,
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 2 arguments, got 1"));
}
