//! Commands that talk to a mocked JSON-RPC node.

use alloy::dyn_abi::DynSolValue;
use alloy_primitives::{hex, Address, U256};
use predicates::prelude::*;
use serde_json::json;

use super::helpers::{
    fixture_path, relay_cmd, relay_cmd_with_node, start_node, RpcNode, HOLDER, RECIPIENT, TOKEN,
};

const ZRX: &str = "0xe41d2489571d322189246dafa5ebde1f4699f498";

fn encode(values: Vec<DynSolValue>) -> String {
    hex::encode_prefixed(DynSolValue::Tuple(values).abi_encode_params())
}

fn zrx_metadata() -> String {
    encode(vec![
        DynSolValue::Address(ZRX.parse::<Address>().unwrap()),
        DynSolValue::String("0x Protocol Token".to_string()),
        DynSolValue::String("ZRX".to_string()),
        DynSolValue::Uint(U256::from(18), 8),
        DynSolValue::Bytes(Vec::new()),
        DynSolValue::Bytes(Vec::new()),
    ])
}

#[tokio::test]
async fn test_call_table_output() {
    let node = start_node(RpcNode::new().with(
        "eth_call",
        json!(encode(vec![DynSolValue::Uint(U256::from(1_000), 256)])),
    ))
    .await;

    relay_cmd_with_node(&node)
        .args(["call", &fixture_path("token"), TOKEN, "balanceOf", HOLDER])
        .assert()
        .success()
        .stdout(predicate::str::contains("[0] balance (uint256): 1000"));
}

#[tokio::test]
async fn test_call_json_output() {
    let node = start_node(RpcNode::new().with(
        "eth_call",
        json!(encode(vec![DynSolValue::String("ZRX".to_string())])),
    ))
    .await;

    let output = relay_cmd_with_node(&node)
        .args(["call", &fixture_path("token"), TOKEN, "symbol", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json, json!([{"name": "", "type": "string", "value": "ZRX"}]));
}

#[tokio::test]
async fn test_call_rpc_error() {
    let node = start_node(RpcNode::new()).await;

    relay_cmd_with_node(&node)
        .args(["call", &fixture_path("token"), TOKEN, "balanceOf", HOLDER])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Call to balanceOf(address) failed"));
}

#[tokio::test]
async fn test_estimate_adds_margin() {
    let node = start_node(RpcNode::new().with("eth_estimateGas", json!("0xc350"))).await;

    relay_cmd_with_node(&node)
        .args(["estimate", &fixture_path("token"), TOKEN, "transfer", RECIPIENT, "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("50,000"))
        .stdout(predicate::str::contains("120,000"))
        .stdout(predicate::str::contains("170,000"));
}

#[tokio::test]
async fn test_estimate_custom_margin_json() {
    let node = start_node(RpcNode::new().with("eth_estimateGas", json!("0xc350"))).await;

    let output = relay_cmd_with_node(&node)
        .env("RELAY_GAS_MARGIN", "1000")
        .args([
            "estimate",
            &fixture_path("token"),
            TOKEN,
            "transfer",
            RECIPIENT,
            "10",
            "--format",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["estimate"], 50_000);
    assert_eq!(json["margin"], 1_000);
    assert_eq!(json["gasLimit"], 51_000);
}

#[tokio::test]
async fn test_estimate_with_trailing_override() {
    let node = start_node(RpcNode::new().with("eth_estimateGas", json!("0x5208"))).await;
    let tx_override = format!(r#"{{"from": "{}", "value": "0"}}"#, HOLDER);

    relay_cmd_with_node(&node)
        .args([
            "estimate",
            &fixture_path("token"),
            TOKEN,
            "transfer",
            RECIPIENT,
            "10",
            &tx_override,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("21,000"));

    let requests = node.received_requests().await.unwrap();
    let estimate = requests
        .iter()
        .map(|r| String::from_utf8_lossy(&r.body).to_lowercase())
        .find(|body| body.contains("eth_estimategas"))
        .expect("an eth_estimateGas was issued");
    assert!(estimate.contains(&HOLDER[2..]));
}

#[tokio::test]
async fn test_estimate_failure() {
    let node = start_node(RpcNode::new()).await;

    relay_cmd_with_node(&node)
        .args(["estimate", &fixture_path("token"), TOKEN, "transfer", RECIPIENT, "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Gas estimation"));
}

#[tokio::test]
async fn test_tokens_by_symbol() {
    let node = start_node(RpcNode::new().with("eth_call", json!(zrx_metadata()))).await;

    let output = relay_cmd_with_node(&node)
        .args(["tokens", TOKEN, "--symbol", "ZRX", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[0]["symbol"], "ZRX");
    assert_eq!(json[0]["name"], "0x Protocol Token");
    assert_eq!(json[0]["decimals"], 18);
}

#[tokio::test]
async fn test_tokens_empty_registry() {
    let node = start_node(RpcNode::new().with(
        "eth_call",
        json!(encode(vec![DynSolValue::Array(Vec::new())])),
    ))
    .await;

    relay_cmd_with_node(&node)
        .args(["tokens", TOKEN])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tokens found."));
}

#[tokio::test]
async fn test_flags_after_call_arguments() {
    let node = start_node(RpcNode::new().with(
        "eth_call",
        json!(encode(vec![DynSolValue::Uint(U256::from(42), 256)])),
    ))
    .await;

    let output = relay_cmd()
        .args([
            "call",
            &fixture_path("token"),
            TOKEN,
            "balanceOf",
            HOLDER,
            "--rpc-url",
            &node.uri(),
            "--format",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[0]["value"], "42");
}

#[tokio::test]
async fn test_overloaded_abi_rejected_by_default() {
    let node = start_node(RpcNode::new()).await;

    relay_cmd_with_node(&node)
        .args(["call", &fixture_path("overloaded"), TOKEN, "balanceOf", HOLDER])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate binding for `safeTransferFrom`"));
}

#[tokio::test]
async fn test_overloaded_abi_last_wins() {
    let node = start_node(RpcNode::new().with(
        "eth_call",
        json!(encode(vec![DynSolValue::Uint(U256::from(3), 256)])),
    ))
    .await;

    relay_cmd_with_node(&node)
        .args([
            "call",
            &fixture_path("overloaded"),
            TOKEN,
            "balanceOf",
            HOLDER,
            "--duplicate-names",
            "last-wins",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("[0] balance (uint256): 3"));
}

#[tokio::test]
async fn test_overloaded_abi_last_wins_from_env() {
    let node = start_node(RpcNode::new().with("eth_estimateGas", json!("0xc350"))).await;

    // The four-argument overload is the one bound.
    relay_cmd_with_node(&node)
        .env("RELAY_DUPLICATE_NAMES", "last-wins")
        .args([
            "estimate",
            &fixture_path("overloaded"),
            TOKEN,
            "safeTransferFrom",
            HOLDER,
            RECIPIENT,
            "1",
            "0x00",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("170,000"));
}
