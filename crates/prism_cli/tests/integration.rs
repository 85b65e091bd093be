// SPDX-License-Identifier: MIT OR Apache-2.0
//! Integration tests for the `prism` binary.

use std::path::PathBuf;
use std::process::Command;

/// Helper to get the path to the `prism` binary built by cargo.
fn prism_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_prism"))
}

/// Write `content` to a per-test file in the system temp directory.
fn temp_file(name: &str, content: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("prism_cli_{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("failed to create temp dir");
    let path = dir.join(name);
    std::fs::write(&path, content).expect("failed to write temp file");
    path
}

const SNAPSHOT: &str = r#"{
    "nodes": [
        { "id": "uv", "type": "input_uv", "position": { "x": 0, "y": 0 }, "params": {} },
        { "id": "checker", "type": "pattern_checker", "position": { "x": 200, "y": 0 },
          "params": { "scale": 4 } },
        { "id": "out", "type": "output", "position": { "x": 400, "y": 0 }, "params": {} }
    ],
    "edges": [
        { "id": "e1", "source": "uv", "sourceHandle": "uv", "target": "checker", "targetHandle": "uv" },
        { "id": "e2", "source": "checker", "sourceHandle": "value", "target": "out", "targetHandle": "color" }
    ]
}"#;

// ---------------------------------------------------------------------------
// `prism nodes`
// ---------------------------------------------------------------------------

#[test]
fn cli_nodes_lists_catalog() {
    let output = prism_bin()
        .arg("nodes")
        .output()
        .expect("failed to run prism nodes");
    assert!(output.status.success(), "prism nodes failed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    for type_id in [
        "input_uv",
        "input_time",
        "math_smoothstep",
        "pattern_noise",
        "color_blend",
        "output",
    ] {
        assert!(stdout.contains(type_id), "listing should contain '{type_id}'");
    }
}

#[test]
fn cli_nodes_filters_by_category() {
    let output = prism_bin()
        .args(["nodes", "--category", "math"])
        .output()
        .expect("failed to run prism nodes");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("math_add"));
    assert!(!stdout.contains("input_uv"));
}

#[test]
fn cli_nodes_rejects_unknown_category() {
    let output = prism_bin()
        .args(["nodes", "--category", "audio"])
        .output()
        .expect("failed to run prism nodes");
    assert!(!output.status.success());
}

// ---------------------------------------------------------------------------
// `prism compile`
// ---------------------------------------------------------------------------

#[test]
fn cli_compile_prints_shader() {
    let snapshot = temp_file("checker.json", SNAPSHOT);
    let output = prism_bin()
        .arg("compile")
        .arg(&snapshot)
        .output()
        .expect("failed to run prism compile");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("#version 300 es"));
    assert!(stdout.contains("4.0000"));
    assert!(stdout.contains("fragColor = vec4(vec3(v3), 1.0);"));
}

#[test]
fn cli_compile_writes_output_file() {
    let snapshot = temp_file("checker_out.json", SNAPSHOT);
    let target = snapshot.with_extension("frag");
    let output = prism_bin()
        .arg("compile")
        .arg(&snapshot)
        .arg("-o")
        .arg(&target)
        .output()
        .expect("failed to run prism compile");
    assert!(output.status.success());

    let shader = std::fs::read_to_string(&target).expect("shader file missing");
    assert!(shader.contains("void main() {"));
    assert!(output.stdout.is_empty());
}

#[test]
fn cli_compile_fails_without_output_node() {
    let snapshot = temp_file(
        "no_output.json",
        r#"{ "nodes": [ { "id": "a", "type": "input_uv" } ], "edges": [] }"#,
    );
    let output = prism_bin()
        .arg("compile")
        .arg(&snapshot)
        .output()
        .expect("failed to run prism compile");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn cli_compile_json_reports_error_node() {
    let snapshot = temp_file(
        "unknown.json",
        r#"{ "nodes": [ { "id": "w", "type": "warp" }, { "id": "out", "type": "output" } ] }"#,
    );
    let output = prism_bin()
        .args(["compile", "--json"])
        .arg(&snapshot)
        .output()
        .expect("failed to run prism compile");
    assert!(!output.status.success());

    let result: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(result["success"], false);
    assert_eq!(result["errorNodeId"], "w");
    assert!(result.get("code").is_none());
}

#[test]
fn cli_compile_missing_file_fails() {
    let output = prism_bin()
        .args(["compile", "/nonexistent/graph.json"])
        .output()
        .expect("failed to run prism compile");
    assert!(!output.status.success());
}
