// SPDX-License-Identifier: MIT OR Apache-2.0
//! End-to-end compile tests for prism_graph.
//!
//! Each test builds a snapshot the way the editor hands it over (two flat
//! lists, usually parsed from JSON) and checks the compiled result.

use prism_graph::{compile, Edge, GraphSnapshot, NodeInstance, NodeRegistry};

fn node(id: &str, node_type: &str) -> NodeInstance {
    NodeInstance::with_id(id, node_type)
}

/// Position of the first line containing `needle`
fn line_of(code: &str, needle: &str) -> usize {
    code.lines()
        .position(|l| l.contains(needle))
        .unwrap_or_else(|| panic!("'{needle}' not found in:\n{code}"))
}

// ---------------------------------------------------------------------------
// Failure scenarios
// ---------------------------------------------------------------------------

#[test]
fn missing_output_node_fails() {
    let result = compile(&[node("a", "input_uv")], &[]);
    assert!(!result.success);
    assert!(result.code.is_none());
    assert!(result.error.unwrap().contains("output"));
}

#[test]
fn two_node_cycle_fails_without_code() {
    let nodes = vec![node("a", "math_add"), node("b", "math_add"), node("out", "output")];
    let edges = vec![
        Edge::new("a", "result", "b", "a"),
        Edge::new("b", "result", "a", "a"),
    ];
    let result = compile(&nodes, &edges);
    assert!(!result.success);
    assert!(result.code.is_none());
    assert!(result.error.unwrap().contains("ycle"));
}

#[test]
fn cycle_without_terminal_reports_missing_output() {
    let nodes = vec![node("a", "math_add"), node("b", "math_add")];
    let edges = vec![
        Edge::new("a", "result", "b", "a"),
        Edge::new("b", "result", "a", "a"),
    ];
    let result = compile(&nodes, &edges);
    assert_eq!(result.error.as_deref(), Some("No output node found"));
}

#[test]
fn unknown_type_is_attached_to_its_node() {
    let nodes = vec![node("mystery", "pattern_voronoi"), node("out", "output")];
    let result = compile(&nodes, &[]);
    assert!(!result.success);
    assert_eq!(result.error_node_id.map(|id| id.0), Some("mystery".to_string()));
}

// ---------------------------------------------------------------------------
// Success scenarios
// ---------------------------------------------------------------------------

#[test]
fn terminal_only_graph_compiles() {
    let result = compile(&[node("out", "output")], &[]);
    assert!(result.success);
    let code = result.code.unwrap();
    assert!(code.starts_with("#version 300 es\n"));
    assert!(code.contains("out vec4 fragColor;"));
    assert!(code.contains("uniform float u_time;"));
    assert!(code.contains("uniform vec2 u_resolution;"));
    assert!(code.contains("uniform vec2 u_mouse;"));
    assert!(code.contains("fragColor = vec4(vec3(0.0, 0.0, 0.0), 1.0);"));
}

#[test]
fn unwired_add_uses_zero_literals() {
    let nodes = vec![node("add", "math_add"), node("out", "output")];
    let code = compile(&nodes, &[]).code.unwrap();
    assert!(code.contains("float v0 = (0.0 + 0.0);"));
}

#[test]
fn producers_precede_consumers() {
    // Listed consumer-first so that input order alone would be wrong.
    let nodes = vec![
        node("out", "output"),
        node("hsv", "color_hsv_to_rgb"),
        node("mul", "math_multiply"),
        node("time", "input_time"),
    ];
    let edges = vec![
        Edge::new("hsv", "color", "out", "color"),
        Edge::new("mul", "result", "hsv", "h"),
        Edge::new("time", "sin", "mul", "a"),
    ];
    let result = compile(&nodes, &edges);
    assert!(result.success, "{:?}", result.error);
    let code = result.code.unwrap();

    let time = line_of(&code, "float v0 = u_time;");
    let mul = line_of(&code, "(v1 * 1.0)");
    let hsv = line_of(&code, "hsv2rgb(vec3(");
    let write = line_of(&code, "fragColor = ");
    assert!(time < mul && mul < hsv && hsv < write);
    assert_eq!(result.helpers, Some(vec!["hsv2rgb".to_string()]));
}

#[test]
fn compile_is_byte_identical_across_calls() {
    let nodes = vec![
        node("uv", "input_uv"),
        node("noise", "pattern_noise"),
        node("circle", "pattern_circle"),
        node("blend", "color_blend"),
        node("out", "output"),
    ];
    let edges = vec![
        Edge::new("uv", "uv", "noise", "uv"),
        Edge::new("uv", "uv", "circle", "uv"),
        Edge::new("noise", "value", "blend", "color1"),
        Edge::new("circle", "value", "blend", "color2"),
        Edge::new("blend", "color", "out", "color"),
    ];
    let first = compile(&nodes, &edges);
    let second = compile(&nodes, &edges);
    assert!(first.success);
    assert_eq!(first, second);
}

#[test]
fn editor_json_snapshot_compiles() {
    let json = r#"{
        "nodes": [
            { "id": "n1", "type": "input_time", "position": { "x": 0, "y": 0 },
              "params": { "speed": 2 } },
            { "id": "n2", "type": "output", "position": { "x": 300, "y": 0 }, "params": {} }
        ],
        "edges": [
            { "id": "e1", "source": "n1", "sourceHandle": "sin",
              "target": "n2", "targetHandle": "alpha" }
        ]
    }"#;
    let snapshot: GraphSnapshot = serde_json::from_str(json).unwrap();
    let result = snapshot.compile(&NodeRegistry::builtin());
    assert!(result.success);
    let code = result.code.unwrap();
    assert!(code.contains("float v1 = sin((u_time * 2.0000));"));
    assert!(code.contains("fragColor = vec4(vec3(0.0, 0.0, 0.0), v1);"));
}
