use assert_cmd::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn fixture(dir: &str, name: &str) -> String {
    let path = repo_root().join("fixtures").join(dir).join(name);
    assert!(path.exists(), "fixture missing: {}", path.display());
    path.to_string_lossy().into_owned()
}

fn run_json(args: &[&str]) -> Value {
    let exe = assert_cmd::cargo_bin!("rpdgraph-cli");
    let output = Command::new(exe)
        .current_dir(repo_root())
        .args(args)
        .output()
        .expect("run cli");
    assert!(
        output.status.success(),
        "cli failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn cli_lays_out_one_discipline() {
    let basic = fixture("discipline", "basic.json");
    let layout = run_json(&["layout", &basic]);

    let nodes = layout["nodes"].as_array().expect("nodes");
    assert_eq!(nodes.len(), 18);
    assert!(nodes.iter().any(|n| n["id"] == "root"));
    assert!(layout["bounds"].is_object());

    // `layout` is the default command.
    let implicit = run_json(&[&basic]);
    assert_eq!(implicit, layout);
}

#[test]
fn cli_emits_the_raw_graph() {
    let basic = fixture("discipline", "basic.json");
    let graph = run_json(&["graph", "--classify", "--link-software", &basic]);

    let nodes = graph["nodes"].as_array().expect("nodes");
    let edges = graph["edges"].as_array().expect("edges");
    assert_eq!(nodes.len(), 18);
    assert!(edges.len() >= nodes.len() - 1);
    assert_eq!(nodes[0]["id"], "root");
    assert_eq!(nodes[0]["type"], "discipline");
}

#[test]
fn cli_compares_two_disciplines() {
    let layout = run_json(&[
        "multi",
        &fixture("discipline", "basic.json"),
        &fixture("discipline", "information_systems.json"),
    ]);

    let shared = layout["edges"]
        .as_array()
        .expect("edges")
        .iter()
        .filter(|e| e["kind"] == "shared_section")
        .count();
    assert_eq!(shared, 1);
}

#[test]
fn cli_projects_node_details() {
    let basic = fixture("discipline", "basic.json");
    let detail = run_json(&["detail", "--node", "root", &basic]);
    assert_eq!(detail["title"], "Базы данных");
    assert_eq!(detail["kind"], "discipline");

    let exe = assert_cmd::cargo_bin!("rpdgraph-cli");
    Command::new(exe)
        .current_dir(repo_root())
        .args(["detail", "--node", "sec-99", &basic])
        .assert()
        .code(3);
}

#[test]
fn cli_reports_shade_index() {
    let exe = assert_cmd::cargo_bin!("rpdgraph-cli");
    let output = Command::new(exe)
        .args(["shade", "5 семестр"])
        .output()
        .expect("run cli");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "4");
}

#[test]
fn cli_rejects_unknown_flags() {
    let exe = assert_cmd::cargo_bin!("rpdgraph-cli");
    Command::new(exe).args(["layout", "--bogus"]).assert().code(2);

    let exe = assert_cmd::cargo_bin!("rpdgraph-cli");
    Command::new(exe).args(["detail"]).assert().code(2);
}

#[test]
fn cli_reads_config_from_yaml() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = tmp.path().join("layout.yaml");
    fs::write(&config, "main_literature_cap: 1\nadditional_literature_cap: 0\n")
        .expect("write config");

    let layout = run_json(&[
        "layout",
        "--config",
        config.to_string_lossy().as_ref(),
        &fixture("discipline", "basic.json"),
    ]);
    let literature = layout["nodes"]
        .as_array()
        .expect("nodes")
        .iter()
        .filter(|n| matches!(n["kind"].as_str(), Some("lit_main" | "lit_add")))
        .count();
    assert_eq!(literature, 1);
}
