//! CLI smoke tests

use std::fs;
use std::process::Command;

use teneke_core::{compositor::instance_id, generate_from_seed, render_svg};

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_teneke-cli"))
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn cli_options_lists_taxonomy() {
    let output = cli().arg("options").output().unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["containers"].as_array().unwrap().len(), 12);
    assert_eq!(json["expressions"].as_array().unwrap().len(), 8);
    assert_eq!(json["palettes"].as_array().unwrap().len(), 12);
    assert_eq!(json["totalCombinations"], 13_824);
}

#[test]
fn cli_seed_is_reproducible_and_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("abc.svg");

    let output = cli()
        .args(["seed", "abc", "--size", "64", "--out"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["config"]["container"], "barrel");
    assert_eq!(json["config"]["expression"], "sleepy");
    assert_eq!(json["size"], 64);

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(json["svg"].as_str().unwrap(), written);
}

#[test]
fn cli_render_rejects_unknown_trait() {
    let output = cli()
        .args(["render", "--container", "teapot", "--expression", "grin", "--palette", "gold"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let json = stdout_json(&output);
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().contains("teapot"));
}

#[test]
fn cli_compile_with_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("engine.json");
    fs::write(&config, r#"{"defaultSize": 80, "showRing": false}"#).unwrap();

    let output = cli()
        .arg("--config")
        .arg(&config)
        .args(["compile", "--payload", r#"{"username": "alice"}"#])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["success"], true);
    assert_eq!(json["asset"]["size"], 80);
    assert_eq!(json["asset"]["badge"]["ringVisible"], false);
    assert_eq!(json["asset"]["validation"]["valid"], true);
}

#[test]
fn cli_validate_accepts_rendered_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("carol.svg");
    let config = generate_from_seed("carol");
    fs::write(&path, render_svg(&config, 48).unwrap()).unwrap();

    let id = instance_id(&config);
    let output = cli()
        .args(["validate", "--instance-id", id.as_str(), "--file"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["valid"], true);
}

#[test]
fn cli_validate_exits_2_on_blocking_violation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tampered.svg");
    let config = generate_from_seed("carol");
    let tampered = render_svg(&config, 48)
        .unwrap()
        .replacen("<g ", r#"<image href="https://cdn.example/x.png"/><g "#, 1);
    fs::write(&path, tampered).unwrap();

    let id = instance_id(&config);
    let output = cli()
        .args(["validate", "--instance-id", id.as_str(), "--file"])
        .arg(&path)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));

    let json = stdout_json(&output);
    assert_eq!(json["valid"], false);
    let rules: Vec<_> = json["violations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["rule"].as_str().unwrap().to_string())
        .collect();
    assert!(rules.contains(&"external_reference".to_string()));
}

#[test]
fn cli_validate_in_log_mode_never_blocks() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("engine.json");
    fs::write(&config_path, r#"{"failureMode": "log"}"#).unwrap();
    let path = dir.path().join("broken.svg");
    fs::write(&path, "<svg><g></svg>").unwrap();

    let output = cli()
        .arg("--config")
        .arg(&config_path)
        .args(["validate", "--instance-id", "tk-x", "--file"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["valid"], true);
}
