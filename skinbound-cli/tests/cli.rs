//! Command-line tests for the skinbound binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const SCENE: &str = r#"{
    "nodes": [
        { "id": "scene", "translation": [100.0, 0.0, 0.0] },
        { "id": "a", "parent": "scene" },
        { "id": "b", "parent": "a" }
    ],
    "mesh": {
        "id": "body",
        "vertex_format": [
            { "usage": "position", "size": 3 },
            { "usage": "blend_indices", "size": 4 },
            { "usage": "blend_weights", "size": 4 }
        ],
        "vertices": [
            { "position": [-0.5, 0.0, 0.0], "blend_indices": [0, 0, 0, 0], "blend_weights": [1.0, 0.0, 0.0, 0.0] },
            { "position": [0.5, 0.0, 0.0], "blend_indices": [0, 0, 0, 0], "blend_weights": [1.0, 0.0, 0.0, 0.0] },
            { "position": [-0.5, 0.0, 0.0], "blend_indices": [1, 0, 0, 0], "blend_weights": [1.0, 0.0, 0.0, 0.0] },
            { "position": [0.5, 0.0, 0.0], "blend_indices": [1, 0, 0, 0], "blend_weights": [1.0, 0.0, 0.0, 0.0] }
        ]
    },
    "skin": { "joints": ["a", "b"] },
    "animations": [
        {
            "id": "walk",
            "channels": [
                {
                    "target_id": "b",
                    "target_attribute": "SCALE_ROTATE_TRANSLATE",
                    "key_times": [0.0, 1000.0],
                    "key_values": [
                        1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0,
                        1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 1.0, 10.0, 0.0, 0.0
                    ]
                }
            ]
        }
    ]
}"#;

fn write_scene(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("scene.json");
    fs::write(&path, contents).unwrap();
    path
}

fn skinbound() -> Command {
    Command::cargo_bin("skinbound").unwrap()
}

#[test]
fn test_bounds_json() {
    let dir = TempDir::new().unwrap();
    let scene = write_scene(&dir, SCENE);

    let output = skinbound()
        .args(["bounds", "--json"])
        .arg(&scene)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["computed"], true);
    assert_eq!(value["root_joint"], "a");
    assert_eq!(value["root_detached"], true);
    assert_eq!(value["curve_count"], 1);
    assert_eq!(value["step_count"], 32);

    let max_x = value["bounds"]["max"][0].as_f64().unwrap();
    assert!((max_x - 10.5).abs() < 1e-4);
    let min_x = value["bounds"]["min"][0].as_f64().unwrap();
    assert!((min_x + 0.5).abs() < 1e-4);
}

#[test]
fn test_bounds_table() {
    let dir = TempDir::new().unwrap();
    let scene = write_scene(&dir, SCENE);

    skinbound()
        .arg("bounds")
        .arg(&scene)
        .assert()
        .success()
        .stdout(predicate::str::contains("Root joint: a"))
        .stdout(predicate::str::contains("Curves: 1 sampled, 0 skipped"))
        .stdout(predicate::str::contains("=== Bounds ==="));
}

#[test]
fn test_verbosity_flags_control_logging() {
    let dir = TempDir::new().unwrap();
    let scene = write_scene(&dir, SCENE);

    skinbound()
        .env_remove("RUST_LOG")
        .args(["-vv", "bounds"])
        .arg(&scene)
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Computing bounds for skin of mesh: body",
        ));

    skinbound()
        .env_remove("RUST_LOG")
        .arg("bounds")
        .arg(&scene)
        .assert()
        .success()
        .stderr(predicate::str::contains("Computing bounds").not());

    skinbound()
        .env("RUST_LOG", "debug")
        .args(["-q", "bounds"])
        .arg(&scene)
        .assert()
        .success()
        .stderr(predicate::str::contains("Computing bounds").not());
}

#[test]
fn test_bounds_step_option() {
    let dir = TempDir::new().unwrap();
    let scene = write_scene(&dir, SCENE);

    let output = skinbound()
        .args(["bounds", "--json", "--step-ms", "500"])
        .arg(&scene)
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["step_count"], 3);

    skinbound()
        .args(["bounds", "--step-ms", "0"])
        .arg(&scene)
        .assert()
        .failure();
}

#[test]
fn test_bounds_skips_mesh_without_blend_data() {
    let dir = TempDir::new().unwrap();
    let rigid = SCENE.replace(r#"{ "usage": "blend_indices", "size": 4 },"#, "");
    let scene = write_scene(&dir, &rigid);

    skinbound()
        .arg("bounds")
        .arg(&scene)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Skipped: vertex format has no blend indices",
        ));
}

#[test]
fn test_sample_json() {
    let dir = TempDir::new().unwrap();
    let scene = write_scene(&dir, SCENE);

    let output = skinbound()
        .args(["sample", "--target", "b", "--samples", "3", "--json"])
        .arg(&scene)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let channels = value.as_array().unwrap();
    assert_eq!(channels.len(), 1);
    assert_eq!(channels[0]["animation"], "walk");

    let samples = channels[0]["samples"].as_array().unwrap();
    assert_eq!(samples.len(), 3);
    let mid_x = samples[1]["translation"][0].as_f64().unwrap();
    assert!((mid_x - 5.0).abs() < 1e-4);
}

#[test]
fn test_sample_unknown_target() {
    let dir = TempDir::new().unwrap();
    let scene = write_scene(&dir, SCENE);

    skinbound()
        .args(["sample", "--target", "tail"])
        .arg(&scene)
        .assert()
        .failure()
        .stderr(predicate::str::contains("tail"));
}

#[test]
fn test_missing_scene_file() {
    skinbound()
        .args(["bounds", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open scene"));
}

#[test]
fn test_completions() {
    skinbound()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("skinbound"));
}
