//! Integration tests for the CLI commands

use assert_cmd::cargo::cargo_bin_cmd;
use image::{ImageFormat, RgbaImage};
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

fn screenshot(width: u32, height: u32) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("screenshot.png");
    RgbaImage::new(width, height)
        .save_with_format(&path, ImageFormat::Png)
        .unwrap();
    (dir, path)
}

#[test]
fn test_version_command() {
    let mut cmd = cargo_bin_cmd!("omniparse");
    cmd.arg("version");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("omniparse "));
}

#[test]
fn test_version_flag() {
    let mut cmd = cargo_bin_cmd!("omniparse");
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("omniparse "));
}

#[test]
fn test_detect_with_fallback_backend() {
    let (_dir, path) = screenshot(200, 100);
    let mut cmd = cargo_bin_cmd!("omniparse");
    cmd.args(["detect", "--backend", "fallback"]).arg(&path);

    let output = cmd.assert().success().get_output().stdout.clone();
    let elements: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(
        elements,
        serde_json::json!([{
            "type": "image",
            "text": "",
            "bounding_box": { "x1": 0.0, "y1": 0.0, "x2": 200.0, "y2": 100.0 },
            "attributes": { "width": 200, "height": 100 }
        }])
    );
}

#[test]
fn test_click_with_fallback_backend() {
    let (_dir, path) = screenshot(200, 100);
    let mut cmd = cargo_bin_cmd!("omniparse");
    cmd.args(["click", "--backend", "fallback", "--type", "image"]).arg(&path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"x\": 100.0").and(predicate::str::contains("\"y\": 50.0")));
}

#[test]
fn test_find_without_match_exits_nonzero() {
    let (_dir, path) = screenshot(10, 10);
    let mut cmd = cargo_bin_cmd!("omniparse");
    cmd.args(["find", "--backend", "fallback", "--type", "button"]).arg(&path);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Element not found"));
}

#[test]
fn test_detect_missing_file() {
    let mut cmd = cargo_bin_cmd!("omniparse");
    cmd.args(["detect", "--backend", "fallback", "/no/such/screenshot.png"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("image not found"));
}
