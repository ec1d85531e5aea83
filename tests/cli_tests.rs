use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

use tcarchive::models::Post;
use tcarchive::storage::{ArchiveLayout, write_json};

fn tcarchive(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tcarchive"))
        .current_dir(dir)
        .env_remove("TC_USERNAME")
        .env_remove("TC_PASSWORD")
        .args(args)
        .output()
        .expect("Failed to execute tcarchive")
}

#[test]
fn test_cli_help() {
    let tmp = TempDir::new().unwrap();
    let output = tcarchive(tmp.path(), &["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("archive"));
    assert!(stdout.contains("audit"));
}

#[test]
fn test_cli_config_generate_to_stdout() {
    let tmp = TempDir::new().unwrap();
    let output = tcarchive(tmp.path(), &["config", "generate"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("[api]"));
    assert!(stdout.contains("max_concurrent_downloads"));
}

#[test]
fn test_cli_config_generate_refuses_overwrite() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("existing.toml"), "keep").unwrap();
    let output = tcarchive(tmp.path(), &["config", "generate", "--output", "existing.toml"]);
    assert!(!output.status.success());
    assert_eq!(
        std::fs::read_to_string(tmp.path().join("existing.toml")).unwrap(),
        "keep"
    );
}

#[test]
fn test_cli_config_generate_to_file() {
    let tmp = TempDir::new().unwrap();
    let output = tcarchive(tmp.path(), &["config", "generate", "-o", "tc.toml"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let written = std::fs::read_to_string(tmp.path().join("tc.toml")).unwrap();
    assert!(written.contains("[archive]"));
}

#[test]
fn test_cli_audit_json() {
    let tmp = TempDir::new().unwrap();
    let layout = ArchiveLayout::new(tmp.path().join("archive"));
    let posts = vec![
        Post::new(10, "2022-04-02", "2022-04-02T09:00:00.000-07:00"),
        Post::new(30, "2022-04-01", "2022-04-01T15:00:00.000-07:00"),
        Post::new(20, "2022-04-01", "2022-04-01T11:00:00.000-07:00"),
    ];
    write_json(&layout.posts_file(99918), &posts).unwrap();

    let output = tcarchive(tmp.path(), &["--root", "archive", "audit", "--json"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let out: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(out["ok"], true);
    let results = out["data"][0]["results"].as_array().unwrap();
    let by_id = results
        .iter()
        .find(|r| r["hypothesis"] == "id")
        .unwrap();
    assert_eq!(by_id["inversions"], 1);
}

#[test]
fn test_cli_posts_without_credentials_fails() {
    let tmp = TempDir::new().unwrap();
    let output = tcarchive(tmp.path(), &["posts"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("TC_USERNAME"));
}

#[test]
fn test_cli_photos_with_empty_archive() {
    let tmp = TempDir::new().unwrap();
    let output = tcarchive(tmp.path(), &["photos"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("no archived posts"));
}
