//! # Cozmo Configuration Integration Tests
//!
//! File: cli/tests/config.rs
//! Author: Clarence Itai Msindo
//!
//! Custom variants and defaults loaded from `--config`, the project file
//! (`.cozmo.toml`) and the user file.
//!
mod common;
use common::{chat_transcript, cozmo_cmd};
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const PIRATE: &str = r#"
variant = "pirate"
name = "Blackbeard"

[[variants]]
name = "pirate"
description = "Talks like a pirate"
greeting = "Ahoy!"
fallback = ["Arr?"]

[[variants.rules]]
triggers = ["treasure", "gold"]
reply = "Arr, 'tis buried deep."

[[variants.rules]]
triggers = ["who are you"]
template = "I be {{ bot }}."

[[variants.rules]]
triggers = ["call me"]
template = "Welcome aboard, {{ name }}!"
strip_prefix = "call me "

[[variants.rules]]
triggers = ["farewell"]
farewell = "Fair winds!"
"#;

#[test]
fn test_custom_variant_from_explicit_config() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pirate.toml");
    fs::write(&path, PIRATE).unwrap();

    cozmo_cmd(dir.path())
        .arg("--config")
        .arg(&path)
        .write_stdin("Where is the GOLD\nwho are you\ncall me Jim\nfarewell\nparrot\n")
        .assert()
        .success()
        .stdout(chat_transcript(
            "Ahoy!",
            &[
                "Arr, 'tis buried deep.",
                "I be Blackbeard.",
                "Welcome aboard, Jim!",
                "Fair winds!",
                "Arr?",
            ],
        ));
}

#[test]
fn test_project_config_is_discovered() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join(".git")).unwrap();
    fs::write(dir.path().join(".cozmo.toml"), PIRATE).unwrap();
    let nested = dir.path().join("src").join("deep");
    fs::create_dir_all(&nested).unwrap();

    cozmo_cmd(dir.path())
        .current_dir(&nested)
        .write_stdin("gold\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Ahoy!\n"));
}

#[test]
fn test_flags_override_config() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pirate.toml");
    fs::write(&path, PIRATE).unwrap();

    cozmo_cmd(dir.path())
        .arg("--config")
        .arg(&path)
        .args(["--variant", "extended", "--name", "Hook"])
        .write_stdin("what is your name\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("> My name is Hook\n"));
}

#[test]
fn test_list_variants_includes_custom() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pirate.toml");
    fs::write(&path, PIRATE).unwrap();

    cozmo_cmd(dir.path())
        .arg("--config")
        .arg(&path)
        .arg("--list-variants")
        .assert()
        .success()
        .stdout(predicate::str::contains("basic"))
        .stdout(predicate::str::contains("assistant"))
        .stdout(predicate::str::contains("pirate     Talks like a pirate"));
}

#[test]
fn test_missing_config_file_fails() {
    let dir = tempdir().unwrap();
    cozmo_cmd(dir.path())
        .args(["--config", "does-not-exist.toml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "colour = \"blue\"\n").unwrap();

    cozmo_cmd(dir.path())
        .arg("--config")
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_rule_with_two_replies_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(
        &path,
        r#"
[[variants]]
name = "broken"
greeting = "Hi"

[[variants.rules]]
triggers = ["x"]
reply = "a"
farewell = "b"
"#,
    )
    .unwrap();

    cozmo_cmd(dir.path())
        .arg("--config")
        .arg(&path)
        .args(["--variant", "broken"])
        .assert()
        .code(1);
}
