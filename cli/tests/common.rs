//! # Cozmo CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Clarence Itai Msindo
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Every test runs
//! the compiled `cozmo` binary in a scratch directory with `HOME` and
//! `XDG_CONFIG_HOME` pointed inside it, so a developer's own configuration
//! files never leak into the results.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::path::Path;

/// `cozmo` with the `COZMO_*` environment cleared and config discovery
/// confined to `dir`.
pub fn cozmo_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cozmo").expect("Failed to find cozmo binary for testing");
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("COZMO_VARIANT")
        .env_remove("COZMO_NAME")
        .env_remove("COZMO_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

/// The output the chat loop produces for `replies`, greeting and final
/// newline included.
pub fn chat_transcript(greeting: &str, replies: &[&str]) -> String {
    let mut transcript = format!("{}\n", greeting);
    for reply in replies {
        transcript.push_str("> ");
        transcript.push_str(reply);
        transcript.push('\n');
    }
    transcript.push_str("> \n");
    transcript
}
