//! # Cozmo Process Execution Utilities (`common::process`)
//!
//! File: cli/src/common/process.rs
//! Author: Clarence Itai Msindo
//!
//! ## Overview
//!
//! Thin wrapper around `std::process::Command` for the external program the
//! assistant drives: the system text-to-speech program. It is run to
//! completion; a non-zero exit is turned into `CozmoError::ExternalCommand`
//! carrying the captured standard error.
//!
//! ```rust
//! process::run_command_capture("say", &["Opening Google"])?;
//! ```
//!
use crate::core::error::{CozmoError, Result};
use anyhow::{anyhow, Context};
use std::process::Command;
use tracing::debug;

/// Captured standard streams of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Runs `cmd` with `args`, waits for it, and captures its output.
///
/// # Arguments
///
/// * `cmd` - Program name, resolved through `PATH`.
/// * `args` - Arguments passed verbatim (no shell is involved).
///
/// # Returns
///
/// * `CommandOutput` - Captured stdout and stderr, decoded lossily as UTF-8.
///
/// # Errors
///
/// Returns an `Err` if:
/// - The program cannot be started (e.g. not installed).
/// - It exits unsuccessfully (`CozmoError::ExternalCommand`, carrying stderr).
pub fn run_command_capture(cmd: &str, args: &[&str]) -> Result<CommandOutput> {
    debug!("Running external command: {} {:?}", cmd, args);
    let output = Command::new(cmd)
        .args(args)
        .output()
        .with_context(|| format!("Failed to execute '{}'", cmd))?;

    let captured = CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };
    debug!(
        "Command '{}' finished: status={}, stdout='{}', stderr='{}'",
        cmd,
        output.status,
        captured.stdout.trim(),
        captured.stderr.trim()
    );

    if !output.status.success() {
        return Err(anyhow!(CozmoError::ExternalCommand {
            cmd: format!("{} {}", cmd, args.join(" ")),
            status: output.status.to_string(),
            output: captured.stderr,
        }));
    }
    Ok(captured)
}
