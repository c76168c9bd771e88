//! # Cozmo System Utilities Module (`common::system`)
//!
//! File: cli/src/common/system/mod.rs
//! Author: Clarence Itai Msindo
//!
//! ## Overview
//!
//! Host inspection for the assistant: which external programs exist on the
//! `PATH`, which program speaks text aloud on this platform, and the
//! `UrlOpener` boundary used by the "open google" command.
//!
//! | platform | text-to-speech |
//! |----------|----------------|
//! | macOS    | `say`          |
//! | Windows  | (none)         |
//! | other    | `espeak`       |
//!
//! URLs are handed to the `webbrowser` crate, which knows each platform's
//! launcher and its quoting rules.
//!
use crate::core::error::{CozmoError, Result};
use anyhow::{anyhow, Context};
use reqwest::Url;
use std::env;
use std::path::Path;
use tracing::{debug, info};

/// Browser-launch boundary.
pub trait UrlOpener {
    fn open_url(&mut self, url: &str) -> Result<()>;
}

/// Opens URLs in the user's default browser.
#[derive(Debug, Default)]
pub struct SystemBrowser;

impl UrlOpener for SystemBrowser {
    fn open_url(&mut self, url: &str) -> Result<()> {
        let url = browsable_url(url)?;
        info!("Opening {} in the default browser", url);
        webbrowser::open(url.as_str())
            .with_context(|| format!("Failed to open {} in the default browser", url))
    }
}

/// Parses `url` and accepts only `http` and `https` links.
///
/// ## Errors
///
/// `CozmoError::Config` for anything else, so a bad `assistant.home_url` never
/// reaches the platform launcher.
pub fn browsable_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|e| {
        anyhow!(CozmoError::Config(format!(
            "Cannot open '{}' in a browser: {}",
            url, e
        )))
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(anyhow!(CozmoError::Config(format!(
            "Cannot open '{}' in a browser: unsupported scheme '{}'",
            url, scheme
        )))),
    }
}

/// Checks whether an executable called `name` is on the `PATH`.
pub fn tool_available(name: &str) -> bool {
    let Some(paths) = env::var_os("PATH") else {
        return false;
    };
    let found = env::split_paths(&paths).any(|dir| is_executable_in(&dir, name));
    debug!("Tool '{}' available: {}", name, found);
    found
}

fn is_executable_in(dir: &Path, name: &str) -> bool {
    if dir.join(name).is_file() {
        return true;
    }
    cfg!(windows) && dir.join(format!("{}.exe", name)).is_file()
}

/// The platform's text-to-speech program, if there is one Cozmo knows how to drive.
pub fn tts_program() -> Option<&'static str> {
    if cfg!(target_os = "macos") {
        Some("say")
    } else if cfg!(windows) {
        None
    } else {
        Some("espeak")
    }
}
