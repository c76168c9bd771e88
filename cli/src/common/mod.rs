//! # Cozmo Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//! Author: Clarence Itai Msindo
//!
//! ## Overview
//!
//! This module is the root of the shared utility modules used by the chat and
//! assistant loops. It keeps I/O and host concerns apart from the bot logic
//! (`bot::`) and from configuration and errors (`core::`).
//!
//! ## Architecture
//!
//! - **`network`**: Wikipedia summary lookups over blocking HTTP.
//! - **`process`**: Running external programs to completion and capturing their output.
//! - **`system`**: Host inspection (tools on `PATH`, TTS program, browser launcher).
//! - **`ui`**: The `> ` prompt and line reading.
//! - **`voice`**: The `Listener` / `Speaker` traits and their implementations.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::{ui, voice};
//!
//! ui::prompt(&mut stdout)?;
//! let speaker = voice::speaker_for(settings.speech)?;
//! ```
//!

/// Web lookups (Wikipedia summaries).
pub mod network;
/// Executing external processes and capturing their output.
pub mod process;
/// System-level checks and platform commands.
pub mod system;
/// Terminal prompt and line input.
pub mod ui;
/// Speech input and output boundaries.
pub mod voice;
