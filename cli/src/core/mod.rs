//! # Cozmo Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//! Author: Clarence Itai Msindo
//!
//! ## Overview
//!
//! This module aggregates the core infrastructure components used by the rest
//! of the application:
//! - `config`: Configuration loading, merging, validation and resolution into `Settings`
//! - `error`: Error types and the crate-wide `Result` alias
//! - `templating`: Rendering of reply templates
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::config; // For loading settings
//! use crate::core::error::{CozmoError, Result}; // For error handling
//! use crate::core::templating; // For reply templates
//! ```
//!
pub mod config;
pub mod error;
pub mod templating;
