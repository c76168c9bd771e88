//! # Cozmo Bot Core
//!
//! File: cli/src/bot/mod.rs
//! Author: Clarence Itai Msindo
//!
//! ## Overview
//!
//! This module holds everything that decides what Cozmo says. It has no I/O of
//! its own; the chat and assistant loops in `commands` feed it lines and act
//! on the replies it returns.
//!
//! ## Architecture
//!
//! - `rules`: `Matcher`, `Response`, `Rule`, `Fallback` and `RuleTable`
//! - `responder`: `Responder`, which dispatches input against a table
//! - `variants`: the built-in tables (`basic`, `intro`, `extended`, `assistant`)
//! - `random`: the injected RNG and the uniform selection helper
//!
//! Tables from configuration files are converted into the same `RuleTable`
//! type by `core::config`, so built-in and custom variants share one code path.
//!
pub mod random;
pub mod responder;
pub mod rules;
pub mod variants;

pub use responder::{Identity, Reply, Responder};
pub use rules::{Action, CaseMode, Fallback, Response, Rule, RuleTable};
