//! # Cozmo Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Clarence Itai Msindo
//!
//! ## Overview
//!
//! The two interaction loops a variant can run. `main.rs` picks one from the
//! selected rule table:
//!
//! - `chat`: prompt/reply loop on the terminal (`basic`, `intro`, `extended`)
//! - `assistant`: listen/dispatch/speak loop with system actions (`assistant`)
//!
//! Both loops are generic over their I/O so tests can drive them with
//! in-memory buffers and fake collaborators.
//!

/// Virtual assistant loop: speech, day/time, Wikipedia and the browser.
pub mod assistant;
/// Terminal chat loop.
pub mod chat;
