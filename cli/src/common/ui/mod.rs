//! # Cozmo UI Utilities Module (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//! Author: Clarence Itai Msindo
//!
//! ## Overview
//!
//! Line-oriented terminal helpers shared by the chat loop and the console
//! listener. Both take generic reader/writer handles so tests can drive them
//! with in-memory buffers instead of the real stdin/stdout.
//!
use std::io::{self, BufRead, Write};

/// Printed before every line of input.
pub const PROMPT: &str = "> ";

/// Writes the prompt without a newline and flushes it.
pub fn prompt<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    write!(out, "{}", PROMPT)?;
    out.flush()
}

/// Reads one line. Returns `Ok(None)` at end of input.
///
/// The line is returned as read, including any trailing newline; callers trim.
/// Invalid UTF-8 is reported as an error after the offending line has been
/// consumed, so the next call continues with the following line.
pub fn read_line<R: BufRead + ?Sized>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    match input.read_line(&mut line)? {
        0 => Ok(None),
        _ => Ok(Some(line)),
    }
}
