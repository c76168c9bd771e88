//! # Cozmo Chat Loop
//!
//! File: cli/src/commands/chat.rs
//! Author: Clarence Itai Msindo
//!
//! ## Overview
//!
//! The read-eval-print loop used by the text variants (`basic`, `intro`,
//! `extended` and custom chat tables):
//!
//! 1. Print the variant's greeting line.
//! 2. Print `> `, read a line, trim it and pass it to the responder.
//! 3. Print the reply and repeat.
//!
//! A farewell reply is printed like any other; only the assistant ends its
//! session on one. The loop ends at end of input. A line that cannot be read
//! (e.g. invalid UTF-8) is reported and skipped.
//!
use crate::bot::random::process_rng;
use crate::bot::{Identity, Reply, Responder, RuleTable};
use crate::common::ui;
use crate::core::config::Settings;
use crate::core::error::Result;
use anyhow::Context;
use rand::Rng;
use std::io::{self, BufRead, Write};
use tracing::{debug, info, warn};

/// Chats on the terminal with `table`.
pub fn handle_chat(settings: &Settings, table: RuleTable, seed: Option<u64>) -> Result<()> {
    let mut responder = Responder::new(table, Identity::new(&settings.name), process_rng(seed));
    run_chat(&mut responder, io::stdin().lock(), io::stdout().lock())
}

/// Runs the chat loop until `input` is exhausted.
///
/// # Arguments
///
/// * `responder` - Chooses the reply for each line.
/// * `input` - Source of user lines (stdin in production).
/// * `out` - Destination for the greeting, prompts and replies (stdout in production).
///
/// # Errors
///
/// Returns an `Err` only when writing to `out` fails. Lines that cannot be
/// read are reported in the transcript and skipped.
pub fn run_chat<G, R, W>(responder: &mut Responder<G>, mut input: R, mut out: W) -> Result<()>
where
    G: Rng,
    R: BufRead,
    W: Write,
{
    writeln!(out, "{}", responder.table().greeting).context("Failed to write greeting")?;
    info!("Chat started with variant '{}'", responder.table().name);

    loop {
        ui::prompt(&mut out).context("Failed to write prompt")?;

        let line = match ui::read_line(&mut input) {
            Ok(Some(line)) => line,
            Ok(None) => {
                // Leave the cursor on a fresh line after the dangling prompt.
                writeln!(out).context("Failed to write output")?;
                info!("End of input, leaving chat");
                return Ok(());
            }
            Err(e) => {
                warn!("Failed to read input: {}", e);
                writeln!(out, "Sorry! I Don't Understand: {}", e)
                    .context("Failed to write output")?;
                continue;
            }
        };

        let reply = responder.respond(line.trim());
        debug!("Reply: {:?}", reply);
        if reply.is_farewell() {
            info!("Farewell given; chat continues until end of input");
        }
        let written = match reply {
            Reply::Say(text) | Reply::Farewell(text) => writeln!(out, "{}", text),
            Reply::Perform { action, .. } => writeln!(
                out,
                "Sorry, I can only {} in assistant mode.",
                action
            ),
        };
        written.context("Failed to write reply")?;
    }
}
