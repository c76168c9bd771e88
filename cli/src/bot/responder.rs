//! # Responder
//!
//! File: cli/src/bot/responder.rs
//! Author: Clarence Itai Msindo
//!
//! ## Overview
//!
//! The `Responder` turns one line of input into a `Reply` by scanning its
//! `RuleTable` top to bottom. The first rule whose matcher fires produces the
//! reply; if none fires, the table's fallback does. Not matching is never an
//! error.
//!
//! ```rust
//! let mut responder = Responder::new(variants::basic(), Identity::default(), process_rng(None));
//! assert_eq!(responder.respond("hi").text(), Some("Hello there!"));
//! ```
//!
use super::random::pick_random;
use super::rules::{Action, CaseMode, Fallback, Response, Rule, RuleTable};
use super::variants::DEFAULT_BOT_NAME;
use crate::core::templating::{render_reply, ReplyContext};
use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, warn};

/// Who the bot says it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
}

impl Identity {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for Identity {
    fn default() -> Self {
        Self::new(DEFAULT_BOT_NAME)
    }
}

/// The outcome of one dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Text to print or speak.
    Say(String),
    /// Closing text; the assistant loop stops after delivering it.
    Farewell(String),
    /// An assistant command, together with the input that triggered it.
    Perform { action: Action, input: String },
}

impl Reply {
    /// The reply text, if this reply is plain text.
    pub fn text(&self) -> Option<&str> {
        match self {
            Reply::Say(text) | Reply::Farewell(text) => Some(text),
            Reply::Perform { .. } => None,
        }
    }

    pub fn is_farewell(&self) -> bool {
        matches!(self, Reply::Farewell(_))
    }
}

/// Dispatches input against a rule table.
#[derive(Debug)]
pub struct Responder<R = StdRng> {
    table: RuleTable,
    identity: Identity,
    rng: R,
}

impl<R: Rng> Responder<R> {
    pub fn new(table: RuleTable, identity: Identity, rng: R) -> Self {
        Self {
            table,
            identity,
            rng,
        }
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Produces the reply for one line of input.
    ///
    /// # Arguments
    ///
    /// * `input` - A raw line. Surrounding whitespace is trimmed before
    ///   matching; case-insensitive rules compare against its lowercase form.
    ///
    /// # Returns
    ///
    /// * `Reply` - Never an error: unmatched input gets the table's fallback,
    ///   and a template that fails to render is returned as written.
    pub fn respond(&mut self, input: &str) -> Reply {
        let input = input.trim();
        let lowered = input.to_lowercase();

        let matched = self
            .table
            .rules
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.matcher.matches(input, &lowered));

        match matched {
            Some((index, rule)) => {
                debug!(
                    "Input {:?} matched rule #{} {:?} of '{}'",
                    input,
                    index,
                    rule.matcher.triggers(),
                    self.table.name
                );
                produce(rule, input, &self.identity, &mut self.rng)
            }
            None => {
                debug!("Input {:?} fell through to the fallback of '{}'", input, self.table.name);
                Reply::Say(fallback_text(&self.table.fallback, &mut self.rng))
            }
        }
    }
}

fn produce<R: Rng>(rule: &Rule, input: &str, identity: &Identity, rng: &mut R) -> Reply {
    match &rule.response {
        Response::Text(text) => Reply::Say(text.clone()),
        Response::OneOf(items) => Reply::Say(
            pick_random(items, rng).cloned().unwrap_or_default(),
        ),
        Response::Template {
            template,
            strip_prefix,
        } => {
            let name = match strip_prefix {
                Some(prefix) => trim_prefix(input, prefix, rule.matcher.case()),
                None => input,
            };
            let ctx = ReplyContext {
                bot: &identity.name,
                name,
            };
            Reply::Say(render_reply(template, ctx).unwrap_or_else(|e| {
                warn!("Falling back to the raw template: {:?}", e);
                template.clone()
            }))
        }
        Response::Farewell(text) => Reply::Farewell(text.clone()),
        Response::Action(action) => Reply::Perform {
            action: *action,
            input: input.to_string(),
        },
    }
}

fn fallback_text<R: Rng>(fallback: &Fallback, rng: &mut R) -> String {
    match fallback {
        Fallback::Fixed(text) => text.clone(),
        Fallback::Random(items) => pick_random(items, rng).cloned().unwrap_or_default(),
    }
}

/// Removes `prefix` from the front of `input`, once.
///
/// Sensitive rules compare the prefix literally; insensitive rules ignore
/// ASCII case. Input that does not start with the prefix is returned unchanged.
fn trim_prefix<'a>(input: &'a str, prefix: &str, case: CaseMode) -> &'a str {
    match case {
        CaseMode::Sensitive => input.strip_prefix(prefix).unwrap_or(input),
        CaseMode::Insensitive => match input.get(..prefix.len()) {
            Some(head) if head.eq_ignore_ascii_case(prefix) => &input[prefix.len()..],
            _ => input,
        },
    }
}
