//! # Cozmo Reply Templating
//!
//! File: cli/src/core/templating.rs
//! Author: Clarence Itai Msindo
//!
//! ## Overview
//!
//! Replies that depend on the input or on the bot's identity are written as
//! Tera templates. Two variables are available:
//! - `bot`: the configured bot name (e.g. `My name is {{ bot }}`)
//! - `name`: the input remainder after a rule's prefix has been stripped
//!
//! Autoescaping is disabled; replies are plain terminal text, not HTML.
//!
use crate::core::error::{CozmoError, Result};
use anyhow::{anyhow, Context};
use tera::Tera;

/// Values a reply template may reference.
#[derive(Debug, Clone, Copy)]
pub struct ReplyContext<'a> {
    pub bot: &'a str,
    pub name: &'a str,
}

impl ReplyContext<'_> {
    fn to_tera(self) -> tera::Context {
        let mut ctx = tera::Context::new();
        ctx.insert("bot", self.bot);
        ctx.insert("name", self.name);
        ctx
    }
}

/// Renders a single reply template against `ctx`.
///
/// # Arguments
///
/// * `template` - Tera source, e.g. `"Nice to meet you, {{ name }}!"`.
/// * `ctx` - Values for `{{ bot }}` and `{{ name }}`.
///
/// # Errors
///
/// Returns `CozmoError::Template` if the template does not parse or refers to
/// an unknown variable. Autoescaping is off; replies are plain text.
pub fn render_reply(template: &str, ctx: ReplyContext<'_>) -> Result<String> {
    Tera::one_off(template, &ctx.to_tera(), false)
        .map_err(|e| anyhow!(CozmoError::Template { source: e }))
        .with_context(|| format!("Failed to render reply template '{}'", template))
}

/// Checks that a template compiles and renders with placeholder values.
///
/// Called while loading configuration so that broken templates are reported
/// at startup instead of in the middle of a conversation.
pub fn check_template(template: &str) -> Result<()> {
    render_reply(
        template,
        ReplyContext {
            bot: "Cozmo",
            name: "Ada",
        },
    )
    .map(|_| ())
}
