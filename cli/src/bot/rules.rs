//! # Rule Tables
//!
//! File: cli/src/bot/rules.rs
//! Author: Clarence Itai Msindo
//!
//! ## Overview
//!
//! A `RuleTable` is an ordered list of `Rule`s plus a fallback. Each rule pairs
//! a `Matcher` (a set of trigger substrings, any of which may match) with a
//! `Response` describing how the reply is produced. Tables are built once at
//! startup and never change afterwards.
//!
//! ```rust
//! let table = RuleTable::new("demo", "Say hi!")
//!     .on(["hello", "hi"], Response::text("Hello there!"))
//!     .on(["bye"], Response::farewell("See you."))
//!     .with_fallback(Fallback::fixed("Come again?"));
//! ```
//!
use std::fmt;

/// How a matcher compares its triggers against the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseMode {
    /// Triggers must appear verbatim.
    #[default]
    Sensitive,
    /// Triggers and input are compared after lowercasing.
    Insensitive,
}

/// A set of trigger substrings. Matches if the input contains ANY of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matcher {
    triggers: Vec<String>,
    case: CaseMode,
}

impl Matcher {
    pub fn new<I, S>(triggers: I, case: CaseMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let triggers = triggers
            .into_iter()
            .map(Into::into)
            .map(|t: String| match case {
                CaseMode::Sensitive => t,
                CaseMode::Insensitive => t.to_lowercase(),
            })
            .collect();
        Self { triggers, case }
    }

    /// Tests the input against the triggers.
    ///
    /// `lowered` must be `input.to_lowercase()`; the responder computes it once
    /// per line instead of once per rule.
    pub fn matches(&self, input: &str, lowered: &str) -> bool {
        let haystack = match self.case {
            CaseMode::Sensitive => input,
            CaseMode::Insensitive => lowered,
        };
        self.triggers
            .iter()
            .any(|trigger| haystack.contains(trigger.as_str()))
    }

    pub fn triggers(&self) -> &[String] {
        &self.triggers
    }

    pub fn case(&self) -> CaseMode {
        self.case
    }
}

/// Work the assistant performs through one of its collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Open the configured home page in the default browser.
    OpenBrowser,
    /// Announce the current weekday.
    TellDay,
    /// Announce the current hour and minute.
    TellTime,
    /// Read a Wikipedia summary for the rest of the command.
    LookUp,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Action::OpenBrowser => "open browser",
            Action::TellDay => "tell day",
            Action::TellTime => "tell time",
            Action::LookUp => "wikipedia lookup",
        };
        f.write_str(label)
    }
}

/// How a rule produces its reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// A fixed string.
    Text(String),
    /// One string drawn uniformly from a non-empty list.
    OneOf(Vec<String>),
    /// A Tera template over `bot` and `name`.
    ///
    /// With `strip_prefix`, `name` is the input with that literal prefix trimmed
    /// from the front; an input that does not start with the prefix is used whole.
    Template {
        template: String,
        strip_prefix: Option<String>,
    },
    /// A fixed closing string that also ends an assistant session.
    Farewell(String),
    /// An assistant command.
    Action(Action),
}

impl Response {
    pub fn text(text: impl Into<String>) -> Self {
        Response::Text(text.into())
    }

    pub fn one_of<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Response::OneOf(items.into_iter().map(Into::into).collect())
    }

    pub fn template(template: impl Into<String>) -> Self {
        Response::Template {
            template: template.into(),
            strip_prefix: None,
        }
    }

    pub fn template_after(prefix: impl Into<String>, template: impl Into<String>) -> Self {
        Response::Template {
            template: template.into(),
            strip_prefix: Some(prefix.into()),
        }
    }

    pub fn farewell(text: impl Into<String>) -> Self {
        Response::Farewell(text.into())
    }
}

/// An ordered (matcher, response) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub matcher: Matcher,
    pub response: Response,
}

impl Rule {
    pub fn new(matcher: Matcher, response: Response) -> Self {
        Self { matcher, response }
    }
}

/// What to answer when no rule matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fallback {
    Fixed(String),
    Random(Vec<String>),
}

impl Fallback {
    pub fn fixed(text: impl Into<String>) -> Self {
        Fallback::Fixed(text.into())
    }

    pub fn random<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Fallback::Random(items.into_iter().map(Into::into).collect())
    }
}

impl Default for Fallback {
    fn default() -> Self {
        Fallback::fixed("I'm sorry, I didn't understand what you said.")
    }
}

/// A named variant: the ordered rules, the fallback and the greeting line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    pub name: String,
    pub description: String,
    pub greeting: String,
    pub case: CaseMode,
    /// Runs in the assistant loop (speak/listen) instead of the chat loop.
    pub assistant: bool,
    pub rules: Vec<Rule>,
    pub fallback: Fallback,
}

impl RuleTable {
    pub fn new(name: impl Into<String>, greeting: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            greeting: greeting.into(),
            case: CaseMode::Sensitive,
            assistant: false,
            rules: Vec::new(),
            fallback: Fallback::default(),
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the case mode used by subsequent `on` calls.
    pub fn case(mut self, case: CaseMode) -> Self {
        self.case = case;
        self
    }

    pub fn assistant(mut self) -> Self {
        self.assistant = true;
        self
    }

    /// Appends a rule using the table's current case mode.
    ///
    /// Rules are tried in the order they were added, so more specific
    /// triggers must be added before general ones.
    ///
    /// # Arguments
    ///
    /// * `triggers` - Substrings, any one of which fires the rule.
    /// * `response` - What the rule produces when it fires.
    pub fn on<I, S>(mut self, triggers: I, response: Response) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules
            .push(Rule::new(Matcher::new(triggers, self.case), response));
        self
    }

    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }

    /// True if any rule performs an assistant action.
    pub fn has_actions(&self) -> bool {
        self.rules
            .iter()
            .any(|rule| matches!(rule.response, Response::Action(_)))
    }
}
