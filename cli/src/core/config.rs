//! # Cozmo Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Clarence Itai Msindo
//!
//! ## Overview
//!
//! This module loads, merges and validates Cozmo's configuration and resolves
//! it into the `Settings` the rest of the program runs on. Configuration is
//! optional: with no files present, Cozmo runs the built-in `basic` variant as
//! "Cozmo".
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Command-line flags (`--name`, `--variant`, `--speech`)
//! 2. An explicit `--config <path>`, which replaces both discovered files
//! 3. Project-specific `.cozmo.toml` in the current directory or ancestors
//! 4. User-specific `<config dir>/cozmo/config.toml`
//! 5. Default values defined in the code
//!
//! Project values override user values field by field. Custom variants from
//! both files are kept; a project variant shadows a user variant of the same
//! name.
//!
//! ## Examples
//!
//! ```toml
//! name = "Cozmo"
//! variant = "pirate"
//! speech = "console"
//!
//! [assistant]
//! home_url = "https://www.google.com"
//! summary_sentences = 4
//!
//! [[variants]]
//! name = "pirate"
//! greeting = "Ahoy!"
//! fallback = ["Arr?", "Say again, matey?"]
//!
//! [[variants.rules]]
//! triggers = ["hello", "ahoy"]
//! reply = "Ahoy there!"
//!
//! [[variants.rules]]
//! triggers = ["my name is "]
//! template = "Welcome aboard, {{ name }}!"
//! strip_prefix = "my name is "
//! ```
//!
use crate::bot::rules::{CaseMode, Fallback, Matcher, Response, Rule, RuleTable};
use crate::bot::variants::{self, DEFAULT_BOT_NAME, DEFAULT_VARIANT};
use crate::common::voice::SpeechBackend;
use crate::core::error::{CozmoError, Result};
use crate::core::templating::check_template;
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::collections::HashSet;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

const PROJECT_CONFIG_FILENAME: &str = ".cozmo.toml";

/// Represents one configuration file as written on disk.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Name the bot introduces itself with.
    pub name: Option<String>,
    /// Variant to run when `--variant` is not given.
    pub variant: Option<String>,
    /// Text-to-speech backend for the assistant.
    pub speech: Option<SpeechBackend>,
    #[serde(default)]
    pub assistant: AssistantConfig,
    /// Custom rule tables.
    #[serde(default)]
    pub variants: Vec<VariantConfig>,
}

/// Endpoints and limits used by the assistant's actions.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct AssistantConfig {
    pub home_url: Option<String>,
    pub wikipedia_url: Option<String>,
    pub summary_sentences: Option<usize>,
}

/// A custom rule table.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct VariantConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub greeting: String,
    /// Custom tables match case-insensitively unless this is set.
    #[serde(default)]
    pub case_sensitive: bool,
    /// Run in the assistant loop (speak/listen) instead of the chat loop.
    #[serde(default)]
    pub assistant: bool,
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
    /// One entry gives a fixed fallback, several a random one.
    pub fallback: Option<Vec<String>>,
}

/// A custom rule. Exactly one of `reply`, `replies`, `template` or `farewell`
/// must be set.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    pub triggers: Vec<String>,
    pub reply: Option<String>,
    pub replies: Option<Vec<String>>,
    pub template: Option<String>,
    pub strip_prefix: Option<String>,
    pub farewell: Option<String>,
}

/// Values given on the command line, which win over every file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub name: Option<String>,
    pub variant: Option<String>,
    pub speech: Option<SpeechBackend>,
}

/// Resolved assistant settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantSettings {
    pub home_url: String,
    pub wikipedia_url: String,
    pub summary_sentences: usize,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            home_url: "https://www.google.com".to_string(),
            wikipedia_url: "https://en.wikipedia.org/api/rest_v1/page/summary/".to_string(),
            summary_sentences: 4,
        }
    }
}

/// The fully resolved configuration Cozmo runs with.
#[derive(Debug, Clone)]
pub struct Settings {
    pub name: String,
    pub variant: String,
    pub speech: SpeechBackend,
    pub assistant: AssistantSettings,
    pub custom_variants: Vec<RuleTable>,
}

impl Settings {
    /// Returns the table for `name`, preferring custom variants.
    pub fn table(&self, name: &str) -> Result<RuleTable> {
        self.custom_variants
            .iter()
            .find(|table| table.name == name)
            .cloned()
            .or_else(|| variants::builtin(name))
            .ok_or_else(|| {
                anyhow!(CozmoError::UnknownVariant {
                    name: name.to_string(),
                    known: self.variant_names().join(", "),
                })
            })
    }

    /// The table selected by configuration and flags.
    pub fn selected_table(&self) -> Result<RuleTable> {
        self.table(&self.variant)
    }

    pub fn variant_names(&self) -> Vec<String> {
        variants::builtin_names()
            .iter()
            .map(|name| name.to_string())
            .chain(self.custom_variants.iter().map(|t| t.name.clone()))
            .collect()
    }

    /// `(name, description)` for every available variant.
    pub fn variant_summaries(&self) -> Vec<(String, String)> {
        variants::builtin_names()
            .iter()
            .filter_map(|name| variants::builtin(name))
            .chain(self.custom_variants.iter().cloned())
            .map(|table| (table.name, table.description))
            .collect()
    }
}

/// Loads every configuration layer and resolves it against `overrides`.
///
/// Precedence, highest first: `overrides` (flags and `COZMO_*` variables),
/// then `explicit` if given, otherwise the project `.cozmo.toml` merged over
/// the user `config.toml`, then built-in defaults.
///
/// # Arguments
///
/// * `explicit` - The `--config` path. When set, discovery is skipped.
/// * `overrides` - Values from the command line.
///
/// # Errors
///
/// Returns an `Err` if:
/// - `explicit` does not exist, or any file cannot be read or parsed.
/// - Validation fails (bad rule, duplicate or shadowing variant name, bad URL).
pub fn load_settings(explicit: Option<&Path>, overrides: Overrides) -> Result<Settings> {
    let config = match explicit {
        Some(path) => load_explicit_config(path)?,
        None => {
            let user_config = load_user_config()?;
            let project_config = load_project_config()?;
            merge_configs(user_config.unwrap_or_default(), project_config)
        }
    };
    let settings = resolve(config, overrides).context("Configuration validation failed")?;
    debug!("Final settings: {:?}", settings);
    Ok(settings)
}

fn load_explicit_config(path: &Path) -> Result<Config> {
    let expanded = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned());
    if !expanded.is_file() {
        return Err(anyhow!(CozmoError::Config(format!(
            "Configuration file '{}' does not exist.",
            expanded.display()
        ))));
    }
    info!("Loading configuration from: {}", expanded.display());
    load_config_from_path(&expanded)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "Cozmo", "cozmo") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.cozmo.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

/// Walks up from `start` looking for `.cozmo.toml`, stopping at a `.git` root.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let Some(project) = project else {
        return user;
    };
    let shadowed: HashSet<String> = project.variants.iter().map(|v| v.name.clone()).collect();
    let mut variants = project.variants;
    variants.extend(
        user.variants
            .into_iter()
            .filter(|v| !shadowed.contains(&v.name)),
    );
    Config {
        name: project.name.or(user.name),
        variant: project.variant.or(user.variant),
        speech: project.speech.or(user.speech),
        assistant: AssistantConfig {
            home_url: project.assistant.home_url.or(user.assistant.home_url),
            wikipedia_url: project
                .assistant
                .wikipedia_url
                .or(user.assistant.wikipedia_url),
            summary_sentences: project
                .assistant
                .summary_sentences
                .or(user.assistant.summary_sentences),
        },
        variants,
    }
}

/// Applies overrides and defaults, then validates the result.
fn resolve(config: Config, overrides: Overrides) -> Result<Settings> {
    let defaults = AssistantSettings::default();
    let assistant = AssistantSettings {
        home_url: config.assistant.home_url.unwrap_or(defaults.home_url),
        wikipedia_url: config
            .assistant
            .wikipedia_url
            .unwrap_or(defaults.wikipedia_url),
        summary_sentences: config
            .assistant
            .summary_sentences
            .unwrap_or(defaults.summary_sentences),
    };
    validate_assistant(&assistant)?;

    let name = overrides
        .name
        .or(config.name)
        .unwrap_or_else(|| DEFAULT_BOT_NAME.to_string());
    if name.trim().is_empty() {
        return Err(anyhow!(CozmoError::Config(
            "Bot name cannot be empty.".to_string()
        )));
    }

    let mut seen = HashSet::new();
    let mut custom_variants = Vec::with_capacity(config.variants.len());
    for variant in config.variants {
        if variants::builtin(&variant.name).is_some() {
            return Err(anyhow!(CozmoError::Config(format!(
                "Custom variant '{}' shadows a built-in variant.",
                variant.name
            ))));
        }
        if !seen.insert(variant.name.clone()) {
            return Err(anyhow!(CozmoError::Config(format!(
                "Custom variant '{}' is defined more than once.",
                variant.name
            ))));
        }
        let variant_name = variant.name.clone();
        custom_variants.push(
            variant
                .into_table()
                .with_context(|| format!("Invalid custom variant '{}'", variant_name))?,
        );
    }

    Ok(Settings {
        name,
        variant: overrides
            .variant
            .or(config.variant)
            .unwrap_or_else(|| DEFAULT_VARIANT.to_string()),
        speech: overrides.speech.or(config.speech).unwrap_or_default(),
        assistant,
        custom_variants,
    })
}

fn validate_assistant(assistant: &AssistantSettings) -> Result<()> {
    if assistant.summary_sentences == 0 {
        return Err(anyhow!(CozmoError::Config(
            "assistant.summary_sentences must be at least 1.".to_string()
        )));
    }
    for (key, url) in [
        ("assistant.home_url", &assistant.home_url),
        ("assistant.wikipedia_url", &assistant.wikipedia_url),
    ] {
        if reqwest::Url::parse(url).is_err() {
            return Err(anyhow!(CozmoError::Config(format!(
                "Invalid URL for {}: '{}'.",
                key, url
            ))));
        }
    }
    Ok(())
}

impl VariantConfig {
    /// Validates the variant and converts it into a `RuleTable`.
    pub fn into_table(self) -> Result<RuleTable> {
        if self.name.trim().is_empty() {
            return Err(anyhow!(CozmoError::Config(
                "Variant name cannot be empty.".to_string()
            )));
        }
        let case = if self.case_sensitive {
            CaseMode::Sensitive
        } else {
            CaseMode::Insensitive
        };
        let mut table = RuleTable::new(self.name, self.greeting)
            .describe(self.description)
            .case(case);
        if self.assistant {
            table = table.assistant();
        }
        for (index, rule) in self.rules.into_iter().enumerate() {
            let rule = rule
                .into_rule(case)
                .with_context(|| format!("Rule #{} is invalid", index + 1))?;
            table.rules.push(rule);
        }
        table.fallback = match self.fallback {
            None => Fallback::default(),
            Some(items) if items.is_empty() => {
                return Err(anyhow!(CozmoError::Config(
                    "fallback must list at least one reply.".to_string()
                )));
            }
            Some(mut items) if items.len() == 1 => Fallback::Fixed(items.remove(0)),
            Some(items) => Fallback::Random(items),
        };
        Ok(table)
    }
}

impl RuleConfig {
    fn into_rule(self, case: CaseMode) -> Result<Rule> {
        if self.triggers.is_empty() || self.triggers.iter().any(|t| t.is_empty()) {
            return Err(anyhow!(CozmoError::Config(
                "triggers must be a non-empty list of non-empty strings.".to_string()
            )));
        }
        if self.strip_prefix.is_some() && self.template.is_none() {
            return Err(anyhow!(CozmoError::Config(
                "strip_prefix is only allowed together with template.".to_string()
            )));
        }
        let response = match (self.reply, self.replies, self.template, self.farewell) {
            (Some(text), None, None, None) => Response::Text(text),
            (None, Some(items), None, None) => {
                if items.is_empty() {
                    return Err(anyhow!(CozmoError::Config(
                        "replies must list at least one reply.".to_string()
                    )));
                }
                Response::OneOf(items)
            }
            (None, None, Some(template), None) => {
                check_template(&template)?;
                Response::Template {
                    template,
                    strip_prefix: self.strip_prefix,
                }
            }
            (None, None, None, Some(text)) => Response::Farewell(text),
            _ => {
                return Err(anyhow!(CozmoError::Config(
                    "exactly one of reply, replies, template or farewell must be set.".to_string()
                )));
            }
        };
        Ok(Rule::new(Matcher::new(self.triggers, case), response))
    }
}
