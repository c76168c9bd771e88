//! # Cozmo Network Utilities Module (`common::network`)
//!
//! File: cli/src/common/network/mod.rs
//! Author: Clarence Itai Msindo
//!
//! ## Overview
//!
//! Web lookups for the assistant. `WikipediaClient` fetches a page summary from
//! the Wikipedia REST API (`/page/summary/{title}`) with a blocking HTTP
//! request and trims it to a fixed number of sentences so it can be read out
//! in one breath.
//!
//! A missing page (HTTP 404) or an empty extract is "not found", not an error.
//!
use crate::core::error::{CozmoError, Result};
use anyhow::{anyhow, Context};
use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Web-content lookup boundary.
pub trait SummaryFetcher {
    /// Returns a short summary for `query`, or `None` if nothing was found.
    fn fetch_summary(&self, query: &str) -> Result<Option<String>>;
}

/// The subset of the REST summary payload Cozmo reads.
#[derive(Debug, Deserialize)]
struct PageSummary {
    #[serde(default)]
    extract: Option<String>,
}

/// Blocking client for the Wikipedia REST summary endpoint.
#[derive(Debug)]
pub struct WikipediaClient {
    client: Client,
    base: Url,
    sentences: usize,
}

impl WikipediaClient {
    pub fn new(base_url: &str, sentences: usize) -> Result<Self> {
        let base = Url::parse(base_url)
            .with_context(|| format!("Invalid Wikipedia URL: {}", base_url))?;
        if base.cannot_be_a_base() {
            return Err(anyhow!(CozmoError::Config(format!(
                "Wikipedia URL '{}' cannot be used as a base URL.",
                base_url
            ))));
        }
        let client = Client::builder()
            .user_agent(concat!("cozmo/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| anyhow!(CozmoError::Http { source: e }))?;
        Ok(Self {
            client,
            base,
            sentences,
        })
    }

    /// The summary URL for `query`, written as a page title: each word
    /// capitalized and joined with underscores.
    pub fn summary_url(&self, query: &str) -> Url {
        let title = query
            .split_whitespace()
            .map(capitalize)
            .collect::<Vec<_>>()
            .join("_");
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&title);
        }
        url
    }
}

impl SummaryFetcher for WikipediaClient {
    fn fetch_summary(&self, query: &str) -> Result<Option<String>> {
        if query.trim().is_empty() {
            return Ok(None);
        }
        let url = self.summary_url(query);
        info!("Fetching Wikipedia summary: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| anyhow!(CozmoError::Http { source: e }))?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!("No Wikipedia page for {:?}", query);
            return Ok(None);
        }
        let summary: PageSummary = response
            .error_for_status()
            .and_then(|r| r.json::<PageSummary>())
            .map_err(|e| anyhow!(CozmoError::Http { source: e }))
            .with_context(|| format!("Wikipedia lookup for '{}' failed", query))?;

        Ok(summary
            .extract
            .filter(|text| !text.trim().is_empty())
            .map(|text| first_sentences(&text, self.sentences)))
    }
}

/// Uppercases the first character of `word`, leaving the rest as given.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Keeps at most `count` sentences of `text`.
///
/// A sentence ends at `.`, `!` or `?` followed by whitespace or the end of the
/// text, so abbreviations such as "3.14" do not split.
pub fn first_sentences(text: &str, count: usize) -> String {
    let text = text.trim();
    let mut seen = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((index, ch)) = chars.next() {
        if !matches!(ch, '.' | '!' | '?') {
            continue;
        }
        let at_boundary = chars.peek().map_or(true, |(_, next)| next.is_whitespace());
        if at_boundary {
            seen += 1;
            if seen == count {
                return text[..index + ch.len_utf8()].to_string();
            }
        }
    }
    text.to_string()
}
