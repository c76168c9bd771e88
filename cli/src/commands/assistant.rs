//! # Cozmo Virtual Assistant
//!
//! File: cli/src/commands/assistant.rs
//! Author: Clarence Itai Msindo
//!
//! ## Overview
//!
//! The listen/dispatch/speak loop used by the `assistant` variant (and custom
//! tables marked `assistant = true`). Every line the assistant says is printed
//! and then handed to the `Speaker`.
//!
//! ## Architecture
//!
//! - `Session`: the bot's name and the running flag, cleared by a farewell
//! - `Collaborators`: listener, speaker, Wikipedia client and browser launcher
//! - `Assistant`: owns the responder, the session and the collaborators
//!
//! Collaborator failures are logged and the loop carries on. Two failures end
//! the run: building the collaborators (e.g. `--speech system` without a TTS
//! program) and losing stdout, as `cozmo --variant assistant | head -1` does.
//!
//! ## Commands (built-in `assistant` table)
//!
//! | contains            | does                                    |
//! |---------------------|-----------------------------------------|
//! | `open google`       | opens the home URL, says "Opening Google" |
//! | `which day`         | "Today is Friday"                       |
//! | `tell me the time`  | "The time is 9 hours and 5 minutes"     |
//! | `from wikipedia`    | reads a Wikipedia summary               |
//! | `tell me your name` | "My name is Cozmo"                      |
//! | `bye`               | says goodbye and ends the session       |
//!
use crate::bot::random::process_rng;
use crate::bot::{Action, Identity, Reply, Responder, RuleTable};
use crate::common::network::{SummaryFetcher, WikipediaClient};
use crate::common::system::{SystemBrowser, UrlOpener};
use crate::common::voice::{self, ConsoleListener, Listener, Speaker};
use crate::core::config::{AssistantSettings, Settings};
use crate::core::error::Result;
use anyhow::Context;
use chrono::{Local, NaiveDateTime, Timelike};
use rand::Rng;
use std::io::{self, Write};
use tracing::{debug, error, info, warn};

/// Conversation state of one assistant run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub name: String,
    pub running: bool,
}

impl Session {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            running: true,
        }
    }
}

/// The assistant's external dependencies.
pub struct Collaborators {
    pub listener: Box<dyn Listener>,
    pub speaker: Box<dyn Speaker>,
    pub fetcher: Box<dyn SummaryFetcher>,
    pub opener: Box<dyn UrlOpener>,
}

impl Collaborators {
    /// Real collaborators: console input, the chosen speech backend, Wikipedia
    /// over HTTP and the system browser.
    ///
    /// ## Errors
    ///
    /// Fails if the speech backend or the HTTP client cannot be initialized.
    pub fn from_settings(
        speech: voice::SpeechBackend,
        assistant: &AssistantSettings,
    ) -> Result<Self> {
        let speaker = voice::speaker_for(speech)?;
        let fetcher = WikipediaClient::new(&assistant.wikipedia_url, assistant.summary_sentences)
            .context("Failed to initialize assistant")?;
        Ok(Self {
            listener: Box::new(ConsoleListener::new(io::stdin().lock())),
            speaker,
            fetcher: Box::new(fetcher),
            opener: Box::new(SystemBrowser),
        })
    }
}

pub struct Assistant<G, W> {
    responder: Responder<G>,
    session: Session,
    collaborators: Collaborators,
    home_url: String,
    out: W,
}

impl<G: Rng, W: Write> Assistant<G, W> {
    pub fn new(
        responder: Responder<G>,
        collaborators: Collaborators,
        home_url: impl Into<String>,
        out: W,
    ) -> Self {
        let session = Session::new(responder.identity().name.clone());
        Self {
            responder,
            session,
            collaborators,
            home_url: home_url.into(),
            out,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Greets, then serves commands until a farewell or end of input.
    ///
    /// ## Errors
    ///
    /// Returns an error once the output can no longer be written. Listener,
    /// speaker, lookup and browser failures are logged and the loop continues.
    pub fn run(&mut self) -> Result<()> {
        let greeting = self.responder.table().greeting.clone();
        if let Err(e) = self.speak(&greeting) {
            warn!("Failed to speak greeting: {:?}", e);
        }
        info!("Assistant '{}' is listening", self.session.name);

        while self.session.running {
            writeln!(self.out, "Listening...").context("Failed to write output")?;
            let command = match self.collaborators.listener.listen() {
                Ok(Some(command)) => command,
                Ok(None) => {
                    info!("Input closed, ending session");
                    break;
                }
                Err(e) => {
                    warn!("Error taking command: {:?}", e);
                    continue;
                }
            };
            writeln!(self.out, "Recognized: {}", command).context("Failed to write output")?;

            if let Err(e) = self.process_command(&command) {
                error!("Error processing command: {:?}", e);
            }
        }
        Ok(())
    }

    /// Prints `text`, then speaks it.
    fn speak(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}", text).context("Failed to write output")?;
        self.collaborators.speaker.speak(text)
    }

    /// Dispatches one recognized command.
    pub fn process_command(&mut self, command: &str) -> Result<()> {
        match self.responder.respond(command) {
            Reply::Say(text) => self.speak(&text),
            Reply::Farewell(text) => {
                self.session.running = false;
                self.speak(&text)
            }
            Reply::Perform { action, input } => self.perform(action, &input),
        }
    }

    fn perform(&mut self, action: Action, input: &str) -> Result<()> {
        debug!("Performing '{}' for {:?}", action, input);
        match action {
            Action::OpenBrowser => {
                let url = self.home_url.clone();
                self.collaborators.opener.open_url(&url)?;
                self.speak("Opening Google")
            }
            Action::TellDay => self.speak(&day_phrase(Local::now().naive_local())),
            Action::TellTime => self.speak(&time_phrase(Local::now().naive_local())),
            Action::LookUp => {
                self.speak("Searching on Wikipedia...")?;
                let query = wikipedia_query(input);
                match self.collaborators.fetcher.fetch_summary(&query)? {
                    Some(summary) => self.speak(&format!("According to Wikipedia: {}", summary)),
                    None => self.speak("Sorry, I couldn't find that information on Wikipedia"),
                }
            }
        }
    }
}

/// Runs the assistant on the terminal with `table`.
///
/// ## Errors
///
/// Returns an error if the speech backend cannot be initialized or stdout is
/// closed; other failures after start-up are logged and survived.
pub fn handle_assistant(settings: &Settings, table: RuleTable, seed: Option<u64>) -> Result<()> {
    let collaborators = Collaborators::from_settings(settings.speech, &settings.assistant)?;
    let responder = Responder::new(table, Identity::new(&settings.name), process_rng(seed));
    let mut assistant = Assistant::new(
        responder,
        collaborators,
        &settings.assistant.home_url,
        io::stdout().lock(),
    );
    assistant.run()
}

fn day_phrase(now: NaiveDateTime) -> String {
    format!("Today is {}", now.format("%A"))
}

fn time_phrase(now: NaiveDateTime) -> String {
    format!(
        "The time is {} hours and {} minutes",
        now.hour(),
        now.minute()
    )
}

/// Strips the trigger phrase and the word "wikipedia" from a command.
fn wikipedia_query(command: &str) -> String {
    command
        .to_lowercase()
        .replace("from wikipedia", " ")
        .replace("wikipedia", " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::random::process_rng;
    use crate::bot::{variants, Identity};
    use crate::core::error::CozmoError;
    use anyhow::anyhow;
    use chrono::NaiveDate;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    /// Shared log of what the fakes were asked to do.
    #[derive(Default)]
    struct Calls {
        spoken: Vec<String>,
        opened: Vec<String>,
        queries: Vec<String>,
    }

    type Shared = Rc<RefCell<Calls>>;

    struct ScriptedListener(VecDeque<Result<Option<String>>>);

    impl Listener for ScriptedListener {
        fn listen(&mut self) -> Result<Option<String>> {
            self.0.pop_front().unwrap_or(Ok(None))
        }
    }

    struct RecordingSpeaker(Shared);

    impl Speaker for RecordingSpeaker {
        fn speak(&mut self, text: &str) -> Result<()> {
            self.0.borrow_mut().spoken.push(text.to_string());
            Ok(())
        }
    }

    struct FakeWikipedia {
        calls: Shared,
        answer: Option<String>,
        fail: bool,
    }

    impl SummaryFetcher for FakeWikipedia {
        fn fetch_summary(&self, query: &str) -> Result<Option<String>> {
            self.calls.borrow_mut().queries.push(query.to_string());
            if self.fail {
                return Err(anyhow!(CozmoError::Lookup("network down".into())));
            }
            Ok(self.answer.clone())
        }
    }

    struct FakeBrowser {
        calls: Shared,
        fail: bool,
    }

    impl UrlOpener for FakeBrowser {
        fn open_url(&mut self, url: &str) -> Result<()> {
            if self.fail {
                return Err(anyhow!("no browser"));
            }
            self.calls.borrow_mut().opened.push(url.to_string());
            Ok(())
        }
    }

    struct Harness {
        calls: Shared,
        answer: Option<String>,
        fail_lookup: bool,
        fail_browser: bool,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                calls: Shared::default(),
                answer: Some("Albert Einstein was a physicist.".into()),
                fail_lookup: false,
                fail_browser: false,
            }
        }

        fn assistant(
            &self,
            script: Vec<Result<Option<String>>>,
        ) -> Assistant<rand::rngs::StdRng, Vec<u8>> {
            self.assistant_writing_to(script, Vec::new())
        }

        fn assistant_writing_to<W: Write>(
            &self,
            script: Vec<Result<Option<String>>>,
            out: W,
        ) -> Assistant<rand::rngs::StdRng, W> {
            let collaborators = Collaborators {
                listener: Box::new(ScriptedListener(script.into())),
                speaker: Box::new(RecordingSpeaker(self.calls.clone())),
                fetcher: Box::new(FakeWikipedia {
                    calls: self.calls.clone(),
                    answer: self.answer.clone(),
                    fail: self.fail_lookup,
                }),
                opener: Box::new(FakeBrowser {
                    calls: self.calls.clone(),
                    fail: self.fail_browser,
                }),
            };
            let responder = Responder::new(
                variants::assistant(),
                Identity::default(),
                process_rng(Some(1)),
            );
            Assistant::new(responder, collaborators, "https://www.google.com", out)
        }

        fn spoken(&self) -> Vec<String> {
            self.calls.borrow().spoken.clone()
        }
    }

    /// Stands in for a closed stdout pipe.
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    fn said(text: &str) -> Result<Option<String>> {
        Ok(Some(text.to_string()))
    }

    #[test]
    fn test_bye_ends_session_before_input_runs_out() {
        let harness = Harness::new();
        let mut assistant = harness.assistant(vec![
            said("tell me your name"),
            said("bye"),
            said("tell me your name"),
        ]);
        assistant.run().unwrap();

        assert!(!assistant.session().running);
        assert_eq!(
            harness.spoken(),
            vec![
                "Hey What's up! I am Cozmo, your virtual assistant. What can I help you with?",
                "My name is Cozmo",
                "Goodbye! Have a nice day!",
            ]
        );
    }

    #[test]
    fn test_output_echoes_listening_and_recognized() {
        let harness = Harness::new();
        let mut assistant = harness.assistant(vec![said("bye")]);
        assistant.run().unwrap();
        let printed = String::from_utf8(assistant.out.clone()).unwrap();
        assert_eq!(
            printed,
            "Hey What's up! I am Cozmo, your virtual assistant. What can I help you with?\n\
             Listening...\n\
             Recognized: bye\n\
             Goodbye! Have a nice day!\n"
        );
    }

    #[test]
    fn test_closed_output_ends_the_loop_with_an_error() {
        let harness = Harness::new();
        let script = (0..1000).map(|_| said("tell me your name")).collect();
        let mut assistant = harness.assistant_writing_to(script, ClosedPipe);

        let err = assistant.run().unwrap_err();
        assert!(err.to_string().contains("Failed to write output"));
        assert!(assistant.session().running);
        assert!(harness.spoken().is_empty());
    }

    #[test]
    fn test_end_of_input_stops_without_farewell() {
        let harness = Harness::new();
        let mut assistant = harness.assistant(vec![]);
        assistant.run().unwrap();
        assert!(assistant.session().running);
        assert_eq!(harness.spoken().len(), 1);
    }

    #[test]
    fn test_listener_errors_are_skipped() {
        let harness = Harness::new();
        let mut assistant = harness.assistant(vec![
            Err(anyhow!(CozmoError::Speech("mic unplugged".into()))),
            said("bye"),
        ]);
        assistant.run().unwrap();
        assert_eq!(harness.spoken().last().unwrap(), "Goodbye! Have a nice day!");
    }

    #[test]
    fn test_open_google_uses_home_url() {
        let harness = Harness::new();
        let mut assistant = harness.assistant(vec![]);
        assistant.process_command("open google").unwrap();
        assert_eq!(harness.calls.borrow().opened, vec!["https://www.google.com"]);
        assert_eq!(harness.spoken(), vec!["Opening Google"]);
    }

    #[test]
    fn test_browser_failure_is_reported_and_loop_continues() {
        let mut harness = Harness::new();
        harness.fail_browser = true;
        let mut assistant = harness.assistant(vec![said("open google"), said("bye")]);
        assert!(assistant.process_command("open google").is_err());
        assistant.run().unwrap();
        assert!(!harness.spoken().contains(&"Opening Google".to_string()));
        assert_eq!(harness.spoken().last().unwrap(), "Goodbye! Have a nice day!");
    }

    #[test]
    fn test_wikipedia_lookup_reads_summary() {
        let harness = Harness::new();
        let mut assistant = harness.assistant(vec![]);
        assistant
            .process_command("albert einstein from wikipedia")
            .unwrap();
        assert_eq!(harness.calls.borrow().queries, vec!["albert einstein"]);
        assert_eq!(
            harness.spoken(),
            vec![
                "Searching on Wikipedia...",
                "According to Wikipedia: Albert Einstein was a physicist.",
            ]
        );
    }

    #[test]
    fn test_wikipedia_miss_and_failure() {
        let mut harness = Harness::new();
        harness.answer = None;
        let mut assistant = harness.assistant(vec![]);
        assistant.process_command("zzzz from wikipedia").unwrap();
        assert_eq!(
            harness.spoken().last().unwrap(),
            "Sorry, I couldn't find that information on Wikipedia"
        );

        let mut failing = Harness::new();
        failing.fail_lookup = true;
        let mut assistant = failing.assistant(vec![]);
        let err = assistant.process_command("rust from wikipedia").unwrap_err();
        assert!(err.to_string().contains("network down"));
    }

    #[test]
    fn test_day_and_time_are_spoken() {
        let harness = Harness::new();
        let mut assistant = harness.assistant(vec![]);
        assistant.process_command("which day is it").unwrap();
        assistant.process_command("tell me the time").unwrap();
        let spoken = harness.spoken();
        assert!(spoken[0].starts_with("Today is "));
        assert!(spoken[1].starts_with("The time is "));
    }

    #[test]
    fn test_unknown_command_asks_to_repeat() {
        let harness = Harness::new();
        let mut assistant = harness.assistant(vec![]);
        assistant.process_command("sing me a song").unwrap();
        assert_eq!(
            harness.spoken(),
            vec!["I'm not sure how to help with that. Could you please repeat?"]
        );
        assert!(assistant.session().running);
    }

    #[test]
    fn test_phrases() {
        let friday = NaiveDate::from_ymd_opt(2024, 5, 17)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap();
        assert_eq!(day_phrase(friday), "Today is Friday");
        assert_eq!(time_phrase(friday), "The time is 9 hours and 5 minutes");
    }

    #[test]
    fn test_wikipedia_query_extraction() {
        assert_eq!(wikipedia_query("albert einstein from wikipedia"), "albert einstein");
        assert_eq!(wikipedia_query("From Wikipedia  the moon"), "the moon");
        assert_eq!(wikipedia_query("from wikipedia"), "");
    }
}
