//! # Cozmo Voice Utilities Module (`common::voice`)
//!
//! File: cli/src/common/voice/mod.rs
//! Author: Clarence Itai Msindo
//!
//! ## Overview
//!
//! The speech boundary of the assistant. Recognition and synthesis are
//! collaborators behind two traits:
//! - `Listener`: yields one recognized utterance per call, lowercased
//! - `Speaker`: says a line aloud and blocks until playback has finished
//!
//! ## Implementations
//!
//! - `ConsoleListener`: typed lines stand in for recognized speech
//! - `TextOnlySpeaker`: no audio; the assistant already prints every line
//! - `SystemSpeaker`: runs the platform TTS program (`say` / `espeak`)
//!
use crate::common::{process, system, ui};
use crate::core::error::{CozmoError, Result};
use anyhow::{anyhow, Context};
use serde::Deserialize;
use std::io::BufRead;
use tracing::{debug, info};

/// Which `Speaker` the assistant uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SpeechBackend {
    /// Print replies only.
    #[default]
    Console,
    /// Print replies and speak them with the system TTS program.
    System,
}

/// Speech-to-text boundary.
pub trait Listener {
    /// Blocks until an utterance is available. `Ok(None)` means the input is closed.
    fn listen(&mut self) -> Result<Option<String>>;
}

/// Text-to-speech boundary.
pub trait Speaker {
    /// Speaks `text`, returning once playback has completed.
    fn speak(&mut self, text: &str) -> Result<()>;
}

/// Reads utterances as typed lines.
pub struct ConsoleListener<R> {
    input: R,
}

impl<R: BufRead> ConsoleListener<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: BufRead> Listener for ConsoleListener<R> {
    fn listen(&mut self) -> Result<Option<String>> {
        let line = ui::read_line(&mut self.input).context("Failed to read from the console")?;
        Ok(line.map(|text| text.trim().to_lowercase()))
    }
}

/// A speaker that produces no audio.
#[derive(Debug, Default)]
pub struct TextOnlySpeaker;

impl Speaker for TextOnlySpeaker {
    fn speak(&mut self, _text: &str) -> Result<()> {
        Ok(())
    }
}

/// Speaks through the platform's text-to-speech program.
#[derive(Debug)]
pub struct SystemSpeaker {
    program: &'static str,
}

impl SystemSpeaker {
    /// Locates the TTS program.
    ///
    /// ## Errors
    ///
    /// `CozmoError::SpeechInit` if the platform has no supported program or it
    /// is not installed. The assistant treats this as fatal.
    pub fn detect() -> Result<Self> {
        let program = system::tts_program().ok_or_else(|| {
            anyhow!(CozmoError::SpeechInit(
                "no supported text-to-speech program on this platform".to_string()
            ))
        })?;
        if !system::tool_available(program) {
            return Err(anyhow!(CozmoError::SpeechInit(format!(
                "text-to-speech program '{}' was not found in PATH",
                program
            ))));
        }
        info!("Using '{}' for speech output", program);
        Ok(Self { program })
    }
}

impl Speaker for SystemSpeaker {
    fn speak(&mut self, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Err(anyhow!(CozmoError::Speech("nothing to say".to_string())));
        }
        debug!("Speaking with {}: {:?}", self.program, text);
        let output = process::run_command_capture(self.program, &[text])
            .map_err(|e| anyhow!(CozmoError::Speech(format!("{:#}", e))))?;
        if !output.stdout.trim().is_empty() {
            debug!("{} printed: {}", self.program, output.stdout.trim());
        }
        Ok(())
    }
}

/// Builds the speaker for `backend`.
pub fn speaker_for(backend: SpeechBackend) -> Result<Box<dyn Speaker>> {
    match backend {
        SpeechBackend::Console => Ok(Box::new(TextOnlySpeaker)),
        SpeechBackend::System => Ok(Box::new(SystemSpeaker::detect()?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_console_listener_lowercases_and_trims() {
        let mut listener = ConsoleListener::new(Cursor::new("  Tell Me The TIME \nbye\n"));
        assert_eq!(listener.listen().unwrap().as_deref(), Some("tell me the time"));
        assert_eq!(listener.listen().unwrap().as_deref(), Some("bye"));
        assert_eq!(listener.listen().unwrap(), None);
    }

    #[test]
    fn test_console_listener_reports_bad_input() {
        let mut listener = ConsoleListener::new(Cursor::new(b"\xff\n".to_vec()));
        assert!(listener.listen().is_err());
        assert_eq!(listener.listen().unwrap(), None);
    }

    #[test]
    fn test_text_only_speaker_never_fails() {
        let mut speaker = TextOnlySpeaker;
        assert!(speaker.speak("Hello").is_ok());
        assert!(speaker.speak("").is_ok());
    }

    #[test]
    fn test_console_backend_builds() {
        assert!(speaker_for(SpeechBackend::Console).is_ok());
    }

    #[test]
    fn test_system_speaker_rejects_empty_text() {
        let mut speaker = SystemSpeaker { program: "true" };
        assert!(speaker.speak("   ").is_err());
    }
}
