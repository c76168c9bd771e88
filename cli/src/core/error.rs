//! # Cozmo Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Clarence Itai Msindo
//!
//! ## Overview
//!
//! This module defines the error types used throughout the Cozmo application.
//! Matching user input never fails: an unmatched line simply falls through to
//! the fallback reply. Errors only come from the edges of the program:
//! - Loading and validating configuration
//! - Compiling reply templates
//! - The assistant's collaborators (speech, Wikipedia lookups, browser launch)
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `CozmoError`: A custom error enum using `thiserror` for specific error types
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! if rule.triggers.is_empty() {
//!     return Err(CozmoError::Config("rule has no triggers".into()))?;
//! }
//!
//! // Pattern matching on error types
//! match result {
//!     Err(e) if e.downcast_ref::<CozmoError>().map_or(false, |ce| matches!(ce, CozmoError::SpeechInit(_))) => {
//!         // fatal: abort the process
//!     }
//!     Err(e) => tracing::error!("Error processing command: {:?}", e),
//!     Ok(()) => {}
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for the Cozmo application.
#[derive(Error, Debug)]
pub enum CozmoError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown variant '{name}'. Known variants: {known}")]
    UnknownVariant { name: String, known: String },

    #[error("Template rendering error: {source}")]
    Template {
        #[from]
        source: tera::Error,
    },

    #[error("Failed to initialize speech: {0}")]
    SpeechInit(String),

    #[error("Speech error: {0}")]
    Speech(String),

    #[error("Lookup failed: {0}")]
    Lookup(String),

    #[error("HTTP request failed: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },

    #[error("External command failed: {cmd}, Status: {status}, Output:\n{output}")]
    ExternalCommand {
        cmd: String,
        status: String,
        output: String,
    },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let config_err = CozmoError::Config("rule #2 has no triggers".to_string());
        assert_eq!(
            config_err.to_string(),
            "Configuration error: rule #2 has no triggers"
        );

        let unknown = CozmoError::UnknownVariant {
            name: "pirate".into(),
            known: "basic, intro".into(),
        };
        assert_eq!(
            unknown.to_string(),
            "Unknown variant 'pirate'. Known variants: basic, intro"
        );

        let launch = CozmoError::ExternalCommand {
            cmd: "xdg-open https://www.google.com".into(),
            status: "exit status: 3".into(),
            output: "no handler".into(),
        };
        assert!(launch.to_string().starts_with("External command failed: xdg-open"));
    }

    #[test]
    fn test_downcast_from_anyhow() {
        let err: anyhow::Error = CozmoError::SpeechInit("no `say` binary".into()).into();
        assert!(matches!(
            err.downcast_ref::<CozmoError>(),
            Some(CozmoError::SpeechInit(_))
        ));
    }
}
