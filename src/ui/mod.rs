//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling

use std::io::{self, Write};

use console::style;

use crate::error::Result;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_bump, display_error, display_reverted, display_status, display_success,
};

/// Question asked before anything leaves the machine.
pub const PUBLISH_PROMPT: &str = "Do you want to publish the new version to Expo?";

/// Yes/no confirmation source
pub trait Prompt {
    /// Asks `message` and returns the answer.
    fn confirm(&self, message: &str) -> Result<bool>;
}

/// Interprets a typed answer; empty input takes `default`.
///
/// Any answer starting with `y` (case-insensitive) is yes, anything else no.
pub fn parse_answer(input: &str, default: bool) -> bool {
    match input.trim().to_lowercase().as_str() {
        "" => default,
        answer => answer.starts_with('y'),
    }
}

/// Reads the answer from standard input.
///
/// Default is to confirm (user must enter 'n' or 'no' to decline). Closed
/// input is an error rather than an implicit yes.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl TerminalPrompt {
    pub fn new() -> Self {
        TerminalPrompt
    }
}

impl Prompt for TerminalPrompt {
    fn confirm(&self, message: &str) -> Result<bool> {
        print!("\n{} {} ", style(message).bold(), style("(Y/n)").dim());
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "no answer to the publish prompt",
            )
            .into());
        }

        Ok(parse_answer(&input, true))
    }
}
