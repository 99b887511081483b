//! Terminal passphrase prompt.
//!
//! Hidden input on a terminal. When stdin is piped, each answer is one line
//! of stdin, which keeps scripted and CI runs possible.

use std::io::{self, BufRead, IsTerminal};

use dialoguer::Password;
use zeroize::Zeroizing;

use crate::core::prompt::Prompt;
use crate::error::{Error, Result};

/// Prompt backed by the controlling terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn ask(&self, prompt: &str) -> Result<Zeroizing<String>> {
        if io::stdin().is_terminal() {
            Ok(Zeroizing::new(Password::new().with_prompt(prompt).interact()?))
        } else {
            read_line(prompt)
        }
    }
}

impl TerminalPrompt {
    /// Ask for a new passphrase, with confirmation on a terminal.
    pub fn ask_new(&self, prompt: &str) -> Result<Zeroizing<String>> {
        if io::stdin().is_terminal() {
            Ok(Zeroizing::new(
                Password::new()
                    .with_prompt(prompt)
                    .with_confirmation("Confirm password", "Passwords don't match")
                    .interact()?,
            ))
        } else {
            read_line(prompt)
        }
    }
}

/// One line of stdin without its line ending.
///
/// A closed stdin is an error rather than an empty answer.
fn read_line(prompt: &str) -> Result<Zeroizing<String>> {
    read_answer(&mut io::stdin().lock(), prompt)
}

fn read_answer(input: &mut impl BufRead, prompt: &str) -> Result<Zeroizing<String>> {
    let mut line = Zeroizing::new(String::new());
    if input.read_line(&mut line)? == 0 {
        return Err(Error::NoInput(prompt.to_string()));
    }
    let trimmed = line.trim_end_matches(|c| c == '\r' || c == '\n');
    Ok(Zeroizing::new(trimmed.to_string()))
}
