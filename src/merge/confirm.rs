//! Operator confirmation gate

use crate::error::{Error, Result};
use std::io::BufRead;

/// Source of the operator's yes/no answer
pub trait ConfirmationPrompt: Send + Sync {
    /// Ask whether to act on `ready` candidates and return the raw answer
    fn ask(&self, ready: usize) -> Result<String>;
}

/// Parse a confirmation answer.
///
/// `y`/`yes` and `n`/`no` are accepted in any case; anything else is an
/// error rather than a default.
pub fn parse_confirmation(input: &str) -> Result<bool> {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        _ => Err(Error::InvalidConfirmation(input.trim().to_string())),
    }
}

/// Ask once and require an affirmative answer.
///
/// A negative answer yields `Error::Aborted`.
pub fn confirm_ready_set(prompt: &dyn ConfirmationPrompt, ready: usize) -> Result<()> {
    let answer = prompt.ask(ready)?;
    if parse_confirmation(&answer)? {
        Ok(())
    } else {
        Err(Error::Aborted)
    }
}

/// Read one answer line from non-interactive input.
///
/// End of input yields an empty answer, which `parse_confirmation` rejects.
pub fn read_answer_line<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .map_err(|e| Error::Internal(format!("Failed to read confirmation: {e}")))?;
    Ok(line)
}
