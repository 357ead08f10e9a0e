//! Confirmation prompt that replays fixed answers

use bulk_merge::error::{Error, Result};
use bulk_merge::merge::ConfirmationPrompt;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Prompt that replays fixed answers and records what it was asked
///
/// Asking after the answers are used up is an error.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: Mutex<VecDeque<String>>,
    asked: Mutex<Vec<usize>>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    /// A prompt that must never be asked
    pub fn silent() -> Self {
        Self::default()
    }

    /// Ready counts this prompt was asked about
    pub fn asked(&self) -> Vec<usize> {
        self.asked.lock().unwrap().clone()
    }
}

impl ConfirmationPrompt for ScriptedPrompt {
    fn ask(&self, ready: usize) -> Result<String> {
        self.asked.lock().unwrap().push(ready);
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::Internal("no scripted confirmation answer left".to_string()))
    }
}
