//! CLI command implementations

mod context;
mod run;
pub mod style;

pub use context::CommandContext;
pub use run::run_bulk_merge;

use anstream::{eprintln, println};
use async_trait::async_trait;
use bulk_merge::error::{Error, Result};
use bulk_merge::merge::{ConfirmationPrompt, read_answer_line};
use bulk_merge::progress::ProgressCallback;
use bulk_merge::types::{CheckAggregateStatus, PullRequestRecord};
use console::Term;
use dialoguer::Input;
use indicatif::ProgressBar;
use style::{Stylize, hyperlink, status_label, status_marker};

/// Progress output for the terminal
pub struct CliProgress {
    spinner: Option<ProgressBar>,
}

impl CliProgress {
    /// Line-per-event output
    pub const fn compact() -> Self {
        Self { spinner: None }
    }

    /// Report search pages on a spinner instead of lines
    pub fn with_spinner(spinner: ProgressBar) -> Self {
        Self {
            spinner: Some(spinner),
        }
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_search_page(&self, page: u32, found: usize, total: u64) {
        if let Some(spinner) = &self.spinner {
            spinner.set_message(format!("Searching... page {page}, {found}/{total} found"));
        }
    }

    async fn on_classified(&self, record: &PullRequestRecord, status: Option<CheckAggregateStatus>) {
        println!(
            "{} {} {} {}",
            status_marker(status),
            hyperlink(&record.pr.to_string(), &record.html_url).accent(),
            record.title,
            format!("({})", status_label(status)).muted()
        );
    }

    async fn on_message(&self, message: &str) {
        match &self.spinner {
            Some(spinner) => spinner.println(message),
            None => println!("{message}"),
        }
    }
}

/// Yes/no prompt on the terminal
///
/// Falls back to reading a line from stdin when stderr is not a terminal
/// (redirected logs, CI, piped answers).
pub struct TerminalPrompt;

impl ConfirmationPrompt for TerminalPrompt {
    fn ask(&self, ready: usize) -> Result<String> {
        let question = format!("Approve and merge {ready} PR(s)? [y/n]");
        if Term::stderr().is_term() {
            Input::<String>::new()
                .with_prompt(question)
                .allow_empty(true)
                .interact_text()
                .map_err(|e| Error::Internal(format!("Failed to read confirmation: {e}")))
        } else {
            eprintln!("{question}");
            read_answer_line(&mut std::io::stdin().lock())
        }
    }
}
