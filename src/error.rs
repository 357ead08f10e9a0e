//! Error types for bulk-merge

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the merge workflow
#[derive(Debug, Error)]
pub enum Error {
    /// GitHub API returned an error or an unexpected response
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Error surfaced by octocrab
    #[error("GitHub API error: {0}")]
    Octocrab(#[from] octocrab::Error),

    /// Generic platform failure
    #[error("platform error: {0}")]
    Platform(String),

    /// Invalid command-line usage
    #[error("usage: {0}")]
    Usage(String),

    /// No usable credentials found
    #[error("authentication error: {0}")]
    Auth(String),

    /// Confirmation answer was neither yes nor no
    #[error("invalid confirmation input '{0}', expected 'y' or 'n'")]
    InvalidConfirmation(String),

    /// Operator declined the confirmation prompt
    #[error("aborted")]
    Aborted,

    /// An operation kept failing after every retry attempt
    #[error("{operation} failed after {attempts} attempt(s): {source}")]
    RetriesExhausted {
        /// Human-readable name of the operation
        operation: String,
        /// Number of attempts made
        attempts: u32,
        /// Error from the last attempt
        #[source]
        source: Box<Error>,
    },

    /// Unexpected internal failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Process exit code for this error.
    ///
    /// Every failure (usage, credentials, confirmation, fatal run error) maps
    /// to 1; normal completion exits with 0.
    pub const fn exit_code(&self) -> u8 {
        1
    }

    /// Whether this error is the operator declining the prompt
    pub const fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted)
    }
}
