//! Terminal styling helpers

use bulk_merge::types::CheckAggregateStatus;
use indicatif::ProgressStyle;
use owo_colors::{OwoColorize, Stream};
use std::fmt::Display;

/// Check mark used in success lines
pub const CHECK: &str = "✓";

/// Semantic styles for terminal output
///
/// Colors are dropped automatically when stdout does not support them.
pub trait Stylize: Display + Sized {
    /// Positive outcome
    fn success(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.green())
            .to_string()
    }

    /// Something needs attention
    fn warn(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.yellow())
            .to_string()
    }

    /// Failure
    fn error(&self) -> String {
        self.if_supports_color(Stream::Stderr, |t| t.red()).to_string()
    }

    /// De-emphasized detail
    fn muted(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.dimmed())
            .to_string()
    }

    /// Highlighted value
    fn accent(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.cyan())
            .to_string()
    }

    /// Heading
    fn emphasis(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.bold())
            .to_string()
    }
}

impl<T: Display> Stylize for T {}

/// Styled check mark
pub fn check() -> String {
    CHECK.success()
}

/// Spinner style for long-running steps
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
}

/// Render `text` as a terminal hyperlink to `url` where supported
pub fn hyperlink(text: &str, url: &str) -> String {
    if url.is_empty() || !supports_hyperlinks::on(supports_hyperlinks::Stream::Stdout) {
        return text.to_string();
    }
    terminal_link::Link::new(text, url).to_string()
}

/// Marker shown next to a classified candidate
pub fn status_marker(status: Option<CheckAggregateStatus>) -> String {
    match status {
        Some(CheckAggregateStatus::Success) => "✅".to_string(),
        Some(CheckAggregateStatus::Queued) => "⏳".to_string(),
        Some(CheckAggregateStatus::InProgress) => "🔄".to_string(),
        Some(CheckAggregateStatus::Missing) => "❔".to_string(),
        Some(CheckAggregateStatus::Failed) => "❌".to_string(),
        None => "⚠️ ".to_string(),
    }
}

/// Status word, colored by severity
pub fn status_label(status: Option<CheckAggregateStatus>) -> String {
    match status {
        Some(s @ CheckAggregateStatus::Success) => s.success(),
        Some(s @ (CheckAggregateStatus::Queued | CheckAggregateStatus::InProgress)) => s.accent(),
        Some(s @ CheckAggregateStatus::Missing) => s.warn(),
        Some(s @ CheckAggregateStatus::Failed) => s.error(),
        None => "checks ignored".warn(),
    }
}
