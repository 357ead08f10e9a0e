//! Apply-time re-validation - pure functions
//!
//! The search and the confirmation may both be stale by the time a candidate
//! is acted on, so every candidate is checked again against its current
//! details. No I/O happens here.

use crate::config::RunConfiguration;
use crate::types::{PrRef, PrState, PullRequestDetails, PullRequestRecord};

/// What to do with one candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeStep {
    /// Approve and merge this PR
    Merge {
        /// PR reference
        pr: PrRef,
        /// Current PR title (for display)
        title: String,
    },
    /// Leave this PR alone
    Skip {
        /// PR reference
        pr: PrRef,
        /// Reasons the PR no longer qualifies
        reasons: Vec<String>,
    },
}

impl std::fmt::Display for MergeStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Merge { pr, title } => write!(f, "merge {pr}: {title}"),
            Self::Skip { pr, reasons } => {
                write!(f, "skip {pr}")?;
                if !reasons.is_empty() {
                    write!(f, ": {}", reasons.join(", "))?;
                }
                Ok(())
            }
        }
    }
}

/// Decide whether a candidate may still be acted on (PURE).
///
/// The author login must equal the expected login and the title must contain
/// the configured substring, both case-insensitively. The PR must still be
/// open.
pub fn plan_merge_step(
    record: &PullRequestRecord,
    details: &PullRequestDetails,
    config: &RunConfiguration,
) -> MergeStep {
    let mut reasons = Vec::new();

    let expected = config.expected_login();
    if !details.author.eq_ignore_ascii_case(&expected) {
        reasons.push(format!(
            "author is '{}', expected '{expected}'",
            details.author
        ));
    }

    if !details
        .title
        .to_lowercase()
        .contains(&config.title.to_lowercase())
    {
        reasons.push(format!(
            "title '{}' does not contain '{}'",
            details.title, config.title
        ));
    }

    if details.state != PrState::Open {
        reasons.push(format!("PR is {}", details.state));
    }

    if reasons.is_empty() {
        MergeStep::Merge {
            pr: record.pr.clone(),
            title: details.title.clone(),
        }
    } else {
        MergeStep::Skip {
            pr: record.pr.clone(),
            reasons,
        }
    }
}
