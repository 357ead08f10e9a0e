//! Core types for bulk-merge

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Repository-qualified pull request reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrRef {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// PR number
    pub number: u64,
}

impl std::fmt::Display for PrRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

/// A pull request discovered by search
///
/// Created during discovery and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestRecord {
    /// Stable numeric id, unique within a run's result set
    pub id: u64,
    /// Owner, repository and number
    pub pr: PrRef,
    /// PR title
    pub title: String,
    /// Author login
    pub author: String,
    /// Web URL for the PR
    pub html_url: String,
    /// When the PR was opened
    pub created_at: Option<DateTime<Utc>>,
}

/// One page of search results
#[derive(Debug, Clone, Default)]
pub struct SearchPage {
    /// Total number of matches reported by the host
    pub total_count: u64,
    /// Items on this page
    pub items: Vec<PullRequestRecord>,
}

/// PR state (open, closed, merged)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrState {
    /// PR is open and can be merged
    Open,
    /// PR was closed without merging
    Closed,
    /// PR was merged
    Merged,
}

impl std::fmt::Display for PrState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
            Self::Merged => write!(f, "merged"),
        }
    }
}

/// Current PR details, fetched individually
///
/// Search results do not carry the head commit, so this is fetched per
/// candidate before evaluating checks and again before acting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestDetails {
    /// PR title
    pub title: String,
    /// Author login
    pub author: String,
    /// Current state of the PR
    pub state: PrState,
    /// SHA of the head commit
    pub head_sha: String,
}

/// Lifecycle status of a single check run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckRunStatus {
    /// Waiting to start
    Queued,
    /// Currently running
    InProgress,
    /// Finished; see the conclusion
    Completed,
    /// Any status this tool does not know about
    #[serde(other)]
    Other,
}

/// Final outcome of a completed check run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckConclusion {
    /// Passed
    Success,
    /// Finished without pass/fail verdict
    Neutral,
    /// Not run
    Skipped,
    /// Failed
    Failure,
    /// Cancelled before completion
    Cancelled,
    /// Exceeded its time limit
    TimedOut,
    /// Needs manual action
    ActionRequired,
    /// Superseded
    Stale,
    /// Any conclusion this tool does not know about
    #[serde(other)]
    Other,
}

impl CheckConclusion {
    /// Whether this conclusion counts as passing
    pub const fn is_passing(self) -> bool {
        matches!(self, Self::Success | Self::Neutral | Self::Skipped)
    }
}

/// A check run reported against a commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRun {
    /// Check name
    pub name: String,
    /// Lifecycle status
    pub status: CheckRunStatus,
    /// Conclusion, present once completed
    pub conclusion: Option<CheckConclusion>,
}

/// Aggregate readiness of a candidate, reduced from its check runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckAggregateStatus {
    /// Every check run passed
    Success,
    /// At least one check run is queued
    Queued,
    /// At least one check run is running
    InProgress,
    /// No check runs reported
    Missing,
    /// Anything else
    Failed,
}

impl std::fmt::Display for CheckAggregateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Queued => write!(f, "queued"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Missing => write!(f, "missing"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Result of a merge operation
#[derive(Debug, Clone)]
pub struct MergeResult {
    /// Whether the merge was successful
    pub merged: bool,
    /// The SHA of the merge commit (if successful)
    pub sha: Option<String>,
    /// Message from the merge operation (especially on failure)
    pub message: Option<String>,
}

/// Merge strategy/method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMethod {
    /// Squash all commits into one
    Squash,
    /// Create a merge commit
    Merge,
    /// Rebase commits onto base branch
    Rebase,
}

impl std::fmt::Display for MergeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Squash => write!(f, "squash"),
            Self::Merge => write!(f, "merge"),
            Self::Rebase => write!(f, "rebase"),
        }
    }
}

/// Final tally of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeOutcome {
    /// Candidates approved and merged
    pub processed: usize,
    /// Candidates discovered
    pub total: usize,
    /// Candidates skipped by apply-time re-validation
    pub skipped: usize,
    /// Candidates whose merge failed
    pub failed: usize,
}

impl MergeOutcome {
    /// Outcome of a run that acted on nothing
    pub const fn nothing_done(total: usize) -> Self {
        Self {
            processed: 0,
            total,
            skipped: 0,
            failed: 0,
        }
    }
}
