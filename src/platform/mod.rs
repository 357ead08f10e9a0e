//! Host platform service
//!
//! The workflow only depends on the five operations of [`PlatformService`].
//! Retrying transient failures is the caller's job, not the service's.

mod github;

pub use github::GitHubService;

use crate::error::Result;
use crate::types::{CheckRun, MergeMethod, MergeResult, PrRef, PullRequestDetails, SearchPage};
use async_trait::async_trait;

/// Platform service trait for PR operations
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Run an issue/PR search and return one page of results
    ///
    /// Results are ordered by creation time, oldest first. `page` is 1-based.
    async fn search_pull_requests(&self, query: &str, page: u32, per_page: u8)
    -> Result<SearchPage>;

    /// Get current PR details, including the head commit
    async fn get_pr_details(&self, pr: &PrRef) -> Result<PullRequestDetails>;

    /// List check runs reported against a commit
    async fn list_check_runs(&self, pr: &PrRef, head_sha: &str) -> Result<Vec<CheckRun>>;

    /// Submit an approving review
    async fn approve_pr(&self, pr: &PrRef) -> Result<()>;

    /// Merge a PR with the specified method
    async fn merge_pr(&self, pr: &PrRef, method: MergeMethod) -> Result<MergeResult>;
}
