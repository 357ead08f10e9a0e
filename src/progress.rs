//! Progress reporting for the workflow
//!
//! The library reports what it is doing through [`ProgressCallback`]; the CLI
//! decides how to render it. Reporting never affects control flow.

use crate::types::{CheckAggregateStatus, PullRequestRecord};
use async_trait::async_trait;

/// Receives progress events during discovery and the apply phase
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// A search page was fetched
    async fn on_search_page(&self, _page: u32, _found: usize, _total: u64) {}

    /// A candidate was classified.
    ///
    /// `status` is `None` when check evaluation was skipped.
    async fn on_classified(&self, record: &PullRequestRecord, status: Option<CheckAggregateStatus>);

    /// Free-form progress message
    async fn on_message(&self, message: &str);
}

/// Progress callback that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_classified(
        &self,
        _record: &PullRequestRecord,
        _status: Option<CheckAggregateStatus>,
    ) {
    }

    async fn on_message(&self, _message: &str) {}
}
