//! Check-run status evaluation

use crate::config::{Pacing, RunConfiguration};
use crate::error::Result;
use crate::platform::PlatformService;
use crate::progress::ProgressCallback;
use crate::retry::{RetryPolicy, with_retry};
use crate::types::{CheckAggregateStatus, CheckRun, CheckRunStatus, PullRequestRecord};
use tracing::debug;

/// A candidate together with its classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedCandidate {
    /// The discovered PR
    pub record: PullRequestRecord,
    /// Aggregate status; `None` when checks were ignored
    pub status: Option<CheckAggregateStatus>,
    /// Whether the candidate goes into the ready set
    pub ready: bool,
}

/// Reduce a check-run list to one aggregate status (PURE).
///
/// First matching rule wins:
/// 1. no runs → `Missing`
/// 2. every conclusion is success/neutral/skipped → `Success`
/// 3. any run queued → `Queued`
/// 4. any run in progress → `InProgress`
/// 5. otherwise → `Failed`
pub fn aggregate_check_status(runs: &[CheckRun]) -> CheckAggregateStatus {
    if runs.is_empty() {
        return CheckAggregateStatus::Missing;
    }
    if runs
        .iter()
        .all(|r| r.conclusion.is_some_and(|c| c.is_passing()))
    {
        return CheckAggregateStatus::Success;
    }
    if runs.iter().any(|r| r.status == CheckRunStatus::Queued) {
        return CheckAggregateStatus::Queued;
    }
    if runs.iter().any(|r| r.status == CheckRunStatus::InProgress) {
        return CheckAggregateStatus::InProgress;
    }
    CheckAggregateStatus::Failed
}

/// Whether a candidate belongs in the ready set.
///
/// Ignoring checks admits everything not already successful, so together
/// with `Success` it admits every candidate.
pub fn is_ready(status: Option<CheckAggregateStatus>, ignore_checks: bool) -> bool {
    status == Some(CheckAggregateStatus::Success) || ignore_checks
}

/// Fetch the head commit and its check runs, then classify.
///
/// Each network step is retried; exhaustion propagates so a failed fetch
/// can never make a PR look eligible.
pub async fn evaluate_status(
    platform: &dyn PlatformService,
    record: &PullRequestRecord,
    policy: RetryPolicy,
) -> Result<CheckAggregateStatus> {
    let pr = &record.pr;

    let details = with_retry(policy, &format!("fetch details for {pr}"), || {
        platform.get_pr_details(pr)
    })
    .await?;

    let runs = with_retry(policy, &format!("fetch check runs for {pr}"), || {
        platform.list_check_runs(pr, &details.head_sha)
    })
    .await?;

    let status = aggregate_check_status(&runs);
    debug!(%pr, runs = runs.len(), %status, "classified");
    Ok(status)
}

/// Classify every candidate, in order.
///
/// With `ignore_checks` set no check runs are fetched at all.
pub async fn evaluate_candidates(
    platform: &dyn PlatformService,
    candidates: Vec<PullRequestRecord>,
    config: &RunConfiguration,
    pacing: &Pacing,
    progress: &dyn ProgressCallback,
) -> Result<Vec<ClassifiedCandidate>> {
    let policy = pacing.retry_policy();
    let mut classified = Vec::with_capacity(candidates.len());

    for record in candidates {
        let status = if config.ignore_checks {
            None
        } else {
            Some(evaluate_status(platform, &record, policy).await?)
        };

        progress.on_classified(&record, status).await;

        classified.push(ClassifiedCandidate {
            ready: is_ready(status, config.ignore_checks),
            record,
            status,
        });
    }

    Ok(classified)
}

/// Ready candidates, in discovery order
pub fn ready_set(classified: &[ClassifiedCandidate]) -> Vec<PullRequestRecord> {
    classified
        .iter()
        .filter(|c| c.ready)
        .map(|c| c.record.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CheckConclusion;

    fn run(status: CheckRunStatus, conclusion: Option<CheckConclusion>) -> CheckRun {
        CheckRun {
            name: "ci".to_string(),
            status,
            conclusion,
        }
    }

    fn completed(conclusion: CheckConclusion) -> CheckRun {
        run(CheckRunStatus::Completed, Some(conclusion))
    }

    #[test]
    fn test_no_runs_is_missing() {
        assert_eq!(aggregate_check_status(&[]), CheckAggregateStatus::Missing);
    }

    #[test]
    fn test_all_passing_conclusions_is_success() {
        let runs = [
            completed(CheckConclusion::Skipped),
            completed(CheckConclusion::Success),
            completed(CheckConclusion::Neutral),
        ];
        assert_eq!(aggregate_check_status(&runs), CheckAggregateStatus::Success);

        let mut reversed = runs.to_vec();
        reversed.reverse();
        assert_eq!(
            aggregate_check_status(&reversed),
            CheckAggregateStatus::Success
        );
    }

    #[test]
    fn test_queued_beats_in_progress() {
        let runs = [
            run(CheckRunStatus::InProgress, None),
            completed(CheckConclusion::Failure),
            run(CheckRunStatus::Queued, None),
        ];
        assert_eq!(aggregate_check_status(&runs), CheckAggregateStatus::Queued);
    }

    #[test]
    fn test_in_progress_beats_failed() {
        let runs = [
            completed(CheckConclusion::Failure),
            run(CheckRunStatus::InProgress, None),
        ];
        assert_eq!(
            aggregate_check_status(&runs),
            CheckAggregateStatus::InProgress
        );
    }

    #[test]
    fn test_failure_is_failed() {
        let runs = [
            completed(CheckConclusion::Success),
            completed(CheckConclusion::TimedOut),
        ];
        assert_eq!(aggregate_check_status(&runs), CheckAggregateStatus::Failed);
    }

    #[test]
    fn test_completed_without_conclusion_is_failed() {
        let runs = [run(CheckRunStatus::Completed, None)];
        assert_eq!(aggregate_check_status(&runs), CheckAggregateStatus::Failed);
    }

    #[test]
    fn test_unknown_status_falls_back_to_failed() {
        let runs = [run(CheckRunStatus::Other, None)];
        assert_eq!(aggregate_check_status(&runs), CheckAggregateStatus::Failed);
    }

    #[test]
    fn test_is_ready() {
        assert!(is_ready(Some(CheckAggregateStatus::Success), false));
        assert!(!is_ready(Some(CheckAggregateStatus::Queued), false));
        assert!(!is_ready(Some(CheckAggregateStatus::Missing), false));
        assert!(is_ready(Some(CheckAggregateStatus::Failed), true));
        assert!(is_ready(None, true));
    }
}
