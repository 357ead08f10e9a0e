//! Merge execution - effectful operations
//!
//! Candidates are handled strictly one after another: fetch fresh details,
//! re-validate, approve, merge. Nothing runs concurrently.

use crate::config::{Pacing, RunConfiguration};
use crate::error::Result;
use crate::merge::confirm::{ConfirmationPrompt, confirm_ready_set};
use crate::merge::plan::{MergeStep, plan_merge_step};
use crate::platform::PlatformService;
use crate::progress::ProgressCallback;
use crate::retry::with_retry;
use crate::types::{MergeOutcome, PullRequestRecord};
use tracing::{info, warn};

/// Confirm, then approve and merge every ready candidate (EFFECTFUL).
///
/// * A dry run or an empty ready set returns immediately without prompting.
/// * Declined or invalid confirmation returns an error before any action.
/// * Re-validation failures are skipped and reported.
/// * Approve failure after retries aborts the run.
/// * Merge failure after retries is reported and the run continues.
///
/// `total` is the number of discovered candidates, carried into the outcome.
pub async fn apply_merges(
    ready: &[PullRequestRecord],
    total: usize,
    config: &RunConfiguration,
    platform: &dyn PlatformService,
    prompt: &dyn ConfirmationPrompt,
    pacing: &Pacing,
    progress: &dyn ProgressCallback,
) -> Result<MergeOutcome> {
    let mut outcome = MergeOutcome::nothing_done(total);
    if config.dry_run {
        info!(ready = ready.len(), "dry run, nothing applied");
        return Ok(outcome);
    }
    if ready.is_empty() {
        return Ok(outcome);
    }

    confirm_ready_set(prompt, ready.len())?;

    let policy = pacing.retry_policy();
    let count = ready.len();

    for (index, record) in ready.iter().enumerate() {
        let pr = &record.pr;
        tokio::time::sleep(pacing.action_delay).await;

        let details = with_retry(policy, &format!("fetch details for {pr}"), || {
            platform.get_pr_details(pr)
        })
        .await?;

        let title = match plan_merge_step(record, &details, config) {
            MergeStep::Merge { title, .. } => title,
            step @ MergeStep::Skip { .. } => {
                warn!(%pr, "re-validation failed");
                progress.on_message(&format!("⏭️  {step}")).await;
                outcome.skipped += 1;
                continue;
            }
        };

        progress
            .on_message(&format!(
                "🔀 [{}/{count}] Approving and merging {pr}: {title}",
                index + 1
            ))
            .await;

        with_retry(policy, &format!("approve {pr}"), || platform.approve_pr(pr)).await?;

        let merged = with_retry(policy, &format!("merge {pr}"), || {
            platform.merge_pr(pr, config.merge_method)
        })
        .await;

        match merged {
            Ok(result) if result.merged => {
                let sha_display = result.sha.as_deref().unwrap_or("(no sha)");
                info!(%pr, sha = sha_display, "merged");
                progress
                    .on_message(&format!("✅ Merged {pr}: {sha_display}"))
                    .await;
                outcome.processed += 1;
            }
            Ok(result) => {
                // Merge API returned but didn't merge
                let message = result.message.unwrap_or_else(|| "not merged".to_string());
                warn!(%pr, %message, "merge refused");
                progress
                    .on_message(&format!("❌ Merge of {pr} failed: {message}"))
                    .await;
                outcome.failed += 1;
            }
            Err(e) => {
                warn!(%pr, error = %e, "merge failed");
                progress
                    .on_message(&format!("❌ Merge of {pr} failed: {e}"))
                    .await;
                outcome.failed += 1;
            }
        }
    }

    Ok(outcome)
}
