//! Paginated search with deduplication

use crate::config::Pacing;
use crate::error::Result;
use crate::platform::PlatformService;
use crate::progress::ProgressCallback;
use crate::retry::with_retry;
use crate::types::PullRequestRecord;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Page through search results until the reported total is reached.
///
/// Results keep the host's order (creation time, oldest first). Items whose
/// id was already seen on an earlier page are dropped, so pagination drift
/// never yields duplicates. Paging stops after `pacing.max_pages` pages even
/// if the reported total was not reached.
pub async fn discover_candidates(
    platform: &dyn PlatformService,
    query: &str,
    pacing: &Pacing,
    progress: &dyn ProgressCallback,
) -> Result<Vec<PullRequestRecord>> {
    let policy = pacing.retry_policy();
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();
    let mut total_count = 0;

    debug!(query, "starting discovery");

    for page in 1..=pacing.max_pages {
        if page > 1 {
            tokio::time::sleep(pacing.page_delay).await;
        }

        let result = with_retry(policy, &format!("search page {page}"), || {
            platform.search_pull_requests(query, page, pacing.per_page)
        })
        .await?;

        total_count = result.total_count;
        let page_was_empty = result.items.is_empty();
        for item in result.items {
            if seen.insert(item.id) {
                candidates.push(item);
            }
        }

        progress
            .on_search_page(page, candidates.len(), total_count)
            .await;

        if candidates.len() as u64 >= total_count || page_was_empty {
            debug!(page, found = candidates.len(), total_count, "discovery complete");
            return Ok(candidates);
        }
    }

    warn!(
        max_pages = pacing.max_pages,
        found = candidates.len(),
        total_count,
        "page limit reached before reported total"
    );
    Ok(candidates)
}
