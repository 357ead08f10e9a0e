//! The bulk merge command: search, classify, confirm, apply

use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, check, spinner_style};
use crate::cli::{CliProgress, TerminalPrompt};
use anstream::println;
use bulk_merge::discover::{ClassifiedCandidate, discover_candidates, evaluate_candidates, ready_set};
use bulk_merge::error::Result;
use bulk_merge::merge::apply_merges;
use bulk_merge::query::build_search_query;
use bulk_merge::types::{CheckAggregateStatus, MergeOutcome};
use indicatif::ProgressBar;
use std::time::Duration;

/// Run the whole pipeline once
pub async fn run_bulk_merge(ctx: &CommandContext) -> Result<MergeOutcome> {
    // =========================================================================
    // Phase 1: DISCOVER
    // =========================================================================

    let query = build_search_query(&ctx.config);
    println!("{} {}", "Query:".emphasis(), query.muted());

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message("Searching...");
    spinner.enable_steady_tick(Duration::from_millis(80));

    let search_progress = CliProgress::with_spinner(spinner.clone());
    let candidates = match discover_candidates(
        ctx.platform.as_ref(),
        &query,
        &ctx.pacing,
        &search_progress,
    )
    .await
    {
        Ok(candidates) => candidates,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e);
        }
    };

    spinner.finish_with_message(format!(
        "{} Found {} candidate(s)",
        check(),
        candidates.len().accent()
    ));

    let total = candidates.len();
    if total == 0 {
        println!("{}", "Nothing to do.".muted());
        return Ok(MergeOutcome::nothing_done(0));
    }

    // =========================================================================
    // Phase 2: CLASSIFY
    // =========================================================================

    if ctx.config.ignore_checks {
        println!("{}", "Ignoring check runs; every candidate is ready.".warn());
    }

    let progress = CliProgress::compact();
    let classified = evaluate_candidates(
        ctx.platform.as_ref(),
        candidates,
        &ctx.config,
        &ctx.pacing,
        &progress,
    )
    .await?;
    let ready = ready_set(&classified);

    println!();
    print_readiness_summary(&classified, ready.len());

    if ctx.config.dry_run {
        println!("{}", "Dry run complete, nothing was approved or merged.".muted());
    } else if ready.is_empty() {
        println!("{}", "No PRs are ready to merge.".muted());
    }

    // =========================================================================
    // Phase 3: APPLY
    // =========================================================================

    let outcome = apply_merges(
        &ready,
        total,
        &ctx.config,
        ctx.platform.as_ref(),
        &TerminalPrompt,
        &ctx.pacing,
        &progress,
    )
    .await?;

    if !ctx.config.dry_run {
        print_outcome(&outcome);
    }
    Ok(outcome)
}

/// One line: how many are ready, and why the rest are not
fn print_readiness_summary(classified: &[ClassifiedCandidate], ready: usize) {
    let count = |status: CheckAggregateStatus| {
        classified
            .iter()
            .filter(|c| c.status == Some(status))
            .count()
    };

    println!(
        "{} {} of {} ready to merge {}",
        "Ready:".emphasis(),
        ready.success(),
        classified.len().accent(),
        format!(
            "(queued {}, in progress {}, missing {}, failed {})",
            count(CheckAggregateStatus::Queued),
            count(CheckAggregateStatus::InProgress),
            count(CheckAggregateStatus::Missing),
            count(CheckAggregateStatus::Failed),
        )
        .muted()
    );
}

fn print_outcome(outcome: &MergeOutcome) {
    println!();
    println!(
        "{} Done ({}/{})",
        check(),
        outcome.processed.accent(),
        outcome.total
    );
    if outcome.skipped > 0 {
        println!("   {} {}", "Skipped:".warn(), outcome.skipped);
    }
    if outcome.failed > 0 {
        println!("   {} {}", "Failed:".warn(), outcome.failed);
    }
}
