//! Mock platform service for testing
//!
//! These are test utilities - not all may be used by every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use bulk_merge::error::{Error, Result};
use bulk_merge::platform::PlatformService;
use bulk_merge::types::{
    CheckConclusion, CheckRun, CheckRunStatus, MergeMethod, MergeResult, PrRef, PrState,
    PullRequestDetails, PullRequestRecord, SearchPage,
};
use std::collections::HashMap;
use std::sync::Mutex;

/// Call record for `merge_pr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePrCall {
    pub pr: PrRef,
    pub method: MergeMethod,
}

/// Simple mock platform service for testing
///
/// Features:
/// - Configurable search pages, details and check runs
/// - Call tracking, including the global order of approve/merge actions
/// - Error injection, either permanent or for the first N calls
#[derive(Default)]
pub struct MockPlatformService {
    search_pages: Mutex<HashMap<u32, SearchPage>>,
    details_responses: Mutex<HashMap<PrRef, PullRequestDetails>>,
    check_run_responses: Mutex<HashMap<String, Vec<CheckRun>>>,
    merge_responses: Mutex<HashMap<PrRef, MergeResult>>,
    // Call tracking
    search_calls: Mutex<Vec<u32>>,
    details_calls: Mutex<Vec<PrRef>>,
    check_run_calls: Mutex<Vec<String>>,
    approve_calls: Mutex<Vec<PrRef>>,
    merge_calls: Mutex<Vec<MergePrCall>>,
    actions: Mutex<Vec<String>>,
    // Error injection: remaining failures (u32::MAX = always)
    search_failures: Mutex<u32>,
    details_failures: Mutex<HashMap<PrRef, u32>>,
    check_run_failures: Mutex<HashMap<String, u32>>,
    approve_failures: Mutex<HashMap<PrRef, u32>>,
    merge_failures: Mutex<HashMap<PrRef, u32>>,
}

/// Build a PR reference in the `acme` organization
pub fn pr_ref(repo: &str, number: u64) -> PrRef {
    PrRef {
        owner: "acme".to_string(),
        repo: repo.to_string(),
        number,
    }
}

/// Build a search result record
pub fn make_record(id: u64, repo: &str, number: u64, title: &str, author: &str) -> PullRequestRecord {
    PullRequestRecord {
        id,
        pr: pr_ref(repo, number),
        title: title.to_string(),
        author: author.to_string(),
        html_url: format!("https://github.com/acme/{repo}/pull/{number}"),
        created_at: None,
    }
}

/// A completed check run with the given conclusion
pub fn completed(name: &str, conclusion: CheckConclusion) -> CheckRun {
    CheckRun {
        name: name.to_string(),
        status: CheckRunStatus::Completed,
        conclusion: Some(conclusion),
    }
}

/// A check run that has not finished
pub fn pending(name: &str, status: CheckRunStatus) -> CheckRun {
    CheckRun {
        name: name.to_string(),
        status,
        conclusion: None,
    }
}

fn take_failure<K: std::hash::Hash + Eq>(map: &Mutex<HashMap<K, u32>>, key: &K) -> bool {
    let mut map = map.lock().unwrap();
    match map.get_mut(key) {
        Some(remaining) if *remaining > 0 => {
            if *remaining != u32::MAX {
                *remaining -= 1;
            }
            true
        }
        _ => false,
    }
}

impl MockPlatformService {
    pub fn new() -> Self {
        Self::default()
    }

    // === Response setup ===

    /// Set the response for a search page (1-based)
    pub fn set_search_page(&self, page: u32, total_count: u64, items: Vec<PullRequestRecord>) {
        self.search_pages
            .lock()
            .unwrap()
            .insert(page, SearchPage { total_count, items });
    }

    /// Set the current details for a PR
    pub fn set_details(&self, details_for: &PrRef, details: PullRequestDetails) {
        self.details_responses
            .lock()
            .unwrap()
            .insert(details_for.clone(), details);
    }

    /// Set the check runs for a head commit
    pub fn set_check_runs(&self, head_sha: &str, runs: Vec<CheckRun>) {
        self.check_run_responses
            .lock()
            .unwrap()
            .insert(head_sha.to_string(), runs);
    }

    /// Set the response for `merge_pr`
    pub fn set_merge_response(&self, pr: &PrRef, result: MergeResult) {
        self.merge_responses
            .lock()
            .unwrap()
            .insert(pr.clone(), result);
    }

    /// Helper: register an open PR with details and check runs
    ///
    /// The head sha is derived from the repo and number.
    pub fn setup_pr(&self, record: &PullRequestRecord, runs: Vec<CheckRun>) {
        let head_sha = format!("sha-{}-{}", record.pr.repo, record.pr.number);
        self.set_details(
            &record.pr,
            PullRequestDetails {
                title: record.title.clone(),
                author: record.author.clone(),
                state: PrState::Open,
                head_sha: head_sha.clone(),
            },
        );
        self.set_check_runs(&head_sha, runs);
    }

    /// Helper: change what the host reports for a PR after discovery
    pub fn update_details(&self, pr: &PrRef, title: &str, author: &str, state: PrState) {
        let mut responses = self.details_responses.lock().unwrap();
        if let Some(details) = responses.get_mut(pr) {
            details.title = title.to_string();
            details.author = author.to_string();
            details.state = state;
        }
    }

    // === Error injection ===

    /// Fail the next `times` search calls
    pub fn fail_search(&self, times: u32) {
        *self.search_failures.lock().unwrap() = times;
    }

    /// Fail `get_pr_details` for a PR `times` times
    pub fn fail_details(&self, pr: &PrRef, times: u32) {
        self.details_failures
            .lock()
            .unwrap()
            .insert(pr.clone(), times);
    }

    /// Fail `list_check_runs` for a head sha `times` times
    pub fn fail_check_runs(&self, head_sha: &str, times: u32) {
        self.check_run_failures
            .lock()
            .unwrap()
            .insert(head_sha.to_string(), times);
    }

    /// Fail `approve_pr` for a PR `times` times
    pub fn fail_approve(&self, pr: &PrRef, times: u32) {
        self.approve_failures
            .lock()
            .unwrap()
            .insert(pr.clone(), times);
    }

    /// Fail `merge_pr` for a PR `times` times
    pub fn fail_merge(&self, pr: &PrRef, times: u32) {
        self.merge_failures.lock().unwrap().insert(pr.clone(), times);
    }

    // === Call verification ===

    pub fn search_calls(&self) -> Vec<u32> {
        self.search_calls.lock().unwrap().clone()
    }

    pub fn details_calls(&self) -> Vec<PrRef> {
        self.details_calls.lock().unwrap().clone()
    }

    pub fn check_run_calls(&self) -> Vec<String> {
        self.check_run_calls.lock().unwrap().clone()
    }

    pub fn approve_calls(&self) -> Vec<PrRef> {
        self.approve_calls.lock().unwrap().clone()
    }

    pub fn merge_calls(&self) -> Vec<MergePrCall> {
        self.merge_calls.lock().unwrap().clone()
    }

    /// Approve and merge calls in the order they happened, e.g. `approve acme/web#1`
    pub fn actions(&self) -> Vec<String> {
        self.actions.lock().unwrap().clone()
    }

    /// Assert that a PR was neither approved nor merged
    pub fn assert_untouched(&self, pr: &PrRef) {
        let approves = self.approve_calls();
        let merges = self.merge_calls();
        assert!(
            !approves.contains(pr) && !merges.iter().any(|c| &c.pr == pr),
            "Expected {pr} untouched but got approves {approves:?}, merges {merges:?}"
        );
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn search_pull_requests(
        &self,
        _query: &str,
        page: u32,
        _per_page: u8,
    ) -> Result<SearchPage> {
        self.search_calls.lock().unwrap().push(page);

        {
            let mut failures = self.search_failures.lock().unwrap();
            if *failures > 0 {
                if *failures != u32::MAX {
                    *failures -= 1;
                }
                return Err(Error::Platform("search unavailable".to_string()));
            }
        }

        let pages = self.search_pages.lock().unwrap();
        Ok(pages.get(&page).cloned().unwrap_or_else(|| {
            // Past the configured pages: empty, same total as page 1
            SearchPage {
                total_count: pages.get(&1).map_or(0, |p| p.total_count),
                items: vec![],
            }
        }))
    }

    async fn get_pr_details(&self, pr: &PrRef) -> Result<PullRequestDetails> {
        self.details_calls.lock().unwrap().push(pr.clone());

        if take_failure(&self.details_failures, pr) {
            return Err(Error::Platform(format!("details unavailable for {pr}")));
        }

        self.details_responses
            .lock()
            .unwrap()
            .get(pr)
            .cloned()
            .ok_or_else(|| Error::Platform(format!("get_pr_details: no response for {pr}")))
    }

    async fn list_check_runs(&self, _pr: &PrRef, head_sha: &str) -> Result<Vec<CheckRun>> {
        self.check_run_calls
            .lock()
            .unwrap()
            .push(head_sha.to_string());

        if take_failure(&self.check_run_failures, &head_sha.to_string()) {
            return Err(Error::Platform(format!("check runs unavailable for {head_sha}")));
        }

        Ok(self
            .check_run_responses
            .lock()
            .unwrap()
            .get(head_sha)
            .cloned()
            .unwrap_or_default())
    }

    async fn approve_pr(&self, pr: &PrRef) -> Result<()> {
        self.approve_calls.lock().unwrap().push(pr.clone());
        self.actions.lock().unwrap().push(format!("approve {pr}"));

        if take_failure(&self.approve_failures, pr) {
            return Err(Error::Platform(format!("approve rejected for {pr}")));
        }
        Ok(())
    }

    async fn merge_pr(&self, pr: &PrRef, method: MergeMethod) -> Result<MergeResult> {
        self.merge_calls.lock().unwrap().push(MergePrCall {
            pr: pr.clone(),
            method,
        });
        self.actions.lock().unwrap().push(format!("merge {pr}"));

        if take_failure(&self.merge_failures, pr) {
            return Err(Error::Platform(format!("merge rejected for {pr}")));
        }

        Ok(self
            .merge_responses
            .lock()
            .unwrap()
            .get(pr)
            .cloned()
            .unwrap_or_else(|| MergeResult {
                merged: true,
                sha: Some(format!("merged-{}", pr.number)),
                message: None,
            }))
    }
}
