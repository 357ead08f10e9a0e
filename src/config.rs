//! Run configuration and pacing
//!
//! `RunConfiguration` is built once at the CLI boundary and never mutated.

use crate::error::{Error, Result};
use crate::retry::RetryPolicy;
use crate::types::MergeMethod;
use std::time::Duration;

/// Author shorthand for GitHub's dependency-update bot
pub const DEPENDABOT: &str = "dependabot";

/// Immutable snapshot of what a run should act on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfiguration {
    /// Organizations to search
    pub orgs: Vec<String>,
    /// Explicit `owner/repo` restriction; takes precedence over `orgs`
    pub repos: Vec<String>,
    /// Substring every candidate title must contain
    pub title: String,
    /// Author identity as given by the operator
    pub author: String,
    /// Treat every candidate as ready regardless of check runs
    pub ignore_checks: bool,
    /// Merge method for the apply phase
    pub merge_method: MergeMethod,
    /// Classify and report, but never prompt or act
    pub dry_run: bool,
}

impl RunConfiguration {
    /// Build and validate a configuration.
    ///
    /// Repository entries without an owner are qualified with the first
    /// organization.
    pub fn new(
        orgs: Vec<String>,
        repos: Vec<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        ignore_checks: bool,
    ) -> Result<Self> {
        let title = title.into();
        let author = author.into();

        let orgs: Vec<String> = orgs
            .into_iter()
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        let mut qualified = Vec::with_capacity(repos.len());
        for repo in repos.iter().map(|r| r.trim()).filter(|r| !r.is_empty()) {
            if repo.contains('/') {
                qualified.push(repo.to_string());
            } else {
                let owner = orgs.first().ok_or_else(|| {
                    Error::Usage(format!(
                        "repository '{repo}' has no owner and no organization was given"
                    ))
                })?;
                qualified.push(format!("{owner}/{repo}"));
            }
        }

        if orgs.is_empty() && qualified.is_empty() {
            return Err(Error::Usage(
                "at least one organization or repository is required".to_string(),
            ));
        }
        if title.trim().is_empty() {
            return Err(Error::Usage("title must not be empty".to_string()));
        }
        if author.trim().is_empty() {
            return Err(Error::Usage("author must not be empty".to_string()));
        }

        Ok(Self {
            orgs,
            repos: qualified,
            title,
            author: author.trim().to_string(),
            ignore_checks,
            merge_method: MergeMethod::Squash,
            dry_run: false,
        })
    }

    /// Use a different merge method
    #[must_use]
    pub const fn with_merge_method(mut self, method: MergeMethod) -> Self {
        self.merge_method = method;
        self
    }

    /// Stop after classification
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Author term for the search query.
    ///
    /// Bot accounts are searched as `app/<name>`.
    pub fn search_author(&self) -> String {
        if self.author.eq_ignore_ascii_case(DEPENDABOT) {
            return format!("app/{DEPENDABOT}");
        }
        match self.author.strip_suffix("[bot]") {
            Some(app) => format!("app/{app}"),
            None => self.author.clone(),
        }
    }

    /// Login the PR author must have at apply time
    pub fn expected_login(&self) -> String {
        if self.author.eq_ignore_ascii_case(DEPENDABOT) {
            format!("{DEPENDABOT}[bot]")
        } else {
            self.author.clone()
        }
    }
}

/// Fixed delays, retry bounds and page sizes for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Delay between consecutive search page requests
    pub page_delay: Duration,
    /// Delay before each candidate's approve + merge pair
    pub action_delay: Duration,
    /// Delay between retry attempts
    pub retry_backoff: Duration,
    /// Attempts per network operation, including the first
    pub attempts: u32,
    /// Search results per page
    pub per_page: u8,
    /// Upper bound on search pages fetched
    pub max_pages: u32,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            page_delay: Duration::from_secs(1),
            action_delay: Duration::from_secs(1),
            retry_backoff: Duration::from_secs(2),
            attempts: 3,
            per_page: 100,
            // search never returns more than 1000 results
            max_pages: 10,
        }
    }
}

impl Pacing {
    /// Default bounds with every delay set to zero
    pub fn immediate() -> Self {
        Self {
            page_delay: Duration::ZERO,
            action_delay: Duration::ZERO,
            retry_backoff: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Retry policy for network operations
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.attempts, self.retry_backoff)
    }
}
