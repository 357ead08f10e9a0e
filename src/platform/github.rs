//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{
    CheckRun, MergeMethod, MergeResult, PrRef, PrState, PullRequestDetails, PullRequestRecord,
    SearchPage,
};
use async_trait::async_trait;
use octocrab::Octocrab;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

const GITHUB_API: &str = "https://api.github.com";
const CHECK_RUNS_PER_PAGE: u32 = 100;

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
    /// Token for raw HTTP requests (check runs)
    token: String,
    /// HTTP client for raw requests (check runs)
    http_client: Client,
    /// API base URL for raw requests, without trailing slash
    api_base: String,
}

impl GitHubService {
    /// Create a new GitHub service
    ///
    /// `host` selects a GitHub Enterprise instance; `None` means github.com.
    pub fn new(token: &str, host: Option<&str>) -> Result<Self> {
        let api_base = host.map_or_else(
            || GITHUB_API.to_string(),
            |h| format!("https://{h}/api/v3"),
        );
        Self::with_api_base(token, &api_base)
    }

    /// Create a service against an explicit API base URL
    pub fn with_api_base(token: &str, api_base: &str) -> Result<Self> {
        let api_base = api_base.trim_end_matches('/').to_string();

        let mut builder = Octocrab::builder().personal_token(token.to_string());
        if api_base != GITHUB_API {
            builder = builder
                .base_uri(api_base.as_str())
                .map_err(|e| Error::GitHubApi(e.to_string()))?;
        }
        let client = builder
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        let http_client = Client::builder()
            .user_agent(concat!("bulk-merge/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::GitHubApi(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            token: token.to_string(),
            http_client,
            api_base,
        })
    }

    async fn fetch_check_runs_page(
        &self,
        pr: &PrRef,
        head_sha: &str,
        page: u32,
    ) -> Result<CheckRunsResponse> {
        let url = format!(
            "{}/repos/{}/{}/commits/{}/check-runs",
            self.api_base, pr.owner, pr.repo, head_sha
        );

        let response = self
            .http_client
            .get(&url)
            .query(&[("per_page", CHECK_RUNS_PER_PAGE), ("page", page)])
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to fetch check runs: {e}")))?;

        // Unlike a missing check list, an error response must never look like "no checks"
        if !response.status().is_success() {
            return Err(Error::GitHubApi(format!(
                "Check runs for {pr} returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse check runs: {e}")))
    }
}

#[derive(Deserialize)]
struct CheckRunsResponse {
    total_count: u64,
    check_runs: Vec<CheckRun>,
}

/// Extract owner and repository from an API repository URL
///
/// Handles both `https://api.github.com/repos/{owner}/{repo}` and the
/// enterprise form `https://{host}/api/v3/repos/{owner}/{repo}`.
pub(crate) fn repo_from_api_url(url: &Url) -> Option<(String, String)> {
    let segments: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();
    let pos = segments.iter().rposition(|s| *s == "repos")?;
    match segments.get(pos + 1..pos + 3) {
        Some([owner, repo]) => Some(((*owner).to_string(), (*repo).to_string())),
        _ => None,
    }
}

/// Convert a search hit into a `PullRequestRecord`
fn record_from_issue(issue: &octocrab::models::issues::Issue) -> Result<PullRequestRecord> {
    let (owner, repo) = repo_from_api_url(&issue.repository_url).ok_or_else(|| {
        Error::GitHubApi(format!(
            "Unrecognized repository URL in search result: {}",
            issue.repository_url
        ))
    })?;

    Ok(PullRequestRecord {
        id: issue.id.0,
        pr: PrRef {
            owner,
            repo,
            number: issue.number,
        },
        title: issue.title.clone(),
        author: issue.user.login.clone(),
        html_url: issue.html_url.to_string(),
        created_at: Some(issue.created_at),
    })
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn search_pull_requests(
        &self,
        query: &str,
        page: u32,
        per_page: u8,
    ) -> Result<SearchPage> {
        debug!(page, per_page, "searching pull requests");

        let results = self
            .client
            .search()
            .issues_and_pull_requests(query)
            .sort("created")
            .order("asc")
            .per_page(per_page)
            .page(page)
            .send()
            .await?;

        let items = results
            .items
            .iter()
            .map(record_from_issue)
            .collect::<Result<Vec<_>>>()?;

        let total_count = results.total_count.unwrap_or(0);
        debug!(page, count = items.len(), total_count, "search page fetched");
        Ok(SearchPage { total_count, items })
    }

    async fn get_pr_details(&self, pr: &PrRef) -> Result<PullRequestDetails> {
        debug!(%pr, "getting PR details");

        let details = self
            .client
            .pulls(&pr.owner, &pr.repo)
            .get(pr.number)
            .await?;

        let state = match details.state {
            Some(octocrab::models::IssueState::Open) => PrState::Open,
            Some(octocrab::models::IssueState::Closed) if details.merged_at.is_some() => {
                PrState::Merged
            }
            // IssueState is non-exhaustive, so use wildcard for Closed and any future variants
            Some(_) | None => PrState::Closed,
        };

        let result = PullRequestDetails {
            title: details.title.clone().unwrap_or_default(),
            author: details
                .user
                .as_ref()
                .map(|u| u.login.clone())
                .unwrap_or_default(),
            state,
            head_sha: details.head.sha.clone(),
        };

        debug!(%pr, state = %result.state, head_sha = %result.head_sha, "got PR details");
        Ok(result)
    }

    async fn list_check_runs(&self, pr: &PrRef, head_sha: &str) -> Result<Vec<CheckRun>> {
        debug!(%pr, head_sha, "listing check runs");

        let mut runs = Vec::new();
        let mut page = 1;
        loop {
            let response = self.fetch_check_runs_page(pr, head_sha, page).await?;
            let page_was_empty = response.check_runs.is_empty();
            runs.extend(response.check_runs);

            if page_was_empty || runs.len() as u64 >= response.total_count {
                break;
            }
            page += 1;
        }

        debug!(%pr, count = runs.len(), "listed check runs");
        Ok(runs)
    }

    async fn approve_pr(&self, pr: &PrRef) -> Result<()> {
        debug!(%pr, "approving PR");

        let route = format!("/repos/{}/{}/pulls/{}/reviews", pr.owner, pr.repo, pr.number);
        let _: serde_json::Value = self
            .client
            .post(route, Some(&serde_json::json!({ "event": "APPROVE" })))
            .await?;

        debug!(%pr, "approved PR");
        Ok(())
    }

    async fn merge_pr(&self, pr: &PrRef, method: MergeMethod) -> Result<MergeResult> {
        debug!(%pr, %method, "merging PR");

        let octocrab_method = match method {
            MergeMethod::Squash => octocrab::params::pulls::MergeMethod::Squash,
            MergeMethod::Merge => octocrab::params::pulls::MergeMethod::Merge,
            MergeMethod::Rebase => octocrab::params::pulls::MergeMethod::Rebase,
        };

        let result = self
            .client
            .pulls(&pr.owner, &pr.repo)
            .merge(pr.number)
            .method(octocrab_method)
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Merge failed: {e}")))?;

        let merge_result = MergeResult {
            merged: result.merged,
            sha: result.sha,
            message: result.message,
        };

        debug!(
            %pr,
            merged = merge_result.merged,
            sha = ?merge_result.sha,
            "merge complete"
        );
        Ok(merge_result)
    }
}
