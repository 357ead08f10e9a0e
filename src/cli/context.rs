//! Shared command context
//!
//! Resolves credentials and builds the platform service once, before any
//! workflow step runs.

use bulk_merge::auth::get_github_auth;
use bulk_merge::error::Result;
use bulk_merge::platform::{GitHubService, PlatformService};
use bulk_merge::{Pacing, RunConfiguration};
use tracing::debug;

/// Everything a run needs, resolved up front
pub struct CommandContext {
    /// Immutable run configuration
    pub config: RunConfiguration,
    /// Platform service (GitHub)
    pub platform: Box<dyn PlatformService>,
    /// Delays and retry bounds
    pub pacing: Pacing,
}

impl CommandContext {
    /// Create a new command context
    ///
    /// - Resolve the GitHub token (environment, then `.env`)
    /// - Create the GitHub service for the given host
    pub fn new(config: RunConfiguration, host: Option<&str>) -> Result<Self> {
        let auth = get_github_auth()?;
        debug!(source = ?auth.source, host = host.unwrap_or("github.com"), "resolved credentials");

        let platform = GitHubService::new(&auth.token, host)?;

        Ok(Self {
            config,
            platform: Box::new(platform),
            pacing: Pacing::default(),
        })
    }
}
