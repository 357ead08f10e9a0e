//! GitHub token lookup

use crate::auth::AuthSource;
use crate::error::{Error, Result};
use tracing::debug;

/// Environment variables checked for a token, in order
pub const TOKEN_VARS: &[&str] = &["GITHUB_TOKEN", "GH_TOKEN"];

/// Resolved GitHub credentials
#[derive(Debug, Clone)]
pub struct GitHubAuthConfig {
    /// Personal access or app token
    pub token: String,
    /// Where the token came from
    pub source: AuthSource,
}

/// Resolve the GitHub token from the environment.
///
/// A `.env` file is only consulted when no token variable is already set, and
/// never overrides existing variables.
pub fn get_github_auth() -> Result<GitHubAuthConfig> {
    if let Some(token) = token_from_lookup(|key| std::env::var(key).ok()) {
        debug!("using GitHub token from environment");
        return Ok(GitHubAuthConfig {
            token,
            source: AuthSource::EnvVar,
        });
    }

    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "loaded .env file"),
        Err(e) => debug!(error = %e, "no .env file loaded"),
    }

    token_from_lookup(|key| std::env::var(key).ok())
        .map(|token| GitHubAuthConfig {
            token,
            source: AuthSource::DotEnv,
        })
        .ok_or_else(|| {
            Error::Auth(format!(
                "no GitHub token found. Set {} (or {}) to a token with repo scope, \
                 e.g. `export GITHUB_TOKEN=$(gh auth token)`, or put it in a .env file",
                TOKEN_VARS[0], TOKEN_VARS[1]
            ))
        })
}

/// First non-empty token among [`TOKEN_VARS`] according to `lookup`
pub fn token_from_lookup<F>(lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    TOKEN_VARS
        .iter()
        .filter_map(|key| lookup(key))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}
