//! Authentication for GitHub
//!
//! Tokens come from the process environment, optionally seeded from a `.env`
//! file in the working directory.

mod github;

pub use github::{GitHubAuthConfig, TOKEN_VARS, get_github_auth, token_from_lookup};

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token from environment variable
    EnvVar,
    /// Token from a `.env` file
    DotEnv,
}
