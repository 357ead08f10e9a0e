//! bulk-merge - bulk approve and squash-merge pull requests
//!
//! The workflow is a single linear pipeline:
//! 1. [`query`] builds the search filter from the run configuration
//! 2. [`discover`] pages through search results and classifies each
//!    candidate by its check runs
//! 3. [`merge`] gates on operator confirmation, re-validates each candidate
//!    and approves + merges it
//!
//! All host access goes through the [`platform::PlatformService`] trait.

pub mod auth;
pub mod config;
pub mod discover;
pub mod error;
pub mod merge;
pub mod platform;
pub mod progress;
pub mod query;
pub mod retry;
pub mod types;

pub use config::{Pacing, RunConfiguration};
pub use error::{Error, Result};
