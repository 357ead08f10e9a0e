//! Shared test fixtures

#![allow(dead_code, unused_imports)]

mod mock_platform;
mod scripted_prompt;

pub use mock_platform::{
    MergePrCall, MockPlatformService, completed, make_record, pending, pr_ref,
};
pub use scripted_prompt::ScriptedPrompt;

use bulk_merge::RunConfiguration;

/// Run configuration for the `acme` organization
pub fn acme_config(title: &str, author: &str, ignore_checks: bool) -> RunConfiguration {
    RunConfiguration::new(vec!["acme".to_string()], vec![], title, author, ignore_checks)
        .expect("valid test configuration")
}
