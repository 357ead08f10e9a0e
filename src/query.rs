//! Search query construction
//!
//! Pure: turns a `RunConfiguration` into a single GitHub search expression.

use crate::config::RunConfiguration;

/// Qualifiers every query carries
const BASE_QUALIFIERS: &[&str] = &[
    "is:open",
    "is:pr",
    "archived:false",
    "draft:false",
    "comments:0",
];

/// Build the search expression for a run.
///
/// An explicit repository list replaces organization-wide scope.
pub fn build_search_query(config: &RunConfiguration) -> String {
    let mut terms: Vec<String> = BASE_QUALIFIERS.iter().map(ToString::to_string).collect();

    terms.push(format!("author:{}", config.search_author()));
    // Quoted so multi-word titles match as a phrase; search has no quote escaping
    terms.push(format!("in:title \"{}\"", config.title.replace('"', "")));
    terms.push(scope_term(config));

    terms.join(" ")
}

fn scope_term(config: &RunConfiguration) -> String {
    if config.repos.is_empty() {
        config
            .orgs
            .iter()
            .map(|org| format!("org:{org}"))
            .collect::<Vec<_>>()
            .join(" OR ")
    } else {
        config
            .repos
            .iter()
            .map(|repo| format!("repo:{repo}"))
            .collect::<Vec<_>>()
            // GitHub unions repeated repo: qualifiers, so a plain space selects any of them
            .join(" ")
    }
}
