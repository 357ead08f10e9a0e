//! Candidate discovery and check evaluation
//!
//! Two steps, both effectful but bounded:
//! 1. Search - page through results, deduplicating by id
//! 2. Status - classify each candidate from its head commit's check runs

mod search;
mod status;

pub use search::discover_candidates;
pub use status::{
    ClassifiedCandidate, aggregate_check_status, evaluate_candidates, evaluate_status, is_ready,
    ready_set,
};
