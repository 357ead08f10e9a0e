//! Merge orchestration
//!
//! Three steps per run:
//! 1. Confirm - one operator gate for the whole ready set
//! 2. Plan - re-validate each candidate against fresh details (pure)
//! 3. Execute - approve then merge, one candidate at a time (effectful)

mod confirm;
mod execute;
mod plan;

pub use confirm::{ConfirmationPrompt, confirm_ready_set, parse_confirmation, read_answer_line};
pub use execute::apply_merges;
pub use plan::{MergeStep, plan_merge_step};
