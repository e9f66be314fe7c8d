//! Workflow entry points used by the binary

pub mod orchestration;

pub use orchestration::{revert, run_release, Outcome, RunOptions};
