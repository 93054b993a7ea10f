// src/pipeline/mod.rs
// =============================================================================
// This module ties the other modules together for a whole batch.
//
// Submodules:
// - batch: Runs rows through fetch -> extract -> document
// - report: Per-row outcomes and how they are printed
// =============================================================================

mod batch;
mod report;

pub use batch::run_batch;
pub use report::{absolute, count, print_results, print_summary};
