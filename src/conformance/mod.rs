//! Verification engine: checking submissions and diagnosing disagreements.
//!
//! # Flow
//!
//! For each registered problem the [`Checker`] pulls cases one at a time,
//! invokes the submission, canonicalizes the result and then
//!
//! - compares it with the golden record entry for that case, if any, and
//! - folds it into the run's fingerprint.
//!
//! The first record mismatch or callable failure ends that function's run;
//! the batch always continues with the next function. When a function fails,
//! [`find_discrepancy`] runs the reference and the submission side by side to
//! find the most legible counterexample.

mod discrepancy;
mod harness;
mod ordering;
mod repro;
mod runner;

pub use discrepancy::{find_discrepancy, Discrepancy, Policy, SearchOutcome};
pub use harness::{BatchResult, GradingHarness, RecordingSummary, recording_banner};
pub use ordering::{sort_by_source, source_positions};
pub use repro::{display_args, RecordMismatch};
pub use runner::{Checker, FunctionReport, RecordedFunction, RunState, Verdict};
