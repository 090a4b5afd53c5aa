//! Grade Oracle - deterministic grading of function implementations.
//!
//! Runs a submission's functions over seeded case sequences, reduces each
//! result to a canonical text and judges the run two ways: against a gzip
//! golden record of per-case entries, and by a SHA-256 fingerprint of the
//! whole run. When a function fails, a side-by-side search against the
//! reference finds the shortest disagreeing case.
//!
//! # Architecture
//!
//! - [`value`] - result values and their canonical text
//! - [`fingerprint`] - streaming SHA-256 over canonical texts
//! - [`record`] - golden record file format, reader and atomic writer
//! - [`generator`] - seeded random stream and restartable case sequences
//! - [`registry`] - problems, submissions and the callable contract
//! - [`conformance`] - checker, batch harness and discrepancy search
//! - [`problems`] - built-in problem catalog and demo submissions
//! - [`config`] / [`error`] - run configuration and engine errors
//!
//! # Determinism
//!
//! For a fixed seed every case sequence, canonical text and fingerprint is
//! the same on every platform. Nothing here reads the clock except to report
//! elapsed time.

// Grading must report failures as verdicts, never abort.
// Tests are checked separately with `cargo test`.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod config;
pub mod conformance;
pub mod error;
pub mod fingerprint;
pub mod generator;
pub mod problems;
pub mod record;
pub mod registry;
pub mod value;

// Re-export commonly used types
pub use config::{OracleConfig, RecordLimits};
pub use conformance::{
    find_discrepancy, BatchResult, Checker, FunctionReport, GradingHarness, Policy,
    SearchOutcome, Verdict,
};
pub use error::{OracleError, OracleResult};
pub use fingerprint::Fingerprint;
pub use record::GoldenRecord;
pub use registry::{Callable, Implementation, Problem, Submission};
pub use value::{canonical_text, canonicalize, CallOutcome, Case, Failure, Value};
