//! Driving one implementation over one problem's case sequence.

use std::fmt;
use std::io::Write;
use std::time::{Duration, Instant};

use super::discrepancy::SearchOutcome;
use super::repro::{display_args, RecordMismatch};
use crate::config::RecordLimits;
use crate::error::{OracleError, OracleResult};
use crate::fingerprint::{display_digest, matches_expected, Fingerprint};
use crate::record::{is_truncated, GoldenRecord, RecordWriter};
use crate::registry::{invoke, Implementation, Problem};
use crate::value::{canonical_text, Failure};

/// Lifecycle of one function's run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// The submission does not implement the function.
    NotAttempted,
    /// Cases are being driven.
    Running,
    /// Every check passed (or there was nothing to judge against).
    Passed,
    /// A recorded entry or the fingerprint disagreed.
    FailedChecksum,
    /// The callable failed on some case.
    Crashed,
}

/// Final verdict for one function.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// The submission does not implement the function.
    NotAttempted,
    /// The run completed without disagreement.
    Passed {
        /// Fingerprint of the full run.
        fingerprint: String,
        /// False when no expected fingerprint was registered, in which case
        /// the fingerprint is printed for pinning instead of judged.
        judged: bool,
        /// Cases driven.
        cases: usize,
        /// Wall-clock time of the run.
        elapsed: Duration,
    },
    /// The run disagreed with the golden record or the expected fingerprint.
    FailedChecksum {
        /// Per-case detail when the golden record caught the disagreement.
        mismatch: Option<RecordMismatch>,
        /// Cases driven before the verdict.
        cases: usize,
    },
    /// The callable failed.
    Crashed {
        /// Position of the failing case.
        index: usize,
        /// The failure.
        failure: Failure,
    },
}

impl Verdict {
    /// The terminal state this verdict corresponds to.
    pub fn state(&self) -> RunState {
        match self {
            Self::NotAttempted => RunState::NotAttempted,
            Self::Passed { .. } => RunState::Passed,
            Self::FailedChecksum { .. } => RunState::FailedChecksum,
            Self::Crashed { .. } => RunState::Crashed,
        }
    }

    /// Returns true if the function counts as working.
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Passed { .. })
    }
}

/// Verdict for a named function.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionReport {
    /// Function name.
    pub name: String,
    /// Its verdict.
    pub verdict: Verdict,
    /// Shortest case on which a failing function disagrees with the
    /// reference, when a reference was available to search against.
    pub counterexample: Option<SearchOutcome>,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::NotAttempted => write!(f, "not attempted"),
            Verdict::Passed {
                fingerprint,
                judged: false,
                ..
            } => write!(f, "{}", display_digest(fingerprint)),
            Verdict::Passed { elapsed, .. } => {
                write!(f, "Success in {:.3} seconds.", elapsed.as_secs_f64())
            }
            Verdict::FailedChecksum {
                mismatch: Some(mismatch),
                ..
            } => write!(f, "{}", mismatch),
            Verdict::FailedChecksum { mismatch: None, .. } => {
                write!(f, "FAILED THE TEST WITH CHECKSUM MISMATCH.")
            }
            Verdict::Crashed { failure, .. } => write!(f, "{}", failure),
        }
    }
}

impl fmt::Display for FunctionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.verdict)?;
        match &self.counterexample {
            Some(outcome) => write!(f, "\n{}", outcome.to_string().trim_end()),
            None => Ok(()),
        }
    }
}

/// Outcome of recording one function into the golden record.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedFunction {
    /// Function name.
    pub name: String,
    /// Entries written.
    pub entries: usize,
    /// The failing case, if the callable failed before the cap.
    pub failure: Option<(usize, Failure)>,
}

/// Checks implementations against fingerprints and an optional golden record.
#[derive(Debug, Clone, Copy)]
pub struct Checker<'a> {
    seed: u64,
    record: Option<&'a GoldenRecord>,
    limits: RecordLimits,
}

impl<'a> Checker<'a> {
    /// Create a checker. Pass `None` to judge by fingerprint only.
    pub fn new(seed: u64, record: Option<&'a GoldenRecord>, limits: RecordLimits) -> Self {
        Self {
            seed,
            record,
            limits,
        }
    }

    /// Run one problem against one implementation.
    ///
    /// Cases are pulled one at a time until the sequence ends. While golden
    /// entries remain (and within the cutoff) each result is compared with its
    /// entry; the first disagreement ends the run. Otherwise the fingerprint of
    /// the whole run decides.
    pub fn check(&self, problem: &Problem, implementation: &Implementation) -> FunctionReport {
        let verdict = match implementation.callable() {
            None => Verdict::NotAttempted,
            Some(_) => self.drive(problem, implementation),
        };
        match &verdict {
            Verdict::Crashed { index, failure } => {
                tracing::warn!(function = %problem.name, index, %failure, "function crashed");
            }
            other => {
                tracing::debug!(function = %problem.name, state = ?other.state(), "function finished");
            }
        }
        FunctionReport {
            name: problem.name.clone(),
            verdict,
            counterexample: None,
        }
    }

    fn drive(&self, problem: &Problem, implementation: &Implementation) -> Verdict {
        let Some(callable) = implementation.callable() else {
            return Verdict::NotAttempted;
        };
        tracing::debug!(function = %problem.name, state = ?RunState::Running, "function started");

        let golden = self
            .record
            .and_then(|record| record.entries(&problem.name).map(|entries| (record, entries)));
        let mut fingerprint = Fingerprint::new();
        let start = Instant::now();

        for (index, case) in problem.cases.cases(self.seed).enumerate() {
            let result = match invoke(callable, &case) {
                Ok(value) => value,
                Err(failure) => return Verdict::Crashed { index, failure },
            };
            let text = canonical_text(&result);
            fingerprint.absorb(&text);

            let Some((record, entries)) = golden else {
                continue;
            };
            if index >= self.limits.testcase_cutoff {
                continue;
            }
            if let Some(expected) = entries.get(index) {
                if !record.entry_matches(expected, &text) {
                    return Verdict::FailedChecksum {
                        mismatch: Some(RecordMismatch {
                            index,
                            args: display_args(&case, self.limits.arg_display_cutoff),
                            expected: expected.clone(),
                            expected_truncated: is_truncated(expected, record.limits()),
                            actual: text,
                        }),
                        cases: index + 1,
                    };
                }
            }
        }

        let elapsed = start.elapsed();
        let cases = fingerprint.cases();
        let digest = fingerprint.finalize();
        match matches_expected(&digest, problem.expected.as_deref()) {
            None => Verdict::Passed {
                fingerprint: digest,
                judged: false,
                cases,
                elapsed,
            },
            Some(true) => Verdict::Passed {
                fingerprint: digest,
                judged: true,
                cases,
                elapsed,
            },
            Some(false) => Verdict::FailedChecksum {
                mismatch: None,
                cases,
            },
        }
    }

    /// Record one problem's entries with a trusted implementation.
    ///
    /// Writes the section header and then one entry per case, stopping after
    /// `testcase_cutoff + 1` entries or at the first failure. Unimplemented
    /// problems get no section.
    pub fn record<W: Write>(
        &self,
        problem: &Problem,
        implementation: &Implementation,
        writer: &mut RecordWriter<W>,
    ) -> OracleResult<Option<RecordedFunction>> {
        let Some(callable) = implementation.callable() else {
            return Ok(None);
        };
        let io_err = |e| OracleError::io("<record>", e);
        writer.begin_section(&problem.name).map_err(io_err)?;

        let mut entries = 0usize;
        let mut failure = None;
        for (index, case) in problem.cases.cases(self.seed).enumerate() {
            match invoke(callable, &case) {
                Ok(value) => {
                    writer.write_entry(&canonical_text(&value)).map_err(io_err)?;
                    entries += 1;
                }
                Err(f) => {
                    tracing::warn!(function = %problem.name, index, failure = %f, "crashed while recording");
                    failure = Some((index, f));
                    break;
                }
            }
            if index >= self.limits.testcase_cutoff {
                break;
            }
        }

        Ok(Some(RecordedFunction {
            name: problem.name.clone(),
            entries,
            failure,
        }))
    }
}
