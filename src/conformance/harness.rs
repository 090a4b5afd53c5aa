//! Grading harness: runs every registered problem against a submission.

use std::collections::HashMap;
use std::path::Path;

use super::discrepancy::{find_discrepancy, Policy, SearchOutcome};
use super::ordering::sort_by_source;
use super::runner::{Checker, FunctionReport, RecordedFunction, RunState};
use crate::config::OracleConfig;
use crate::error::{OracleError, OracleResult};
use crate::record::{GoldenRecord, PendingRecord};
use crate::registry::{Implementation, Problem, Submission};

/// Banner printed before a trusted recording pass into `record_path`.
pub fn recording_banner(record_path: &Path) -> String {
    format!(
        "RECORDING THE RESULTS OF THE IMPLEMENTED FUNCTIONS.
IF YOU ARE A STUDENT, YOU SHOULD NOT BE SEEING THIS
MESSAGE! MAKE SURE THAT THE FILE {} FROM THE
PLACE WHERE YOU DOWNLOADED THIS AUTOMATED TESTER IS
PROPERLY DOWNLOADED INTO THIS WORKING DIRECTORY!",
        record_path.display()
    )
}

/// Results of checking a submission against every registered problem.
#[derive(Debug, Default)]
pub struct BatchResult {
    /// One report per registered problem, in evaluation order.
    pub reports: Vec<FunctionReport>,
    /// Functions that passed.
    pub passed: usize,
    /// Functions the submission implements.
    pub implemented: usize,
    /// Problems registered.
    pub registered: usize,
}

impl BatchResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one function's report.
    pub fn record(&mut self, report: FunctionReport) {
        self.registered += 1;
        if report.verdict.state() != RunState::NotAttempted {
            self.implemented += 1;
        }
        if report.verdict.is_pass() {
            self.passed += 1;
        }
        self.reports.push(report);
    }

    /// Returns true if every implemented function passed.
    pub fn all_passed(&self) -> bool {
        self.passed == self.implemented
    }

    /// Reports of implemented functions that did not pass.
    pub fn failures(&self) -> impl Iterator<Item = &FunctionReport> {
        self.reports.iter().filter(|r| {
            !r.verdict.is_pass() && r.verdict.state() != RunState::NotAttempted
        })
    }

    /// Summary line.
    pub fn summary(&self) -> String {
        format!(
            "{} out of {} functions (of {} possible) work.",
            self.passed, self.implemented, self.registered
        )
    }
}

/// Results of a recording pass.
#[derive(Debug, Default)]
pub struct RecordingSummary {
    /// Functions recorded, in evaluation order.
    pub functions: Vec<RecordedFunction>,
    /// Total entries written.
    pub entries: usize,
}

/// Runs registered problems against submissions.
pub struct GradingHarness {
    problems: Vec<Problem>,
    config: OracleConfig,
    record: Option<GoldenRecord>,
    reference: Option<Submission>,
}

impl GradingHarness {
    /// Create a harness without a golden record.
    pub fn new(problems: Vec<Problem>, config: OracleConfig) -> Self {
        Self {
            problems,
            config,
            record: None,
            reference: None,
        }
    }

    /// Create a harness, loading the golden record if it is enabled and the
    /// file exists.
    pub fn open(problems: Vec<Problem>, config: OracleConfig) -> OracleResult<Self> {
        config.limits.validate()?;
        let record = if config.use_record && config.record_path.exists() {
            Some(GoldenRecord::load(&config.record_path, config.limits)?)
        } else {
            None
        };
        Ok(Self {
            problems,
            config,
            record,
            reference: None,
        })
    }

    /// Use an already loaded golden record.
    pub fn with_record(mut self, record: GoldenRecord) -> Self {
        self.record = Some(record);
        self
    }

    /// Search failing functions against these implementations for a
    /// counterexample.
    pub fn with_reference(mut self, reference: Submission) -> Self {
        self.reference = Some(reference);
        self
    }

    /// The registered problems in evaluation order.
    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    /// The golden record in use, if any.
    pub fn golden_record(&self) -> Option<&GoldenRecord> {
        self.record.as_ref()
    }

    /// The configuration in use.
    pub fn config(&self) -> &OracleConfig {
        &self.config
    }

    /// Reorder problems by their definition positions in a source listing.
    pub fn order_by_source(&mut self, positions: &HashMap<String, usize>) {
        sort_by_source(&mut self.problems, positions);
    }

    /// Look up a problem by name.
    pub fn problem(&self, name: &str) -> OracleResult<&Problem> {
        self.problems
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| OracleError::UnknownProblem(name.to_string()))
    }

    fn checker(&self) -> Checker<'_> {
        let record = if self.config.use_record {
            self.record.as_ref()
        } else {
            None
        };
        Checker::new(self.config.seed, record, self.config.limits)
    }

    /// Check one problem against the submission.
    pub fn check(&self, problem: &Problem, submission: &Submission) -> FunctionReport {
        let report = self.checker().check(problem, &submission.get(&problem.name));
        self.explain(problem, submission, report)
    }

    /// Attach the shortest counterexample to a failed report.
    fn explain(
        &self,
        problem: &Problem,
        submission: &Submission,
        mut report: FunctionReport,
    ) -> FunctionReport {
        if !matches!(
            report.verdict.state(),
            RunState::FailedChecksum | RunState::Crashed
        ) {
            return report;
        }
        let Some(reference) = &self.reference else {
            return report;
        };
        let (Implementation::Implemented(expected), Implementation::Implemented(actual)) =
            (reference.get(&problem.name), submission.get(&problem.name))
        else {
            return report;
        };
        let outcome = find_discrepancy(
            expected.as_ref(),
            actual.as_ref(),
            problem.cases.cases(self.config.seed),
            Policy::Shortest,
        );
        tracing::debug!(
            function = %problem.name,
            agreement = outcome.is_agreement(),
            "counterexample search done"
        );
        if !outcome.is_agreement() {
            report.counterexample = Some(outcome);
        }
        report
    }

    /// Check every registered problem, calling `on_report` as each finishes.
    pub fn check_all_with<F>(&self, submission: &Submission, mut on_report: F) -> BatchResult
    where
        F: FnMut(&FunctionReport),
    {
        let checker = self.checker();
        let mut batch = BatchResult::new();
        for problem in &self.problems {
            let report = checker.check(problem, &submission.get(&problem.name));
            let report = self.explain(problem, submission, report);
            on_report(&report);
            batch.record(report);
        }
        tracing::info!(
            submission = submission.name(),
            passed = batch.passed,
            implemented = batch.implemented,
            registered = batch.registered,
            "batch complete"
        );
        batch
    }

    /// Check every registered problem.
    pub fn check_all(&self, submission: &Submission) -> BatchResult {
        self.check_all_with(submission, |_| {})
    }

    /// Generate the golden record at the configured path from a trusted
    /// submission, replacing any existing file only if the pass succeeds.
    pub fn record_all(&self, trusted: &Submission) -> OracleResult<RecordingSummary> {
        let checker = Checker::new(self.config.seed, None, self.config.limits);
        let mut pending = PendingRecord::create(&self.config.record_path, self.config.limits)?;
        let mut summary = RecordingSummary::default();
        for problem in &self.problems {
            if let Some(recorded) = checker.record(problem, &trusted.get(&problem.name), pending.writer())? {
                summary.entries += recorded.entries;
                summary.functions.push(recorded);
            }
        }
        pending.commit()?;
        Ok(summary)
    }

    /// Search one problem's cases for a disagreement between two submissions.
    pub fn diff(
        &self,
        name: &str,
        reference: &Submission,
        submission: &Submission,
        policy: Policy,
    ) -> OracleResult<SearchOutcome> {
        let problem = self.problem(name)?;
        let (Implementation::Implemented(expected), Implementation::Implemented(actual)) =
            (reference.get(name), submission.get(name))
        else {
            return Err(OracleError::UnknownProblem(format!(
                "{} is not implemented by both {} and {}",
                name,
                reference.name(),
                submission.name()
            )));
        };
        let outcome = find_discrepancy(
            expected.as_ref(),
            actual.as_ref(),
            problem.cases.cases(self.config.seed),
            policy,
        );
        tracing::info!(problem = name, agreement = outcome.is_agreement(), "discrepancy search done");
        Ok(outcome)
    }
}
