//! Counterexample search between a reference and a submission.
//!
//! Both callables are run on every case of a shared sequence. Failures are
//! compared like results, so two implementations failing with the same
//! description agree, while one failing and one returning disagree.

use std::fmt;

use crate::registry::{invoke, Callable};
use crate::value::{outcome_text, Case};

/// Which discrepancy to keep when several exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Stop and report the first disagreeing case.
    StopAtFirst,
    /// Scan everything and report the case with the shortest rendering;
    /// ties go to the earliest.
    Shortest,
}

/// A case on which the two implementations disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct Discrepancy {
    /// Position of the case in the sequence.
    pub index: usize,
    /// The case as generated, before either callable saw it.
    pub case: Case,
    /// Rendering of `case`, whose length ranks discrepancies.
    pub rendered_case: String,
    /// Canonical text of the reference result or its failure marker.
    pub reference: String,
    /// Canonical text of the submission result or its failure marker.
    pub submission: String,
}

impl Discrepancy {
    /// Length of the rendered case in characters.
    pub fn size(&self) -> usize {
        self.rendered_case.chars().count()
    }
}

/// Result of a search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// No case told the implementations apart.
    Agreement {
        /// Number of cases examined.
        cases: usize,
    },
    /// At least one case told them apart.
    Disagreement {
        /// The retained discrepancy.
        discrepancy: Discrepancy,
        /// Discrepancies observed in total (1 when stopping at the first).
        discrepancies: usize,
        /// Number of cases examined.
        cases: usize,
        /// Policy that selected the discrepancy.
        policy: Policy,
    },
}

impl SearchOutcome {
    /// Returns true if no discrepancy was found.
    pub fn is_agreement(&self) -> bool {
        matches!(self, Self::Agreement { .. })
    }

    /// The retained discrepancy, if any.
    pub fn discrepancy(&self) -> Option<&Discrepancy> {
        match self {
            Self::Agreement { .. } => None,
            Self::Disagreement { discrepancy, .. } => Some(discrepancy),
        }
    }

    /// Human-readable report.
    pub fn to_report(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Agreement { .. } => writeln!(f, "Both functions returned the same answers."),
            Self::Disagreement {
                discrepancy,
                discrepancies,
                cases,
                policy,
            } => {
                match policy {
                    Policy::StopAtFirst => writeln!(f, "First discrepancy found.")?,
                    Policy::Shortest => {
                        writeln!(
                            f,
                            "For {} test cases, found {} discrepancies.",
                            cases, discrepancies
                        )?;
                        writeln!(f, "Shortest discrepancy input was:")?;
                    }
                }
                writeln!(f, "{}", discrepancy.rendered_case)?;
                writeln!(f, "Model  : {}", discrepancy.reference)?;
                writeln!(f, "Student: {}", discrepancy.submission)
            }
        }
    }
}

/// Search a case sequence for inputs on which two implementations disagree.
pub fn find_discrepancy<I>(
    reference: &dyn Callable,
    submission: &dyn Callable,
    cases: I,
    policy: Policy,
) -> SearchOutcome
where
    I: IntoIterator<Item = Case>,
{
    let mut best: Option<Discrepancy> = None;
    let mut discrepancies = 0usize;
    let mut examined = 0usize;

    for (index, case) in cases.into_iter().enumerate() {
        examined += 1;
        let rendered_case = case.render();
        let expected = outcome_text(&invoke(reference, &case));
        let actual = outcome_text(&invoke(submission, &case));
        if expected == actual {
            continue;
        }

        discrepancies += 1;
        let candidate = Discrepancy {
            index,
            case,
            rendered_case,
            reference: expected,
            submission: actual,
        };
        tracing::trace!(index, size = candidate.size(), "discrepancy");

        if policy == Policy::StopAtFirst {
            best = Some(candidate);
            break;
        }
        let shorter = best.as_ref().map_or(true, |b| candidate.size() < b.size());
        if shorter {
            best = Some(candidate);
        }
    }

    match best {
        None => SearchOutcome::Agreement { cases: examined },
        Some(discrepancy) => SearchOutcome::Disagreement {
            discrepancy,
            discrepancies,
            cases: examined,
            policy,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{CallOutcome, Failure, Value};

    fn int_cases(range: std::ops::RangeInclusive<i64>) -> Vec<Case> {
        range.map(|i| Case::new(vec![Value::Int(i)])).collect()
    }

    fn twice(args: Vec<Value>) -> CallOutcome {
        Ok(Value::Int(args[0].as_int().unwrap_or(0) * 2))
    }

    fn twice_except_seven(args: Vec<Value>) -> CallOutcome {
        let x = args[0].as_int().unwrap_or(0);
        Ok(Value::Int(if x == 7 { 15 } else { x * 2 }))
    }

    #[test]
    fn test_agreement() {
        let outcome = find_discrepancy(&twice, &twice, int_cases(1..=10), Policy::Shortest);
        assert_eq!(outcome, SearchOutcome::Agreement { cases: 10 });
        assert!(outcome.to_report().contains("same answers"));
    }

    #[test]
    fn test_single_discrepancy() {
        let outcome = find_discrepancy(
            &twice,
            &twice_except_seven,
            int_cases(1..=10),
            Policy::Shortest,
        );
        let d = outcome.discrepancy().unwrap();
        assert_eq!(d.rendered_case, "(7,)");
        assert_eq!(d.reference, "14");
        assert_eq!(d.submission, "15");
        assert_eq!(d.index, 6);
    }

    #[test]
    fn test_stop_at_first_counts_one() {
        let off = |args: Vec<Value>| -> CallOutcome {
            Ok(Value::Int(args[0].as_int().unwrap_or(0) * 2 + 1))
        };
        let outcome = find_discrepancy(&twice, &off, int_cases(1..=10), Policy::StopAtFirst);
        match outcome {
            SearchOutcome::Disagreement {
                discrepancy,
                discrepancies,
                cases,
                ..
            } => {
                assert_eq!(discrepancy.index, 0);
                assert_eq!(discrepancies, 1);
                assert_eq!(cases, 1);
            }
            other => panic!("expected disagreement, got {:?}", other),
        }
    }

    #[test]
    fn test_crash_symmetry() {
        let fails = |_args: Vec<Value>| -> CallOutcome { Err(Failure::new("nope")) };
        let outcome = find_discrepancy(&fails, &fails, int_cases(1..=3), Policy::Shortest);
        assert!(outcome.is_agreement());
    }

    #[test]
    fn test_one_sided_crash_reported() {
        let fails = |_args: Vec<Value>| -> CallOutcome { Err(Failure::new("nope")) };
        let outcome = find_discrepancy(&twice, &fails, int_cases(5..=5), Policy::Shortest);
        let d = outcome.discrepancy().unwrap();
        assert_eq!(d.reference, "10");
        assert_eq!(d.submission, "CRASH! nope");
    }

    #[test]
    fn test_report_format() {
        let outcome = find_discrepancy(
            &twice,
            &twice_except_seven,
            int_cases(1..=10),
            Policy::Shortest,
        );
        let report = outcome.to_report();
        assert!(report.contains("For 10 test cases, found 1 discrepancies."));
        assert!(report.contains("(7,)"));
        assert!(report.contains("Model  : 14"));
        assert!(report.contains("Student: 15"));
    }
}
