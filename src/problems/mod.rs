//! Built-in problem catalog.
//!
//! The registration table pairs each problem name with its case generator.
//! Expected fingerprints are left unpinned, so a run against the catalog
//! prints the digest it computed; the golden record is what judges results.
//!
//! Submissions are resolved by name from [`SUBMISSIONS`]. `reference` is the
//! trusted implementation that produces the golden record; `faulty` and
//! `partial` exist to show what failing and incomplete submissions look like.

mod args;
mod demo;
mod generators;
mod reference;

use crate::error::{OracleError, OracleResult};
use crate::generator::CaseSource;
use crate::registry::{Problem, Submission};

pub use generators::{deck, RANKS, SUITS};

/// Names of the built-in submissions.
pub const SUBMISSIONS: [&str; 3] = ["reference", "faulty", "partial"];

/// The registration table, in registration order.
pub fn registration_table() -> Vec<Problem> {
    vec![
        Problem::new(
            "ryerson_letter_grade",
            CaseSource::fixed(generators::ryerson_letter_grade),
            None,
        ),
        Problem::new("is_ascending", CaseSource::seeded(generators::is_ascending), None),
        Problem::new(
            "count_and_say",
            CaseSource::seeded(generators::count_and_say),
            None,
        ),
        Problem::new(
            "reverse_ascending_sublists",
            CaseSource::seeded(generators::reverse_ascending_sublists),
            None,
        ),
        Problem::new("safe_squares", CaseSource::seeded(generators::safe_squares), None),
        Problem::new(
            "frequency_sort",
            CaseSource::seeded(generators::frequency_sort),
            None,
        ),
        Problem::new("give_change", CaseSource::seeded(generators::give_change), None),
        Problem::new(
            "running_median_of_three",
            CaseSource::seeded(generators::running_median_of_three),
            None,
        ),
        Problem::new(
            "collapse_intervals",
            CaseSource::seeded(generators::collapse_intervals),
            None,
        ),
        Problem::new(
            "hand_shape_distribution",
            CaseSource::seeded(generators::hand_shape_distribution),
            None,
        ),
        Problem::new("detab", CaseSource::seeded(generators::detab), None),
        Problem::new(
            "count_divisibles_in_range",
            CaseSource::seeded(generators::count_divisibles_in_range),
            None,
        ),
    ]
}

/// The trusted implementations of every catalog problem.
pub fn reference() -> Submission {
    reference::submission("reference")
}

/// Resolve a built-in submission by name.
pub fn submission(name: &str) -> OracleResult<Submission> {
    match name {
        "reference" => Ok(reference()),
        "faulty" => Ok(demo::faulty()),
        "partial" => Ok(demo::partial()),
        _ => Err(OracleError::ImportFailure {
            submission: name.to_string(),
            reason: format!("no such submission (available: {})", SUBMISSIONS.join(", ")),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_covers_table() {
        let reference = reference();
        for problem in registration_table() {
            assert!(
                reference.get(&problem.name).is_implemented(),
                "{} missing",
                problem.name
            );
        }
        assert_eq!(reference.implemented_count(), registration_table().len());
    }

    #[test]
    fn test_resolve_submissions() {
        for name in SUBMISSIONS {
            assert_eq!(submission(name).unwrap().name(), name);
        }
        let err = submission("nobody").unwrap_err();
        assert_eq!(err.name(), "ImportFailure");
    }

    #[test]
    fn test_names_unique() {
        let mut names: Vec<String> = registration_table().into_iter().map(|p| p.name).collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }
}
