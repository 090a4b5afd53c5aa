//! Reproduction details for a failed function.

use std::fmt;

use crate::value::{render, repr, Case, Value};

/// Elements kept at each end of an abbreviated argument collection.
const KEPT_ELEMENTS: usize = 5;

/// A case whose live result disagreed with the golden record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordMismatch {
    /// Position of the case in the sequence.
    pub index: usize,
    /// The case's arguments, abbreviated for display.
    pub args: String,
    /// Recorded entry.
    pub expected: String,
    /// Whether the recorded entry was cut at the entry width.
    pub expected_truncated: bool,
    /// Canonical text of the live result.
    pub actual: String,
}

impl RecordMismatch {
    /// Format as a human-readable report.
    pub fn to_report(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RecordMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DISCREPANCY AT TEST CASE #{}: ", self.index)?;
        writeln!(f, "TEST CASE: {}", self.args)?;
        writeln!(
            f,
            "EXPECTED: {} {}",
            self.expected,
            if self.expected_truncated { "..." } else { "" }
        )?;
        write!(f, "RETURNED: {}", self.actual)
    }
}

/// Render a case's arguments without flooding the console.
///
/// Lists and tuples of `cutoff` or more elements show their first and last
/// five elements around an `[N omitted...]` marker. Other arguments whose
/// rendering reaches `cutoff` characters are shown as `[...]`.
pub fn display_args(case: &Case, cutoff: usize) -> String {
    case.args()
        .iter()
        .map(|arg| display_arg(arg, cutoff))
        .collect::<Vec<_>>()
        .join(", ")
}

fn display_arg(arg: &Value, cutoff: usize) -> String {
    match arg.as_seq() {
        Some(items) if items.len() >= cutoff && items.len() >= 2 * KEPT_ELEMENTS => {
            let join = |slice: &[Value]| {
                slice.iter().map(render).collect::<Vec<_>>().join(", ")
            };
            format!(
                "[{}, [{} omitted...], {}]",
                join(&items[..KEPT_ELEMENTS]),
                items.len() - 2 * KEPT_ELEMENTS,
                join(&items[items.len() - KEPT_ELEMENTS..])
            )
        }
        Some(_) => repr(arg),
        None => {
            let text = repr(arg);
            if text.chars().count() < cutoff {
                text
            } else {
                "[...]".to_string()
            }
        }
    }
}
