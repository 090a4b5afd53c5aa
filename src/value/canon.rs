//! Canonicalization of results.
//!
//! Results whose meaning does not depend on element order (sets, mappings)
//! are turned into sorted lists so that equal results render to equal text
//! on every run and every host.

use std::cmp::Ordering;

use super::render::{render, repr};
use super::types::{CallOutcome, Value};

/// Canonicalize a result value.
///
/// - `Map` becomes a `List` of `(key, value)` tuples sorted by key
/// - `Set` becomes a `List` of its elements in natural order
/// - anything else is returned unchanged
///
/// Only the top-level value is rewritten. Elements that compare equal in
/// natural order but render differently (`1` and `1.0`) are ordered by their
/// rendering, so the result never depends on insertion order.
pub fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Map(pairs) => {
            let mut sorted: Vec<&(Value, Value)> = pairs.iter().collect();
            sorted.sort_by(|a, b| {
                canonical_order(&a.0, &b.0).then_with(|| repr(&a.1).cmp(&repr(&b.1)))
            });
            Value::List(
                sorted
                    .into_iter()
                    .map(|(k, v)| Value::Tuple(vec![k.clone(), v.clone()]))
                    .collect(),
            )
        }
        Value::Set(items) => {
            let mut sorted = items.clone();
            sorted.sort_by(canonical_order);
            Value::List(sorted)
        }
        other => other.clone(),
    }
}

fn canonical_order(a: &Value, b: &Value) -> Ordering {
    a.natural_cmp(b).then_with(|| repr(a).cmp(&repr(b)))
}

/// Canonical text of a value: canonicalize, then render.
pub fn canonical_text(value: &Value) -> String {
    render(&canonicalize(value))
}

/// Canonical text of an invocation outcome; failures render with their marker.
pub fn outcome_text(outcome: &CallOutcome) -> String {
    match outcome {
        Ok(value) => canonical_text(value),
        Err(failure) => failure.to_string(),
    }
}

/// Whether two values are equal after canonicalization.
pub fn canonically_equal(a: &Value, b: &Value) -> bool {
    canonical_text(a) == canonical_text(b)
}

/// Order two values the way canonicalization sorts them.
pub fn natural_order(a: &Value, b: &Value) -> Ordering {
    a.natural_cmp(b)
}
