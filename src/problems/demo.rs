//! Deliberately imperfect submissions for exercising the engine.

use super::args::{int_arg, int_list_arg, seq_arg, str_arg};
use super::reference::{self, counts, hand_shape, letter_grade, say};
use crate::registry::Submission;
use crate::value::{CallOutcome, Failure, Value};

fn ryerson_letter_grade(args: Vec<Value>) -> CallOutcome {
    let pct = int_arg(&args, 0)?;
    Ok(if pct == 85 { "A-" } else { letter_grade(pct) }.into())
}

fn is_ascending(args: Vec<Value>) -> CallOutcome {
    let items = int_list_arg(&args, 0)?;
    let head = &items[..items.len().saturating_sub(1)];
    Ok(head.windows(2).all(|w| w[0] < w[1]).into())
}

fn count_and_say(args: Vec<Value>) -> CallOutcome {
    let digits = str_arg(&args, 0)?;
    if digits.chars().count() > 500 {
        return Err(Failure::new(
            "RecursionError: maximum recursion depth exceeded",
        ));
    }
    Ok(say(digits).into())
}

fn frequency_sort(args: Vec<Value>) -> CallOutcome {
    let mut items = int_list_arg(&args, 0)?;
    let counts = counts(&items);
    items.sort_by(|a, b| counts[b].cmp(&counts[a]).then(b.cmp(a)));
    Ok(items.into())
}

// Builds the same mapping in reverse discovery order.
fn hand_shape_distribution(args: Vec<Value>) -> CallOutcome {
    let mut dist: Vec<([i64; 4], i64)> = Vec::new();
    for hand in seq_arg(&args, 0)?.iter().rev() {
        let hand = hand
            .as_seq()
            .ok_or_else(|| Failure::new("TypeError: hand is not a sequence"))?;
        let shape = hand_shape(hand)?;
        match dist.iter_mut().find(|(s, _)| *s == shape) {
            Some(entry) => entry.1 += 1,
            None => dist.push((shape, 1)),
        }
    }
    Ok(Value::map(
        dist.into_iter().map(|(shape, n)| (Value::tuple(shape), n)),
    ))
}

/// The reference with a handful of functions swapped for buggy versions.
///
/// `hand_shape_distribution` only differs in map insertion order and still
/// passes.
pub fn faulty() -> Submission {
    reference::submission("faulty")
        .with("ryerson_letter_grade", ryerson_letter_grade)
        .with("is_ascending", is_ascending)
        .with("count_and_say", count_and_say)
        .with("frequency_sort", frequency_sort)
        .with("hand_shape_distribution", hand_shape_distribution)
}

/// Only three functions implemented.
pub fn partial() -> Submission {
    Submission::new("partial")
        .with("ryerson_letter_grade", reference::ryerson_letter_grade)
        .with("is_ascending", reference::is_ascending)
        .with("detab", reference::detab)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(items: &[i64]) -> Value {
        Value::list(items.iter().copied())
    }

    #[test]
    fn test_faulty_bugs() {
        assert_eq!(
            ryerson_letter_grade(vec![85.into()]).unwrap(),
            Value::from("A-")
        );
        assert_eq!(
            is_ascending(vec![ints(&[1, 2, 1])]).unwrap(),
            Value::Bool(true)
        );
        assert!(count_and_say(vec!["1".repeat(501).into()]).is_err());
        assert_eq!(
            frequency_sort(vec![ints(&[1, 2])]).unwrap(),
            ints(&[2, 1])
        );
    }

    #[test]
    fn test_partial_coverage() {
        let sub = partial();
        assert_eq!(sub.implemented_count(), 3);
        assert!(!sub.get("count_and_say").is_implemented());
    }
}
