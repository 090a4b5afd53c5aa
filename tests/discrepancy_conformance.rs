//! Counterexample search conformance.
//!
//! The search must only report real disagreements, must report the shortest
//! one (earliest on ties), and must treat failures as comparable results.

mod common;

use common::{double, double_but_seven, init_test_logging, test_proptest_config};
use grade_oracle::registry::invoke;
use grade_oracle::value::outcome_text;
use grade_oracle::{find_discrepancy, CallOutcome, Case, Failure, Policy, SearchOutcome, Value};
use proptest::prelude::*;

fn list_case(items: &[i64]) -> Case {
    Case::new(vec![Value::list(items.iter().copied())])
}

fn sum(args: Vec<Value>) -> CallOutcome {
    let items = args[0].as_seq().unwrap_or(&[]);
    Ok(Value::Int(items.iter().filter_map(Value::as_int).sum()))
}

/// Wrong whenever the list holds a multiple of 7.
fn sum_missing_sevens(args: Vec<Value>) -> CallOutcome {
    let items = args[0].as_seq().unwrap_or(&[]);
    Ok(Value::Int(
        items
            .iter()
            .filter_map(Value::as_int)
            .filter(|x| x % 7 != 0)
            .sum(),
    ))
}

fn disagree(case: &Case) -> bool {
    outcome_text(&invoke(&sum, case)) != outcome_text(&invoke(&sum_missing_sevens, case))
}

// ============================================================================
// Worked Scenario
// ============================================================================

#[test]
fn double_versus_fifteen_at_seven() {
    init_test_logging();
    let cases: Vec<Case> = (1..=10).map(|i| Case::new(vec![Value::Int(i)])).collect();
    let outcome = find_discrepancy(&double, &double_but_seven, cases, Policy::Shortest);
    let d = outcome.discrepancy().expect("a discrepancy");
    assert_eq!(d.rendered_case, "(7,)");
    assert_eq!(d.reference, "14");
    assert_eq!(d.submission, "15");
    assert_eq!(
        outcome.to_string(),
        "For 10 test cases, found 1 discrepancies.\n\
         Shortest discrepancy input was:\n\
         (7,)\n\
         Model  : 14\n\
         Student: 15\n"
    );
}

#[test]
fn stop_at_first_reports_earliest() {
    let cases = vec![
        list_case(&[1, 2, 3, 14, 5, 6]),
        list_case(&[7]),
        list_case(&[21, 1]),
    ];
    let outcome = find_discrepancy(&sum, &sum_missing_sevens, cases, Policy::StopAtFirst);
    match &outcome {
        SearchOutcome::Disagreement {
            discrepancy,
            discrepancies,
            cases,
            ..
        } => {
            assert_eq!(discrepancy.index, 0);
            assert_eq!(*discrepancies, 1);
            assert_eq!(*cases, 1);
        }
        other => panic!("expected disagreement, got {:?}", other),
    }
    assert!(outcome.to_string().starts_with("First discrepancy found.\n"));
}

#[test]
fn shortest_ties_go_to_earliest() {
    let cases = vec![
        list_case(&[1, 2, 3, 14, 5, 6]),
        list_case(&[7, 1]),
        list_case(&[1, 7]),
        list_case(&[1, 2]),
    ];
    let outcome = find_discrepancy(&sum, &sum_missing_sevens, cases, Policy::Shortest);
    let d = outcome.discrepancy().unwrap();
    assert_eq!(d.index, 1);
    assert_eq!(d.rendered_case, "([7, 1],)");
}

// ============================================================================
// Failures As Results
// ============================================================================

fn fails(_args: Vec<Value>) -> CallOutcome {
    Err(Failure::new("ValueError: bad input"))
}

fn fails_differently(_args: Vec<Value>) -> CallOutcome {
    Err(Failure::new("KeyError: 3"))
}

fn panics(_args: Vec<Value>) -> CallOutcome {
    panic!("ValueError: bad input")
}

#[test]
fn same_failure_is_agreement() {
    let cases = vec![Case::new(vec![Value::Int(1)])];
    assert!(find_discrepancy(&fails, &fails, cases.clone(), Policy::Shortest).is_agreement());
    // A panic with the same message counts as the same failure.
    assert!(find_discrepancy(&fails, &panics, cases, Policy::Shortest).is_agreement());
}

#[test]
fn failure_versus_value_is_discrepancy() {
    let cases = vec![Case::new(vec![Value::Int(1)])];
    let outcome = find_discrepancy(&double, &fails, cases.clone(), Policy::Shortest);
    let d = outcome.discrepancy().unwrap();
    assert_eq!(d.reference, "2");
    assert_eq!(d.submission, "CRASH! ValueError: bad input");

    // Symmetric: the reference may be the one failing.
    let outcome = find_discrepancy(&fails, &double, cases.clone(), Policy::Shortest);
    assert_eq!(outcome.discrepancy().unwrap().reference, "CRASH! ValueError: bad input");

    let outcome = find_discrepancy(&fails, &fails_differently, cases, Policy::Shortest);
    assert!(!outcome.is_agreement());
}

#[test]
fn mutating_callable_does_not_affect_other_side() {
    let clobber = |mut args: Vec<Value>| -> CallOutcome {
        args[0] = Value::Int(1000);
        Ok(Value::None)
    };
    let echo = |args: Vec<Value>| -> CallOutcome { Ok(args[0].clone()) };
    let cases = vec![Case::new(vec![Value::Int(3)])];
    let outcome = find_discrepancy(&clobber, &echo, cases, Policy::Shortest);
    let d = outcome.discrepancy().unwrap();
    assert_eq!(d.submission, "3");
    assert_eq!(d.case, Case::new(vec![Value::Int(3)]));
}

// ============================================================================
// Properties
// ============================================================================

fn arb_cases() -> impl Strategy<Value = Vec<Vec<i64>>> {
    prop::collection::vec(prop::collection::vec(0i64..30, 0..8), 0..30)
}

proptest! {
    #![proptest_config(test_proptest_config(200))]

    /// A reported discrepancy really disagrees; agreement means none exists.
    #[test]
    fn search_is_correct(lists in arb_cases()) {
        let cases: Vec<Case> = lists.iter().map(|l| list_case(l)).collect();
        let any_disagree = cases.iter().any(disagree);
        let outcome = find_discrepancy(&sum, &sum_missing_sevens, cases.clone(), Policy::Shortest);
        match outcome.discrepancy() {
            Some(d) => {
                prop_assert!(disagree(&d.case));
                prop_assert_eq!(&cases[d.index], &d.case);
            }
            None => prop_assert!(!any_disagree),
        }
    }

    /// No disagreeing case renders shorter, and none of equal length comes
    /// earlier.
    #[test]
    fn search_is_minimal(lists in arb_cases()) {
        let cases: Vec<Case> = lists.iter().map(|l| list_case(l)).collect();
        let outcome = find_discrepancy(&sum, &sum_missing_sevens, cases.clone(), Policy::Shortest);
        if let Some(d) = outcome.discrepancy() {
            for (i, case) in cases.iter().enumerate().filter(|(_, c)| disagree(c)) {
                let size = case.render().chars().count();
                prop_assert!(size >= d.size());
                if i < d.index {
                    prop_assert!(size > d.size());
                }
            }
        }
    }

    /// The count covers every disagreeing case.
    #[test]
    fn search_counts_all(lists in arb_cases()) {
        let cases: Vec<Case> = lists.iter().map(|l| list_case(l)).collect();
        let expected = cases.iter().filter(|c| disagree(c)).count();
        match find_discrepancy(&sum, &sum_missing_sevens, cases.clone(), Policy::Shortest) {
            SearchOutcome::Agreement { cases: n } => {
                prop_assert_eq!(expected, 0);
                prop_assert_eq!(n, cases.len());
            }
            SearchOutcome::Disagreement { discrepancies, cases: n, .. } => {
                prop_assert_eq!(discrepancies, expected);
                prop_assert_eq!(n, cases.len());
            }
        }
    }
}
