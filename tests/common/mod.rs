//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::sync::Once;

use grade_oracle::generator::CaseSource;
use grade_oracle::{CallOutcome, Case, Failure, Problem, Value};
use proptest::test_runner::Config as ProptestConfig;

static INIT_LOGGING: Once = Once::new();

/// Route engine logs through the test harness. Only the first call has any
/// effect.
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .with_ansi(false)
            .try_init();
    });
}

/// Proptest configuration with a fixed case count.
pub fn test_proptest_config(cases: u32) -> ProptestConfig {
    ProptestConfig {
        cases,
        ..ProptestConfig::default()
    }
}

/// Single-integer cases `0..n`.
pub fn int_cases(n: i64) -> CaseSource {
    CaseSource::fixed(move || (0..n).map(|i| Case::new(vec![Value::Int(i)])))
}

/// First argument as an integer.
pub fn first_int(args: &[Value]) -> Result<i64, Failure> {
    args.first()
        .and_then(Value::as_int)
        .ok_or_else(|| Failure::new("TypeError: expected int"))
}

pub fn double(args: Vec<Value>) -> CallOutcome {
    Ok(Value::Int(first_int(&args)? * 2))
}

/// Like [`double`] except that it answers 15 for 7.
pub fn double_but_seven(args: Vec<Value>) -> CallOutcome {
    let x = first_int(&args)?;
    Ok(Value::Int(if x == 7 { 15 } else { x * 2 }))
}

/// A problem over `0..n` with no expected fingerprint.
pub fn int_problem(name: &str, n: i64) -> Problem {
    Problem::new(name, int_cases(n), None)
}
