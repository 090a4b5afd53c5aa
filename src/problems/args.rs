//! Argument extraction for catalog implementations.
//!
//! A wrong argument type is reported as a failure result, the same way a
//! dynamically typed implementation would raise on it.

use crate::value::{Failure, Value};

fn arg(args: &[Value], i: usize) -> Result<&Value, Failure> {
    args.get(i)
        .ok_or_else(|| Failure::new(format!("TypeError: missing argument {}", i)))
}

/// Integer argument at position `i`.
pub fn int_arg(args: &[Value], i: usize) -> Result<i64, Failure> {
    arg(args, i)?
        .as_int()
        .ok_or_else(|| Failure::new(format!("TypeError: argument {} is not an int", i)))
}

/// String argument at position `i`.
pub fn str_arg(args: &[Value], i: usize) -> Result<&str, Failure> {
    arg(args, i)?
        .as_str()
        .ok_or_else(|| Failure::new(format!("TypeError: argument {} is not a str", i)))
}

/// List or tuple argument at position `i`.
pub fn seq_arg(args: &[Value], i: usize) -> Result<&[Value], Failure> {
    arg(args, i)?
        .as_seq()
        .ok_or_else(|| Failure::new(format!("TypeError: argument {} is not a sequence", i)))
}

/// List of integers at position `i`.
pub fn int_list_arg(args: &[Value], i: usize) -> Result<Vec<i64>, Failure> {
    seq_arg(args, i)?
        .iter()
        .map(|v| {
            v.as_int()
                .ok_or_else(|| Failure::new(format!("TypeError: argument {} holds a non-int", i)))
        })
        .collect()
}

/// List of integer pairs at position `i`.
pub fn pair_list_arg(args: &[Value], i: usize) -> Result<Vec<(i64, i64)>, Failure> {
    seq_arg(args, i)?
        .iter()
        .map(|v| match v.as_seq() {
            Some([a, b]) => match (a.as_int(), b.as_int()) {
                (Some(a), Some(b)) => Ok((a, b)),
                _ => Err(Failure::new("TypeError: pair holds a non-int")),
            },
            _ => Err(Failure::new(format!(
                "ValueError: argument {} holds a non-pair",
                i
            ))),
        })
        .collect()
}
