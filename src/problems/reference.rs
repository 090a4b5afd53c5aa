//! Trusted implementations of the catalog problems.
//!
//! These produce the golden record and serve as the model side of a
//! discrepancy search.

use std::collections::BTreeMap;

use super::args::{int_arg, int_list_arg, pair_list_arg, seq_arg, str_arg};
use super::generators::SUITS;
use crate::registry::Submission;
use crate::value::{CallOutcome, Failure, Value};

const GRADE_BANDS: [(i64, &str); 12] = [
    (90, "A+"),
    (85, "A"),
    (80, "A-"),
    (77, "B+"),
    (73, "B"),
    (70, "B-"),
    (67, "C+"),
    (63, "C"),
    (60, "C-"),
    (57, "D+"),
    (53, "D"),
    (50, "D-"),
];

pub(crate) fn letter_grade(pct: i64) -> &'static str {
    GRADE_BANDS
        .iter()
        .find(|(lo, _)| pct >= *lo)
        .map_or("F", |(_, grade)| *grade)
}

pub fn ryerson_letter_grade(args: Vec<Value>) -> CallOutcome {
    Ok(letter_grade(int_arg(&args, 0)?).into())
}

pub fn is_ascending(args: Vec<Value>) -> CallOutcome {
    let items = int_list_arg(&args, 0)?;
    Ok(items.windows(2).all(|w| w[0] < w[1]).into())
}

/// Run-length description of a digit string, e.g. `"2211"` becomes `"2221"`.
pub(crate) fn say(digits: &str) -> String {
    let mut out = String::new();
    let mut chars = digits.chars().peekable();
    while let Some(c) = chars.next() {
        let mut run = 1;
        while chars.peek() == Some(&c) {
            chars.next();
            run += 1;
        }
        out.push_str(&run.to_string());
        out.push(c);
    }
    out
}

pub fn count_and_say(args: Vec<Value>) -> CallOutcome {
    Ok(say(str_arg(&args, 0)?).into())
}

pub fn reverse_ascending_sublists(args: Vec<Value>) -> CallOutcome {
    let items = int_list_arg(&args, 0)?;
    let mut out = Vec::with_capacity(items.len());
    let mut run: Vec<i64> = Vec::new();
    for x in items {
        if run.last().is_some_and(|&last| last >= x) {
            out.extend(run.drain(..).rev());
        }
        run.push(x);
    }
    out.extend(run.into_iter().rev());
    Ok(out.into())
}

pub fn safe_squares(args: Vec<Value>) -> CallOutcome {
    let n = int_arg(&args, 0)?;
    let pieces = pair_list_arg(&args, 1)?;
    let mut rows: Vec<i64> = pieces.iter().map(|p| p.0).collect();
    let mut cols: Vec<i64> = pieces.iter().map(|p| p.1).collect();
    rows.sort_unstable();
    rows.dedup();
    cols.sort_unstable();
    cols.dedup();
    Ok(((n - rows.len() as i64) * (n - cols.len() as i64)).into())
}

pub(crate) fn counts(items: &[i64]) -> BTreeMap<i64, usize> {
    let mut counts = BTreeMap::new();
    for &x in items {
        *counts.entry(x).or_insert(0) += 1;
    }
    counts
}

pub fn frequency_sort(args: Vec<Value>) -> CallOutcome {
    let mut items = int_list_arg(&args, 0)?;
    let counts = counts(&items);
    items.sort_by(|a, b| counts[b].cmp(&counts[a]).then(a.cmp(b)));
    Ok(items.into())
}

pub fn give_change(args: Vec<Value>) -> CallOutcome {
    let mut amount = int_arg(&args, 0)?;
    let coins = int_list_arg(&args, 1)?;
    let mut change = Vec::new();
    for coin in coins.into_iter().filter(|&c| c > 0) {
        while amount >= coin {
            change.push(coin);
            amount -= coin;
        }
    }
    Ok(change.into())
}

pub fn running_median_of_three(args: Vec<Value>) -> CallOutcome {
    let items = int_list_arg(&args, 0)?;
    let medians: Vec<i64> = items
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            if i < 2 {
                return x;
            }
            let mut window = [items[i - 2], items[i - 1], x];
            window.sort_unstable();
            window[1]
        })
        .collect();
    Ok(medians.into())
}

pub fn collapse_intervals(args: Vec<Value>) -> CallOutcome {
    let items = int_list_arg(&args, 0)?;
    let mut parts: Vec<String> = Vec::new();
    let mut i = 0;
    while i < items.len() {
        let start = items[i];
        let mut end = start;
        while i + 1 < items.len() && items[i + 1] == end + 1 {
            i += 1;
            end = items[i];
        }
        parts.push(if start == end {
            start.to_string()
        } else {
            format!("{}-{}", start, end)
        });
        i += 1;
    }
    Ok(parts.join(",").into())
}

/// Suit counts of a hand, largest first.
pub(crate) fn hand_shape(hand: &[Value]) -> Result<[i64; 4], Failure> {
    let mut shape = [0i64; 4];
    for card in hand {
        let suit = match card.as_seq() {
            Some([_, suit]) => suit.as_str(),
            _ => None,
        }
        .ok_or_else(|| Failure::new("ValueError: card is not a (rank, suit) pair"))?;
        let idx = SUITS
            .iter()
            .position(|s| *s == suit)
            .ok_or_else(|| Failure::new(format!("KeyError: '{}'", suit)))?;
        shape[idx] += 1;
    }
    shape.sort_unstable_by(|a, b| b.cmp(a));
    Ok(shape)
}

pub fn hand_shape_distribution(args: Vec<Value>) -> CallOutcome {
    let mut dist: Vec<([i64; 4], i64)> = Vec::new();
    for hand in seq_arg(&args, 0)? {
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

pub fn detab(args: Vec<Value>) -> CallOutcome {
    let text = str_arg(&args, 0)?;
    let n = int_arg(&args, 1)?;
    let filler = str_arg(&args, 2)?;
    if n < 1 {
        return Err(Failure::new("ValueError: tab width must be positive"));
    }
    let n = n as usize;
    let mut out = String::new();
    let mut col = 0usize;
    for c in text.chars() {
        if c == '\t' {
            let pad = n - col % n;
            out.push_str(&filler.repeat(pad));
            col += pad;
        } else {
            out.push(c);
            col += 1;
        }
    }
    Ok(out.into())
}

pub fn count_divisibles_in_range(args: Vec<Value>) -> CallOutcome {
    let start = int_arg(&args, 0)?;
    let end = int_arg(&args, 1)?;
    let n = int_arg(&args, 2)?;
    if n == 0 {
        return Err(Failure::new("ZeroDivisionError: integer division by zero"));
    }
    let below = |x: i64| x.div_euclid(n);
    let count = if end < start {
        0
    } else {
        below(end) - below(start.saturating_sub(1))
    };
    Ok(count.into())
}

/// Every catalog function, under the given submission name.
pub fn submission(name: &str) -> Submission {
    Submission::new(name)
        .with("ryerson_letter_grade", ryerson_letter_grade)
        .with("is_ascending", is_ascending)
        .with("count_and_say", count_and_say)
        .with("reverse_ascending_sublists", reverse_ascending_sublists)
        .with("safe_squares", safe_squares)
        .with("frequency_sort", frequency_sort)
        .with("give_change", give_change)
        .with("running_median_of_three", running_median_of_three)
        .with("collapse_intervals", collapse_intervals)
        .with("hand_shape_distribution", hand_shape_distribution)
        .with("detab", detab)
        .with("count_divisibles_in_range", count_divisibles_in_range)
}
