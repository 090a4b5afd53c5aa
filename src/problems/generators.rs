//! Case generators for the catalog problems.

use crate::generator::{random_string, random_text, scale_random, DeterministicRng};
use crate::value::{Case, Value};

/// Suits in deck order.
pub const SUITS: [&str; 4] = ["clubs", "diamonds", "hearts", "spades"];

/// Ranks in ascending order.
pub const RANKS: [&str; 13] = [
    "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "jack", "queen",
    "king", "ace",
];

/// The 52 cards as `(rank, suit)` tuples, suit by suit.
pub fn deck() -> Vec<Value> {
    SUITS
        .iter()
        .flat_map(|suit| RANKS.iter().map(move |rank| Value::tuple([*rank, *suit])))
        .collect()
}

fn case1(a: impl Into<Value>) -> Case {
    Case::new(vec![a.into()])
}

fn case2(a: impl Into<Value>, b: impl Into<Value>) -> Case {
    Case::new(vec![a.into(), b.into()])
}

fn ints(items: &[i64]) -> Value {
    Value::list(items.iter().copied())
}

pub fn ryerson_letter_grade() -> impl Iterator<Item = Case> {
    (0..150i64).map(case1)
}

pub fn is_ascending(seed: u64) -> impl Iterator<Item = Case> {
    let mut rng = DeterministicRng::new(seed);
    (0..100i64).flat_map(move |i| {
        let mut batch = Vec::new();
        for _ in 0..10 {
            let mut items = vec![rng.randint(-(i + 2), i + 2)];
            for _ in 0..=i {
                let last = items[items.len() - 1];
                items.push(last + rng.randint(1, 20));
            }
            batch.push(case1(ints(&items)));
            if i > 2 {
                for _ in 0..rng.randint(0, 5) {
                    let idx = rng.randint(1, items.len() as i64 - 1) as usize;
                    items.swap(idx - 1, idx);
                    batch.push(case1(ints(&items)));
                }
            }
        }
        batch
    })
}

pub fn count_and_say(seed: u64) -> impl Iterator<Item = Case> {
    let mut rng = DeterministicRng::new(seed);
    let digits: Vec<char> = "0123456789".chars().collect();
    (0..1000).map(move |i| {
        if i % 4 == 3 {
            let n = rng.randint(1, 60) as usize;
            return case1(random_string(&digits, n, &mut rng));
        }
        let mut text = String::new();
        for _ in 0..rng.randint(1, 50) {
            let n = rng.randint(1, 20) as usize;
            let d = rng.choice(&digits).copied().unwrap_or('0');
            text.extend(std::iter::repeat(d).take(n));
        }
        case1(text)
    })
}

pub fn reverse_ascending_sublists(seed: u64) -> impl Iterator<Item = Case> {
    let mut rng = DeterministicRng::new(seed);
    (0..200i64).flat_map(move |i| {
        (0..5)
            .map(|_| {
                let items: Vec<i64> = (0..=i).map(|_| rng.randint(0, 2 * i)).collect();
                case1(ints(&items))
            })
            .collect::<Vec<_>>()
    })
}

pub fn safe_squares(seed: u64) -> impl Iterator<Item = Case> {
    let mut rng = DeterministicRng::new(seed);
    (0..1000).map(move |_| {
        let n = rng.randint(2, 20);
        let count = rng.randint(0, n * n - 3) as usize;
        let mut pieces: Vec<(i64, i64)> = Vec::with_capacity(count);
        while pieces.len() < count {
            let p = (rng.randint(0, n - 1), rng.randint(0, n - 1));
            if !pieces.contains(&p) {
                pieces.push(p);
            }
        }
        case2(n, Value::list(pieces))
    })
}

pub fn frequency_sort(seed: u64) -> impl Iterator<Item = Case> {
    let mut rng = DeterministicRng::new(seed);
    (0..300i64).map(move |i| {
        let n = 2 * i;
        let items: Vec<i64> = (0..n).map(|_| rng.randint(1, 2 + n / 2)).collect();
        case1(ints(&items))
    })
}

pub fn give_change(seed: u64) -> impl Iterator<Item = Case> {
    let mut rng = DeterministicRng::new(seed);
    let mut coins: Vec<i64> = vec![1];
    for _ in 0..10 {
        let last = coins[coins.len() - 1];
        coins.push(last + rng.randint(1, 1 + last));
    }
    (0..100).flat_map(move |_| {
        let mut batch = Vec::new();
        for j in 1..10 {
            let mut used = rng.sample(&coins, j);
            used.sort_unstable_by(|a, b| b.cmp(a));
            if used.last().is_some_and(|&c| c > 1) {
                used.push(1);
            }
            let largest = used[0];
            let mut amount = 1;
            while amount < 5 * largest {
                batch.push(case2(amount, ints(&used)));
                amount += rng.randint(1, 2 + 2 * amount / 3);
            }
        }
        batch
    })
}

pub fn running_median_of_three(seed: u64) -> impl Iterator<Item = Case> {
    let mut rng = DeterministicRng::new(seed);
    let fixed = vec![case1(ints(&[])), case1(ints(&[42]))];
    fixed.into_iter().chain((0..500i64).map(move |i| {
        let n = i + 2;
        let items: Vec<i64> = (0..n).map(|_| rng.randint(1, n)).collect();
        case1(ints(&items))
    }))
}

pub fn collapse_intervals(seed: u64) -> impl Iterator<Item = Case> {
    let mut rng = DeterministicRng::new(seed);
    (0..300i64).map(move |i| {
        let mut items = Vec::new();
        let mut curr = 1;
        for _ in 0..rng.randint(1, i + 3) {
            for _ in 0..rng.randint(1, 5) {
                items.push(curr);
                curr += 1;
            }
            curr += rng.randint(1, 10);
        }
        case1(ints(&items))
    })
}

pub fn count_divisibles_in_range(seed: u64) -> impl Iterator<Item = Case> {
    let vals = scale_random(seed, 2, 6).take(300);
    let divs = scale_random(seed, 2, 20);
    let mut prev: i64 = 0;
    vals.zip(divs).map(move |(v, k)| {
        let case = Case::new(vec![prev.into(), v.into(), k.into()]);
        prev = v;
        case
    })
}

pub fn hand_shape_distribution(seed: u64) -> impl Iterator<Item = Case> {
    let mut rng = DeterministicRng::new(seed);
    let deck = deck();
    let hands: Vec<Value> = (0..1000)
        .map(|_| Value::List(rng.sample(&deck, 13)))
        .collect();
    std::iter::once(case1(Value::List(hands)))
}

pub fn detab(seed: u64) -> impl Iterator<Item = Case> {
    let mut rng = DeterministicRng::new(seed);
    random_text(seed, 70).take(2000).map(move |line| {
        let n = rng.randint(1, 7);
        Case::new(vec![line.replace(' ', "\t").into(), n.into(), " ".into()])
    })
}
