//! Building blocks shared by case generators.

use super::rng::DeterministicRng;

const LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const PUNCTUATION: &str = ".,!?";

/// Lines produced by [`random_text`].
pub const TEXT_LINES: usize = 10_000;

/// Unbounded sequence of exponentially growing integers.
///
/// Each step adds a random amount in `1..=scale`; after every `skip` steps
/// the scale is multiplied by its original value. Callers truncate with
/// `take`. Values saturate at `i64::MAX` instead of wrapping.
pub fn scale_random(seed: u64, scale: i64, skip: usize) -> impl Iterator<Item = i64> {
    let mut rng = DeterministicRng::new(seed);
    let orig = scale.max(1);
    let mut scale = orig;
    let mut curr: i64 = 1;
    let mut count = 0usize;
    std::iter::from_fn(move || {
        curr = curr.saturating_add(rng.randint(1, scale));
        count += 1;
        if count == skip {
            scale = scale.saturating_mul(orig);
            count = 0;
        }
        Some(curr)
    })
}

/// Lines of random words, each at least `width` characters long.
///
/// Words are 1 to 20 letters of mixed case; one word in five is followed by
/// punctuation.
pub fn random_text(seed: u64, width: usize) -> impl Iterator<Item = String> {
    let mut rng = DeterministicRng::new(seed);
    let letters: Vec<char> = LETTERS.chars().collect();
    let punct: Vec<char> = PUNCTUATION.chars().collect();
    (0..TEXT_LINES).map(move |_| {
        let mut line = String::new();
        while line.chars().count() < width {
            if !line.is_empty() {
                line.push(' ');
            }
            let len = rng.randint(1, 20) as usize;
            line.push_str(&random_string(&letters, len, &mut rng));
            if rng.chance(20) {
                if let Some(c) = rng.choice(&punct) {
                    line.push(*c);
                }
            }
        }
        line
    })
}

/// A string of `n` characters drawn from `alphabet`.
pub fn random_string(alphabet: &[char], n: usize, rng: &mut DeterministicRng) -> String {
    (0..n).filter_map(|_| rng.choice(alphabet).copied()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_random_grows() {
        let values: Vec<i64> = scale_random(12345, 5, 10).take(100).collect();
        assert_eq!(values.len(), 100);
        assert!(values.windows(2).all(|w| w[0] < w[1]));
        assert!(values[99] > values[9] * 2);
    }

    #[test]
    fn test_scale_random_deterministic() {
        let a: Vec<i64> = scale_random(1, 3, 4).take(50).collect();
        let b: Vec<i64> = scale_random(1, 3, 4).take(50).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_text_lines() {
        let lines: Vec<String> = random_text(12345, 70).take(20).collect();
        for line in &lines {
            assert!(line.chars().count() >= 70);
            assert!(!line.starts_with(' '));
        }
        assert_eq!(random_text(1, 10).count(), TEXT_LINES);
    }

    #[test]
    fn test_random_string_alphabet() {
        let mut rng = DeterministicRng::new(5);
        let s = random_string(&['a', 'b'], 30, &mut rng);
        assert_eq!(s.len(), 30);
        assert!(s.chars().all(|c| c == 'a' || c == 'b'));
    }
}
