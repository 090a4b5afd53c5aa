//! Ordering problems by where they are defined in a submission's source.

use std::collections::HashMap;

use crate::registry::Problem;

/// Map function names to the line on which they are defined.
///
/// Recognizes lines starting with `def name(`, `fn name(` or `pub fn name(`.
/// When a name is defined more than once the last definition wins and a
/// warning is logged.
pub fn source_positions(source: &str) -> HashMap<String, usize> {
    let mut positions = HashMap::new();
    for (lineno, line) in source.lines().enumerate() {
        let Some(rest) = ["def ", "fn ", "pub fn "]
            .iter()
            .find_map(|kw| line.strip_prefix(kw))
        else {
            continue;
        };
        let end = rest.find(['(', '<']).unwrap_or(rest.len());
        let name = rest[..end].trim();
        if name.is_empty() {
            continue;
        }
        if positions.insert(name.to_string(), lineno).is_some() {
            tracing::warn!(function = name, line = lineno + 1, "multiple definitions");
        }
    }
    positions
}

/// Stable-sort problems by definition position; unknown names go last in
/// registration order.
pub fn sort_by_source(problems: &mut [Problem], positions: &HashMap<String, usize>) {
    problems.sort_by_key(|p| positions.get(&p.name).copied().unwrap_or(usize::MAX));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::CaseSource;

    fn problem(name: &str) -> Problem {
        Problem::new(name, CaseSource::from_cases(Vec::new()), None)
    }

    #[test]
    fn test_positions() {
        let src = "import x\ndef beta(a):\n    pass\npub fn alpha<T>(x: T) {}\nfn gamma() {}\n";
        let pos = source_positions(src);
        assert_eq!(pos.get("beta"), Some(&1));
        assert_eq!(pos.get("alpha"), Some(&3));
        assert_eq!(pos.get("gamma"), Some(&4));
        assert_eq!(pos.len(), 3);
    }

    #[test]
    fn test_duplicate_last_wins() {
        let pos = source_positions("def f(x):\ndef f(y):\n");
        assert_eq!(pos.get("f"), Some(&1));
    }

    #[test]
    fn test_sort_keeps_registration_order_for_unknown() {
        let mut problems = vec![problem("a"), problem("b"), problem("c"), problem("d")];
        let pos = source_positions("def c():\ndef a():\n");
        sort_by_source(&mut problems, &pos);
        let names: Vec<&str> = problems.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b", "d"]);
    }
}
