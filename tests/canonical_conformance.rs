//! Canonicalization and fingerprint properties.
//!
//! Results that differ only in the insertion order of sets and mappings must
//! produce the same canonical text, and therefore the same fingerprint.

mod common;

use common::{init_test_logging, test_proptest_config};
use grade_oracle::fingerprint::{display_digest, fingerprint_texts, matches_expected};
use grade_oracle::value::{canonically_equal, outcome_text};
use grade_oracle::{canonical_text, canonicalize, Failure, Fingerprint, Value};
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_key() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::Int),
        "[a-z]{0,6}".prop_map(Value::Str),
        (any::<i32>(), "[a-z]{1,3}").prop_map(|(a, b)| Value::tuple([Value::from(a), b.into()])),
    ]
}

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::None),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        "[ -~]{0,12}".prop_map(Value::Str),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        arb_scalar(),
        prop::collection::vec(arb_scalar(), 0..8).prop_map(Value::List),
        prop::collection::vec(arb_key(), 0..8).prop_map(Value::set),
        prop::collection::vec((arb_key(), arb_scalar()), 0..8).prop_map(Value::map),
    ]
}

/// Distinct map entries plus a permutation of them.
fn arb_entries() -> impl Strategy<Value = (Vec<(Value, Value)>, Vec<(Value, Value)>)> {
    prop::collection::btree_map(any::<i64>(), "[a-z]{0,4}", 0..12).prop_flat_map(|m| {
        let entries: Vec<(Value, Value)> = m
            .into_iter()
            .map(|(k, v)| (Value::Int(k), Value::Str(v)))
            .collect();
        let shuffled = Just(entries.clone()).prop_shuffle();
        (Just(entries), shuffled)
    })
}

// ============================================================================
// Order Independence
// ============================================================================

proptest! {
    #![proptest_config(test_proptest_config(256))]

    /// Maps built in any insertion order canonicalize to the same text.
    #[test]
    fn map_order_independent((entries, shuffled) in arb_entries()) {
        init_test_logging();
        let a = Value::map(entries);
        let b = Value::map(shuffled);
        prop_assert_eq!(canonical_text(&a), canonical_text(&b));
        prop_assert!(canonically_equal(&a, &b));
    }

    /// Sets built in any insertion order canonicalize to the same text.
    #[test]
    fn set_order_independent(items in prop::collection::btree_set(any::<i64>(), 0..16)) {
        init_test_logging();
        let forward: Vec<i64> = items.iter().copied().collect();
        let backward: Vec<i64> = items.iter().rev().copied().collect();
        let a = Value::set(forward);
        let b = Value::set(backward);
        prop_assert_eq!(canonical_text(&a), canonical_text(&b));
    }

    /// Canonicalizing a canonical value changes nothing.
    #[test]
    fn canonicalize_idempotent(value in arb_value()) {
        let once = canonicalize(&value);
        let twice = canonicalize(&once);
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(canonical_text(&value), canonical_text(&once));
    }

    /// Lists are order sensitive.
    #[test]
    fn list_order_matters(items in prop::collection::btree_set(any::<i64>(), 2..10)) {
        let forward: Vec<i64> = items.iter().copied().collect();
        let backward: Vec<i64> = items.iter().rev().copied().collect();
        prop_assert_ne!(
            canonical_text(&Value::list(forward)),
            canonical_text(&Value::list(backward))
        );
    }
}

// ============================================================================
// Fingerprint
// ============================================================================

proptest! {
    #![proptest_config(test_proptest_config(256))]

    /// Same text sequence, same digest.
    #[test]
    fn fingerprint_deterministic(texts in prop::collection::vec("[ -~]{0,20}", 0..20)) {
        let a = fingerprint_texts(texts.iter().map(String::as_str));
        let b = fingerprint_texts(texts.iter().map(String::as_str));
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.len(), 64);
    }

    /// Changing any one text changes the digest.
    #[test]
    fn fingerprint_sensitive(
        texts in prop::collection::vec("[a-z]{0,20}", 1..20),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut changed = texts.clone();
        let i = pick.index(changed.len());
        changed[i].push('!');
        prop_assert_ne!(
            fingerprint_texts(texts.iter().map(String::as_str)),
            fingerprint_texts(changed.iter().map(String::as_str))
        );
    }

    /// Streaming absorption matches hashing the concatenation.
    #[test]
    fn fingerprint_is_hash_of_concatenation(texts in prop::collection::vec("[a-z]{0,8}", 0..10)) {
        let joined = texts.concat();
        prop_assert_eq!(
            fingerprint_texts(texts.iter().map(String::as_str)),
            fingerprint_texts([joined.as_str()])
        );
    }
}

// ============================================================================
// Worked Examples
// ============================================================================

#[test]
fn map_example_sorted_by_key() {
    let map = Value::map([(3, "c"), (1, "a"), (2, "b")]);
    assert_eq!(canonical_text(&map), "[(1, 'a'), (2, 'b'), (3, 'c')]");
}

#[test]
fn top_level_string_is_bare() {
    assert_eq!(canonical_text(&Value::from("A-")), "A-");
    assert_eq!(canonical_text(&Value::list(["A-"])), "['A-']");
}

#[test]
fn nested_maps_left_alone() {
    let inner = Value::map([(2, 0), (1, 0)]);
    let outer = Value::list([inner]);
    assert_eq!(canonicalize(&outer), outer);
}

#[test]
fn failure_text_carries_marker() {
    let text = outcome_text(&Err(Failure::new("ZeroDivisionError: division by zero")));
    assert_eq!(text, "CRASH! ZeroDivisionError: division by zero");
}

#[test]
fn incremental_digest_matches_batch() {
    let mut fp = Fingerprint::new();
    fp.absorb("[1, 2]");
    let partial = fp.hex_digest();
    fp.absorb("True");
    assert_eq!(fp.cases(), 2);
    assert_eq!(partial, fingerprint_texts(["[1, 2]"]));
    assert_eq!(fp.finalize(), fingerprint_texts(["[1, 2]", "True"]));
}

#[test]
fn expected_digest_prefix_rules() {
    let digest = fingerprint_texts(["x"]);
    assert_eq!(matches_expected(&digest, Some(&digest[..12])), Some(true));
    assert_eq!(
        matches_expected(&digest, Some(&digest[..12].to_uppercase())),
        Some(true)
    );
    assert!(digest.starts_with("2d711642b726b044"));
    assert_eq!(matches_expected(&digest, Some("ffffffff")), Some(false));
    assert_eq!(matches_expected(&digest, None), None);
    assert_eq!(matches_expected(&digest, Some("")), None);
    assert_eq!(display_digest(&digest).len(), 50);
}
