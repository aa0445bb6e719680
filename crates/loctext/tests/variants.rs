//! Integration tests for variant groups and positional values.

use std::collections::BTreeMap;

use loctext::{SharedRng, Store, Subject, Value};

fn seeded_store(seed: u64, resources: &str) -> Store {
    let mut store = Store::builder().rng(SharedRng::seeded(seed)).build();
    store.load_str("variants.hcl", resources).unwrap();
    store
}

const GROUP: &str = r#"locale { pick = ["red", "green", "blue"] }"#;

#[test]
fn variant_group_is_roughly_uniform() {
    let store = seeded_store(12345, GROUP);
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for _ in 0..1000 {
        *counts
            .entry(store.lookup("core.locale.pick", Subject::None))
            .or_default() += 1;
    }

    assert_eq!(
        counts.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["blue", "green", "red"]
    );
    for (member, count) in &counts {
        assert!(
            (250..=420).contains(count),
            "{member} drawn {count} times out of 1000"
        );
    }
}

#[test]
fn same_seed_same_sequence() {
    let a = seeded_store(99, GROUP);
    let b = seeded_store(99, GROUP);
    let draw = |store: &Store| -> Vec<String> {
        (0..50)
            .map(|_| store.lookup("core.locale.pick", Subject::None))
            .collect()
    };
    assert_eq!(draw(&a), draw(&b));
}

#[test]
fn selection_is_not_cached() {
    let store = seeded_store(3, GROUP);
    let draws: Vec<String> = (0..30)
        .map(|_| store.lookup("core.locale.pick", Subject::None))
        .collect();
    assert!(draws.iter().any(|draw| draw != &draws[0]));
}

#[test]
fn members_are_evaluated_against_the_subject() {
    let store = seeded_store(
        1,
        r#"locale { pick = ["${is(_1)}", "${is(_1)}!"] }"#,
    );
    for _ in 0..20 {
        let text = store.lookup("core.locale.pick", Subject::Bool(true));
        assert!(text == "are" || text == "are!", "unexpected {text}");
    }
}

// =========================================================================
// Positional values
// =========================================================================

const POSITIONAL: &str = r#"
locale {
    addressee = "[${_1}]"
    counted   = "${_2} x ${_3}"
    missing   = "[${_5}]"
    wrapped   = "(${_2})"
    item {
        sword = "a sword"
    }
}
"#;

#[test]
fn first_positional_is_the_addressee() {
    let store = seeded_store(0, POSITIONAL);
    assert_eq!(store.lookup("core.locale.addressee", Subject::None), "[you]");
    assert_eq!(
        store.lookup("core.locale.addressee", Subject::Bool(false)),
        "[false]"
    );
}

#[test]
fn caller_values_bind_from_two() {
    let store = seeded_store(0, POSITIONAL);
    let args = [Value::from(3), Value::from("apples")];
    assert_eq!(
        store.lookup_with("core.locale.counted", Subject::None, &args),
        "3 x apples"
    );
}

#[test]
fn unbound_positional_is_empty() {
    let store = seeded_store(0, POSITIONAL);
    assert_eq!(store.lookup("core.locale.missing", Subject::None), "[]");
}

#[test]
fn key_values_are_rendered_through_the_store() {
    let store = seeded_store(0, POSITIONAL);
    let args = [Value::key("core.locale.item.sword")];
    assert_eq!(
        store.lookup_with("core.locale.wrapped", Subject::None, &args),
        "(a sword)"
    );
}

#[test]
fn self_reference_degrades_to_empty() {
    let store = seeded_store(0, POSITIONAL);
    let args = [Value::key("core.locale.wrapped")];
    assert_eq!(
        store.lookup_with("core.locale.wrapped", Subject::None, &args),
        "()"
    );
}

#[test]
fn depth_limit_degrades_to_empty() {
    let mut store = Store::builder().max_depth(1).build();
    store.load_str("depth.hcl", POSITIONAL).unwrap();
    let args = [Value::key("core.locale.item.sword")];
    assert_eq!(
        store.lookup_with("core.locale.wrapped", Subject::None, &args),
        "()"
    );
}
