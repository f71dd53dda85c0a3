use form_sync_path::{parse_path, Path, PathError, PathStore, Segment};
use proptest::prelude::*;
use serde_json::{json, Value};

fn p(s: &str) -> Path {
    parse_path(s).unwrap_or_else(|e| panic!("parse failed for '{s}': {e}"))
}

#[test]
fn store_pruning_matrix() {
    // (initial, path to unset, expected)
    let cases = [
        (json!({"a": {"b": {"c": 1}}}), "a.b.c", json!({})),
        (json!({"a": {"b": {"c": 1}}, "z": 0}), "a.b.c", json!({"z": 0})),
        (json!({"a": {"b": {"c": 1, "d": 2}}}), "a.b.c", json!({"a": {"b": {"d": 2}}})),
        (
            json!({"test": [{"name": {"required": true}}, null]}),
            "test[0].name",
            json!({}),
        ),
        (
            json!({"test": [{"name": true, "age": true}]}),
            "test[0].name",
            json!({"test": [{"age": true}]}),
        ),
        (
            json!({"test": [{"name": true}, {"name": true}]}),
            "test[0]",
            json!({"test": [null, {"name": true}]}),
        ),
        (json!({"a": [["x"]]}), "a[0][0]", json!({})),
        (json!({"a": 1}), "a", json!({})),
    ];

    for (initial, path, expected) in cases {
        let Value::Object(map) = initial else { unreachable!() };
        let mut store = PathStore::from(map);
        store.unset(&p(path));
        assert_eq!(store.as_value(), &expected, "unset {path}");
    }
}

#[test]
fn store_pruned_branch_reads_as_absent() {
    let mut store = PathStore::new();
    store.set(&p("a.b.c"), json!("x"));
    store.unset(&p("a.b.c"));
    assert_eq!(store.get(&p("a")), None);
    assert_eq!(store.get(&p("a.b")), None);
}

#[test]
fn store_writes_do_not_disturb_siblings() {
    let mut store = PathStore::new();
    store.set(&p("addresses[0].city"), json!("Oslo"));
    store.set(&p("addresses[1].city"), json!("Bergen"));
    store.set(&p("addresses[0].zip"), json!("0150"));
    store.set(&p("name"), json!("Kari"));

    assert_eq!(
        store.as_value(),
        &json!({
            "addresses": [{"city": "Oslo", "zip": "0150"}, {"city": "Bergen"}],
            "name": "Kari"
        })
    );
}

#[test]
fn path_parse_error_matrix() {
    let cases = [
        ("", PathError::EmptyPath),
        ("a..b", PathError::EmptySegment),
        ("a[1", PathError::UnclosedBracket),
        ("a[01]", PathError::InvalidIndex),
        ("a[1]x", PathError::UnexpectedChar('x')),
    ];
    for (input, err) in cases {
        assert_eq!(parse_path(input), Err(err), "input: {input}");
    }
}

fn segment_strategy() -> impl Strategy<Value = Segment> {
    prop_oneof![
        "[a-z]{1,4}".prop_map(Segment::Key),
        (0usize..4).prop_map(Segment::Index),
    ]
}

fn path_strategy() -> impl Strategy<Value = Path> {
    // A store path always starts with a key: the root is an object.
    ("[a-z]{1,4}", prop::collection::vec(segment_strategy(), 0..5)).prop_map(|(head, tail)| {
        let mut segments = vec![Segment::Key(head)];
        segments.extend(tail);
        Path::new(segments)
    })
}

proptest! {
    #[test]
    fn set_then_unset_leaves_no_empty_shells(path in path_strategy()) {
        let mut store = PathStore::new();
        store.set(&path, json!("leaf"));
        prop_assert_eq!(store.get(&path), Some(&json!("leaf")));
        store.unset(&path);
        prop_assert!(store.is_empty());
    }

    #[test]
    fn display_output_parses_back(path in path_strategy()) {
        prop_assert_eq!(parse_path(&path.to_string()).unwrap(), path);
    }
}
