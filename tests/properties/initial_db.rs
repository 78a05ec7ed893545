//! Property tests for initial-db parsing and canonical JSON.

use proptest::prelude::*;
use serde_json::{Map, Value};

use nbport::domain::services::{canonical_json, parse_initial_db};

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "-?[1-9][0-9]{20,28}".prop_map(|digits| serde_json::from_str::<Value>(&digits).unwrap()),
        "[A-Za-z0-9 '\"\\\\éü]{0,12}".prop_map(Value::String),
        Just(Value::Null),
    ]
}

fn json_value() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            proptest::collection::vec(("[a-z_]{1,8}", inner), 0..4)
                .prop_map(|pairs| Value::Object(pairs.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

fn json_object() -> impl Strategy<Value = Value> {
    proptest::collection::vec(("[a-z_]{1,8}", json_value()), 0..5)
        .prop_map(|pairs| Value::Object(pairs.into_iter().collect::<Map<_, _>>()))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Canonical JSON text parses back to the same value.
    #[test]
    fn property_canonical_json_round_trips(value in json_object()) {
        let text = canonical_json(&value);
        let parsed = parse_initial_db("x_initial_db", Some(&text)).unwrap();
        prop_assert_eq!(parsed, value);
    }

    /// PROPERTY: Surrounding whitespace never changes the parsed value.
    #[test]
    fn property_whitespace_is_ignored(value in json_object(), pad in "[ \t\n]{0,4}") {
        let text = format!("{pad}{}{pad}", canonical_json(&value));
        prop_assert_eq!(parse_initial_db("x_initial_db", Some(&text)).unwrap(), value);
    }

    /// PROPERTY: Integers wider than 64 bits keep every digit.
    #[test]
    fn property_wide_integers_are_exact(digits in "-?[1-9][0-9]{20,28}") {
        let text = format!("{{\"id\": {digits}}}");
        let parsed = parse_initial_db("x_initial_db", Some(&text)).unwrap();
        prop_assert_eq!(canonical_json(&parsed), format!("{{\"id\":{digits}}}"));
    }

    /// PROPERTY: Parsing never panics on arbitrary text.
    #[test]
    fn property_parse_never_panics(text in ".{0,40}") {
        let _ = parse_initial_db("x_initial_db", Some(&text));
    }
}
