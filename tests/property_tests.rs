//! Property-based tests: determinism, escape round-trips, digit-grouping
//! idempotence and the inline-array length rule across generated inputs.

use proptest::prelude::*;
use toml_fmt::{
    IntegerBase, IntegerFormat, Serializer, TomlMap, TomlSpec, Value, INLINE_ARRAY_LIMIT,
};

/// Reverses the basic-string escapes of the default dialect.
fn unescape(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('b') => out.push('\u{8}'),
            Some('t') => out.push('\t'),
            Some('f') => out.push('\u{c}'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('u') => {
                let digits: String = chars.by_ref().take(4).collect();
                let code = u32::from_str_radix(&digits, 16).expect("4 hex digits");
                out.push(char::from_u32(code).expect("valid scalar"));
            }
            other => panic!("unexpected escape {:?}", other),
        }
    }
    out
}

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        any::<bool>().prop_map(Value::boolean),
        any::<i64>().prop_map(Value::integer),
        any::<f64>().prop_map(Value::floating),
        "[a-zA-Z0-9 _.-]{0,16}".prop_map(|s| Value::string(s)),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::array),
            prop::collection::vec(("[a-z]{1,8}", inner), 0..4)
                .prop_map(|entries| Value::table(entries.into_iter().collect::<TomlMap>())),
        ]
    })
}

proptest! {
    /// Two emits of the same tree are byte-for-byte identical, whether the
    /// serializer instance is reused or fresh.
    #[test]
    fn prop_deterministic(value in arb_value()) {
        let first = toml_fmt::to_string(&value);
        let second = toml_fmt::to_string(&value);
        prop_assert_eq!(first.as_ref().ok(), second.as_ref().ok());
        prop_assert_eq!(first.is_err(), second.is_err());

        let mut reused = Serializer::new(TomlSpec::v1_0());
        let third = reused.serialize(&value);
        let fourth = reused.serialize(&value);
        prop_assert_eq!(third.as_ref().ok(), first.as_ref().ok());
        prop_assert_eq!(fourth.as_ref().ok(), first.as_ref().ok());
    }

    /// Unescaping a rendered basic string recovers the payload exactly.
    #[test]
    fn prop_basic_string_escape_roundtrip(payload in any::<String>()) {
        let rendered = toml_fmt::to_string(&Value::string(payload.clone())).unwrap();
        prop_assert!(rendered.starts_with('"') && rendered.ends_with('"'));
        // escapes keep the whole string on one line
        prop_assert!(!rendered.contains('\n'));
        let body = &rendered[1..rendered.len() - 1];
        prop_assert_eq!(unescape(body), payload);
    }

    /// A multiline basic string never contains three consecutive quotes
    /// inside its delimiters.
    #[test]
    fn prop_ml_basic_never_emits_quote_runs(payload in "[a\"\\\\]{0,24}") {
        use toml_fmt::{StringFormat, StringStyle};
        let value = Value::string_formatted(
            payload,
            StringFormat { style: StringStyle::MlBasic, start_with_newline: false },
        );
        let rendered = toml_fmt::to_string(&value).unwrap();
        let body = &rendered[3..rendered.len() - 3];
        prop_assert!(!body.contains("\"\"\""));
    }

    /// Removing the underscores from a grouped decimal recovers the value.
    #[test]
    fn prop_decimal_grouping_reparses(value in any::<i64>(), spacer in 1usize..=4) {
        let formatted = toml_fmt::to_string(&Value::integer_formatted(
            value,
            IntegerFormat { spacer, ..IntegerFormat::default() },
        ))
        .unwrap();
        let plain: String = formatted.chars().filter(|c| *c != '_').collect();
        prop_assert_eq!(plain.parse::<i64>().unwrap(), value);
    }

    /// Removing the underscores from a grouped hex integer recovers the
    /// magnitude.
    #[test]
    fn prop_hex_grouping_reparses(value in any::<u32>(), spacer in 1usize..=4) {
        let formatted = toml_fmt::to_string(&Value::integer_formatted(
            i64::from(value),
            IntegerFormat { base: IntegerBase::Hex, spacer, ..IntegerFormat::default() },
        ))
        .unwrap();
        let digits: String = formatted
            .strip_prefix("0x")
            .unwrap()
            .chars()
            .filter(|c| *c != '_')
            .collect();
        prop_assert_eq!(u32::from_str_radix(&digits, 16).unwrap(), value);
    }

    /// An automatically-laid-out array of single-digit integers stays on
    /// one line exactly while its approximate length fits the budget.
    #[test]
    fn prop_inline_array_length_rule(len in 1usize..=40) {
        let elements = (0..len).map(|i| Value::integer((i % 10) as i64)).collect();
        let rendered = toml_fmt::to_string(&Value::array(elements)).unwrap();

        // each element contributes one digit plus `, `; the budget trips
        // once the running total passes INLINE_ARRAY_LIMIT
        let inline_capacity = (INLINE_ARRAY_LIMIT + 2) / 3;
        if len <= inline_capacity {
            prop_assert!(!rendered.contains('\n'), "expected one line: {}", rendered);
        } else {
            prop_assert!(rendered.contains('\n'), "expected multiline: {}", rendered);
        }
    }
}
