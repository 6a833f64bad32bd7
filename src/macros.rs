/// Builds a [`Value`](crate::Value) tree from an inline literal, with
/// default format records on every node.
///
/// ```rust
/// use toml_fmt::toml;
///
/// let doc = toml!({
///     "name": "Alice",
///     "age": 30,
///     "tags": ["admin", "ops"]
/// });
/// assert!(doc.is_table());
/// ```
#[macro_export]
macro_rules! toml {
    // the empty value; only serializable with the null extension
    (null) => {
        $crate::Value::empty()
    };

    (true) => {
        $crate::Value::boolean(true)
    };

    (false) => {
        $crate::Value::boolean(false)
    };

    ([]) => {
        $crate::Value::array(::std::vec::Vec::new())
    };

    ([ $($element:tt),* $(,)? ]) => {
        $crate::Value::array(::std::vec![$($crate::toml!($element)),*])
    };

    ({}) => {
        $crate::Value::table($crate::TomlMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut table = $crate::TomlMap::new();
        $(
            table.insert($key.to_string(), $crate::toml!($value));
        )*
        $crate::Value::table(table)
    }};

    // fallback: anything with a From<_> for Value
    ($other:expr) => {
        $crate::Value::from($other)
    };
}

#[cfg(test)]
mod tests {
    use crate::Value;

    #[test]
    fn test_toml_macro_primitives() {
        assert_eq!(toml!(null), Value::empty());
        assert_eq!(toml!(true), Value::boolean(true));
        assert_eq!(toml!(false), Value::boolean(false));
        assert_eq!(toml!(42), Value::integer(42));
        assert_eq!(toml!(3.5), Value::floating(3.5));
        assert_eq!(toml!("hello"), Value::string("hello"));
    }

    #[test]
    fn test_toml_macro_arrays() {
        assert_eq!(toml!([]), Value::array(vec![]));

        let array = toml!([1, 2, 3]);
        let elements = array.as_array().unwrap();
        assert_eq!(elements.len(), 3);
        assert_eq!(elements[0], Value::integer(1));
        assert_eq!(elements[2], Value::integer(3));
    }

    #[test]
    fn test_toml_macro_tables() {
        assert_eq!(toml!({}), Value::table(crate::TomlMap::new()));

        let doc = toml!({
            "name": "Alice",
            "age": 30
        });

        let table = doc.as_table().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("name"), Some(&Value::string("Alice")));
        assert_eq!(table.get("age"), Some(&Value::integer(30)));
    }

    #[test]
    fn test_toml_macro_nesting() {
        let doc = toml!({
            "server": {
                "host": "localhost",
                "ports": [8001, 8002]
            }
        });

        let server = doc.as_table().unwrap().get("server").unwrap();
        let ports = server.as_table().unwrap().get("ports").unwrap();
        assert_eq!(ports.as_array().unwrap().len(), 2);
    }
}
