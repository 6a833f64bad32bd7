//! # toml_fmt
//!
//! Format-preserving TOML serialization.
//!
//! This crate turns a fully-built in-memory TOML value tree into the text of
//! a TOML document. Unlike a canonical pretty-printer, every node of the
//! tree carries a format record (representation radix, quoting style,
//! inline vs. multiline layout, comments, indentation) and the serializer
//! reconciles those hints with TOML's grammar and its contextual
//! constraints (an array of tables needs a key path, dotted keys cannot
//! contain standard tables, inline containers cannot carry comments, and so
//! on).
//!
//! ## Quick start
//!
//! ```rust
//! use toml_fmt::toml;
//!
//! let doc = toml!({
//!     "title": "Example",
//!     "owner": {
//!         "name": "Tom",
//!         "dob": 1979
//!     }
//! });
//!
//! let text = toml_fmt::to_string(&doc).unwrap();
//! assert_eq!(text, "title = \"Example\"\n\n[owner]\nname = \"Tom\"\ndob = 1979\n");
//! ```
//!
//! ## Controlling layout
//!
//! Format records drive everything. The same tree with different records
//! produces different text:
//!
//! ```rust
//! use toml_fmt::{IntegerBase, IntegerFormat, TomlMap, Value};
//!
//! let mut table = TomlMap::new();
//! table.insert(
//!     "flags".to_string(),
//!     Value::integer_formatted(
//!         255,
//!         IntegerFormat {
//!             base: IntegerBase::Hex,
//!             width: 4,
//!             ..IntegerFormat::default()
//!         },
//!     ),
//! );
//!
//! assert_eq!(toml_fmt::to_string(&Value::table(table)).unwrap(), "flags = 0x00ff\n");
//! ```
//!
//! ## Dialects
//!
//! A [`TomlSpec`] selects the base TOML version and the extensions the
//! output may use; see the [`spec`] module. Everything defaults to plain
//! TOML 1.0.0.
//!
//! ## What this crate does not do
//!
//! There is no parser here, and no canonicalisation: two trees that encode
//! the same values with different format metadata serialize to different
//! (equally valid) documents. Payloads that TOML cannot represent at all,
//! such as a `'''` inside a multiline literal string, are the
//! caller's responsibility.

pub mod error;
pub mod format;
pub mod macros;
pub mod map;
pub mod ser;
pub mod spec;
pub mod value;

pub use error::{Error, ErrorKind, Result};
pub use format::{
    ArrayFormat, ArrayStyle, DateTimeFormat, DatetimeDelimiter, FloatStyle, FloatingFormat,
    IndentChar, IntegerBase, IntegerFormat, StringFormat, StringStyle, TableFormat, TableStyle,
};
pub use map::TomlMap;
pub use ser::{Serializer, INLINE_ARRAY_LIMIT};
pub use spec::{TomlSpec, TomlVersion};
pub use value::{Comments, SourceLocation, Value, ValueKind};

use std::io;

/// Serializes a value to a TOML document under the default dialect
/// (TOML 1.0.0, no extensions).
///
/// For a root table, comments attached to the table itself are emitted at
/// the top of the document.
///
/// # Examples
///
/// ```rust
/// use toml_fmt::{TomlMap, Value};
///
/// let mut table = TomlMap::new();
/// table.insert("x".to_string(), Value::integer(42));
///
/// assert_eq!(toml_fmt::to_string(&Value::table(table)).unwrap(), "x = 42\n");
/// ```
///
/// # Errors
///
/// Returns an error if the tree asks for something its dialect or the TOML
/// grammar cannot express; see [`ErrorKind`].
pub fn to_string(value: &Value) -> Result<String> {
    to_string_with_spec(value, TomlSpec::default())
}

/// Serializes a value to a TOML document under an explicit dialect.
///
/// # Examples
///
/// ```rust
/// use toml_fmt::{TomlSpec, Value};
///
/// let spec = TomlSpec::v1_0().with_null_value(true);
/// assert_eq!(toml_fmt::to_string_with_spec(&Value::empty(), spec).unwrap(), "null");
/// ```
///
/// # Errors
///
/// Returns an error if the tree asks for something its dialect or the TOML
/// grammar cannot express.
pub fn to_string_with_spec(value: &Value, spec: TomlSpec) -> Result<String> {
    let mut serializer = Serializer::new(spec);
    serializer.serialize(value)
}

/// Serializes a value reachable through a single key.
///
/// Some layouts only exist relative to a key: an array of tables emits
/// `[[key]]` headers and a dotted table emits `key.child = value` lines.
/// Those layouts fail with [`ErrorKind::MissingKey`] at the root unless
/// serialized through this function (or [`to_string_with_path`]).
///
/// # Examples
///
/// ```rust
/// use toml_fmt::{toml, TomlSpec};
///
/// let fruit = toml!([{"name": "apple"}, {"name": "banana"}]);
/// let text = toml_fmt::to_string_with_key("fruit", &fruit, TomlSpec::v1_0()).unwrap();
/// assert_eq!(text, "[[fruit]]\nname = \"apple\"\n[[fruit]]\nname = \"banana\"\n");
/// ```
///
/// # Errors
///
/// Returns an error if the tree asks for something its dialect or the TOML
/// grammar cannot express.
pub fn to_string_with_key(key: &str, value: &Value, spec: TomlSpec) -> Result<String> {
    let mut serializer = Serializer::new(spec);
    serializer.serialize_keyed(key, value)
}

/// Serializes a value reachable through an explicit key path.
///
/// Like [`to_string_with_key`], but the headers name the whole path, e.g.
/// `[[servers.production]]`.
///
/// # Errors
///
/// Returns an error if the tree asks for something its dialect or the TOML
/// grammar cannot express.
pub fn to_string_with_path(path: &[String], value: &Value, spec: TomlSpec) -> Result<String> {
    let mut serializer = Serializer::new(spec);
    serializer.serialize_at(path, value)
}

/// Serializes a value and writes the document to `writer`, under the
/// default dialect.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
pub fn to_writer<W>(writer: W, value: &Value) -> Result<()>
where
    W: io::Write,
{
    to_writer_with_spec(writer, value, TomlSpec::default())
}

/// Serializes a value and writes the document to `writer`, under an
/// explicit dialect.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
pub fn to_writer_with_spec<W>(mut writer: W, value: &Value, spec: TomlSpec) -> Result<()>
where
    W: io::Write,
{
    let document = to_string_with_spec(value, spec)?;
    writer
        .write_all(document.as_bytes())
        .map_err(|e| Error::io(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_table() {
        let doc = toml!({
            "x": 42,
            "name": "Alice",
            "active": true
        });

        assert_eq!(
            to_string(&doc).unwrap(),
            "x = 42\nname = \"Alice\"\nactive = true\n"
        );
    }

    #[test]
    fn test_sub_table_gets_header() {
        let doc = toml!({
            "x": 1,
            "server": {
                "host": "localhost"
            }
        });

        assert_eq!(
            to_string(&doc).unwrap(),
            "x = 1\n\n[server]\nhost = \"localhost\"\n"
        );
    }

    #[test]
    fn test_empty_value_requires_extension() {
        assert!(to_string(&Value::empty()).is_err());
        let spec = TomlSpec::v1_0().with_null_value(true);
        assert_eq!(to_string_with_spec(&Value::empty(), spec).unwrap(), "null");
    }

    #[test]
    fn test_to_writer() {
        let doc = toml!({ "x": 1 });
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &doc).unwrap();
        assert_eq!(buffer, b"x = 1\n");
    }

    #[test]
    fn test_path_prefix_names_headers() {
        let element = toml!({ "host": "a" });
        let path = vec!["servers".to_string(), "production".to_string()];
        let text = to_string_with_path(&path, &Value::array(vec![element]), TomlSpec::v1_0())
            .unwrap();
        assert_eq!(text, "[[servers.production]]\nhost = \"a\"\n");
    }
}
