//! The TOML value tree.
//!
//! This module provides [`Value`], a node of a fully-built TOML document
//! tree. A node pairs its payload with a format record specific to its kind
//! (see [`crate::format`]) and carries two shared attributes: [`Comments`]
//! attached to the node and an opaque [`SourceLocation`] used in
//! diagnostics.
//!
//! ## Creating values
//!
//! ```rust
//! use toml_fmt::{Comments, Value};
//!
//! // From primitives
//! let flag = Value::boolean(true);
//! let count = Value::integer(42);
//! let name = Value::from("Alice");
//!
//! // With comments attached
//! let port = Value::integer(8080).with_comments(Comments::preserved(["the listen port"]));
//!
//! // Using the toml! macro
//! use toml_fmt::toml;
//! let doc = toml!({
//!     "name": "Alice",
//!     "age": 30
//! });
//! assert!(doc.is_table());
//! ```
//!
//! ## Inspecting values
//!
//! ```rust
//! use toml_fmt::Value;
//!
//! let value = Value::integer(42);
//! assert!(value.is_integer());
//! assert_eq!(value.as_integer(), Some(42));
//! assert_eq!(value.as_str(), None);
//! ```

use crate::format::{
    ArrayFormat, DateTimeFormat, FloatingFormat, IntegerFormat, StringFormat, TableFormat,
};
use crate::TomlMap;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Where a node came from in its source document.
///
/// Line and column are 1-based; `0` means unknown (e.g. a programmatically
/// built node). The location is carried through untouched and only ever
/// shows up in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    line: u32,
    column: u32,
}

impl SourceLocation {
    /// A location at the given 1-based line and column.
    #[must_use]
    pub fn new(line: u32, column: u32) -> Self {
        SourceLocation { line, column }
    }

    /// The location of a node that was not parsed from a document.
    #[must_use]
    pub fn unknown() -> Self {
        SourceLocation { line: 0, column: 0 }
    }

    /// Returns `true` if this location points into a document.
    #[must_use]
    pub fn is_known(&self) -> bool {
        self.line != 0
    }

    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[must_use]
    pub fn column(&self) -> u32 {
        self.column
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_known() {
            write!(f, "line {}, column {}", self.line, self.column)
        } else {
            f.write_str("unknown location")
        }
    }
}

/// Comment lines attached to a value.
///
/// Comments come in two modes: preserved comments are rendered into the
/// output wherever the layout has room for them (multiline tables and
/// arrays, multiline-oneline tables, the document root); discarded comments
/// render to nothing and keep no content.
///
/// # Examples
///
/// ```rust
/// use toml_fmt::Comments;
///
/// let kept = Comments::preserved(["# a note", "another note"]);
/// assert!(!kept.is_empty());
///
/// let dropped = Comments::Discarded;
/// assert!(dropped.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comments {
    /// Comment lines that are rendered into the output. A line may or may
    /// not include its leading `#` and trailing newline; both are
    /// normalised on emit.
    Preserved(Vec<String>),
    /// Comments were dropped when the tree was built; nothing is rendered.
    Discarded,
}

impl Comments {
    /// Preserved comments built from anything iterable over strings.
    #[must_use]
    pub fn preserved<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Comments::Preserved(lines.into_iter().map(Into::into).collect())
    }

    /// An empty, preserved comment set.
    #[must_use]
    pub fn none() -> Self {
        Comments::Preserved(Vec::new())
    }

    /// Returns `true` if nothing would be rendered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Comments::Preserved(lines) => lines.is_empty(),
            Comments::Discarded => true,
        }
    }

    /// The comment lines, empty for discarded comments.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        match self {
            Comments::Preserved(lines) => lines,
            Comments::Discarded => &[],
        }
    }
}

impl Default for Comments {
    fn default() -> Self {
        Comments::none()
    }
}

/// The payload of a [`Value`]: one variant per TOML type, each carrying its
/// format record where the type has one.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueKind {
    Boolean(bool),
    Integer(i64, IntegerFormat),
    Floating(f64, FloatingFormat),
    String(String, StringFormat),
    LocalDate(NaiveDate),
    LocalTime(NaiveTime, DateTimeFormat),
    LocalDateTime(NaiveDateTime, DateTimeFormat),
    OffsetDateTime(DateTime<FixedOffset>, DateTimeFormat),
    Array(Vec<Value>, ArrayFormat),
    Table(TomlMap, TableFormat),
    /// No value at all. Only representable in dialects with the null
    /// extension; serializing it otherwise is an error.
    Empty,
}

/// A node of a TOML document tree.
///
/// See the [module documentation](self) for an overview.
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    kind: ValueKind,
    comments: Comments,
    location: SourceLocation,
}

impl Value {
    /// Wraps a [`ValueKind`] with no comments and an unknown location.
    #[must_use]
    pub fn new(kind: ValueKind) -> Self {
        Value {
            kind,
            comments: Comments::none(),
            location: SourceLocation::unknown(),
        }
    }

    /// A boolean value.
    #[must_use]
    pub fn boolean(value: bool) -> Self {
        Value::new(ValueKind::Boolean(value))
    }

    /// An integer with the default (plain decimal) format.
    #[must_use]
    pub fn integer(value: i64) -> Self {
        Value::integer_formatted(value, IntegerFormat::default())
    }

    /// An integer with an explicit format record.
    #[must_use]
    pub fn integer_formatted(value: i64, format: IntegerFormat) -> Self {
        Value::new(ValueKind::Integer(value, format))
    }

    /// A float with the default (shortest round-trip) format.
    #[must_use]
    pub fn floating(value: f64) -> Self {
        Value::floating_formatted(value, FloatingFormat::default())
    }

    /// A float with an explicit format record.
    #[must_use]
    pub fn floating_formatted(value: f64, format: FloatingFormat) -> Self {
        Value::new(ValueKind::Floating(value, format))
    }

    /// A string with the default (basic, `"..."`) format.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Value::string_formatted(value, StringFormat::default())
    }

    /// A string with an explicit format record.
    #[must_use]
    pub fn string_formatted(value: impl Into<String>, format: StringFormat) -> Self {
        Value::new(ValueKind::String(value.into(), format))
    }

    /// A local date.
    #[must_use]
    pub fn local_date(date: NaiveDate) -> Self {
        Value::new(ValueKind::LocalDate(date))
    }

    /// A local time with the default format (seconds, no subseconds).
    #[must_use]
    pub fn local_time(time: NaiveTime) -> Self {
        Value::local_time_formatted(time, DateTimeFormat::default())
    }

    /// A local time with an explicit format record.
    #[must_use]
    pub fn local_time_formatted(time: NaiveTime, format: DateTimeFormat) -> Self {
        Value::new(ValueKind::LocalTime(time, format))
    }

    /// A local datetime with the default format (`T` separator, seconds).
    #[must_use]
    pub fn local_datetime(datetime: NaiveDateTime) -> Self {
        Value::local_datetime_formatted(datetime, DateTimeFormat::default())
    }

    /// A local datetime with an explicit format record.
    #[must_use]
    pub fn local_datetime_formatted(datetime: NaiveDateTime, format: DateTimeFormat) -> Self {
        Value::new(ValueKind::LocalDateTime(datetime, format))
    }

    /// An offset datetime with the default format.
    #[must_use]
    pub fn offset_datetime(datetime: DateTime<FixedOffset>) -> Self {
        Value::offset_datetime_formatted(datetime, DateTimeFormat::default())
    }

    /// An offset datetime with an explicit format record.
    #[must_use]
    pub fn offset_datetime_formatted(
        datetime: DateTime<FixedOffset>,
        format: DateTimeFormat,
    ) -> Self {
        Value::new(ValueKind::OffsetDateTime(datetime, format))
    }

    /// An array with the default (automatically chosen) layout.
    #[must_use]
    pub fn array(elements: Vec<Value>) -> Self {
        Value::array_formatted(elements, ArrayFormat::default())
    }

    /// An array with an explicit format record.
    #[must_use]
    pub fn array_formatted(elements: Vec<Value>, format: ArrayFormat) -> Self {
        Value::new(ValueKind::Array(elements, format))
    }

    /// A table with the default (multiline) layout.
    #[must_use]
    pub fn table(entries: TomlMap) -> Self {
        Value::table_formatted(entries, TableFormat::default())
    }

    /// A table with an explicit format record.
    #[must_use]
    pub fn table_formatted(entries: TomlMap, format: TableFormat) -> Self {
        Value::new(ValueKind::Table(entries, format))
    }

    /// The empty value.
    #[must_use]
    pub fn empty() -> Self {
        Value::new(ValueKind::Empty)
    }

    /// Attaches comments, replacing any existing ones.
    #[must_use]
    pub fn with_comments(mut self, comments: Comments) -> Self {
        self.comments = comments;
        self
    }

    /// Records a source location, replacing any existing one.
    #[must_use]
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }

    /// The payload and its format record.
    #[must_use]
    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    /// The comments attached to this node.
    #[must_use]
    pub fn comments(&self) -> &Comments {
        &self.comments
    }

    /// The comments attached to this node, mutably.
    pub fn comments_mut(&mut self) -> &mut Comments {
        &mut self.comments
    }

    /// The source location recorded on this node.
    #[must_use]
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    /// Returns `true` if this is a boolean.
    #[must_use]
    pub fn is_boolean(&self) -> bool {
        matches!(self.kind, ValueKind::Boolean(_))
    }

    /// Returns `true` if this is an integer.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        matches!(self.kind, ValueKind::Integer(..))
    }

    /// Returns `true` if this is a float.
    #[must_use]
    pub fn is_floating(&self) -> bool {
        matches!(self.kind, ValueKind::Floating(..))
    }

    /// Returns `true` if this is a string.
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self.kind, ValueKind::String(..))
    }

    /// Returns `true` if this is a local date.
    #[must_use]
    pub fn is_local_date(&self) -> bool {
        matches!(self.kind, ValueKind::LocalDate(_))
    }

    /// Returns `true` if this is a local time.
    #[must_use]
    pub fn is_local_time(&self) -> bool {
        matches!(self.kind, ValueKind::LocalTime(..))
    }

    /// Returns `true` if this is a local datetime.
    #[must_use]
    pub fn is_local_datetime(&self) -> bool {
        matches!(self.kind, ValueKind::LocalDateTime(..))
    }

    /// Returns `true` if this is an offset datetime.
    #[must_use]
    pub fn is_offset_datetime(&self) -> bool {
        matches!(self.kind, ValueKind::OffsetDateTime(..))
    }

    /// Returns `true` if this is an array.
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self.kind, ValueKind::Array(..))
    }

    /// Returns `true` if this is a table.
    #[must_use]
    pub fn is_table(&self) -> bool {
        matches!(self.kind, ValueKind::Table(..))
    }

    /// Returns `true` if this is the empty value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self.kind, ValueKind::Empty)
    }

    /// Returns `true` if this is a non-empty array whose elements are all
    /// tables, the shape required for `[[header]]` output.
    #[must_use]
    pub fn is_array_of_tables(&self) -> bool {
        match &self.kind {
            ValueKind::Array(elements, _) => {
                !elements.is_empty() && elements.iter().all(Value::is_table)
            }
            _ => false,
        }
    }

    /// If this is a boolean, returns it.
    #[must_use]
    pub fn as_boolean(&self) -> Option<bool> {
        match &self.kind {
            ValueKind::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// If this is an integer, returns it.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match &self.kind {
            ValueKind::Integer(i, _) => Some(*i),
            _ => None,
        }
    }

    /// If this is a float, returns it.
    #[must_use]
    pub fn as_floating(&self) -> Option<f64> {
        match &self.kind {
            ValueKind::Floating(f, _) => Some(*f),
            _ => None,
        }
    }

    /// If this is a string, returns a reference to it.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match &self.kind {
            ValueKind::String(s, _) => Some(s),
            _ => None,
        }
    }

    /// If this is a local date, returns it.
    #[must_use]
    pub fn as_local_date(&self) -> Option<&NaiveDate> {
        match &self.kind {
            ValueKind::LocalDate(d) => Some(d),
            _ => None,
        }
    }

    /// If this is a local time, returns it.
    #[must_use]
    pub fn as_local_time(&self) -> Option<&NaiveTime> {
        match &self.kind {
            ValueKind::LocalTime(t, _) => Some(t),
            _ => None,
        }
    }

    /// If this is a local datetime, returns it.
    #[must_use]
    pub fn as_local_datetime(&self) -> Option<&NaiveDateTime> {
        match &self.kind {
            ValueKind::LocalDateTime(dt, _) => Some(dt),
            _ => None,
        }
    }

    /// If this is an offset datetime, returns it.
    #[must_use]
    pub fn as_offset_datetime(&self) -> Option<&DateTime<FixedOffset>> {
        match &self.kind {
            ValueKind::OffsetDateTime(dt, _) => Some(dt),
            _ => None,
        }
    }

    /// If this is an array, returns its elements.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Value]> {
        match &self.kind {
            ValueKind::Array(elements, _) => Some(elements),
            _ => None,
        }
    }

    /// If this is a table, returns its entries.
    #[must_use]
    pub fn as_table(&self) -> Option<&TomlMap> {
        match &self.kind {
            ValueKind::Table(entries, _) => Some(entries),
            _ => None,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::empty()
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::boolean(value)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::integer(value as i64)
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::integer(value as i64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::integer(value as i64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::integer(value)
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::integer(value as i64)
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::integer(value as i64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::integer(value as i64)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::floating(value as f64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::floating(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::string(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::string(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::array(value)
    }
}

impl From<TomlMap> for Value {
    fn from(value: TomlMap) -> Self {
        Value::table(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::local_date(value)
    }
}

impl From<NaiveTime> for Value {
    fn from(value: NaiveTime) -> Self {
        Value::local_time(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::local_datetime(value)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Value::offset_datetime(value)
    }
}

impl Serialize for Value {
    /// Maps the tree onto the serde data model. Format records and comments
    /// are not representable there and are dropped; datetimes serialize as
    /// their TOML text.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match &self.kind {
            ValueKind::Boolean(b) => serializer.serialize_bool(*b),
            ValueKind::Integer(i, _) => serializer.serialize_i64(*i),
            ValueKind::Floating(f, _) => serializer.serialize_f64(*f),
            ValueKind::String(s, _) => serializer.serialize_str(s),
            ValueKind::LocalDate(d) => serializer.serialize_str(&crate::ser::format_local_date(d)),
            ValueKind::LocalTime(t, fmt) => {
                serializer.serialize_str(&crate::ser::format_local_time(t, fmt))
            }
            ValueKind::LocalDateTime(dt, fmt) => {
                serializer.serialize_str(&crate::ser::format_local_datetime(dt, fmt))
            }
            ValueKind::OffsetDateTime(dt, fmt) => {
                serializer.serialize_str(&crate::ser::format_offset_datetime(dt, fmt))
            }
            ValueKind::Array(elements, _) => {
                let mut seq = serializer.serialize_seq(Some(elements.len()))?;
                for element in elements {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            ValueKind::Table(entries, _) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            ValueKind::Empty => serializer.serialize_unit(),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    /// Builds a tree with default format records; any serde source works
    /// (e.g. `serde_json`). Strings stay strings, they are not sniffed for
    /// dates.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any TOML-representable value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Value::boolean(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Value::integer(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                if value <= i64::MAX as u64 {
                    Ok(Value::integer(value as i64))
                } else {
                    Ok(Value::floating(value as f64))
                }
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Value::floating(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Value::string(value))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Value::string(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Value::empty())
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(Value::empty())
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut elements = Vec::new();
                while let Some(element) = seq.next_element()? {
                    elements.push(element);
                }
                Ok(Value::array(elements))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = TomlMap::new();
                while let Some((key, value)) = map.next_entry()? {
                    entries.insert(key, value);
                }
                Ok(Value::table(entries))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_primitives() {
        assert_eq!(Value::from(true), Value::boolean(true));
        assert_eq!(Value::from(42i32), Value::integer(42));
        assert_eq!(Value::from(42i64), Value::integer(42));
        assert_eq!(Value::from(3.5f64), Value::floating(3.5));
        assert_eq!(Value::from("test"), Value::string("test"));
        assert_eq!(Value::from("test".to_string()), Value::string("test"));
    }

    #[test]
    fn test_predicates_and_accessors() {
        let value = Value::integer(42);
        assert!(value.is_integer());
        assert!(!value.is_floating());
        assert_eq!(value.as_integer(), Some(42));
        assert_eq!(value.as_str(), None);

        let value = Value::string("hello");
        assert!(value.is_string());
        assert_eq!(value.as_str(), Some("hello"));
    }

    #[test]
    fn test_array_of_tables_shape() {
        let aot = Value::array(vec![
            Value::table(TomlMap::new()),
            Value::table(TomlMap::new()),
        ]);
        assert!(aot.is_array_of_tables());

        let mixed = Value::array(vec![Value::table(TomlMap::new()), Value::integer(1)]);
        assert!(!mixed.is_array_of_tables());

        // An empty array is a plain array, not an array of tables
        assert!(!Value::array(vec![]).is_array_of_tables());
    }

    #[test]
    fn test_comments_modes() {
        let kept = Comments::preserved(["one", "two"]);
        assert_eq!(kept.lines().len(), 2);
        assert!(!kept.is_empty());

        assert!(Comments::Discarded.is_empty());
        assert!(Comments::Discarded.lines().is_empty());
        assert!(Comments::none().is_empty());
    }

    #[test]
    fn test_source_location_display() {
        assert_eq!(SourceLocation::new(3, 7).to_string(), "line 3, column 7");
        assert_eq!(SourceLocation::unknown().to_string(), "unknown location");
    }

    #[test]
    fn test_serde_roundtrip_through_json() {
        let json = r#"{"name": "Alice", "age": 30, "tags": ["a", "b"], "pi": 3.5}"#;
        let value: Value = serde_json::from_str(json).unwrap();

        let table = value.as_table().unwrap();
        assert_eq!(table.get("name").and_then(Value::as_str), Some("Alice"));
        assert_eq!(table.get("age").and_then(Value::as_integer), Some(30));
        assert_eq!(table.get("pi").and_then(Value::as_floating), Some(3.5));
        assert_eq!(table.get("tags").and_then(Value::as_array).map(<[Value]>::len), Some(2));

        // and back out through serde
        let json_again = serde_json::to_string(&value).unwrap();
        let value_again: Value = serde_json::from_str(&json_again).unwrap();
        assert_eq!(value, value_again);
    }
}
