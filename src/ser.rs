//! TOML serialization.
//!
//! This module provides the [`Serializer`] that walks a [`Value`] tree and
//! produces the text of a TOML document, honouring each node's format
//! record wherever the grammar allows.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use toml_fmt::{TomlMap, Value};
//!
//! let mut table = TomlMap::new();
//! table.insert("x".to_string(), Value::integer(42));
//!
//! let document = toml_fmt::to_string(&Value::table(table)).unwrap();
//! assert_eq!(document, "x = 42\n");
//! ```
//!
//! ## Direct serializer usage
//!
//! A [`Serializer`] can be driven directly, which is useful for emitting a
//! subtree under an explicit key path:
//!
//! ```rust
//! use toml_fmt::{Serializer, TomlMap, TomlSpec, Value};
//!
//! let mut table = TomlMap::new();
//! table.insert("host".to_string(), Value::from("localhost"));
//!
//! let mut serializer = Serializer::new(TomlSpec::v1_0());
//! let element = Value::table(table);
//! let document = serializer
//!     .serialize_keyed("server", &Value::array(vec![element]))
//!     .unwrap();
//! assert_eq!(document, "[[server]]\nhost = \"localhost\"\n");
//! ```

use crate::error::{Error, Result};
use crate::format::{
    ArrayFormat, ArrayStyle, DateTimeFormat, DatetimeDelimiter, FloatStyle, FloatingFormat,
    IndentChar, IntegerBase, IntegerFormat, StringFormat, StringStyle, TableFormat, TableStyle,
};
use crate::spec::TomlSpec;
use crate::value::{Comments, SourceLocation, Value, ValueKind};
use crate::TomlMap;
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::mem;

/// Budget for rendering an automatically-chosen array on a single line.
///
/// Measured against a target line width of 80, leaving room for the key,
/// ` = ` and the `[` `]` framing.
pub const INLINE_ARRAY_LIMIT: usize = 60;

/// The TOML serializer.
///
/// Holds the dialect plus the traversal state: the key path of the table
/// currently being emitted (needed for `[a.b.c]` headers), the indent
/// counter, and whether the walk is inside an inline container. All three
/// are saved and restored around every recursion, including error returns,
/// so an instance stays reusable after a failed emit.
#[derive(Debug)]
pub struct Serializer {
    spec: TomlSpec,
    keys: Vec<String>,
    current_indent: i32,
    force_inline: bool,
}

impl Serializer {
    #[must_use]
    pub fn new(spec: TomlSpec) -> Self {
        Serializer {
            spec,
            keys: Vec::new(),
            current_indent: 0,
            force_inline: false,
        }
    }

    /// Serializes a root value.
    ///
    /// For a root table this also emits the comments attached to the table
    /// itself, since there is no `[header]` line to attach them to.
    pub fn serialize(&mut self, value: &Value) -> Result<String> {
        self.render(value)
    }

    /// Serializes a value reachable through a single key.
    ///
    /// Required for values whose layout needs a key path at the root: an
    /// array of tables (`[[key]]`) or a dotted table (`key.child = ...`).
    pub fn serialize_keyed(&mut self, key: &str, value: &Value) -> Result<String> {
        self.keys.push(key.to_owned());
        let rendered = self.render(value);
        self.keys.pop();
        rendered
    }

    /// Serializes a value reachable through an explicit key path.
    pub fn serialize_at(&mut self, path: &[String], value: &Value) -> Result<String> {
        let depth = self.keys.len();
        self.keys.extend(path.iter().cloned());
        let rendered = self.render(value);
        self.keys.truncate(depth);
        rendered
    }

    fn render(&mut self, value: &Value) -> Result<String> {
        match value.kind() {
            ValueKind::Boolean(b) => Ok(format_boolean(*b)),
            ValueKind::Integer(i, fmt) => self.format_integer(*i, fmt, value.location()),
            ValueKind::Floating(f, fmt) => Ok(self.format_floating(*f, fmt)),
            ValueKind::String(s, fmt) => self.format_string(s, fmt, value.location()),
            ValueKind::LocalDate(d) => Ok(format_local_date(d)),
            ValueKind::LocalTime(t, fmt) => Ok(format_local_time(t, fmt)),
            ValueKind::LocalDateTime(dt, fmt) => Ok(format_local_datetime(dt, fmt)),
            ValueKind::OffsetDateTime(dt, fmt) => Ok(format_offset_datetime(dt, fmt)),
            ValueKind::Array(elements, fmt) => {
                self.format_array(elements, fmt, value.comments(), value.location())
            }
            ValueKind::Table(entries, fmt) => {
                let mut out = String::new();
                if self.keys.is_empty() {
                    // the root table has no header line to hang comments on
                    out += &self.format_comments(value.comments(), fmt.indent_char);
                    if !out.is_empty() {
                        out.push('\n');
                    }
                }
                out += &self.format_table(entries, fmt, value.comments(), value.location())?;
                Ok(out)
            }
            ValueKind::Empty => {
                if self.spec.ext_null_value {
                    Ok("null".to_owned())
                } else {
                    Err(Error::invalid_type(
                        "an empty value cannot be serialized without the null extension",
                        *value.location(),
                    ))
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // scalars

    fn format_integer(
        &self,
        value: i64,
        fmt: &IntegerFormat,
        location: &SourceLocation,
    ) -> Result<String> {
        if fmt.base == IntegerBase::Dec {
            let sign = if value < 0 { "-" } else { "" };
            let digits = format!(
                "{:0>width$}",
                value.unsigned_abs(),
                width = fmt.width.saturating_sub(sign.len())
            );
            let mut out = format!("{}{}", sign, group_digits(&digits, fmt.spacer));
            if self.spec.ext_num_suffix && !fmt.suffix.is_empty() {
                out.push('_');
                out.push_str(&fmt.suffix);
            }
            return Ok(out);
        }

        if value < 0 {
            return Err(Error::negative_in_nondecimal(*location));
        }
        let (prefix, digits) = match fmt.base {
            IntegerBase::Hex if fmt.uppercase => ("0x", format!("{:X}", value)),
            IntegerBase::Hex => ("0x", format!("{:x}", value)),
            IntegerBase::Oct => ("0o", format!("{:o}", value)),
            IntegerBase::Bin => ("0b", format!("{:b}", value)),
            IntegerBase::Dec => unreachable!("decimal is handled above"),
        };
        let digits = format!("{:0>width$}", digits, width = fmt.width);
        Ok(format!("{}{}", prefix, group_digits(&digits, fmt.spacer)))
    }

    fn format_floating(&self, value: f64, fmt: &FloatingFormat) -> String {
        let suffix = |out: &mut String| {
            if self.spec.ext_num_suffix && !fmt.suffix.is_empty() {
                out.push('_');
                out.push_str(&fmt.suffix);
            }
        };

        if value.is_nan() {
            let mut out = String::new();
            if value.is_sign_negative() {
                out.push('-');
            }
            out.push_str("nan");
            suffix(&mut out);
            return out;
        }
        if value.is_infinite() {
            let mut out = String::new();
            if value.is_sign_negative() {
                out.push('-');
            }
            out.push_str("inf");
            suffix(&mut out);
            return out;
        }

        match fmt.style {
            FloatStyle::Default => {
                let mut out = if fmt.precision == 0 {
                    value.to_string()
                } else {
                    format_significant(value, fmt.precision)
                };
                // a float must keep a fractional part or an exponent
                if !out.contains(['.', 'e', 'E']) {
                    out.push_str(".0");
                }
                suffix(&mut out);
                out
            }
            FloatStyle::Fixed => {
                let precision = if fmt.precision == 0 { 6 } else { fmt.precision };
                let mut out = format!("{:.p$}", value, p = precision);
                suffix(&mut out);
                out
            }
            FloatStyle::Scientific => {
                let precision = if fmt.precision == 0 { 6 } else { fmt.precision };
                let mut out = format!("{:.p$e}", value, p = precision);
                suffix(&mut out);
                out
            }
            FloatStyle::Hex => {
                if self.spec.ext_hex_float {
                    // suffixes apply to decimal notations only
                    format_hex_float(value)
                } else {
                    // no hex allowed; fall back to full round-trip precision
                    format!("{:.16e}", value)
                }
            }
        }
    }

    fn format_string(
        &self,
        value: &str,
        fmt: &StringFormat,
        location: &SourceLocation,
    ) -> Result<String> {
        match fmt.style {
            StringStyle::Basic => Ok(format!("\"{}\"", self.escape_basic_string(value))),
            StringStyle::Literal => {
                if value.contains('\n') {
                    return Err(Error::newline_in_literal(*location));
                }
                Ok(format!("'{}'", value))
            }
            StringStyle::MlBasic => {
                let mut out = String::from("\"\"\"");
                if fmt.start_with_newline {
                    out.push('\n');
                }
                out += &self.escape_ml_basic_string(value);
                out.push_str("\"\"\"");
                Ok(out)
            }
            StringStyle::MlLiteral => {
                let mut out = String::from("'''");
                if fmt.start_with_newline {
                    out.push('\n');
                }
                out.push_str(value);
                out.push_str("'''");
                Ok(out)
            }
        }
    }

    // ------------------------------------------------------------------
    // escaping

    fn escape_basic_string(&self, s: &str) -> String {
        let mut escaped = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '\\' => escaped.push_str("\\\\"),
                '"' => escaped.push_str("\\\""),
                '\u{08}' => escaped.push_str("\\b"),
                '\t' => escaped.push_str("\\t"),
                '\u{0C}' => escaped.push_str("\\f"),
                '\n' => escaped.push_str("\\n"),
                '\r' => escaped.push_str("\\r"),
                c => self.push_escaped_control(&mut escaped, c, true),
            }
        }
        escaped
    }

    fn escape_ml_basic_string(&self, s: &str) -> String {
        let mut escaped = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '\\' => escaped.push_str("\\\\"),
                '\u{08}' => escaped.push_str("\\b"),
                '\t' => escaped.push_str("\\t"),
                '\u{0C}' => escaped.push_str("\\f"),
                // payload newlines are intentional in a multiline string
                '\n' => escaped.push('\n'),
                '\r' => escaped.push_str("\\r"),
                c => self.push_escaped_control(&mut escaped, c, true),
            }
        }
        // Only 1 or 2 consecutive quotes may appear inside the body; a third
        // would close the string. Break every run of three by escaping its
        // last quote, e.g. `"""""` becomes `""\"""\"`... until none remain.
        while let Some(pos) = escaped.find("\"\"\"") {
            escaped.replace_range(pos + 2..pos + 3, "\\\"");
        }
        escaped
    }

    fn push_escaped_control(&self, out: &mut String, c: char, allow_escape_e: bool) {
        if c == '\u{1B}' && allow_escape_e && self.spec.v1_1_0_add_escape_sequence_e {
            out.push_str("\\e");
        } else if matches!(c, '\u{00}'..='\u{08}' | '\u{0A}'..='\u{1F}' | '\u{7F}') {
            if self.spec.v1_1_0_add_escape_sequence_x {
                out.push_str(&format!("\\x{:02X}", c as u32));
            } else {
                out.push_str(&format!("\\u{:04X}", c as u32));
            }
        } else {
            out.push(c);
        }
    }

    // ------------------------------------------------------------------
    // keys

    fn is_bare_key(&self, key: &str) -> bool {
        key.chars().all(|c| {
            c.is_ascii_alphanumeric()
                || c == '-'
                || c == '_'
                || (self.spec.v1_1_0_allow_non_english_in_bare_keys
                    && !c.is_ascii()
                    && c.is_alphanumeric())
        })
    }

    fn format_key(&self, key: &str) -> String {
        if key.is_empty() {
            return "\"\"".to_owned();
        }
        if self.is_bare_key(key) {
            return key.to_owned();
        }
        let mut quoted = String::from('"');
        for c in key.chars() {
            match c {
                '\\' => quoted.push_str("\\\\"),
                '"' => quoted.push_str("\\\""),
                '\u{08}' => quoted.push_str("\\b"),
                '\t' => quoted.push_str("\\t"),
                '\u{0C}' => quoted.push_str("\\f"),
                '\n' => quoted.push_str("\\n"),
                '\r' => quoted.push_str("\\r"),
                c => self.push_escaped_control(&mut quoted, c, false),
            }
        }
        quoted.push('"');
        quoted
    }

    /// The current key path joined with `.`, or `None` at the root.
    fn format_key_path(&self) -> Option<String> {
        if self.keys.is_empty() {
            return None;
        }
        Some(
            self.keys
                .iter()
                .map(|k| self.format_key(k))
                .collect::<Vec<_>>()
                .join("."),
        )
    }

    // ------------------------------------------------------------------
    // arrays

    fn format_array(
        &mut self,
        elements: &[Value],
        fmt: &ArrayFormat,
        comments: &Comments,
        location: &SourceLocation,
    ) -> Result<String> {
        let mut style = fmt.style;
        if style == ArrayStyle::Default {
            style = self.choose_array_style(elements, comments)?;
        }
        // [[in.this.form]] cannot appear inside an inline container
        if self.force_inline && style == ArrayStyle::ArrayOfTables {
            style = ArrayStyle::Multiline;
        }

        match style {
            ArrayStyle::ArrayOfTables => self.format_array_of_tables(elements, location),
            ArrayStyle::Oneline => {
                let saved = mem::replace(&mut self.force_inline, true);
                let rendered = self.oneline_array_body(elements);
                self.force_inline = saved;
                rendered
            }
            ArrayStyle::Multiline | ArrayStyle::Default => {
                let saved = mem::replace(&mut self.force_inline, true);
                let rendered = self.multiline_array_body(elements, fmt);
                self.force_inline = saved;
                rendered
            }
        }
    }

    /// Resolves [`ArrayStyle::Default`] to a concrete layout.
    ///
    /// An array of tables is used when the shape allows it and the array
    /// carries no comment of its own (a `[[header]]` has no slot for one).
    /// Otherwise the rendered scalar lengths are summed and the array stays
    /// on one line while the total fits [`INLINE_ARRAY_LIMIT`].
    fn choose_array_style(&self, elements: &[Value], comments: &Comments) -> Result<ArrayStyle> {
        if !self.keys.is_empty()
            && !elements.is_empty()
            && comments.is_empty()
            && elements.iter().all(Value::is_table)
        {
            return Ok(ArrayStyle::ArrayOfTables);
        }

        let mut approx_len = 0usize;
        for element in elements {
            // a commented element cannot be inlined
            if !element.comments().is_empty() {
                return Ok(ArrayStyle::Multiline);
            }
            match element.kind() {
                ValueKind::Array(..)
                | ValueKind::Table(..)
                | ValueKind::OffsetDateTime(..)
                | ValueKind::LocalDateTime(..) => return Ok(ArrayStyle::Multiline),
                ValueKind::Boolean(b) => approx_len += format_boolean(*b).len(),
                ValueKind::Integer(i, fmt) => {
                    approx_len += self.format_integer(*i, fmt, element.location())?.len();
                }
                ValueKind::Floating(f, fmt) => approx_len += self.format_floating(*f, fmt).len(),
                ValueKind::String(s, fmt) => {
                    if matches!(fmt.style, StringStyle::MlBasic | StringStyle::MlLiteral) {
                        return Ok(ArrayStyle::Multiline);
                    }
                    approx_len += 2 + self.format_string(s, fmt, element.location())?.len();
                }
                ValueKind::LocalDate(_) => approx_len += 10, // 1234-56-78
                ValueKind::LocalTime(..) => approx_len += 15, // 12:34:56.789012
                ValueKind::Empty => {}
            }
            if approx_len > INLINE_ARRAY_LIMIT {
                return Ok(ArrayStyle::Multiline);
            }
            approx_len += 2; // `, `
        }
        Ok(ArrayStyle::Oneline)
    }

    fn format_array_of_tables(
        &mut self,
        elements: &[Value],
        location: &SourceLocation,
    ) -> Result<String> {
        let Some(path) = self.format_key_path() else {
            return Err(Error::missing_key("an array of tables", *location));
        };

        let mut out = String::new();
        for element in elements {
            let ValueKind::Table(entries, fmt) = element.kind() else {
                return Err(Error::invalid_type(
                    "an array of tables can only contain tables",
                    *element.location(),
                ));
            };

            self.current_indent += fmt.name_indent;
            out += &self.format_comments(element.comments(), fmt.indent_char);
            out += &self.format_indent(fmt.indent_char);
            self.current_indent -= fmt.name_indent;

            out.push_str("[[");
            out.push_str(&path);
            out.push_str("]]\n");

            out += &self.format_ml_table(entries, fmt)?;
        }
        Ok(out)
    }

    fn oneline_array_body(&mut self, elements: &[Value]) -> Result<String> {
        // element comments are dropped; there is no line to put them on
        let mut rendered = Vec::with_capacity(elements.len());
        for element in elements {
            rendered.push(self.render(element)?);
        }
        Ok(format!("[{}]", rendered.join(", ")))
    }

    fn multiline_array_body(&mut self, elements: &[Value], fmt: &ArrayFormat) -> Result<String> {
        let mut out = String::from("[\n");
        for element in elements {
            self.current_indent += fmt.body_indent;
            out += &self.format_comments(element.comments(), fmt.indent_char);
            out += &self.format_indent(fmt.indent_char);
            self.current_indent -= fmt.body_indent;

            out += &self.render(element)?;
            out.push_str(",\n");
        }
        self.current_indent += fmt.closing_indent;
        out += &self.format_indent(fmt.indent_char);
        self.current_indent -= fmt.closing_indent;
        out.push(']');
        Ok(out)
    }

    // ------------------------------------------------------------------
    // tables

    fn format_table(
        &mut self,
        entries: &TomlMap,
        fmt: &TableFormat,
        comments: &Comments,
        location: &SourceLocation,
    ) -> Result<String> {
        if self.force_inline {
            return if fmt.style == TableStyle::MultilineOneline {
                self.format_ml_inline_table(entries, fmt)
            } else {
                self.format_inline_table(entries)
            };
        }

        match fmt.style {
            TableStyle::Multiline => {
                let mut out = String::new();
                if let Some(path) = self.format_key_path() {
                    self.current_indent += fmt.name_indent;
                    out += &self.format_comments(comments, fmt.indent_char);
                    out += &self.format_indent(fmt.indent_char);
                    self.current_indent -= fmt.name_indent;

                    out.push('[');
                    out.push_str(&path);
                    out.push_str("]\n");
                }
                // otherwise it is the root; comments were emitted by the driver
                out += &self.format_ml_table(entries, fmt)?;
                Ok(out)
            }
            TableStyle::Oneline => self.format_inline_table(entries),
            TableStyle::MultilineOneline => self.format_ml_inline_table(entries, fmt),
            TableStyle::Dotted => {
                let Some(last) = self.keys.last() else {
                    return Err(Error::missing_key("a dotted table", *location));
                };
                let mut path = vec![last.clone()];
                self.format_dotted_table(entries, fmt, &mut path)
            }
            TableStyle::Implicit => self.format_implicit_table(entries),
        }
    }

    /// The body of a standard multiline table, in two passes: first the
    /// entries that live on `key = value` lines (scalars, inline containers,
    /// dotted sub-tables), then the sub-tables and arrays of tables that
    /// open their own `[header]`/`[[header]]` sections.
    fn format_ml_table(&mut self, entries: &TomlMap, fmt: &TableFormat) -> Result<String> {
        self.current_indent += fmt.body_indent;
        let immediates = self.ml_table_immediates(entries, fmt);
        self.current_indent -= fmt.body_indent;
        let mut out = immediates?;

        let has_deferred = entries.iter().any(|(_, v)| deferred_to_second_pass(v));
        if !out.is_empty() && has_deferred {
            // for readability, a blank line before the sub-table sections
            out.push('\n');
        }
        for (key, value) in entries.iter() {
            if !deferred_to_second_pass(value) {
                continue;
            }
            // comments are emitted inside the sub-table, above its header
            self.keys.push(key.clone());
            let rendered = self.render(value);
            self.keys.pop();
            out += &rendered?;
        }
        Ok(out)
    }

    fn ml_table_immediates(&mut self, entries: &TomlMap, fmt: &TableFormat) -> Result<String> {
        let mut out = String::new();
        for (key, value) in entries.iter() {
            if deferred_to_second_pass(value) {
                continue;
            }
            self.keys.push(key.clone());
            let rendered = self.ml_table_entry(key, value, fmt);
            self.keys.pop();
            out += &rendered?;
        }
        Ok(out)
    }

    fn ml_table_entry(&mut self, key: &str, value: &Value, fmt: &TableFormat) -> Result<String> {
        let mut out = String::new();
        out += &self.format_comments(value.comments(), fmt.indent_char);
        out += &self.format_indent(fmt.indent_char);
        if matches!(value.kind(), ValueKind::Table(_, f) if f.style == TableStyle::Dotted) {
            // a dotted child writes its own `key.path = value` lines
            out += &self.render(value)?;
        } else {
            out += &self.format_key(key);
            out.push_str(" = ");
            out += &self.render(value)?;
            out.push('\n');
        }
        Ok(out)
    }

    fn format_inline_table(&mut self, entries: &TomlMap) -> Result<String> {
        let saved = mem::replace(&mut self.force_inline, true);
        let rendered = self.inline_table_body(entries);
        self.force_inline = saved;
        rendered
    }

    fn inline_table_body(&mut self, entries: &TomlMap) -> Result<String> {
        // comments are dropped; nothing can be written without a newline
        let mut parts = Vec::with_capacity(entries.len());
        for (key, value) in entries.iter() {
            parts.push(format!("{} = {}", self.format_key(key), self.render(value)?));
        }
        Ok(format!("{{{}}}", parts.join(", ")))
    }

    fn format_ml_inline_table(&mut self, entries: &TomlMap, fmt: &TableFormat) -> Result<String> {
        let saved = mem::replace(&mut self.force_inline, true);
        self.current_indent += fmt.body_indent;
        let body = self.ml_inline_table_body(entries, fmt);
        self.current_indent -= fmt.body_indent;
        self.force_inline = saved;

        let mut out = body?;
        self.current_indent += fmt.closing_indent;
        out += &self.format_indent(fmt.indent_char);
        self.current_indent -= fmt.closing_indent;
        out.push('}');
        Ok(out)
    }

    fn ml_inline_table_body(&mut self, entries: &TomlMap, fmt: &TableFormat) -> Result<String> {
        let mut out = String::from("{\n");
        for (key, value) in entries.iter() {
            out += &self.format_comments(value.comments(), fmt.indent_char);
            out += &self.format_indent(fmt.indent_char);
            out += &self.format_key(key);
            out.push_str(" = ");
            out += &self.render(value)?;
            out.push_str(",\n");
        }
        if !entries.is_empty() {
            out.truncate(out.len() - 2); // the last entry keeps no `,\n`
        }
        Ok(out)
    }

    /// Flattens a chain of dotted tables into `a.b.c = value` lines.
    ///
    /// Recursion descends through children that are not inline tables,
    /// growing the local key list; everything else terminates the chain and
    /// is emitted inline.
    fn format_dotted_table(
        &mut self,
        entries: &TomlMap,
        fmt: &TableFormat,
        path: &mut Vec<String>,
    ) -> Result<String> {
        let mut out = String::new();
        for (key, value) in entries.iter() {
            path.push(key.clone());
            let rendered = self.dotted_entry(value, fmt, path);
            path.pop();
            out += &rendered?;
        }
        Ok(out)
    }

    fn dotted_entry(
        &mut self,
        value: &Value,
        fmt: &TableFormat,
        path: &mut Vec<String>,
    ) -> Result<String> {
        if let ValueKind::Table(entries, child_fmt) = value.kind() {
            if !matches!(
                child_fmt.style,
                TableStyle::Oneline | TableStyle::MultilineOneline
            ) {
                return self.format_dotted_table(entries, child_fmt, path);
            }
        }

        let mut out = String::new();
        out += &self.format_comments(value.comments(), fmt.indent_char);
        out += &self.format_indent(fmt.indent_char);
        out += &path
            .iter()
            .map(|k| self.format_key(k))
            .collect::<Vec<_>>()
            .join(".");
        out.push_str(" = ");

        let saved = mem::replace(&mut self.force_inline, true);
        let rendered = self.render(value);
        self.force_inline = saved;
        out += &rendered?;
        out.push('\n');
        Ok(out)
    }

    fn format_implicit_table(&mut self, entries: &TomlMap) -> Result<String> {
        let mut out = String::new();
        for (key, value) in entries.iter() {
            if !value.is_table() && !value.is_array_of_tables() {
                return Err(Error::implicit_non_table(*value.location()));
            }
            if let ValueKind::Table(_, fmt) = value.kind() {
                if !matches!(fmt.style, TableStyle::Multiline | TableStyle::Implicit) {
                    return Err(Error::implicit_non_multiline(*value.location()));
                }
            } else if let ValueKind::Array(elements, _) = value.kind() {
                for element in elements {
                    if let ValueKind::Table(_, fmt) = element.kind() {
                        if !matches!(fmt.style, TableStyle::Multiline | TableStyle::Implicit) {
                            return Err(Error::implicit_non_multiline(*element.location()));
                        }
                    }
                }
            }

            self.keys.push(key.clone());
            let rendered = self.render(value);
            self.keys.pop();
            out += &rendered?;
        }
        Ok(out)
    }

    // ------------------------------------------------------------------
    // comments & indent

    fn format_comments(&self, comments: &Comments, indent_char: IndentChar) -> String {
        let mut out = String::new();
        for line in comments.lines() {
            if line.is_empty() {
                continue;
            }
            out += &self.format_indent(indent_char);
            if !line.starts_with('#') {
                out.push('#');
            }
            out += line;
            if !line.ends_with('\n') {
                out.push('\n');
            }
        }
        out
    }

    fn format_indent(&self, indent_char: IndentChar) -> String {
        let width = self.current_indent.max(0) as usize;
        match indent_char {
            IndentChar::Space => " ".repeat(width),
            IndentChar::Tab => "\t".repeat(width),
            IndentChar::None => String::new(),
        }
    }
}

/// Entries that open their own `[header]` or `[[header]]` section and must
/// come after all the `key = value` lines of the enclosing table.
///
/// An array only qualifies when it will actually render as `[[header]]`
/// sections: a default-style array carrying a comment falls back to a value
/// layout (a header has no slot for the comment), so it stays in the first
/// pass.
fn deferred_to_second_pass(value: &Value) -> bool {
    let ml_table = matches!(
        value.kind(),
        ValueKind::Table(_, fmt) if !matches!(
            fmt.style,
            TableStyle::Oneline | TableStyle::MultilineOneline | TableStyle::Dotted
        )
    );
    let ml_array_of_tables = value.is_array_of_tables()
        && matches!(
            value.kind(),
            ValueKind::Array(_, fmt)
                if fmt.style == ArrayStyle::ArrayOfTables
                    || (fmt.style == ArrayStyle::Default && value.comments().is_empty())
        );
    ml_table || ml_array_of_tables
}

fn format_boolean(value: bool) -> String {
    let text = if value { "true" } else { "false" };
    text.to_owned()
}

/// Inserts `_` every `spacer` digits, counted from the least significant
/// digit. Never produces a leading or trailing underscore.
fn group_digits(digits: &str, spacer: usize) -> String {
    if spacer == 0 {
        return digits.to_owned();
    }
    let mut grouped = String::with_capacity(digits.len() + digits.len() / spacer);
    for (i, c) in digits.chars().rev().enumerate() {
        if i != 0 && i % spacer == 0 {
            grouped.push('_');
        }
        grouped.push(c);
    }
    grouped.chars().rev().collect()
}

/// Renders `value` with `precision` significant digits, choosing positional
/// or scientific notation by exponent and trimming trailing zeros, in the
/// manner of `printf("%.*g")`.
fn format_significant(value: f64, precision: usize) -> String {
    let precision = precision.max(1);
    let scientific = format!("{:.p$e}", value, p = precision - 1);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some(parts) => parts,
        None => return scientific,
    };
    let exponent: i32 = match exponent.parse() {
        Ok(e) => e,
        Err(_) => return scientific,
    };

    if exponent < -4 || exponent >= precision as i32 {
        format!("{}e{}", trim_fraction_zeros(mantissa), exponent)
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        let fixed = format!("{:.p$}", value, p = decimals);
        trim_fraction_zeros(&fixed).to_owned()
    }
}

fn trim_fraction_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Renders the `0x1.<mantissa>p<exp>` hexadecimal form of a finite float,
/// derived from its bit pattern.
fn format_hex_float(value: f64) -> String {
    let bits = value.to_bits();
    let sign = if bits >> 63 == 1 { "-" } else { "" };
    let raw_exponent = ((bits >> 52) & 0x7ff) as i64;
    let mantissa = bits & 0x000f_ffff_ffff_ffff;

    if raw_exponent == 0 && mantissa == 0 {
        return format!("{}0x0p+0", sign);
    }
    let (leading, exponent) = if raw_exponent == 0 {
        (0, -1022) // subnormal
    } else {
        (1, raw_exponent - 1023)
    };

    let mut out = format!("{}0x{}", sign, leading);
    if mantissa != 0 {
        let mut fraction = format!("{:013x}", mantissa);
        while fraction.ends_with('0') {
            fraction.pop();
        }
        out.push('.');
        out.push_str(&fraction);
    }
    out.push_str(&format!("p{:+}", exponent));
    out
}

// ----------------------------------------------------------------------
// date/time

pub(crate) fn format_local_date(date: &NaiveDate) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        date.month(),
        date.day()
    )
}

pub(crate) fn format_local_time(time: &NaiveTime, fmt: &DateTimeFormat) -> String {
    let mut out = format!("{:02}:{:02}", time.hour(), time.minute());
    if fmt.has_seconds {
        out.push_str(&format!(":{:02}", time.second()));
        if fmt.subsecond_precision != 0 {
            // fold chrono's leap-second representation back into 0..1s
            let nanos = time.nanosecond() % 1_000_000_000;
            let subseconds = format!("{:09}", nanos);
            let precision = fmt.subsecond_precision.min(subseconds.len());
            out.push('.');
            out.push_str(&subseconds[..precision]);
        }
    }
    out
}

pub(crate) fn format_local_datetime(datetime: &NaiveDateTime, fmt: &DateTimeFormat) -> String {
    format!(
        "{}{}{}",
        format_local_date(&datetime.date()),
        delimiter_char(fmt.delimiter),
        format_local_time(&datetime.time(), fmt)
    )
}

pub(crate) fn format_offset_datetime(
    datetime: &DateTime<FixedOffset>,
    fmt: &DateTimeFormat,
) -> String {
    let mut out = format_local_datetime(&datetime.naive_local(), fmt);
    out.push_str(&format_offset(datetime.offset()));
    out
}

fn delimiter_char(delimiter: DatetimeDelimiter) -> char {
    match delimiter {
        DatetimeDelimiter::UpperT => 'T',
        DatetimeDelimiter::LowerT => 't',
        DatetimeDelimiter::Space => ' ',
    }
}

fn format_offset(offset: &FixedOffset) -> String {
    let seconds = offset.local_minus_utc();
    if seconds == 0 {
        return "Z".to_owned();
    }
    let sign = if seconds < 0 { '-' } else { '+' };
    let minutes = seconds.unsigned_abs() / 60;
    format!("{}{:02}:{:02}", sign, minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("1000000", 3), "1_000_000");
        assert_eq!(group_digits("100000", 3), "100_000");
        assert_eq!(group_digits("0042", 2), "00_42");
        assert_eq!(group_digits("42", 2), "42");
        assert_eq!(group_digits("1234", 0), "1234");
        assert_eq!(group_digits("", 3), "");
    }

    #[test]
    fn test_format_significant() {
        assert_eq!(format_significant(1234.5, 3), "1.23e3");
        assert_eq!(format_significant(1234.5, 6), "1234.5");
        assert_eq!(format_significant(0.5, 3), "0.5");
        assert_eq!(format_significant(0.0000125, 2), "1.3e-5");
        assert_eq!(format_significant(100.0, 4), "100");
    }

    #[test]
    fn test_format_hex_float() {
        assert_eq!(format_hex_float(0.0), "0x0p+0");
        assert_eq!(format_hex_float(2.0), "0x1p+1");
        assert_eq!(format_hex_float(-1.5), "-0x1.8p+0");
        assert_eq!(format_hex_float(0.25), "0x1p-2");
    }

    #[test]
    fn test_format_offset() {
        assert_eq!(format_offset(&FixedOffset::east_opt(0).unwrap()), "Z");
        assert_eq!(
            format_offset(&FixedOffset::east_opt(9 * 3600).unwrap()),
            "+09:00"
        );
        assert_eq!(
            format_offset(&FixedOffset::west_opt(5 * 3600 + 30 * 60).unwrap()),
            "-05:30"
        );
    }
}
