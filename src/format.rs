//! Per-node format records.
//!
//! Every [`Value`](crate::Value) carries a format record specific to its
//! kind. The records hold the formatting decisions a parser observed (or a
//! caller chose): radix and digit grouping for integers, quoting style for
//! strings, inline vs. multiline layout for containers, and the indentation
//! to use around them. The serializer honours these hints wherever the TOML
//! grammar allows.
//!
//! ## Examples
//!
//! ```rust
//! use toml_fmt::{IntegerBase, IntegerFormat, TomlMap, Value};
//!
//! let hex = Value::integer_formatted(
//!     255,
//!     IntegerFormat {
//!         base: IntegerBase::Hex,
//!         width: 4,
//!         uppercase: true,
//!         ..IntegerFormat::default()
//!     },
//! );
//!
//! let mut table = TomlMap::new();
//! table.insert("z".to_string(), hex);
//! assert_eq!(toml_fmt::to_string(&Value::table(table)).unwrap(), "z = 0x00FF\n");
//! ```

/// The radix used to render an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegerBase {
    /// Plain decimal, e.g. `42`.
    #[default]
    Dec,
    /// Hexadecimal with a `0x` prefix, e.g. `0x2A`.
    Hex,
    /// Octal with a `0o` prefix, e.g. `0o52`.
    Oct,
    /// Binary with a `0b` prefix, e.g. `0b101010`.
    Bin,
}

/// How to render an integer value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IntegerFormat {
    pub base: IntegerBase,
    /// Zero-pad the digits to this width. For decimal output a leading `-`
    /// counts toward the width. `0` disables padding.
    pub width: usize,
    /// Insert `_` every `spacer` digits, counted from the least significant
    /// digit. `0` disables grouping.
    pub spacer: usize,
    /// Render hexadecimal digits in upper case.
    pub uppercase: bool,
    /// Trailing `_suffix` token; only emitted for decimal output and only
    /// when the dialect enables number suffixes.
    pub suffix: String,
}

/// The notation used to render a float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FloatStyle {
    /// Shortest text that round-trips, with `.0` appended when the result
    /// would otherwise look like an integer.
    #[default]
    Default,
    /// Fixed-point, e.g. `3.14`.
    Fixed,
    /// Scientific notation, e.g. `3.14e0`.
    Scientific,
    /// Hexadecimal float, e.g. `0x1.91eb851eb851fp+1`. Requires the
    /// hex-float dialect extension; falls back to scientific notation at
    /// full round-trip precision without it.
    Hex,
}

/// How to render a float value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FloatingFormat {
    pub style: FloatStyle,
    /// Number of digits: fractional digits for [`FloatStyle::Fixed`] and
    /// [`FloatStyle::Scientific`], significant digits for
    /// [`FloatStyle::Default`]. `0` means the implementation default.
    pub precision: usize,
    /// Trailing `_suffix` token; decimal notations only.
    pub suffix: String,
}

/// The quoting style used for a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StringStyle {
    /// `"..."` with escape sequences.
    #[default]
    Basic,
    /// `'...'`, no escapes; cannot contain a newline.
    Literal,
    /// `"""..."""`, escapes except that newlines stay literal.
    MlBasic,
    /// `'''...'''`, fully verbatim. A payload containing `'''` cannot be
    /// represented and is a caller-side error; it is not checked here.
    MlLiteral,
}

/// How to render a string value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StringFormat {
    pub style: StringStyle,
    /// For multiline styles: emit a newline right after the opening
    /// delimiter, which the TOML grammar trims away on parse.
    pub start_with_newline: bool,
}

/// The separator between the date and time parts of a datetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatetimeDelimiter {
    #[default]
    UpperT,
    LowerT,
    Space,
}

/// How to render a time, local datetime or offset datetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeFormat {
    pub delimiter: DatetimeDelimiter,
    /// Emit the `:SS` seconds field.
    pub has_seconds: bool,
    /// Number of subsecond digits to emit after the seconds field, `0..=9`.
    /// `0` omits the fractional part entirely.
    pub subsecond_precision: usize,
}

impl Default for DateTimeFormat {
    fn default() -> Self {
        DateTimeFormat {
            delimiter: DatetimeDelimiter::default(),
            has_seconds: true,
            subsecond_precision: 0,
        }
    }
}

/// The character used to materialise indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndentChar {
    #[default]
    Space,
    Tab,
    /// No indentation at all, regardless of the indent counters.
    None,
}

/// The layout of an array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrayStyle {
    /// Let the serializer choose: an array of tables when the shape allows
    /// it, otherwise one line when the rendered elements fit the inline
    /// budget, otherwise one element per line.
    #[default]
    Default,
    /// `[a, b, c]` on a single line. Element comments are dropped; the
    /// grammar has no slot for them.
    Oneline,
    /// One element per line between `[` and `]`.
    Multiline,
    /// Repeated `[[key.path]]` headers, one per element. Every element must
    /// be a table and the array must be reachable through a key path.
    ArrayOfTables,
}

/// How to render an array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayFormat {
    pub style: ArrayStyle,
    /// Indent applied to each element line of a multiline array.
    pub body_indent: i32,
    /// Indent applied to the closing `]` of a multiline array.
    pub closing_indent: i32,
    pub indent_char: IndentChar,
}

impl Default for ArrayFormat {
    fn default() -> Self {
        ArrayFormat {
            style: ArrayStyle::default(),
            body_indent: 2,
            closing_indent: 0,
            indent_char: IndentChar::default(),
        }
    }
}

/// The layout of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableStyle {
    /// A `[key.path]` header (unless at the root) followed by one entry per
    /// line.
    #[default]
    Multiline,
    /// `{k = v, k = v}` on a single line. Comments are dropped.
    Oneline,
    /// `{` and `}` with one entry per line in between. Entry comments are
    /// preserved.
    MultilineOneline,
    /// Flattened into `path.to.leaf = value` lines at the parent scope.
    /// Requires a key path.
    Dotted,
    /// No header of its own; exists only to nest its children, which must be
    /// multiline or implicit tables or arrays of such tables.
    Implicit,
}

/// How to render a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableFormat {
    pub style: TableStyle,
    /// Indent applied to the `[key.path]` header line.
    pub name_indent: i32,
    /// Indent applied to each entry line of the body.
    pub body_indent: i32,
    /// Indent applied to the closing `}` of a multiline-oneline table.
    pub closing_indent: i32,
    pub indent_char: IndentChar,
}

impl Default for TableFormat {
    fn default() -> Self {
        TableFormat {
            style: TableStyle::default(),
            name_indent: 0,
            body_indent: 0,
            closing_indent: 0,
            indent_char: IndentChar::default(),
        }
    }
}
