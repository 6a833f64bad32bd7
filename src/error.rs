//! Error types for TOML serialization.
//!
//! Every failure surfaces as a single [`Error`] value carrying an
//! [`ErrorKind`] and the [`SourceLocation`] of the offending node. No error
//! is recovered locally; a failure anywhere in the tree aborts the whole
//! emit.
//!
//! ## Examples
//!
//! ```rust
//! use toml_fmt::{ErrorKind, IntegerBase, IntegerFormat, TomlMap, Value};
//!
//! let mut table = TomlMap::new();
//! table.insert(
//!     "y".to_string(),
//!     Value::integer_formatted(
//!         -255,
//!         IntegerFormat {
//!             base: IntegerBase::Hex,
//!             ..IntegerFormat::default()
//!         },
//!     ),
//! );
//!
//! let err = toml_fmt::to_string(&Value::table(table)).unwrap_err();
//! assert_eq!(err.kind(), &ErrorKind::NegativeInNondecimal);
//! ```

use crate::value::SourceLocation;
use thiserror::Error;

/// A TOML serialization error.
///
/// Pairs the reason a value could not be emitted with the source location
/// that was recorded on the offending node, so diagnostics can point back
/// into the document the tree was built from.
#[derive(Debug, Clone, Error)]
#[error("{kind} ({location})")]
pub struct Error {
    kind: ErrorKind,
    location: SourceLocation,
}

/// The reason a serialization attempt failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A value that has no representation in the selected dialect, e.g. an
    /// empty value without the null extension, or a non-table element in an
    /// array of tables.
    #[error("{0}")]
    InvalidType(String),

    /// A negative integer combined with a hexadecimal, octal or binary
    /// representation.
    #[error("binary, octal and hexadecimal integers cannot be negative")]
    NegativeInNondecimal,

    /// A newline in a single-line literal string. Literal strings have no
    /// escape sequences, so the newline cannot be represented.
    #[error("a non-multiline literal string cannot contain a newline")]
    NewlineInLiteral,

    /// A layout that needs a key path (`[[header]]` or dotted keys) was
    /// requested at the root without one.
    #[error("{0} must have a key; serialize it with an explicit key or path")]
    MissingKey(&'static str),

    /// An implicit table contained something other than a table or an array
    /// of tables.
    #[error("an implicit table cannot have a non-table value")]
    ImplicitNonTable,

    /// An implicit table contained a sub-table that is neither multiline nor
    /// implicit, so there is no place to emit its entries.
    #[error("an implicit table cannot have a non-multiline table")]
    ImplicitNonMultiline,

    /// Writing the finished document to an [`std::io::Write`] sink failed.
    #[error("I/O error: {0}")]
    Io(String),
}

impl Error {
    pub(crate) fn new(kind: ErrorKind, location: SourceLocation) -> Self {
        Error { kind, location }
    }

    /// Creates an error for a value that cannot be represented in the
    /// selected dialect.
    pub fn invalid_type(msg: impl Into<String>, location: SourceLocation) -> Self {
        Error::new(ErrorKind::InvalidType(msg.into()), location)
    }

    /// Creates an error for a negative integer with a non-decimal base.
    pub fn negative_in_nondecimal(location: SourceLocation) -> Self {
        Error::new(ErrorKind::NegativeInNondecimal, location)
    }

    /// Creates an error for a newline inside a single-line literal string.
    pub fn newline_in_literal(location: SourceLocation) -> Self {
        Error::new(ErrorKind::NewlineInLiteral, location)
    }

    /// Creates an error for a keyless layout that requires a key path.
    ///
    /// `what` names the layout, e.g. `"an array of tables"`.
    pub fn missing_key(what: &'static str, location: SourceLocation) -> Self {
        Error::new(ErrorKind::MissingKey(what), location)
    }

    /// Creates an error for a non-table child of an implicit table.
    pub fn implicit_non_table(location: SourceLocation) -> Self {
        Error::new(ErrorKind::ImplicitNonTable, location)
    }

    /// Creates an error for a non-multiline sub-table of an implicit table.
    pub fn implicit_non_multiline(location: SourceLocation) -> Self {
        Error::new(ErrorKind::ImplicitNonMultiline, location)
    }

    /// Creates an I/O error for writer-based entry points.
    pub fn io(msg: impl Into<String>) -> Self {
        Error::new(ErrorKind::Io(msg.into()), SourceLocation::unknown())
    }

    /// The reason this serialization attempt failed.
    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// The source location recorded on the node that failed to serialize.
    #[must_use]
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }
}

pub type Result<T> = std::result::Result<T, Error>;
