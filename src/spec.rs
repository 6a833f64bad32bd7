//! TOML dialect configuration.
//!
//! This module provides [`TomlSpec`], the description of the TOML dialect a
//! document is serialized against: a base language version plus a set of
//! opt-in extensions.
//!
//! ## Dialects
//!
//! The base versions are:
//!
//! - **TOML 1.0.0**: the released language. Escape sequences are limited to
//!   the classic set plus `\uXXXX`; bare keys are ASCII.
//! - **TOML 1.1.0**: the draft revision. Adds the `\e` (escape, `0x1B`) and
//!   `\xHH` escape sequences and permits non-English characters in bare
//!   keys.
//!
//! The extensions are not part of any TOML release. They are off by default
//! and only change the output when a format record actually asks for the
//! corresponding feature:
//!
//! - `ext_null_value`: render empty values as `null` instead of failing.
//! - `ext_num_suffix`: append `_suffix` tokens to decimal numbers, e.g.
//!   `100_ms`.
//! - `ext_hex_float`: render floats in hexadecimal, e.g. `0x1.8p+0`.
//!
//! ## Examples
//!
//! ```rust
//! use toml_fmt::{TomlSpec, Value};
//!
//! // An empty value is an error under the plain dialect...
//! assert!(toml_fmt::to_string(&Value::empty()).is_err());
//!
//! // ...and `null` once the extension is enabled.
//! let spec = TomlSpec::v1_0().with_null_value(true);
//! assert_eq!(toml_fmt::to_string_with_spec(&Value::empty(), spec).unwrap(), "null");
//! ```

use std::fmt;

/// A released (or drafted) version of the TOML language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TomlVersion {
    /// TOML 1.0.0.
    #[default]
    V1_0_0,
    /// The TOML 1.1.0 draft.
    V1_1_0,
}

impl fmt::Display for TomlVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TomlVersion::V1_0_0 => f.write_str("1.0.0"),
            TomlVersion::V1_1_0 => f.write_str("1.1.0"),
        }
    }
}

/// The TOML dialect to serialize against.
///
/// # Examples
///
/// ```rust
/// use toml_fmt::TomlSpec;
///
/// // Plain TOML 1.0.0
/// let spec = TomlSpec::v1_0();
/// assert!(!spec.v1_1_0_add_escape_sequence_x);
///
/// // The 1.1.0 draft, with `\e`/`\x` escapes and non-English bare keys
/// let spec = TomlSpec::v1_1();
/// assert!(spec.v1_1_0_add_escape_sequence_e);
///
/// // Extensions are chainable
/// let spec = TomlSpec::v1_0().with_num_suffix(true).with_hex_float(true);
/// assert!(spec.ext_num_suffix && spec.ext_hex_float);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TomlSpec {
    /// The base language version.
    pub version: TomlVersion,

    /// Render empty values as `null`.
    pub ext_null_value: bool,
    /// Allow `_suffix` tokens after decimal integers and floats.
    pub ext_num_suffix: bool,
    /// Allow hexadecimal float output.
    pub ext_hex_float: bool,

    /// Use `\e` for the escape character (`0x1B`).
    pub v1_1_0_add_escape_sequence_e: bool,
    /// Use `\xHH` for control characters instead of `\u00HH`.
    pub v1_1_0_add_escape_sequence_x: bool,
    /// Permit non-English alphanumeric characters in bare keys.
    pub v1_1_0_allow_non_english_in_bare_keys: bool,
}

impl Default for TomlSpec {
    fn default() -> Self {
        Self::v1_0()
    }
}

impl TomlSpec {
    /// TOML 1.0.0 with every extension disabled.
    #[must_use]
    pub fn v1_0() -> Self {
        TomlSpec {
            version: TomlVersion::V1_0_0,
            ext_null_value: false,
            ext_num_suffix: false,
            ext_hex_float: false,
            v1_1_0_add_escape_sequence_e: false,
            v1_1_0_add_escape_sequence_x: false,
            v1_1_0_allow_non_english_in_bare_keys: false,
        }
    }

    /// The TOML 1.1.0 draft: enables the 1.1.0 escape sequences and bare-key
    /// relaxation on top of [`TomlSpec::v1_0`].
    #[must_use]
    pub fn v1_1() -> Self {
        TomlSpec {
            version: TomlVersion::V1_1_0,
            v1_1_0_add_escape_sequence_e: true,
            v1_1_0_add_escape_sequence_x: true,
            v1_1_0_allow_non_english_in_bare_keys: true,
            ..Self::v1_0()
        }
    }

    /// Enables or disables rendering empty values as `null`.
    #[must_use]
    pub fn with_null_value(mut self, enabled: bool) -> Self {
        self.ext_null_value = enabled;
        self
    }

    /// Enables or disables `_suffix` tokens on decimal numbers.
    #[must_use]
    pub fn with_num_suffix(mut self, enabled: bool) -> Self {
        self.ext_num_suffix = enabled;
        self
    }

    /// Enables or disables hexadecimal float output.
    #[must_use]
    pub fn with_hex_float(mut self, enabled: bool) -> Self {
        self.ext_hex_float = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_v1_0() {
        let spec = TomlSpec::default();
        assert_eq!(spec.version, TomlVersion::V1_0_0);
        assert!(!spec.ext_null_value);
        assert!(!spec.ext_num_suffix);
        assert!(!spec.ext_hex_float);
        assert!(!spec.v1_1_0_add_escape_sequence_e);
        assert!(!spec.v1_1_0_add_escape_sequence_x);
    }

    #[test]
    fn test_v1_1_enables_draft_features() {
        let spec = TomlSpec::v1_1();
        assert_eq!(spec.version, TomlVersion::V1_1_0);
        assert!(spec.v1_1_0_add_escape_sequence_e);
        assert!(spec.v1_1_0_add_escape_sequence_x);
        assert!(spec.v1_1_0_allow_non_english_in_bare_keys);
        // extensions stay opt-in
        assert!(!spec.ext_null_value);
    }

    #[test]
    fn test_version_display() {
        assert_eq!(TomlVersion::V1_0_0.to_string(), "1.0.0");
        assert_eq!(TomlVersion::V1_1_0.to_string(), "1.1.0");
    }
}
