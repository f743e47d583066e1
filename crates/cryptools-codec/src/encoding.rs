//! Encoding tags
//!
//! An [`Encoding`] identifies how a byte sequence maps to and from text.
//! Transformable encodings round-trip buffer <-> string losslessly;
//! the remaining tags are detection or decode-only forms (a BigInt's
//! string form loses leading zeros, JSON loses its original formatting).

use serde::{Deserialize, Serialize};

/// Supported textual encodings
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Encoding {
    /// Groups of eight `0`/`1` characters per byte
    Binary,
    /// Groups of three `0`-`7` characters per byte
    Octal,
    /// Groups of two hex characters per byte
    Hexadecimal,
    /// RFC 4648 standard alphabet with padding
    Base64,
    /// OpenBSD bcrypt Base64 alphabet, no padding
    Base64Crypt,
    /// Plain UTF-8 text
    Utf8,
    /// `true` / `false`
    Boolean,
    /// Decimal integer of arbitrary size
    BigInt,
    /// Plain decimal integer (display only)
    Integer,
    /// RFC 4122 hyphenated UUID
    Uuid,
    /// JSON document
    Json,
    /// PEM envelope around Base64-encoded DER
    Pem,
    /// PHC string format (`$id$params$salt$hash`)
    PhcString,
    /// Legacy Modular Crypt Format
    ModularCrypt,
}

impl Encoding {
    /// Whether `decode(encode(buf, self), self) == buf` holds for every
    /// buffer representable in this encoding's alphabet
    pub fn is_transformable(&self) -> bool {
        matches!(
            self,
            Self::Binary
                | Self::Octal
                | Self::Hexadecimal
                | Self::Base64
                | Self::Base64Crypt
                | Self::Utf8
        )
    }

    /// Per-byte group width for the positional encodings
    pub(crate) fn group_width(&self) -> Option<usize> {
        match self {
            Self::Binary => Some(8),
            Self::Octal => Some(3),
            Self::Hexadecimal => Some(2),
            _ => None,
        }
    }

    /// Numeric base for the positional encodings
    pub(crate) fn radix(&self) -> Option<u32> {
        match self {
            Self::Binary => Some(2),
            Self::Octal => Some(8),
            Self::Hexadecimal => Some(16),
            _ => None,
        }
    }

    /// Human-readable name, e.g. for CLI output
    pub fn name(&self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Octal => "octal",
            Self::Hexadecimal => "hexadecimal",
            Self::Base64 => "base64",
            Self::Base64Crypt => "base64-crypt",
            Self::Utf8 => "utf-8",
            Self::Boolean => "boolean",
            Self::BigInt => "bigint",
            Self::Integer => "integer",
            Self::Uuid => "uuid",
            Self::Json => "json",
            Self::Pem => "pem",
            Self::PhcString => "phc-string",
            Self::ModularCrypt => "modular-crypt",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transformable_split() {
        assert!(Encoding::Binary.is_transformable());
        assert!(Encoding::Base64Crypt.is_transformable());
        assert!(Encoding::Utf8.is_transformable());
        assert!(!Encoding::Boolean.is_transformable());
        assert!(!Encoding::Json.is_transformable());
        assert!(!Encoding::Pem.is_transformable());
    }

    #[test]
    fn test_group_widths() {
        assert_eq!(Encoding::Binary.group_width(), Some(8));
        assert_eq!(Encoding::Octal.group_width(), Some(3));
        assert_eq!(Encoding::Hexadecimal.group_width(), Some(2));
        assert_eq!(Encoding::Base64.group_width(), None);
    }
}
