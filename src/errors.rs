//! Errors reported by the encoder and decoder.
//!
//! Every [`DecodeError`] carries the absolute offset into the input buffer at which the
//! problem was found, so callers can report it or decide to skip ahead themselves.

use crate::encoding::{Composite, Tag};
use bytes::Bytes;
use failure::Fail;
use std::str::Utf8Error;

#[derive(Debug, Clone, PartialEq, Eq, Fail)]
/// An error encountered when decoding fails.
pub enum DecodeError {
    /// Fewer bytes remain than a fixed-width or length-prefixed field requires.
    #[fail(
        display = "Truncated input at byte {}: needed {} bytes, {} remaining",
        offset, needed, remaining
    )]
    TruncatedInput {
        offset: usize,
        needed: usize,
        remaining: usize,
    },
    /// The low nibble of a tag byte is not a defined tag.
    #[fail(display = "Unknown tag byte 0x{:02x} at byte {}", byte, offset)]
    UnknownTag { byte: u8, offset: usize },
    /// A defined tag appeared where it is not allowed, or with reserved aux bits set.
    #[fail(display = "Unexpected tag byte 0x{:02x} at byte {}", byte, offset)]
    UnexpectedTag { byte: u8, offset: usize },
    /// The buffer ended before a terminator was found.
    #[fail(display = "Unterminated {} starting at byte {}", kind, offset)]
    UnterminatedComposite { kind: Composite, offset: usize },
    /// The aux field and data bytes of a number do not describe a canonical value.
    #[fail(display = "Malformed {} at byte {}", tag, offset)]
    MalformedNumeric { tag: Tag, offset: usize },
    /// An escape byte inside a terminated string was followed by something other than
    /// the string tag or another escape byte.
    #[fail(display = "Invalid escape 0x{:02x} in string at byte {}", byte, offset)]
    InvalidEscape { byte: u8, offset: usize },
    /// A string payload is not valid UTF-8 and the text policy requires it.
    #[fail(display = "String at byte {} is not valid UTF-8: {}", offset, cause)]
    InvalidText {
        offset: usize,
        #[cause]
        cause: Utf8Error,
    },
    /// A dictionary key is not a string.
    #[fail(display = "Dictionary key at byte {} is not a string", offset)]
    InvalidKey { offset: usize },
    /// A dictionary key was already seen in the same dictionary.
    #[fail(display = "Duplicate dictionary key {:?} at byte {}", key, offset)]
    DuplicateKey { key: Bytes, offset: usize },
    /// Composites are nested deeper than the configured limit.
    #[fail(display = "Nesting exceeds {} levels at byte {}", limit, offset)]
    DepthLimitExceeded { limit: usize, offset: usize },
    /// Bytes remain after a value that was expected to fill the buffer.
    #[fail(display = "{} trailing bytes after value ending at byte {}", count, offset)]
    TrailingBytes { count: usize, offset: usize },
}

impl DecodeError {
    pub(crate) fn truncated(offset: usize, needed: usize, remaining: usize) -> Self {
        DecodeError::TruncatedInput {
            offset,
            needed,
            remaining,
        }
    }

    /// The offset into the input at which the error was detected.
    pub fn offset(&self) -> usize {
        use DecodeError::*;
        match self {
            TruncatedInput { offset, .. }
            | UnknownTag { offset, .. }
            | UnexpectedTag { offset, .. }
            | UnterminatedComposite { offset, .. }
            | MalformedNumeric { offset, .. }
            | InvalidEscape { offset, .. }
            | InvalidText { offset, .. }
            | InvalidKey { offset }
            | DuplicateKey { offset, .. }
            | DepthLimitExceeded { offset, .. }
            | TrailingBytes { offset, .. } => *offset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Fail)]
/// An error encountered when encoding fails.
///
/// Every value is representable on the wire; the only failure is a tree nested deeper
/// than the configured limit.
pub enum EncodeError {
    /// Composites are nested deeper than the configured limit.
    #[fail(display = "Nesting exceeds {} levels", limit)]
    DepthLimitExceeded { limit: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let e = DecodeError::UnknownTag {
            byte: 0x06,
            offset: 3,
        };
        assert_eq!(e.to_string(), "Unknown tag byte 0x06 at byte 3");
        assert_eq!(e.offset(), 3);

        let e = DecodeError::UnterminatedComposite {
            kind: Composite::Array,
            offset: 0,
        };
        assert_eq!(e.to_string(), "Unterminated array starting at byte 0");

        let e = EncodeError::DepthLimitExceeded { limit: 4 };
        assert_eq!(e.to_string(), "Nesting exceeds 4 levels");
    }

    #[test]
    fn text_errors_keep_their_cause() {
        let cause = std::str::from_utf8(&[0xff]).unwrap_err();
        let e = DecodeError::InvalidText { offset: 1, cause };
        assert!(e.cause().is_some());
    }
}
