use thiserror::Error;

use crate::Tag;

/// Errors raised while locating certificate boundaries.
///
/// Every variant except `EmptyInput` carries the byte offset of the segment
/// that was being decoded when the problem was found.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("empty input")]
    EmptyInput,

    #[error("unexpected tag {tag} at offset {offset}, expected SEQUENCE (0x30)")]
    UnexpectedTag { offset: usize, tag: Tag },

    #[error("indefinite length at offset {offset} is not allowed in DER")]
    IndefiniteLengthUnsupported { offset: usize },

    #[error("{count} length octets at offset {offset}, at most {max} are supported", max = crate::MAX_LENGTH_OCTETS)]
    LengthOctetsExceeded { offset: usize, count: usize },

    #[error("length at offset {offset} overflows the address space")]
    LengthOverflow { offset: usize },

    #[error(
        "truncated certificate at offset {offset}: needs {needed} bytes, {available} available"
    )]
    TruncatedCertificate {
        offset: usize,
        needed: usize,
        available: usize,
    },
}

impl Error {
    /// Byte offset of the offending segment, if the error has one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::EmptyInput => None,
            Error::UnexpectedTag { offset, .. }
            | Error::IndefiniteLengthUnsupported { offset }
            | Error::LengthOctetsExceeded { offset, .. }
            | Error::LengthOverflow { offset }
            | Error::TruncatedCertificate { offset, .. } => Some(*offset),
        }
    }

    // Header errors are decoded relative to the slice they were given.
    pub(crate) fn rebase(self, base: usize) -> Self {
        match self {
            Error::EmptyInput => Error::EmptyInput,
            Error::UnexpectedTag { offset, tag } => Error::UnexpectedTag {
                offset: offset + base,
                tag,
            },
            Error::IndefiniteLengthUnsupported { offset } => {
                Error::IndefiniteLengthUnsupported {
                    offset: offset + base,
                }
            }
            Error::LengthOctetsExceeded { offset, count } => Error::LengthOctetsExceeded {
                offset: offset + base,
                count,
            },
            Error::LengthOverflow { offset } => Error::LengthOverflow {
                offset: offset + base,
            },
            Error::TruncatedCertificate {
                offset,
                needed,
                available,
            } => Error::TruncatedCertificate {
                offset: offset + base,
                needed,
                available,
            },
        }
    }
}
