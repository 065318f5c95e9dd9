//! Locate certificate boundaries in a concatenated DER chain.
//!
//! A chain read out of non-volatile storage carries no count or length
//! prefix. Each certificate is an outer `SEQUENCE` TLV, so the stream is
//! split by reading one tag and length at a time and jumping over the
//! content.
//!
//! ```
//! use der::Chain;
//!
//! let blob = [0x30, 0x01, 0x05, 0x30, 0x00];
//! let chain = Chain::split(&blob).unwrap();
//! assert_eq!(chain.len(), 2);
//! assert_eq!(chain.get(0), Some(&blob[..3]));
//! ```

use std::fmt::{Display, Formatter};

mod chain;
pub mod error;
mod header;
mod segment;

pub use chain::Chain;
pub use error::Error;
pub use header::{Header, LengthForm};
pub use segment::{Segment, Segments, split};

/// Largest number of long form length octets accepted.
///
/// Four octets already describe a 4 GiB certificate; anything wider in a
/// chain dump means corrupt input and would overflow the length.
pub const MAX_LENGTH_OCTETS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tag {
    Integer,
    BitString,
    OctetString,
    Null,
    ObjectIdentifier,
    UTF8String,
    Sequence,
    Set,
    PrintableString,
    IA5String,
    UTCTime,
    GeneralizedTime,
    Other(u8),
}

impl Tag {
    pub fn as_u8(self) -> u8 {
        match self {
            Tag::Integer => 0x02,
            Tag::BitString => 0x03,
            Tag::OctetString => 0x04,
            Tag::Null => 0x05,
            Tag::ObjectIdentifier => 0x06,
            Tag::UTF8String => 0x0c,
            Tag::Sequence => 0x30,
            Tag::Set => 0x31,
            Tag::PrintableString => 0x13,
            Tag::IA5String => 0x16,
            Tag::UTCTime => 0x17,
            Tag::GeneralizedTime => 0x18,
            Tag::Other(n) => n,
        }
    }
}

impl From<u8> for Tag {
    fn from(value: u8) -> Self {
        match value {
            0x02 => Self::Integer,
            0x03 => Self::BitString,
            0x04 => Self::OctetString,
            0x05 => Self::Null,
            0x06 => Self::ObjectIdentifier,
            0x0c => Self::UTF8String,
            0x30 => Self::Sequence,
            0x31 => Self::Set,
            0x13 => Self::PrintableString,
            0x16 => Self::IA5String,
            0x17 => Self::UTCTime,
            0x18 => Self::GeneralizedTime,
            _ => Tag::Other(value),
        }
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Tag::Integer => "INTEGER",
            Tag::BitString => "BIT STRING",
            Tag::OctetString => "OCTET STRING",
            Tag::Null => "NULL",
            Tag::ObjectIdentifier => "OBJECT IDENTIFIER",
            Tag::UTF8String => "UTF8String",
            Tag::Sequence => "SEQUENCE",
            Tag::Set => "SET",
            Tag::PrintableString => "PrintableString",
            Tag::IA5String => "IA5String",
            Tag::UTCTime => "UTCTime",
            Tag::GeneralizedTime => "GeneralizedTime",
            Tag::Other(_) => "tag",
        };
        write!(f, "{} (0x{:02x})", name, self.as_u8())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::Tag;

    #[rstest(input, expected,
        case(0x02, Tag::Integer),
        case(0x04, Tag::OctetString),
        case(0x30, Tag::Sequence),
        case(0x31, Tag::Set),
        case(0xa0, Tag::Other(0xa0)),
    )]
    fn test_tag_from_u8(input: u8, expected: Tag) {
        let tag = Tag::from(input);
        assert_eq!(expected, tag);
        assert_eq!(input, tag.as_u8());
    }

    #[rstest(tag, expected,
        case(Tag::Sequence, "SEQUENCE (0x30)"),
        case(Tag::OctetString, "OCTET STRING (0x04)"),
        case(Tag::Other(0xff), "tag (0xff)"),
    )]
    fn test_tag_display(tag: Tag, expected: &str) {
        assert_eq!(expected, tag.to_string());
    }
}
