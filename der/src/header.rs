use nom::{IResult, Parser};

use crate::{Error, MAX_LENGTH_OCTETS, Tag};

/// How the length field of a TLV was encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthForm {
    /// One octet, content length 0-127.
    Short,
    /// A length-of-length octet followed by big-endian length octets.
    Long,
}

/// Tag and length of an outer certificate TLV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    tag: Tag,
    form: LengthForm,
    length_octets: usize,
    content_length: usize,
}

impl Header {
    /// Decodes the header of the certificate starting at `input[0]`.
    ///
    /// Only the constructed `SEQUENCE` tag is accepted. Offsets in the
    /// returned errors are relative to `input`. Content bytes are not
    /// checked here; see [`Segments`](crate::Segments) for that.
    pub fn parse(input: &[u8]) -> Result<Header, Error> {
        let available = input.len();
        let truncated = |needed| Error::TruncatedCertificate {
            offset: 0,
            needed,
            available,
        };

        let (input, tag) = parse_tag(input).map_err(|_| truncated(1))?;
        if tag != Tag::Sequence {
            return Err(Error::UnexpectedTag { offset: 0, tag });
        }

        let (input, n) = parse_initial_length_octet(input).map_err(|_| truncated(2))?;
        if n & 0x80 == 0 {
            // short form: 0-127
            return Ok(Header {
                tag,
                form: LengthForm::Short,
                length_octets: 1,
                content_length: n as usize,
            });
        }

        // long form
        // First 1 bit is a marker for long form.
        // Other bits represent bytes length of the length field.
        let count = (n & 0x7f) as usize;
        if count == 0 {
            return Err(Error::IndefiniteLengthUnsupported { offset: 0 });
        }
        if count > MAX_LENGTH_OCTETS {
            return Err(Error::LengthOctetsExceeded { offset: 0, count });
        }

        let (_, length) =
            parse_long_length(input, count).map_err(|_| truncated(2 + count))?;
        let content_length =
            usize::try_from(length).map_err(|_| Error::LengthOverflow { offset: 0 })?;
        let header = Header {
            tag,
            form: LengthForm::Long,
            length_octets: 1 + count,
            content_length,
        };
        header
            .header_len()
            .checked_add(content_length)
            .ok_or(Error::LengthOverflow { offset: 0 })?;

        Ok(header)
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn form(&self) -> LengthForm {
        self.form
    }

    /// Width of the length field, including the initial octet.
    pub fn length_octets(&self) -> usize {
        self.length_octets
    }

    /// Decoded length of the value part.
    pub fn content_length(&self) -> usize {
        self.content_length
    }

    /// Tag octet plus length field.
    pub fn header_len(&self) -> usize {
        1 + self.length_octets
    }

    /// Size of the whole TLV. Never overflows: `parse` rejects such headers.
    pub fn total_len(&self) -> usize {
        self.header_len() + self.content_length
    }
}

fn parse_tag(input: &[u8]) -> IResult<&[u8], Tag> {
    let (input, n) = nom::number::be_u8().parse(input)?;
    Ok((input, Tag::from(n)))
}

fn parse_initial_length_octet(input: &[u8]) -> IResult<&[u8], u8> {
    nom::number::be_u8().parse(input)
}

fn parse_long_length(input: &[u8], count: usize) -> IResult<&[u8], u64> {
    let (input, octets) = nom::bytes::complete::take(count).parse(input)?;
    let n = octets
        .iter()
        .fold(0u64, |n, &b| (n << 8) | u64::from(b));
    Ok((input, n))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{Header, LengthForm, parse_long_length, parse_tag};
    use crate::{Error, Tag};

    #[rstest(input, expected,
        case(vec![0x02], Tag::Integer),
        case(vec![0x02, 0x01], Tag::Integer),
        case(vec![0x30, 0x01], Tag::Sequence),
    )]
    fn test_parse_tag(input: Vec<u8>, expected: Tag) {
        let actual = parse_tag(&input).unwrap();

        assert_eq!(expected, actual.1);
    }

    #[rstest(input, count, expected,
        case(vec![0x80], 1, 0x80),
        case(vec![0x02, 0x10], 2, 256 * 0x02 + 0x10),
        case(vec![0x01, 0x00, 0x00], 3, 256 * 256),
        case(vec![0xff, 0xff], 2, 256 * 0xff + 0xff),
        case(vec![0xff, 0xff, 0xff, 0xff], 4, 0xffff_ffff),
    )]
    fn test_parse_long_length(input: Vec<u8>, count: usize, expected: u64) {
        let (rest, actual) = parse_long_length(&input, count).unwrap();

        assert!(rest.is_empty());
        assert_eq!(expected, actual);
    }

    #[rstest(input, form, length_octets, content_length,
        case(vec![0x30, 0x00], LengthForm::Short, 1, 0),
        case(vec![0x30, 0x7f], LengthForm::Short, 1, 127),
        case(vec![0x30, 0x81, 0x80], LengthForm::Long, 2, 128),
        case(vec![0x30, 0x82, 0x03, 0x1c], LengthForm::Long, 3, 796),
        case(vec![0x30, 0x83, 0x01, 0x00, 0x00], LengthForm::Long, 4, 65536),
        case(vec![0x30, 0x84, 0x00, 0x00, 0x01, 0x00], LengthForm::Long, 5, 256),
    )]
    fn test_header_parse(
        input: Vec<u8>,
        form: LengthForm,
        length_octets: usize,
        content_length: usize,
    ) {
        let header = Header::parse(&input).unwrap();

        assert_eq!(Tag::Sequence, header.tag());
        assert_eq!(form, header.form());
        assert_eq!(length_octets, header.length_octets());
        assert_eq!(content_length, header.content_length());
        assert_eq!(input.len(), header.header_len());
        assert_eq!(input.len() + content_length, header.total_len());
    }

    #[rstest(input, expected,
        case(vec![], Error::TruncatedCertificate { offset: 0, needed: 1, available: 0 }),
        case(vec![0x04, 0x02], Error::UnexpectedTag { offset: 0, tag: Tag::OctetString }),
        case(vec![0x31, 0x00], Error::UnexpectedTag { offset: 0, tag: Tag::Set }),
        case(vec![0x30], Error::TruncatedCertificate { offset: 0, needed: 2, available: 1 }),
        case(vec![0x30, 0x80], Error::IndefiniteLengthUnsupported { offset: 0 }),
        case(vec![0x30, 0x85, 0x01, 0x00, 0x00, 0x00, 0x00], Error::LengthOctetsExceeded { offset: 0, count: 5 }),
        case(vec![0x30, 0xff], Error::LengthOctetsExceeded { offset: 0, count: 127 }),
        case(vec![0x30, 0x82, 0x03], Error::TruncatedCertificate { offset: 0, needed: 4, available: 3 }),
    )]
    fn test_header_parse_with_error(input: Vec<u8>, expected: Error) {
        match Header::parse(&input) {
            Err(e) => assert_eq!(expected, e),
            Ok(h) => panic!("this test should return an error, got {h:?}"),
        }
    }
}
