use std::iter::FusedIterator;
use std::ops::Range;

use crate::{Error, Header};

/// One certificate's byte range within the source buffer.
///
/// The range covers the whole outer TLV: tag, length field and content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    offset: usize,
    header: Header,
}

impl Segment {
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.header.total_len()
    }

    /// Pairs with `len`. Always false: a segment holds at least its
    /// tag and length octets.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Offset just past the last byte of this certificate.
    pub fn end(&self) -> usize {
        self.offset + self.len()
    }

    pub fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Slices this certificate out of the buffer it was found in.
    ///
    /// Returns `None` if `buffer` is shorter than the segment, which only
    /// happens when it is not the buffer that was scanned.
    pub fn bytes<'a>(&self, buffer: &'a [u8]) -> Option<&'a [u8]> {
        buffer.get(self.range())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Scanning,
    Done,
    Failed,
}

/// Lazy left-to-right scan over a concatenated chain.
///
/// Yields one `Segment` per certificate. The first error is yielded once and
/// ends the scan, as every later boundary would depend on the bad one.
/// An empty buffer yields nothing.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    buffer: &'a [u8],
    cursor: usize,
    state: State,
}

impl<'a> Segments<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Segments {
            buffer,
            cursor: 0,
            state: State::Scanning,
        }
    }

    /// Number of bytes accounted for by the segments yielded so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }

    /// Whether the scan reached the end of the buffer without error.
    pub fn is_done(&self) -> bool {
        self.state == State::Done
    }

    fn decode_at(&self, offset: usize) -> Result<Segment, Error> {
        let rest = &self.buffer[offset..];
        let header = Header::parse(rest).map_err(|e| e.rebase(offset))?;
        let needed = header.total_len();
        if needed > rest.len() {
            return Err(Error::TruncatedCertificate {
                offset,
                needed,
                available: rest.len(),
            });
        }
        Ok(Segment { offset, header })
    }
}

impl Iterator for Segments<'_> {
    type Item = Result<Segment, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state != State::Scanning {
            return None;
        }
        if self.cursor == self.buffer.len() {
            self.state = State::Done;
            return None;
        }

        match self.decode_at(self.cursor) {
            Ok(segment) => {
                tracing::trace!(
                    offset = segment.offset(),
                    len = segment.len(),
                    form = ?segment.header().form(),
                    "found certificate"
                );
                self.cursor = segment.end();
                Some(Ok(segment))
            }
            Err(e) => {
                tracing::debug!(error = %e, "certificate scan failed");
                self.state = State::Failed;
                Some(Err(e))
            }
        }
    }
}

impl FusedIterator for Segments<'_> {}

/// Splits `buffer` into the certificates it contains, in order.
///
/// Fails with [`Error::EmptyInput`] on an empty buffer and with the first
/// framing error otherwise; no partial result is returned.
pub fn split(buffer: &[u8]) -> Result<Vec<Segment>, Error> {
    if buffer.is_empty() {
        return Err(Error::EmptyInput);
    }
    let segments = Segments::new(buffer).collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(
        certificates = segments.len(),
        bytes = buffer.len(),
        "split certificate chain"
    );
    Ok(segments)
}
