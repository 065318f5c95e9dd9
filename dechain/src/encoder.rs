//! Encoder trait, the reverse of [`Decoder`](crate::decoder::Decoder).

/// Encoder trait for converting from type `T` to type `E`.
///
/// Implemented by the source type. The destination must implement
/// [`EncodableTo<T>`].
///
/// ```no_run
/// use dechain::encoder::{EncodableTo, Encoder};
///
/// struct Segment(Vec<u8>);
///
/// impl EncodableTo<Segment> for Vec<u8> {}
///
/// impl Encoder<Segment, Vec<u8>> for Segment {
///     type Error = std::convert::Infallible;
///
///     fn encode(&self) -> Result<Vec<u8>, Self::Error> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
pub trait Encoder<T, E: EncodableTo<T>> {
    /// The error type returned when encoding fails.
    type Error;

    /// Encodes `self` into type `E`.
    fn encode(&self) -> Result<E, Self::Error>;
}

/// Marker trait indicating that type `E` can be encoded from type `T`.
pub trait EncodableTo<T> {}
