//! Decoder trait for type-safe conversions.
//!
//! The `Decoder` trait converts a source type `T` into a destination type
//! `D`. The `der` crate uses it to turn a raw byte slice into a `Chain`, and
//! the `pem` crate uses it to turn PEM armor back into DER bytes.
//!
//! # Design Pattern
//!
//! 1. `Decoder<T, D>` - performs the conversion
//! 2. `DecodableFrom<T>` - marker trait constraining valid conversions
//!
//! # Implementation Guide
//!
//! ```no_run
//! use dechain::decoder::{Decoder, DecodableFrom};
//!
//! struct Blob(Vec<u8>);
//! struct Count(usize);
//!
//! #[derive(Debug)]
//! struct CountError;
//!
//! impl DecodableFrom<Blob> for Count {}
//!
//! impl Decoder<Blob, Count> for Blob {
//!     type Error = CountError;
//!
//!     fn decode(&self) -> Result<Count, Self::Error> {
//!         Ok(Count(self.0.iter().filter(|&&b| b == 0x30).count()))
//!     }
//! }
//! ```

/// Decoder trait for converting from type `T` to type `D`.
///
/// This trait is implemented by the source type `T`. The destination type
/// must implement `DecodableFrom<T>`.
///
/// # Type Parameters
///
/// * `T` - The source type (usually `Self`)
/// * `D` - The destination type that can be decoded from `T`
///
/// # Examples
///
/// ```ignore
/// use dechain::decoder::Decoder;
/// use der::Chain;
///
/// let blob: &[u8] = &[0x30, 0x00];
/// let chain: Chain = blob.decode().unwrap();
/// ```
pub trait Decoder<T, D: DecodableFrom<T>> {
    /// The error type returned when decoding fails.
    type Error;

    /// Decodes `self` into type `D`.
    ///
    /// # Errors
    ///
    /// Returns an error if the conversion fails. The specific error
    /// conditions depend on the implementing type.
    fn decode(&self) -> Result<D, Self::Error>;
}

/// Marker trait indicating that type `D` can be decoded from type `T`.
///
/// Without it any type could attempt to decode into any other type. Each
/// valid pair has to be declared explicitly:
///
/// ```no_run
/// use dechain::decoder::DecodableFrom;
///
/// struct Raw;
/// struct Parsed;
///
/// impl DecodableFrom<Raw> for Parsed {}
/// ```
pub trait DecodableFrom<T> {}
