//! # dechain
//!
//! Core conversion traits shared by the dechain crates.
//!
//! ## Overview
//!
//! A certificate chain dumped from a hardware security module travels
//! through these representations:
//! ```text
//! &[u8] → Chain → [Segment] → DER bytes → PEM
//! ```
//!
//! Each step uses the `Decoder` trait to go from one representation to the
//! next, and the `Encoder` trait to go back.
//!
//! ## Type Safety
//!
//! Both traits are guarded by marker traits (`DecodableFrom` and
//! `EncodableTo`), so only conversions that were explicitly declared compile.
//!
//! ## Example
//!
//! ```ignore
//! use dechain::decoder::Decoder;
//! use dechain::encoder::Encoder;
//! use der::Chain;
//!
//! let blob: &[u8] = &[0x30, 0x00, 0x30, 0x01, 0x05];
//! let chain: Chain = blob.decode().unwrap();
//! assert_eq!(chain.len(), 2);
//!
//! let joined: Vec<u8> = chain.encode().unwrap();
//! assert_eq!(joined, blob);
//! ```

#![forbid(unsafe_code)]

pub mod decoder;
pub mod encoder;
