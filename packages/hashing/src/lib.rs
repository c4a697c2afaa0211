//! Word-level hashing support for the paced key derivation engine
//!
//! Two packing conventions live here and must never be mixed:
//!
//! - [`codec::little_endian`] - the generic byte/word codec, least significant
//!   byte first within each 32-bit word
//! - [`codec::big_endian`] - the packer mandated by SHA-1, most significant
//!   byte first, with configurable bits per character
//!
//! [`Sha1Words`] hashes a big-endian word array plus an explicit bit length
//! into a five-word [`Digest`].

#![forbid(unsafe_code)]

pub mod codec;
pub mod digest;
pub mod error;
pub mod primitive;

pub use codec::big_endian::{CharWidth, PackedText};
pub use digest::{Digest, DIGEST_BYTES, DIGEST_WORDS};
pub use error::{HashError, Result};
pub use primitive::{sha1_hex, Sha1Words, WordHash, BLOCK_BYTES, BLOCK_WORDS};
