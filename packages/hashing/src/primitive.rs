//! Word-level SHA-1 primitive
//!
//! The engine works on big-endian word arrays with an explicit bit length,
//! so the hash is exposed in that shape rather than over byte slices.

use sha1::{Digest as _, Sha1};

use crate::codec::big_endian;
use crate::{Digest, HashError, Result, DIGEST_BYTES};

/// SHA-1 block size in bytes
pub const BLOCK_BYTES: usize = 64;

/// SHA-1 block size in 32-bit words
pub const BLOCK_WORDS: usize = BLOCK_BYTES / 4;

/// A 160-bit hash over big-endian word arrays
pub trait WordHash {
    /// Hash the first `bit_len` bits of the big-endian image of `words`
    ///
    /// Words missing past the end of `words` read as zero.
    ///
    /// # Errors
    ///
    /// Returns `HashError::InvalidParameters` if `bit_len` is not a whole
    /// number of bytes.
    fn hash_words(&self, words: &[u32], bit_len: u64) -> Result<Digest>;
}

/// SHA-1 (FIPS 180) backed by the RustCrypto `sha1` crate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha1Words;

impl WordHash for Sha1Words {
    fn hash_words(&self, words: &[u32], bit_len: u64) -> Result<Digest> {
        if bit_len % 8 != 0 {
            return Err(HashError::invalid_parameters(format!(
                "bit length {bit_len} is not a whole number of bytes"
            )));
        }
        let mut remaining = usize::try_from(bit_len / 8).map_err(|_| {
            HashError::invalid_parameters(format!("bit length {bit_len} exceeds address space"))
        })?;

        let mut hasher = Sha1::new();
        for word in words {
            if remaining == 0 {
                break;
            }
            let take = remaining.min(4);
            hasher.update(&word.to_be_bytes()[..take]);
            remaining -= take;
        }

        let zeros = [0u8; BLOCK_BYTES];
        while remaining > 0 {
            let take = remaining.min(BLOCK_BYTES);
            hasher.update(&zeros[..take]);
            remaining -= take;
        }

        let output = hasher.finalize();
        let bytes: [u8; DIGEST_BYTES] = output
            .as_slice()
            .try_into()
            .map_err(|_| HashError::Finalization(format!("unexpected digest length {}", output.len())))?;
        Ok(Digest::from_be_bytes(bytes))
    }
}

/// SHA-1 of a byte string as lowercase hex
///
/// # Errors
///
/// Propagates errors from [`WordHash::hash_words`]; byte input always has a
/// whole-byte bit length, so this does not fail in practice.
pub fn sha1_hex(data: &[u8]) -> Result<String> {
    let packed = big_endian::pack_bytes(data);
    Ok(Sha1Words.hash_words(&packed.words, packed.bit_len)?.to_hex())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_partial_bytes() {
        let err = Sha1Words.hash_words(&[0x8000_0000], 1);
        assert!(matches!(err, Err(HashError::InvalidParameters(_))));
    }

    #[test]
    fn test_missing_words_read_as_zero() {
        let short = Sha1Words.hash_words(&[0x6162_6300], 64).expect("hash");
        let padded = Sha1Words.hash_words(&[0x6162_6300, 0], 64).expect("hash");
        assert_eq!(short, padded);
    }

    #[test]
    fn test_bit_length_truncates_trailing_words() {
        let abc = Sha1Words.hash_words(&[0x6162_63ff, 0xffff_ffff], 24).expect("hash");
        assert_eq!(abc.to_hex(), "a9993e364706816aba3e25717850c26c9cd0d89d");
    }
}
