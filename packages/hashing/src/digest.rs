//! Five-word (160-bit) digest value

use std::fmt;
use std::ops::BitXorAssign;

use crate::codec::big_endian;

/// Number of 32-bit words in a digest
pub const DIGEST_WORDS: usize = 5;

/// Number of bytes in a digest
pub const DIGEST_BYTES: usize = DIGEST_WORDS * 4;

/// Output of one SHA-1 evaluation, held as big-endian words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Digest([u32; DIGEST_WORDS]);

impl Digest {
    /// The all-zero digest, identity for XOR folding
    pub const ZERO: Self = Self([0; DIGEST_WORDS]);

    /// Wrap five words
    #[must_use]
    pub const fn from_words(words: [u32; DIGEST_WORDS]) -> Self {
        Self(words)
    }

    /// Interpret 20 bytes as five big-endian words
    #[must_use]
    pub fn from_be_bytes(bytes: [u8; DIGEST_BYTES]) -> Self {
        let mut words = [0u32; DIGEST_WORDS];
        for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
            *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Self(words)
    }

    /// The digest words
    #[must_use]
    pub const fn words(&self) -> &[u32; DIGEST_WORDS] {
        &self.0
    }

    /// Word-wise XOR of `other` into `self`
    pub fn xor_assign(&mut self, other: &Self) {
        for (acc, word) in self.0.iter_mut().zip(other.0) {
            *acc ^= word;
        }
    }

    /// Big-endian byte image
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        big_endian::to_bytes(&self.0)
    }

    /// Lowercase hex, 40 characters
    #[must_use]
    pub fn to_hex(&self) -> String {
        big_endian::to_hex(&self.0)
    }
}

impl BitXorAssign for Digest {
    fn bitxor_assign(&mut self, rhs: Self) {
        self.xor_assign(&rhs);
    }
}

impl From<[u32; DIGEST_WORDS]> for Digest {
    fn from(words: [u32; DIGEST_WORDS]) -> Self {
        Self(words)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
