//! HMAC-SHA1 over word arrays with precomputed pad keys

use paced_hashing::{Digest, PackedText, WordHash, BLOCK_WORDS, DIGEST_WORDS};

use crate::Result;

const IPAD: u32 = 0x3636_3636;
const OPAD: u32 = 0x5C5C_5C5C;
const BLOCK_BITS: u64 = (BLOCK_WORDS as u64) * 32;
const DIGEST_BITS: u64 = (DIGEST_WORDS as u64) * 32;

/// Inner and outer HMAC keys, one hash block each
#[derive(Clone, PartialEq, Eq)]
pub struct PadKeys {
    ipad: [u32; BLOCK_WORDS],
    opad: [u32; BLOCK_WORDS],
    shortened: bool,
}

impl PadKeys {
    /// Derive pad keys from a packed password
    ///
    /// Keys longer than one hash block are replaced by their digest first.
    /// Shorter keys are zero-extended.
    ///
    /// # Errors
    ///
    /// Propagates hash errors from the key-shortening digest.
    pub fn derive<H: WordHash>(hash: &H, key: &PackedText) -> Result<Self> {
        let shortened = key.words.len() > BLOCK_WORDS;
        let digest;
        let key_words: &[u32] = if shortened {
            digest = hash.hash_words(&key.words, key.bit_len)?;
            digest.words()
        } else {
            &key.words
        };

        let mut ipad = [IPAD; BLOCK_WORDS];
        let mut opad = [OPAD; BLOCK_WORDS];
        for (i, &word) in key_words.iter().enumerate() {
            ipad[i] ^= word;
            opad[i] ^= word;
        }

        Ok(Self {
            ipad,
            opad,
            shortened,
        })
    }

    /// Whether the password was pre-hashed before deriving the pads
    #[must_use]
    pub fn was_shortened(&self) -> bool {
        self.shortened
    }

    /// `HMAC(key, message)` for a packed message
    ///
    /// # Errors
    ///
    /// Propagates hash errors.
    pub fn mac<H: WordHash>(&self, hash: &H, message: &PackedText) -> Result<Digest> {
        let inner = prf(hash, &self.ipad, &message.words, message.bit_len)?;
        prf(hash, &self.opad, inner.words(), DIGEST_BITS)
    }

    /// `HMAC(key, previous)` for chaining on a prior PRF output
    ///
    /// # Errors
    ///
    /// Propagates hash errors.
    pub fn mac_digest<H: WordHash>(&self, hash: &H, previous: &Digest) -> Result<Digest> {
        let inner = prf(hash, &self.ipad, previous.words(), DIGEST_BITS)?;
        prf(hash, &self.opad, inner.words(), DIGEST_BITS)
    }
}

// Pad material is key-equivalent.
impl std::fmt::Debug for PadKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PadKeys")
            .field("shortened", &self.shortened)
            .finish_non_exhaustive()
    }
}

fn prf<H: WordHash>(
    hash: &H,
    pad: &[u32; BLOCK_WORDS],
    message: &[u32],
    message_bits: u64,
) -> Result<Digest> {
    let mut words = Vec::with_capacity(BLOCK_WORDS + message.len());
    words.extend_from_slice(pad);
    words.extend_from_slice(message);
    Ok(hash.hash_words(&words, BLOCK_BITS + message_bits)?)
}
