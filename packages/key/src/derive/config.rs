//! PBKDF2 engine configuration
//!
//! Presets and JSON loading for the knobs that shape how a derivation is
//! sliced and how inputs are packed. None of them change the derived key for
//! byte inputs under the standard block index encoding, except
//! [`BlockIndexEncoding::Legacy`], which exists for bit-compatibility only.

use paced_hashing::CharWidth;
use serde::{Deserialize, Serialize};

use crate::{KdfError, Result};

/// Default number of PRF iterations performed per slice
pub const DEFAULT_ITERATIONS_PER_CHUNK: u32 = 10;

/// How the 1-based block index is appended to the salt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockIndexEncoding {
    /// RFC 2898 `INT(i)`: four bytes, big-endian, full byte range
    #[default]
    Standard,
    /// Each index byte masked with `0xF`; identical to `Standard` only for
    /// blocks 1 through 15
    Legacy,
}

impl BlockIndexEncoding {
    /// Highest block index for which `Legacy` agrees with `Standard`
    pub const LEGACY_EXACT_LIMIT: u32 = 15;

    /// The four code units appended to the salt for `block`
    #[must_use]
    pub fn encode(self, block: u32) -> [u16; 4] {
        let mask = match self {
            Self::Standard => 0xFF,
            Self::Legacy => 0x0F,
        };
        block.to_be_bytes().map(|byte| u16::from(byte & mask))
    }
}

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pbkdf2Config {
    /// PRF iterations per slice before control returns to the host
    pub iterations_per_chunk: u32,
    /// Bits per character when packing text input
    pub char_width: CharWidth,
    /// Block index encoding appended to the salt
    pub block_index: BlockIndexEncoding,
}

impl Default for Pbkdf2Config {
    fn default() -> Self {
        Self {
            iterations_per_chunk: DEFAULT_ITERATIONS_PER_CHUNK,
            char_width: CharWidth::Byte,
            block_index: BlockIndexEncoding::Standard,
        }
    }
}

impl Pbkdf2Config {
    /// Small slices for hosts that must stay responsive
    #[must_use]
    pub fn interactive() -> Self {
        Self::default()
    }

    /// Large slices for background hosts where throughput matters more
    #[must_use]
    pub fn batch() -> Self {
        Self {
            iterations_per_chunk: 1_000,
            ..Self::default()
        }
    }

    /// Set the slice size
    #[must_use]
    pub fn with_chunk_size(mut self, iterations_per_chunk: u32) -> Self {
        self.iterations_per_chunk = iterations_per_chunk;
        self
    }

    /// Set the text packing width
    #[must_use]
    pub fn with_char_width(mut self, char_width: CharWidth) -> Self {
        self.char_width = char_width;
        self
    }

    /// Set the block index encoding
    #[must_use]
    pub fn with_block_index(mut self, block_index: BlockIndexEncoding) -> Self {
        self.block_index = block_index;
        self
    }

    /// Load a configuration from JSON; absent fields take their defaults
    ///
    /// # Errors
    ///
    /// Returns `KdfError::InvalidConfig` if the document does not parse or
    /// the resulting configuration fails [`Pbkdf2Config::validate`].
    pub fn from_json(document: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(document)
            .map_err(|e| KdfError::invalid_config(format!("Malformed configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for values the engine cannot run with
    ///
    /// # Errors
    ///
    /// Returns `KdfError::InvalidConfig` if `iterations_per_chunk` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.iterations_per_chunk == 0 {
            return Err(KdfError::invalid_config(
                "iterations_per_chunk must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_encoding_is_int_i() {
        assert_eq!(BlockIndexEncoding::Standard.encode(1), [0, 0, 0, 1]);
        assert_eq!(
            BlockIndexEncoding::Standard.encode(0x0102_03ff),
            [0x01, 0x02, 0x03, 0xff]
        );
    }

    #[test]
    fn test_legacy_encoding_masks_nibbles() {
        for block in 1..=BlockIndexEncoding::LEGACY_EXACT_LIMIT {
            assert_eq!(
                BlockIndexEncoding::Legacy.encode(block),
                BlockIndexEncoding::Standard.encode(block)
            );
        }
        assert_eq!(BlockIndexEncoding::Legacy.encode(16), [0, 0, 0, 0]);
        assert_eq!(BlockIndexEncoding::Legacy.encode(0x1f), [0, 0, 0, 0x0f]);
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = Pbkdf2Config::from_json(r#"{"iterations_per_chunk": 250}"#)
            .expect("valid configuration");
        assert_eq!(config.iterations_per_chunk, 250);
        assert_eq!(config.char_width, CharWidth::Byte);
        assert_eq!(config.block_index, BlockIndexEncoding::Standard);

        let config = Pbkdf2Config::from_json(r#"{"char_width": "utf16", "block_index": "legacy"}"#)
            .expect("valid configuration");
        assert_eq!(config.char_width, CharWidth::Utf16);
        assert_eq!(config.block_index, BlockIndexEncoding::Legacy);
    }

    #[test]
    fn test_from_json_rejects_bad_documents() {
        assert!(matches!(
            Pbkdf2Config::from_json(r#"{"iterations_per_chunk": 0}"#),
            Err(KdfError::InvalidConfig(_))
        ));
        assert!(matches!(
            Pbkdf2Config::from_json("not json"),
            Err(KdfError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_presets() {
        assert_eq!(Pbkdf2Config::interactive().iterations_per_chunk, 10);
        assert_eq!(Pbkdf2Config::batch().iterations_per_chunk, 1_000);
    }
}
