//! SHA-1 bit packing: most significant byte first within each word
//!
//! Characters are placed at bit offset `i * width` counted from the most
//! significant bit of word 0. Width is 8 for byte strings and 16 for UTF-16
//! code-unit strings.

use serde::{Deserialize, Serialize};

/// Bits per packed character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharWidth {
    /// 8 bits per character; wider code units keep only their low byte
    #[default]
    Byte,
    /// 16 bits per character (UTF-16 code units)
    Utf16,
}

impl CharWidth {
    /// Number of bits each character occupies
    #[must_use]
    pub const fn bits(self) -> usize {
        match self {
            Self::Byte => 8,
            Self::Utf16 => 16,
        }
    }

    /// Mask applied to every code unit before packing
    #[must_use]
    pub const fn mask(self) -> u32 {
        match self {
            Self::Byte => 0xFF,
            Self::Utf16 => 0xFFFF,
        }
    }
}

/// Packed big-endian words with the exact number of meaningful bits
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackedText {
    /// Packed words; bits past `bit_len` are zero
    pub words: Vec<u32>,
    /// Number of meaningful bits
    pub bit_len: u64,
}

/// Pack code units at `width` bits each
#[must_use]
pub fn pack_units(units: &[u16], width: CharWidth) -> PackedText {
    let bits = width.bits();
    let total = units.len() * bits;
    let mut words = vec![0u32; total.div_ceil(32)];

    for (i, &unit) in units.iter().enumerate() {
        let offset = i * bits;
        words[offset >> 5] |= (u32::from(unit) & width.mask()) << (32 - bits - offset % 32);
    }

    PackedText {
        words,
        bit_len: total as u64,
    }
}

/// Pack a byte string, 8 bits per byte
#[must_use]
pub fn pack_bytes(bytes: &[u8]) -> PackedText {
    let units: Vec<u16> = bytes.iter().map(|&b| u16::from(b)).collect();
    pack_units(&units, CharWidth::Byte)
}

/// Big-endian byte image of `words`
#[must_use]
pub fn to_bytes(words: &[u32]) -> Vec<u8> {
    words.iter().flat_map(|word| word.to_be_bytes()).collect()
}

/// Lowercase hex of `words`, most significant byte of each word first
#[must_use]
pub fn to_hex(words: &[u32]) -> String {
    hex::encode(to_bytes(words))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_zero_is_most_significant() {
        let packed = pack_bytes(&[0x01, 0x02, 0x03, 0x04, 0x05]);
        assert_eq!(packed.words, vec![0x0102_0304, 0x0500_0000]);
        assert_eq!(packed.bit_len, 40);
    }

    #[test]
    fn test_utf16_units_fill_half_words() {
        let units: Vec<u16> = "p\u{e9}\u{2603}".encode_utf16().collect();
        let packed = pack_units(&units, CharWidth::Utf16);
        assert_eq!(packed.words, vec![0x0070_00e9, 0x2603_0000]);
        assert_eq!(packed.bit_len, 48);
    }

    #[test]
    fn test_byte_width_truncates_wide_units() {
        let packed = pack_units(&[0x2603, 0x0041], CharWidth::Byte);
        assert_eq!(packed.words, vec![0x0341_0000]);
    }

    #[test]
    fn test_hex_is_lowercase_big_endian() {
        assert_eq!(to_hex(&[0xDEAD_BEEF, 0x0000_0001]), "deadbeef00000001");
        assert_eq!(to_bytes(&[0x0102_0304]), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_conventions_disagree_on_the_same_bytes() {
        let bytes = b"word";
        let be = pack_bytes(bytes).words;
        let le = crate::codec::little_endian::pack(bytes);
        assert_ne!(be, le);
        assert_eq!(be[0], le[0].swap_bytes());
    }
}
