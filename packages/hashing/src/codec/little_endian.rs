//! Generic little-endian byte/word codec
//!
//! Byte `k` of the input occupies bits `8 * (k % 4) .. 8 * (k % 4) + 8` of
//! word `k / 4`.

/// Pack bytes into `ceil(n / 4)` little-endian words, zero-filling the tail
#[must_use]
pub fn pack(bytes: &[u8]) -> Vec<u32> {
    bytes
        .chunks(4)
        .map(|chunk| {
            let mut word = [0u8; 4];
            word[..chunk.len()].copy_from_slice(chunk);
            u32::from_le_bytes(word)
        })
        .collect()
}

/// Unpack the first `bit_len` bits of `words` back into bytes
///
/// `bit_len` is clamped to the bits actually present; trailing padding
/// beyond it is not emitted. A partial final byte is dropped.
#[must_use]
pub fn unpack(words: &[u32], bit_len: usize) -> Vec<u8> {
    let bit_len = bit_len.min(words.len() * 32);
    words
        .iter()
        .flat_map(|word| word.to_le_bytes())
        .take(bit_len / 8)
        .collect()
}

/// Unpack every byte of `words`, padding included
#[must_use]
pub fn unpack_all(words: &[u32]) -> Vec<u8> {
    unpack(words, words.len() * 32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_zero_is_least_significant() {
        assert_eq!(pack(&[0x01, 0x02, 0x03, 0x04]), vec![0x0403_0201]);
        assert_eq!(pack(&[0xaa]), vec![0x0000_00aa]);
    }

    #[test]
    fn test_pack_rounds_word_count_up() {
        assert!(pack(&[]).is_empty());
        assert_eq!(pack(&[1, 2, 3, 4, 5]).len(), 2);
    }

    #[test]
    fn test_unpack_honours_bit_length() {
        let words = pack(b"abcde");
        assert_eq!(unpack(&words, 40), b"abcde".to_vec());
        assert_eq!(unpack_all(&words), b"abcde\0\0\0".to_vec());
        assert_eq!(unpack(&words, 1024).len(), 8);
    }
}
