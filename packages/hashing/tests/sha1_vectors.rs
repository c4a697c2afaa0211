//! SHA-1 correctness against FIPS 180 and well-known reference vectors

use hex_literal::hex;
use paced_hashing::codec::big_endian;
use paced_hashing::{sha1_hex, CharWidth, Digest, Sha1Words, WordHash};

#[test]
fn test_truism() {
    assert_eq!(
        sha1_hex(b"abc").expect("sha1"),
        "a9993e364706816aba3e25717850c26c9cd0d89d"
    );
}

#[test]
fn test_short_messages() {
    assert_eq!(
        sha1_hex(b"").expect("sha1"),
        "da39a3ee5e6b4b0d3255bfef95601890afd80709"
    );
    assert_eq!(
        sha1_hex(b"a").expect("sha1"),
        "86f7e437faa5a7fce15d1ddcb9eaeaea377667b8"
    );
    assert_eq!(
        sha1_hex(b"012345678901234567890123456789012345678901234567890123456789").expect("sha1"),
        "f52e3c2732de7bea28f216d877d78dae1aa1ac6a"
    );
}

#[test]
fn test_fips_180_vectors() {
    assert_eq!(
        sha1_hex(b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq").expect("sha1"),
        "84983e441c3bd26ebaae4aa1f95129e5e54670f1"
    );

    let million_a = vec![b'a'; 1_000_000];
    assert_eq!(
        sha1_hex(&million_a).expect("sha1"),
        "34aa973cd4c4daa4f61eeb2bdbad27316534016f"
    );
}

#[test]
fn test_digest_words_match_byte_vector() {
    let packed = big_endian::pack_bytes(b"abc");
    let digest = Sha1Words
        .hash_words(&packed.words, packed.bit_len)
        .expect("sha1");
    assert_eq!(
        digest,
        Digest::from_be_bytes(hex!("a9993e364706816aba3e25717850c26c9cd0d89d"))
    );
}

#[test]
fn test_utf16_packing_hashes_code_units() {
    // "ab" as UTF-16BE is 00 61 00 62
    let units: Vec<u16> = "ab".encode_utf16().collect();
    let packed = big_endian::pack_units(&units, CharWidth::Utf16);
    let digest = Sha1Words
        .hash_words(&packed.words, packed.bit_len)
        .expect("sha1");
    assert_eq!(digest.to_hex(), sha1_hex(&[0x00, 0x61, 0x00, 0x62]).expect("sha1"));
}
