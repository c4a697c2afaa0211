//! RFC 6070 PBKDF2-HMAC-SHA1 test vectors

use hex_literal::hex;
use paced_key::{Pbkdf2Config, Pbkdf2Engine};

fn derive(password: &str, salt: &str, iterations: u32, key_length: usize) -> Vec<u8> {
    Pbkdf2Engine::with_config(password, salt, iterations, key_length, Pbkdf2Config::batch())
        .expect("valid parameters")
        .run_to_completion(|_| {})
        .expect("derivation completes")
        .into_bytes()
}

#[test]
fn test_one_iteration() {
    assert_eq!(
        derive("password", "salt", 1, 20),
        hex!("0c60c80f961f0e71f3a9b524af6012062fe037a6")
    );
}

#[test]
fn test_two_iterations() {
    assert_eq!(
        derive("password", "salt", 2, 20),
        hex!("ea6c014dc72d6f8ccd1ed92ace1d41f0d8de8957")
    );
}

#[test]
fn test_4096_iterations() {
    assert_eq!(
        derive("password", "salt", 4096, 20),
        hex!("4b007901b765489abead49d926f721d065a429c1")
    );
}

#[test]
fn test_long_password_and_salt_two_blocks() {
    assert_eq!(
        derive(
            "passwordPASSWORDpassword",
            "saltSALTsaltSALTsaltSALTsaltSALTsalt",
            4096,
            25
        ),
        hex!("3d2eec4fe41c849b80c8d83662c0e44a8b291a964cf2f07038")
    );
}

#[test]
fn test_embedded_nul_truncated_key() {
    assert_eq!(
        derive("pass\0word", "sa\0lt", 4096, 16),
        hex!("56fa6aa75548099dcc37d7f03425e0c3")
    );
}

#[test]
fn test_default_chunk_size_matches_vector() {
    let key = Pbkdf2Engine::new("password", "salt", 4096, 20)
        .expect("valid parameters")
        .run_to_completion(|_| {})
        .expect("derivation completes");
    assert_eq!(key.to_hex(), "4b007901b765489abead49d926f721d065a429c1");
    assert_eq!(key.to_hex().len(), 40);
}
