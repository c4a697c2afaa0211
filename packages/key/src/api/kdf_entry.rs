//! Entry point for the fluent API

use super::pbkdf2_builder::Pbkdf2Builder;

/// Entry point for key derivation
pub struct Kdf;

impl Kdf {
    /// PBKDF2-HMAC-SHA1
    #[must_use]
    pub fn pbkdf2() -> Pbkdf2Builder {
        Pbkdf2Builder::new()
    }
}
