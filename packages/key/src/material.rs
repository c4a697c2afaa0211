//! Password and salt input

use paced_hashing::codec::big_endian::{self, CharWidth, PackedText};
use std::fmt;

/// Password or salt handed to the engine
///
/// Byte strings are always packed at 8 bits per byte. Text is packed as
/// UTF-16 code units at the configured [`CharWidth`]; at `CharWidth::Byte`
/// each code unit keeps only its low 8 bits, so non-Latin-1 text should be
/// passed as bytes (`text.as_bytes()`) when UTF-8 semantics are wanted.
#[derive(Clone, PartialEq, Eq)]
pub enum KeyMaterial {
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Text, packed as code units
    Text(String),
}

impl KeyMaterial {
    /// Width actually used for this material under the configured width
    #[must_use]
    pub fn effective_width(&self, configured: CharWidth) -> CharWidth {
        match self {
            Self::Bytes(_) => CharWidth::Byte,
            Self::Text(_) => configured,
        }
    }

    /// Code units in packing order
    #[must_use]
    pub fn code_units(&self) -> Vec<u16> {
        match self {
            Self::Bytes(bytes) => bytes.iter().map(|&b| u16::from(b)).collect(),
            Self::Text(text) => text.encode_utf16().collect(),
        }
    }

    /// Pack into big-endian words under the configured width
    #[must_use]
    pub fn pack(&self, configured: CharWidth) -> PackedText {
        match self {
            Self::Bytes(bytes) => big_endian::pack_bytes(bytes),
            Self::Text(_) => {
                big_endian::pack_units(&self.code_units(), self.effective_width(configured))
            }
        }
    }

    /// Number of code units
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Bytes(bytes) => bytes.len(),
            Self::Text(text) => text.encode_utf16().count(),
        }
    }

    /// Whether the material is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// Contents are never printed.
impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(bytes) => write!(f, "KeyMaterial::Bytes(<{} bytes>)", bytes.len()),
            Self::Text(_) => write!(f, "KeyMaterial::Text(<{} units>)", self.len()),
        }
    }
}

impl From<&str> for KeyMaterial {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for KeyMaterial {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&[u8]> for KeyMaterial {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for KeyMaterial {
    fn from(bytes: &[u8; N]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

impl From<Vec<u8>> for KeyMaterial {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}
