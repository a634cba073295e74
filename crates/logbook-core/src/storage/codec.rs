//! Codecs turn the journal's editable text into the bytes stored on disk.

use std::fmt;

use zeroize::Zeroizing;

use super::encryption::{decrypt, encrypt, looks_encrypted};
use crate::error::{LogbookError, Result};

/// Encoding of the persisted journal file.
pub trait Codec: fmt::Debug {
    /// Encode journal text into file bytes.
    fn encode(&self, text: &str) -> Result<Vec<u8>>;

    /// Decode file bytes into journal text.
    fn decode(&self, raw: &[u8]) -> Result<Zeroizing<String>>;

    /// Whether the persisted form is encrypted.
    fn is_encrypted(&self) -> bool;
}

/// Plain UTF-8 text on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainCodec;

impl Codec for PlainCodec {
    fn encode(&self, text: &str) -> Result<Vec<u8>> {
        Ok(text.as_bytes().to_vec())
    }

    fn decode(&self, raw: &[u8]) -> Result<Zeroizing<String>> {
        if looks_encrypted(raw) {
            return Err(LogbookError::Parse(
                "Journal file is encrypted; set `encrypt = true` for this journal".to_string(),
            ));
        }
        String::from_utf8(raw.to_vec())
            .map(Zeroizing::new)
            .map_err(|e| LogbookError::Parse(format!("Journal file is not valid UTF-8: {}", e)))
    }

    fn is_encrypted(&self) -> bool {
        false
    }
}

/// Age passphrase encryption on disk.
pub struct AgeCodec {
    passphrase: Zeroizing<String>,
}

impl AgeCodec {
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self {
            passphrase: Zeroizing::new(passphrase.into()),
        }
    }
}

impl fmt::Debug for AgeCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgeCodec")
            .field("passphrase", &"[REDACTED]")
            .finish()
    }
}

impl Codec for AgeCodec {
    fn encode(&self, text: &str) -> Result<Vec<u8>> {
        encrypt(text.as_bytes(), &self.passphrase)
    }

    fn decode(&self, raw: &[u8]) -> Result<Zeroizing<String>> {
        let plain = Zeroizing::new(decrypt(raw, &self.passphrase)?);
        String::from_utf8(plain.to_vec())
            .map(Zeroizing::new)
            .map_err(|e| LogbookError::Parse(format!("Decrypted journal is not valid UTF-8: {}", e)))
    }

    fn is_encrypted(&self) -> bool {
        true
    }
}
