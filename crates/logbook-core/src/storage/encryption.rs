//! Age encryption/decryption utilities.
//!
//! Thin wrappers around the Age library using passphrase-based
//! encryption (scrypt KDF).

use std::io::{Read, Write};
use std::iter;

use age::secrecy::SecretString;

use crate::error::{LogbookError, Result};

/// Prefix of every binary Age payload.
pub const AGE_MAGIC: &[u8] = b"age-encryption.org/";

fn crypto_error(step: &'static str) -> impl Fn(std::io::Error) -> LogbookError {
    move |e| LogbookError::Crypto(format!("{} failed: {}", step, e))
}

/// Encrypt `data` with a passphrase.
///
/// # Examples
///
/// ```
/// use logbook_core::storage::encryption::{encrypt, looks_encrypted};
///
/// let sealed = encrypt(b"[2024-03-01 09:00] hi\n", "my-secure-passphrase").unwrap();
/// assert!(looks_encrypted(&sealed));
/// ```
pub fn encrypt(data: &[u8], passphrase: &str) -> Result<Vec<u8>> {
    let encryptor =
        age::Encryptor::with_user_passphrase(SecretString::from(passphrase.to_string()));

    let mut sealed = Vec::with_capacity(data.len() + 256);
    let mut writer = encryptor
        .wrap_output(&mut sealed)
        .map_err(crypto_error("Encryptor setup"))?;
    writer.write_all(data).map_err(crypto_error("Encryption"))?;
    writer.finish().map_err(crypto_error("Encryption finish"))?;

    Ok(sealed)
}

/// Decrypt an Age payload produced by [`encrypt`].
///
/// A wrong passphrase is reported as [`LogbookError::IncorrectPassphrase`];
/// anything that is not an Age payload, or is damaged, as
/// [`LogbookError::Crypto`].
pub fn decrypt(sealed: &[u8], passphrase: &str) -> Result<Vec<u8>> {
    if !looks_encrypted(sealed) {
        return Err(LogbookError::Crypto(
            "Journal is not encrypted (missing age header)".to_string(),
        ));
    }

    let decryptor = age::Decryptor::new(sealed)
        .map_err(|e| LogbookError::Crypto(format!("Unreadable age header: {}", e)))?;
    let identity = age::scrypt::Identity::new(SecretString::from(passphrase.to_string()));
    let mut reader = decryptor
        .decrypt(iter::once(&identity as &dyn age::Identity))
        .map_err(|e| match e {
            age::DecryptError::NoMatchingKeys
            | age::DecryptError::DecryptionFailed
            | age::DecryptError::KeyDecryptionFailed => LogbookError::IncorrectPassphrase,
            other => LogbookError::Crypto(format!("Decryption failed: {}", other)),
        })?;

    let mut plain = Vec::with_capacity(sealed.len());
    reader
        .read_to_end(&mut plain)
        .map_err(crypto_error("Reading decrypted data"))?;
    Ok(plain)
}

/// Whether `data` starts with the Age header.
pub fn looks_encrypted(data: &[u8]) -> bool {
    data.starts_with(AGE_MAGIC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_decrypt_round_trip() {
        let passphrase = "test-passphrase-secure-123";
        let plaintext = b"[2024-03-01 09:00] Hello, World.\n";

        let encrypted = encrypt(plaintext, passphrase).unwrap();
        assert!(looks_encrypted(&encrypted));
        let decrypted = decrypt(&encrypted, passphrase).unwrap();

        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_wrong_passphrase_fails_decryption() {
        let encrypted = encrypt(b"secret data", "correct-passphrase-123").unwrap();

        let result = decrypt(&encrypted, "wrong-passphrase-456");
        assert!(matches!(result, Err(LogbookError::IncorrectPassphrase)));
    }

    #[test]
    fn test_corrupted_data_fails_decryption() {
        let passphrase = "test-passphrase-secure-123";
        let mut encrypted = encrypt(b"secret data", passphrase).unwrap();

        let len = encrypted.len();
        encrypted[len / 2] ^= 0xFF;

        assert!(decrypt(&encrypted, passphrase).is_err());
    }

    #[test]
    fn test_plaintext_is_rejected_before_decrypting() {
        let plain = b"[2024-03-01 09:00] plain\n";
        assert!(!looks_encrypted(plain));
        assert!(matches!(
            decrypt(plain, "whatever-passphrase"),
            Err(LogbookError::Crypto(_))
        ));
    }
}
