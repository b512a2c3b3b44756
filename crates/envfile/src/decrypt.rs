//! AES-256-GCM encryption and decryption of tagged env values.
//!
//! Responsibilities:
//! - Decrypt values of the form `encrypted:<hex(nonce || ciphertext)>`.
//! - Provide `encrypt_value` for tests and provisioning tooling.
//!
//! Does NOT handle:
//! - Key lookup (see `keys.rs`).
//!
//! Invariants:
//! - The wire format is the `encrypted:` prefix followed by the hex encoding
//!   of a 12-byte random nonce concatenated with the GCM ciphertext+tag.
//! - Decrypted values must be valid UTF-8.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use rand::RngExt;
use thiserror::Error;

/// Prefix tagging an env value as encrypted.
pub const ENCRYPTED_PREFIX: &str = "encrypted:";

const NONCE_LEN: usize = 12;

/// Errors from encrypting or decrypting a tagged value.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    /// The payload after the tag is not valid hex or is too short to hold a
    /// nonce.
    #[error("malformed ciphertext")]
    MalformedCiphertext,

    #[error("decrypted value is not valid UTF-8")]
    InvalidPlaintext,
}

/// Encrypt `plaintext` into the tagged wire format.
pub fn encrypt_value(plaintext: &str, key: &[u8; 32]) -> Result<String, CryptoError> {
    let cipher = Aes256Gcm::new(key.into());
    let mut nonce_bytes = [0u8; NONCE_LEN];
    rand::rng().fill(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext.as_bytes())
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;

    let mut payload = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    payload.extend_from_slice(&nonce_bytes);
    payload.extend_from_slice(&ciphertext);
    Ok(format!("{ENCRYPTED_PREFIX}{}", hex::encode(payload)))
}

/// Decrypt the hex payload of a tagged value (the part after the prefix).
pub(crate) fn decrypt_payload(payload: &str, key: &[u8; 32]) -> Result<String, CryptoError> {
    let bytes = hex::decode(payload).map_err(|_| CryptoError::MalformedCiphertext)?;
    if bytes.len() <= NONCE_LEN {
        return Err(CryptoError::MalformedCiphertext);
    }
    let (nonce_bytes, ciphertext) = bytes.split_at(NONCE_LEN);

    let cipher = Aes256Gcm::new(key.into());
    let nonce = Nonce::from_slice(nonce_bytes);
    let plaintext = cipher
        .decrypt(nonce, ciphertext)
        .map_err(|e| CryptoError::DecryptionFailed(e.to_string()))?;

    String::from_utf8(plaintext).map_err(|_| CryptoError::InvalidPlaintext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encryption_roundtrip() {
        let key = [42u8; 32];
        let tagged = encrypt_value("sensitive data", &key).unwrap();
        let payload = tagged.strip_prefix(ENCRYPTED_PREFIX).unwrap();

        assert_eq!(decrypt_payload(payload, &key).unwrap(), "sensitive data");
    }

    #[test]
    fn test_wrong_key_fails_authentication() {
        let tagged = encrypt_value("secret", &[1u8; 32]).unwrap();
        let payload = tagged.strip_prefix(ENCRYPTED_PREFIX).unwrap();

        assert!(matches!(
            decrypt_payload(payload, &[2u8; 32]),
            Err(CryptoError::DecryptionFailed(_))
        ));
    }

    #[test]
    fn test_malformed_payload_is_rejected() {
        let key = [0u8; 32];
        assert!(matches!(
            decrypt_payload("zz-not-hex", &key),
            Err(CryptoError::MalformedCiphertext)
        ));
        assert!(matches!(
            decrypt_payload("deadbeef", &key),
            Err(CryptoError::MalformedCiphertext)
        ));
    }

    #[test]
    fn test_nonces_are_random() {
        let key = [3u8; 32];
        let a = encrypt_value("same", &key).unwrap();
        let b = encrypt_value("same", &key).unwrap();
        assert_ne!(a, b);
    }
}
