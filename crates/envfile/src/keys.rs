//! Key-material lookup for encrypted env-file values.
//!
//! Responsibilities:
//! - Resolve the 32-byte decryption key from the `ENVSTACK_KEY` ambient
//!   variable, falling back to a `.env.keys` file next to the env file.
//!
//! Does NOT handle:
//! - Decryption itself (see `decrypt.rs`) or key generation/rotation.
//!
//! Invariants:
//! - Lookup is best-effort: missing or malformed key material yields `None`
//!   and a debug log, never an error.
//! - The hex-encoded key is held as a `SecretString` until decoded.

use std::path::Path;

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

/// Ambient variable holding the hex-encoded 32-byte key.
pub const KEY_VAR: &str = "ENVSTACK_KEY";

/// Name of the key-material file looked up next to the env files.
pub const KEYS_FILE_NAME: &str = ".env.keys";

/// Resolve key material for env files in `dir`.
///
/// The ambient `ENVSTACK_KEY` variable wins over the `.env.keys` file, so a
/// deployment can inject the key without writing it to disk.
pub(crate) fn lookup_key(dir: &Path) -> Option<[u8; 32]> {
    if let Some(hex_key) = ambient_key() {
        return decode_key(&hex_key, KEY_VAR);
    }
    keys_file_entry(dir).and_then(|hex_key| decode_key(&hex_key, KEYS_FILE_NAME))
}

fn ambient_key() -> Option<SecretString> {
    std::env::var(KEY_VAR).ok().and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(SecretString::new(trimmed.to_string().into()))
        }
    })
}

/// Read the `ENVSTACK_KEY` entry from `.env.keys` in `dir`, if present.
///
/// The keys file is a self-contained env file with no expansion needs, so it
/// is loaded with `dotenvy` directly.
fn keys_file_entry(dir: &Path) -> Option<SecretString> {
    let path = dir.join(KEYS_FILE_NAME);
    let iter = match dotenvy::from_path_iter(&path) {
        Ok(iter) => iter,
        Err(err) => {
            if !is_not_found(&err) {
                debug!(file = %path.display(), error = %err, "could not read keys file");
            }
            return None;
        }
    };

    for item in iter {
        match item {
            Ok((name, value)) if name == KEY_VAR => {
                return Some(SecretString::new(value.into()));
            }
            Ok(_) => {}
            Err(err) => {
                debug!(file = %path.display(), error = %err, "malformed keys file entry");
                return None;
            }
        }
    }
    None
}

fn is_not_found(err: &dotenvy::Error) -> bool {
    matches!(
        err,
        dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
    )
}

/// Decode a hex-encoded 32-byte key. `source` identifies where the material
/// came from for the debug log.
fn decode_key(hex_key: &SecretString, source: &str) -> Option<[u8; 32]> {
    let bytes = match hex::decode(hex_key.expose_secret().trim()) {
        Ok(bytes) => bytes,
        Err(_) => {
            debug!(source, "key material is not valid hex");
            return None;
        }
    };
    if bytes.len() != 32 {
        debug!(source, "key material is not 32 bytes");
        return None;
    }
    let mut key = [0u8; 32];
    key.copy_from_slice(&bytes);
    Some(key)
}
