//! Env-file parsing, expansion and decryption for envstack.
//!
//! This crate reads a single `KEY=VALUE` env file into a caller-supplied
//! mapping. Variable references are expanded against the values the caller
//! already holds, and values tagged as encrypted are decrypted best-effort
//! with locally available key material.

mod decrypt;
mod error;
mod expand;
mod keys;
mod parse;
mod source;

pub use decrypt::{CryptoError, ENCRYPTED_PREFIX, encrypt_value};
pub use error::SourceError;
pub use keys::{KEY_VAR, KEYS_FILE_NAME};
pub use source::{EnvLoader, EnvMap, FileSource, MergeMode};
