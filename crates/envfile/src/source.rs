//! Loading env files into a target mapping.
//!
//! Responsibilities:
//! - Define the `FileSource` seam consumed by the resolver, and the shared
//!   `EnvMap` mapping type.
//! - Provide `EnvLoader`, the production source: read, parse, expand,
//!   decrypt, merge.
//!
//! Does NOT handle:
//! - Candidate-file selection or precedence across files (resolver's job).
//!
//! Invariants:
//! - A file that fails to parse contributes no keys: the whole file is
//!   parsed before anything is merged.
//! - In `KeepExisting` mode a key already present in the target is never
//!   replaced; expansion of later values still sees the preserved value.
//! - Decryption is best-effort: an undecryptable value surfaces in its raw
//!   tagged form.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use crate::decrypt::{ENCRYPTED_PREFIX, decrypt_payload};
use crate::error::SourceError;
use crate::keys::lookup_key;
use crate::parse::{Quoting, parse_str};

/// Flat mapping from variable name to value.
pub type EnvMap = BTreeMap<String, String>;

/// Whether a source may replace keys the target already holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// Keys already present in the target are preserved.
    KeepExisting,
    /// Keys already present in the target are overwritten.
    Overwrite,
}

/// A source of env-file assignments that merges into a caller-owned mapping.
pub trait FileSource {
    /// Read `path` and merge its assignments into `target` according to
    /// `mode`.
    ///
    /// A missing file is reported as `SourceError::NotFound` so callers can
    /// distinguish absence from genuine failure.
    fn load_into(
        &self,
        path: &Path,
        target: &mut EnvMap,
        mode: MergeMode,
    ) -> Result<(), SourceError>;
}

/// Production `FileSource`: parses the file, expands variable references
/// against the target, and decrypts tagged values best-effort.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvLoader;

impl EnvLoader {
    pub fn new() -> Self {
        Self
    }
}

impl FileSource for EnvLoader {
    fn load_into(
        &self,
        path: &Path,
        target: &mut EnvMap,
        mode: MergeMode,
    ) -> Result<(), SourceError> {
        let text = std::fs::read_to_string(path).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound | std::io::ErrorKind::NotADirectory => {
                SourceError::NotFound {
                    path: path.to_path_buf(),
                }
            }
            kind => SourceError::Io {
                path: path.to_path_buf(),
                kind,
            },
        })?;

        let entries = parse_str(&text).map_err(|issue| SourceError::Parse {
            path: path.to_path_buf(),
            line: issue.line,
            reason: issue.reason,
        })?;

        // Key material is looked up at most once per file, and only when an
        // encrypted value is actually seen.
        let mut key_material: Option<Option<[u8; 32]>> = None;

        for entry in entries {
            let value = match entry.quoting {
                Quoting::Single => entry.value,
                Quoting::Bare | Quoting::Double => crate::expand::expand(&entry.value, target),
            };

            let value = if let Some(payload) = value.strip_prefix(ENCRYPTED_PREFIX) {
                let key = *key_material
                    .get_or_insert_with(|| lookup_key(path.parent().unwrap_or(Path::new("."))));
                match key {
                    Some(key) => match decrypt_payload(payload, &key) {
                        Ok(plaintext) => plaintext,
                        Err(err) => {
                            debug!(
                                file = %path.display(),
                                name = %entry.key,
                                error = %err,
                                "leaving undecryptable value in its raw form"
                            );
                            value
                        }
                    },
                    None => {
                        debug!(
                            file = %path.display(),
                            name = %entry.key,
                            "no key material available, leaving encrypted value in its raw form"
                        );
                        value
                    }
                }
            } else {
                value
            };

            match mode {
                MergeMode::Overwrite => {
                    target.insert(entry.key, value);
                }
                MergeMode::KeepExisting => {
                    target.entry(entry.key).or_insert(value);
                }
            }
        }

        Ok(())
    }
}
