//! Error types for env-file loading.
//!
//! Responsibilities:
//! - Distinguish "file not found" from every other failure, so callers can
//!   treat absence as a non-event.
//! - Carry file identity (path, line number) for diagnostics.
//!
//! Invariants:
//! - Error variants NEVER include raw env-file line contents or values, to
//!   prevent secret leakage through logs.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading an env file.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The file does not exist. Callers are expected to treat this as a
    /// non-event rather than a failure.
    #[error("env file not found: {path}")]
    NotFound { path: PathBuf },

    /// The file exists but could not be read.
    #[error("failed to read env file {path}: {kind}")]
    Io {
        path: PathBuf,
        kind: std::io::ErrorKind,
    },

    /// The file contains a line that is not valid `KEY=VALUE` syntax.
    ///
    /// Only the line number and a static description are carried, never the
    /// line itself.
    #[error("failed to parse env file {path}, line {line}: {reason}")]
    Parse {
        path: PathBuf,
        line: usize,
        reason: &'static str,
    },
}

impl SourceError {
    /// True when this error only means the file is absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
