//! Candidate-file selection.
//!
//! Responsibilities:
//! - Build the ordered list of files that participate in a resolution.
//!
//! Invariants:
//! - The order is fixed, highest precedence first, and is not configurable:
//!   `.env.<env>.local`, `.env.<env>`, `.env.local`, `.env`.

use std::path::{Path, PathBuf};

use crate::constants::{ENV_FILE_BASENAME, LOCAL_SUFFIX};

/// The four candidate files for `runtime_env` under `base_dir`, highest
/// precedence first.
pub fn candidate_files(base_dir: &Path, runtime_env: &str) -> [PathBuf; 4] {
    [
        base_dir.join(format!("{ENV_FILE_BASENAME}.{runtime_env}.{LOCAL_SUFFIX}")),
        base_dir.join(format!("{ENV_FILE_BASENAME}.{runtime_env}")),
        base_dir.join(format!("{ENV_FILE_BASENAME}.{LOCAL_SUFFIX}")),
        base_dir.join(ENV_FILE_BASENAME),
    ]
}
