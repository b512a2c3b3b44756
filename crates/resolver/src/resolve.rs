//! The layered resolution algorithm.
//!
//! Responsibilities:
//! - Merge the candidate files into one mapping under the configured merge
//!   policy, as two independently named computations: a forward first-wins
//!   pass, and (under overload) a reverse last-wins pass layered on top.
//!
//! Does NOT handle:
//! - File syntax, expansion or decryption (delegated to the file source).
//! - Ambient runtime-environment lookup (the hook crate's call boundary).
//!
//! Invariants:
//! - `resolve` never fails: absent files are silent, malformed files are
//!   logged and skipped, and the result may be empty.
//! - Files are read strictly sequentially; first-wins merging depends on it.
//! - The forward and reverse passes are independent reads of the files.

use std::path::Path;

use envstack_envfile::{EnvLoader, EnvMap, FileSource, MergeMode};
use tracing::warn;

use crate::candidates::candidate_files;
use crate::constants::DEFAULT_RUNTIME_ENV;
use crate::fs::{Filesystem, StdFilesystem};

/// Options controlling a resolution.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Runtime environment selecting the `.env.<env>*` overlays. `None`
    /// means `"development"`.
    pub runtime_env: Option<String>,
    /// When set, lower-precedence files may override higher-precedence ones
    /// via the reverse last-wins pass.
    pub overload: bool,
}

impl ResolveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_runtime_env(mut self, runtime_env: impl Into<String>) -> Self {
        self.runtime_env = Some(runtime_env.into());
        self
    }

    pub fn with_overload(mut self, overload: bool) -> Self {
        self.overload = overload;
        self
    }
}

/// Resolve the `.env*` files under `base_dir` into a flat mapping.
///
/// Missing files contribute nothing; malformed files are logged and skipped.
/// The call always returns a mapping, possibly empty.
pub fn resolve(base_dir: impl AsRef<Path>, options: &ResolveOptions) -> EnvMap {
    resolve_with(base_dir, options, &StdFilesystem, &EnvLoader::new())
}

/// `resolve` with explicit filesystem and file-source collaborators.
pub fn resolve_with(
    base_dir: impl AsRef<Path>,
    options: &ResolveOptions,
    fs: &impl Filesystem,
    source: &impl FileSource,
) -> EnvMap {
    let runtime_env = options
        .runtime_env
        .as_deref()
        .unwrap_or(DEFAULT_RUNTIME_ENV);
    let candidates = candidate_files(base_dir.as_ref(), runtime_env);

    let mut resolved = merge_first_wins(&candidates, fs, source);

    if options.overload {
        // The reverse pass re-reads every file; its result wins for every
        // key it defines.
        for (key, value) in merge_last_wins(&candidates, fs, source) {
            resolved.insert(key, value);
        }
    }

    resolved
}

/// Forward pass: highest precedence first, existing keys preserved, so the
/// first file to define a key wins.
fn merge_first_wins(
    candidates: &[std::path::PathBuf],
    fs: &impl Filesystem,
    source: &impl FileSource,
) -> EnvMap {
    let mut merged = EnvMap::new();
    for path in candidates {
        load_candidate(path, &mut merged, MergeMode::KeepExisting, fs, source);
    }
    merged
}

/// Reverse pass: lowest precedence first, later files overwrite, so the
/// highest-precedence file still ends up winning within this pass.
fn merge_last_wins(
    candidates: &[std::path::PathBuf],
    fs: &impl Filesystem,
    source: &impl FileSource,
) -> EnvMap {
    let mut merged = EnvMap::new();
    for path in candidates.iter().rev() {
        load_candidate(path, &mut merged, MergeMode::Overwrite, fs, source);
    }
    merged
}

fn load_candidate(
    path: &Path,
    target: &mut EnvMap,
    mode: MergeMode,
    fs: &impl Filesystem,
    source: &impl FileSource,
) {
    if !fs.exists(path) {
        return;
    }
    match source.load_into(path, target, mode) {
        Ok(()) => {}
        // The file disappeared between the existence check and the read.
        Err(err) if err.is_not_found() => {}
        Err(err) => {
            warn!(file = %path.display(), error = %err, "skipping unreadable env file");
        }
    }
}
