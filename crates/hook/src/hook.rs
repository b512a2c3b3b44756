//! The pre-spawn hook.
//!
//! Responsibilities:
//! - Determine the effective working directory and runtime environment for
//!   one spawn event.
//! - Resolve the layered env files and fold them into the host's mutable
//!   spawn environment.
//!
//! Invariants:
//! - Entries already present in the spawn environment always win over
//!   loaded values, independent of the resolver's overload option.
//! - The spawn environment is mutated in place; keys are never removed.
//! - The hook never fails: a directory with no env files is a no-op apart
//!   from the runtime-environment backfill.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use envstack_envfile::EnvMap;
use envstack_resolver::{ResolveOptions, constants::DEFAULT_RUNTIME_ENV, resolve};

use crate::env::env_var_or_none;

/// Ambient variable naming the runtime environment.
pub const RUNTIME_ENV_VAR: &str = "APP_ENV";

/// Input for one spawn event, as handed over by the host.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnContext {
    /// Working-directory override for this spawn; the configured default
    /// directory is used when absent.
    #[serde(default)]
    pub cwd: Option<PathBuf>,
}

/// Host-side hook configuration.
#[derive(Debug, Clone)]
pub struct HookConfig {
    /// Directory whose env files apply when the spawn carries no override.
    pub default_dir: PathBuf,
    /// Resolver-level overload option (precedence among the `.env*` files
    /// themselves; unrelated to the existing-entries-win rule).
    pub overload: bool,
}

impl HookConfig {
    pub fn new(default_dir: impl Into<PathBuf>) -> Self {
        Self {
            default_dir: default_dir.into(),
            overload: false,
        }
    }

    pub fn with_overload(mut self, overload: bool) -> Self {
        self.overload = overload;
        self
    }
}

/// Resolve env files for one spawn event and merge them into `env`.
///
/// Every loaded key is written only if absent, so caller-set entries always
/// win. Afterwards, if `env` still lacks the runtime-environment variable it
/// is backfilled with the name used for resolution.
pub fn apply_before_spawn(config: &HookConfig, ctx: &SpawnContext, env: &mut EnvMap) {
    let dir = ctx.cwd.as_deref().unwrap_or(&config.default_dir);
    let runtime_env =
        env_var_or_none(RUNTIME_ENV_VAR).unwrap_or_else(|| DEFAULT_RUNTIME_ENV.to_string());

    let options = ResolveOptions::new()
        .with_runtime_env(runtime_env.clone())
        .with_overload(config.overload);
    let resolved = resolve(dir, &options);
    let loaded = resolved.len();

    for (key, value) in resolved {
        env.entry(key).or_insert(value);
    }
    env.entry(RUNTIME_ENV_VAR.to_string()).or_insert(runtime_env);

    debug!(dir = %dir.display(), loaded, "applied env files before spawn");
}
