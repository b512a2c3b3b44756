//! Pre-spawn host integration for envstack.
//!
//! A host tool calls [`apply_before_spawn`] once before each shell or
//! process spawn. The hook resolves the layered `.env*` files for the
//! effective working directory and folds the result into the spawn
//! environment without clobbering anything the host already set.
//!
//! This crate is the only place ambient runtime-environment state is read;
//! the resolver itself stays a pure function of its arguments.

mod env;
mod hook;

pub use env::env_var_or_none;
pub use hook::{HookConfig, RUNTIME_ENV_VAR, SpawnContext, apply_before_spawn};
