//! Layered env-file resolution for envstack.
//!
//! Given a base directory and a runtime-environment name, this crate selects
//! the applicable `.env*` files, merges them in a fixed precedence order and
//! returns the flattened mapping. File parsing, expansion and decryption are
//! delegated to `envstack-envfile`; this crate owns only the layering.
//!
//! The resolver is a pure function of its arguments: it never reads the
//! process environment, and per-file failures are logged and skipped rather
//! than surfaced.

mod candidates;
pub mod constants;
mod fs;
mod resolve;

pub use candidates::candidate_files;
pub use envstack_envfile::EnvMap;
pub use fs::{Filesystem, StdFilesystem};
pub use resolve::{ResolveOptions, resolve, resolve_with};
