//! Centralized constants for layered resolution.

/// Runtime environment assumed when the caller supplies none.
pub const DEFAULT_RUNTIME_ENV: &str = "development";

/// Base name shared by every candidate file.
pub const ENV_FILE_BASENAME: &str = ".env";

/// Suffix marking the machine-local override variants.
pub const LOCAL_SUFFIX: &str = "local";
