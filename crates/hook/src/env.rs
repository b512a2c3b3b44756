//! Ambient environment-variable reads for the hook boundary.
//!
//! Responsibilities:
//! - Read the runtime-environment name from the process environment, with
//!   empty/whitespace filtering.
//!
//! Does NOT handle:
//! - Resolution itself; the resolver receives the name explicitly.
//!
//! Invariants:
//! - Empty or whitespace-only variables are treated as unset.
//! - Returned values are trimmed.

/// Read an environment variable, returning `None` if unset, empty, or
/// whitespace-only. The returned value is trimmed.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            // No trimming needed, return original to avoid allocation
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}
