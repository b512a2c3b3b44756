//! Filesystem existence checks behind an explicit seam.
//!
//! Responsibilities:
//! - Answer "does this candidate file exist" as a plain boolean query, so
//!   absence is a branch, not an error path.
//!
//! Does NOT handle:
//! - Reading file contents (the file source does its own IO).

use std::path::Path;

/// Existence queries for candidate files.
pub trait Filesystem {
    fn exists(&self, path: &Path) -> bool;
}

/// Production filesystem backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdFilesystem;

impl Filesystem for StdFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}
