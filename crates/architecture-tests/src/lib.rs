//! Workspace-hygiene checks for envstack. See the `tests/` directory.
