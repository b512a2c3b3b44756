//! Integration tests for the pre-spawn hook.
//!
//! Responsibilities:
//! - Test the non-override rule: caller-set entries always win.
//! - Test runtime-environment selection: ambient `APP_ENV`, the default,
//!   and the backfill into the spawn environment.
//! - Test working-directory selection: spawn override vs configured default.
//!
//! Invariants:
//! - Every test is serialized; ambient variables are scoped via `temp_env`.

use std::fs;

use serial_test::serial;
use tempfile::TempDir;

use envstack_envfile::EnvMap;
use envstack_hook::{HookConfig, RUNTIME_ENV_VAR, SpawnContext, apply_before_spawn};

fn write(dir: &TempDir, name: &str, content: &str) {
    fs::write(dir.path().join(name), content).unwrap();
}

fn env_of(pairs: &[(&str, &str)]) -> EnvMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
#[serial]
fn test_existing_entries_win_over_loaded_values() {
    let dir = TempDir::new().unwrap();
    write(&dir, ".env", "FOO=loaded\nBAR=baz\n");

    let mut env = env_of(&[("FOO", "existing")]);
    temp_env::with_var(RUNTIME_ENV_VAR, None::<&str>, || {
        apply_before_spawn(&HookConfig::new(dir.path()), &SpawnContext::default(), &mut env);
    });

    assert_eq!(env["FOO"], "existing");
    assert_eq!(env["BAR"], "baz");
}

#[test]
#[serial]
fn test_existing_entries_win_even_under_overload() {
    let dir = TempDir::new().unwrap();
    write(&dir, ".env", "FOO=loaded\n");

    let config = HookConfig::new(dir.path()).with_overload(true);
    let mut env = env_of(&[("FOO", "existing")]);
    temp_env::with_var(RUNTIME_ENV_VAR, None::<&str>, || {
        apply_before_spawn(&config, &SpawnContext::default(), &mut env);
    });

    assert_eq!(env["FOO"], "existing");
}

#[test]
#[serial]
fn test_runtime_env_backfilled_when_absent() {
    let dir = TempDir::new().unwrap();

    let mut env = EnvMap::new();
    temp_env::with_var(RUNTIME_ENV_VAR, None::<&str>, || {
        apply_before_spawn(&HookConfig::new(dir.path()), &SpawnContext::default(), &mut env);
    });

    assert_eq!(env[RUNTIME_ENV_VAR], "development");
}

#[test]
#[serial]
fn test_runtime_env_not_clobbered_when_present() {
    let dir = TempDir::new().unwrap();

    let mut env = env_of(&[(RUNTIME_ENV_VAR, "production")]);
    temp_env::with_var(RUNTIME_ENV_VAR, None::<&str>, || {
        apply_before_spawn(&HookConfig::new(dir.path()), &SpawnContext::default(), &mut env);
    });

    assert_eq!(env[RUNTIME_ENV_VAR], "production");
}

#[test]
#[serial]
fn test_ambient_runtime_env_selects_overlay() {
    let dir = TempDir::new().unwrap();
    write(&dir, ".env", "MODE=base\n");
    write(&dir, ".env.production", "MODE=prod\n");

    let mut env = EnvMap::new();
    temp_env::with_var(RUNTIME_ENV_VAR, Some("production"), || {
        apply_before_spawn(&HookConfig::new(dir.path()), &SpawnContext::default(), &mut env);
    });

    assert_eq!(env["MODE"], "prod");
    assert_eq!(env[RUNTIME_ENV_VAR], "production");
}

#[test]
#[serial]
fn test_cwd_override_beats_default_dir() {
    let default_dir = TempDir::new().unwrap();
    let override_dir = TempDir::new().unwrap();
    write(&default_dir, ".env", "SOURCE=default\n");
    write(&override_dir, ".env", "SOURCE=override\n");

    let ctx = SpawnContext {
        cwd: Some(override_dir.path().to_path_buf()),
    };
    let mut env = EnvMap::new();
    temp_env::with_var(RUNTIME_ENV_VAR, None::<&str>, || {
        apply_before_spawn(&HookConfig::new(default_dir.path()), &ctx, &mut env);
    });

    assert_eq!(env["SOURCE"], "override");
}

#[test]
#[serial]
fn test_no_env_files_only_backfills_runtime_env() {
    let dir = TempDir::new().unwrap();

    let mut env = env_of(&[("PRESET", "1")]);
    temp_env::with_var(RUNTIME_ENV_VAR, None::<&str>, || {
        apply_before_spawn(&HookConfig::new(dir.path()), &SpawnContext::default(), &mut env);
    });

    assert_eq!(env.len(), 2);
    assert_eq!(env["PRESET"], "1");
    assert_eq!(env[RUNTIME_ENV_VAR], "development");
}

#[test]
#[serial]
fn test_context_deserializes_from_host_payload() {
    let ctx: SpawnContext = serde_json::from_str(r#"{"cwd": "/srv/app"}"#).unwrap();
    assert_eq!(ctx.cwd.as_deref(), Some(std::path::Path::new("/srv/app")));

    let ctx: SpawnContext = serde_json::from_str("{}").unwrap();
    assert!(ctx.cwd.is_none());
}
