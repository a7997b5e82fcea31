//! Shared test utilities for integration tests
//!
//! Fake `mise` executables and a handle on the compiled binary, so smoke
//! tests never depend on a real installation.

#![allow(dead_code)]

use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use std::path::PathBuf;
use std::process::Command;

/// The binary under test, run inside `dir` so no stray config is picked up.
pub fn bin(dir: &assert_fs::TempDir) -> Command
{
    let mut cmd = Command::cargo_bin("mise-complete").expect("binary builds");
    cmd.current_dir(dir.path())
        .env_remove("MISE_COMPLETE_LOG")
        .env_remove("MISE_COMPLETE_GENERATOR__PROGRAM")
        .env_remove("MISE_COMPLETE_GENERATOR__TIMEOUT_MS");
    cmd
}

/// Write an executable shell script standing in for `mise`.
#[cfg(unix)]
pub fn fake_mise(
    dir: &assert_fs::TempDir,
    body: &str,
) -> PathBuf
{
    use std::os::unix::fs::PermissionsExt;

    let script = dir.child("fake-mise");
    script
        .write_str(&format!("#!/bin/sh\n{body}\n"))
        .expect("write script");

    let mut perms = std::fs::metadata(script.path())
        .expect("metadata")
        .permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(script.path(), perms).expect("chmod");

    script
        .path()
        .to_path_buf()
}
