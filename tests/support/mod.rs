//! Test support utilities for launcher integration tests.
//!
//! Provides an isolated project directory whose `launcher.toml` runs
//! scripts with `sh`, so shell scripts stand in for deployment scripts.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::fs;

use tempfile::TempDir;

/// Test environment with an isolated project directory.
///
/// No process-global state is mutated; child processes use `.current_dir()`
/// and explicit env vars so tests can safely run in parallel.
pub struct Test {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl Test {
    /// Project with the default `sh` test configuration.
    pub fn new() -> Self {
        Self::with_config(TEST_CONFIG)
    }

    /// Project with a custom `launcher.toml`.
    pub fn with_config(config: &str) -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        fs::create_dir_all(dir.path().join("scripts")).expect("failed to create scripts dir");
        fs::write(dir.path().join("launcher.toml"), config).expect("failed to write config");

        let t = Self { dir };
        t.script("show_key.sh", SHOW_KEY_SCRIPT);
        t
    }

    /// Write a script under `scripts/` and return its relative path.
    pub fn script(&self, name: &str, body: &str) -> String {
        let rel = format!("scripts/{}", name);
        fs::write(self.dir.path().join(&rel), body).expect("failed to write script");
        rel
    }

    /// Write the project's `.env` file.
    pub fn env_file(&self, contents: &str) {
        fs::write(self.dir.path().join(".env"), contents).expect("failed to write .env");
    }

    /// Read the project's `.env` file.
    pub fn read_env_file(&self) -> String {
        fs::read_to_string(self.dir.path().join(".env")).expect("failed to read .env")
    }
}
