//! Common test utilities and fixtures
//!
//! This module provides shared test infrastructure

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Get the path to the test fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Get a path to a specific fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

/// Scratch directory that doubles as working directory and HOME, so no
/// user-level configuration leaks into a test run.
pub struct Workspace {
    pub root: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.root.path().join(name)
    }

    pub fn dir(&self) -> &Path {
        self.root.path()
    }

    /// Copy a fixture into the workspace under `name`.
    pub fn install_fixture(&self, fixture: &str, name: &str) -> PathBuf {
        let dest = self.path(name);
        std::fs::copy(fixture_path(fixture), &dest).expect("Failed to copy fixture");
        dest
    }

    /// Command for the school-roster binary running inside this workspace
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("school-roster").unwrap();
        cmd.current_dir(self.dir())
            .env("HOME", self.dir())
            .env("XDG_CONFIG_HOME", self.dir().join(".config"))
            .env_remove("SCHOOL_ROSTER_CONFIG")
            .env_remove("SCHOOL_ROSTER_DATA_FILE")
            .env_remove("SCHOOL_ROSTER_EXPORT_FILE")
            .env_remove("SCHOOL_ROSTER_MIN_GRADE")
            .env_remove("SCHOOL_ROSTER_MAX_GRADE")
            .env_remove("SCHOOL_ROSTER_MIN_AGE")
            .env_remove("SCHOOL_ROSTER_MAX_AGE")
            .env_remove("SCHOOL_ROSTER_LOG_LEVEL")
            .env_remove("SCHOOL_ROSTER_LOG_FILE")
            .env_remove("SCHOOL_ROSTER_LOG_JSON")
            .env_remove("RUST_LOG");
        cmd
    }
}
