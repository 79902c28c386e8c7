//! Common test utilities for CLI integration tests.
//!
//! Provides an isolated environment (temporary working and home
//! directories, no inherited `TABLEBOOK_*` variables) and helpers for
//! reading session output.

use assert_cmd::Command;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const ENV_VARS: &[&str] = &[
    "TABLEBOOK_CONFIG",
    "TABLEBOOK_TABLE_COUNT",
    "TABLEBOOK_MAX_ALLOWED_PERCENTAGE",
    "TABLEBOOK_BOOKING_PREFIX",
    "TABLEBOOK_OUTPUT_FORMAT",
    "TABLEBOOK_LOG_MODE",
];

/// Test environment with isolated working and home directories.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        Self {
            temp_dir,
            temp_path,
        }
    }

    /// Get a command builder running in the temp directory with a clean
    /// environment.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("tablebook").expect("Failed to find tablebook binary");
        cmd.current_dir(&self.temp_path).env("HOME", &self.temp_path);
        for var in ENV_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write a file relative to the temp directory and return its path.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Run `tablebook session` with `input` on stdin and return the parsed
    /// JSON response lines.
    ///
    /// # Panics
    /// Panics if the session fails or prints a line that is not JSON.
    pub fn session(&self, input: &str) -> Vec<Value> {
        let output = self
            .command()
            .arg("session")
            .arg("--format")
            .arg("json")
            .write_stdin(input)
            .output()
            .expect("Failed to run session command");

        assert!(
            output.status.success(),
            "Session failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        parse_responses(&output.stdout)
    }
}

/// Parses JSON-lines session output.
#[allow(dead_code)]
pub fn parse_responses(stdout: &[u8]) -> Vec<Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(|line| serde_json::from_str(line).expect("Response line is not JSON"))
        .collect()
}

/// Extracts the status of each response.
#[allow(dead_code)]
pub fn statuses(responses: &[Value]) -> Vec<u64> {
    responses
        .iter()
        .map(|r| r["status"].as_u64().expect("response without status"))
        .collect()
}
