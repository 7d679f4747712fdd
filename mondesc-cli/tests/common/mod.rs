// Each integration test file is compiled as its own binary crate, each pulling
// in its own copy of this module. Helpers used by some test binaries but not
// others trigger false "dead code" warnings in the binaries that don't call
// them.
#![allow(dead_code)]

pub mod server;

use std::path::PathBuf;
use std::process::{Command, Output};

/// Environment variables the binary reads for defaults. Cleared for every run
/// so the host environment cannot leak into assertions.
const AMBIENT_ENV: &[&str] = &["GCLOUD_PROJECT", "GOOGLE_OAUTH_ACCESS_TOKEN", "RUST_LOG"];

/// Result of running the mondesc binary.
pub struct RunResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl RunResult {
    fn from_output(output: Output) -> Self {
        RunResult {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code().unwrap_or(-1),
        }
    }

    /// Combined stdout + stderr.
    pub fn combined(&self) -> String {
        format!("{}{}", self.stdout, self.stderr)
    }
}

/// Path to the compiled mondesc binary (set by Cargo for [[bin]] targets).
pub fn mondesc_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_mondesc"))
}

/// Run the mondesc binary with the given arguments and a clean environment.
pub fn run(args: &[&str]) -> RunResult {
    run_with_env(args, &[])
}

/// Run the mondesc binary with extra environment variables set.
pub fn run_with_env(args: &[&str], env: &[(&str, &str)]) -> RunResult {
    let mut cmd = Command::new(mondesc_bin());
    for var in AMBIENT_ENV {
        cmd.env_remove(var);
    }
    cmd.args(args).envs(env.iter().copied());
    let output = cmd.output().expect("failed to execute mondesc binary");
    RunResult::from_output(output)
}

// -- Assertion helpers --------------------------------------------------------

/// Assert the exit code matches.
pub fn assert_exit_code(result: &RunResult, expected: i32) {
    assert_eq!(
        result.exit_code, expected,
        "Expected exit code {expected}, got {}.\nstdout: {}\nstderr: {}",
        result.exit_code, result.stdout, result.stderr,
    );
}

/// Assert combined output (stdout+stderr) contains a substring (case-insensitive).
pub fn assert_output_contains(result: &RunResult, needle: &str) {
    let combined = result.combined().to_lowercase();
    assert!(
        combined.contains(&needle.to_lowercase()),
        "Expected output to contain {needle:?} (case-insensitive).\nstdout: {}\nstderr: {}",
        result.stdout,
        result.stderr,
    );
}

/// Assert stdout exactly equals expected string.
pub fn assert_stdout_eq(result: &RunResult, expected: &str) {
    assert_eq!(
        result.stdout, expected,
        "stdout does not match expected.\nstderr: {}",
        result.stderr,
    );
}
