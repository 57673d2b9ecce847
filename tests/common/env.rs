//! Isolated environment for running the `cloudsync` binary.

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};

use tempfile::TempDir;

/// Variables that would leak the developer's own setup into a test
const OVERRIDE_VARS: &[&str] = &[
    "CLOUDSYNC_LOCAL_FOLDER",
    "CLOUDSYNC_REMOTE_NAME",
    "CLOUDSYNC_REMOTE_SUBPATH",
    "CLOUDSYNC_MODE",
    "CLOUDSYNC_INTERVAL_MINUTES",
    "CLOUDSYNC_RCLONE",
    "RUST_LOG",
];

/// Result of running a CloudSync CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse every stdout line as a JSON event
    pub fn json_events(&self) -> Vec<serde_json::Value> {
        parse_events(&self.stdout)
    }
}

pub fn parse_events(stdout: &str) -> Vec<serde_json::Value> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).unwrap_or_else(|e| panic!("bad JSON {line:?}: {e}")))
        .collect()
}

pub fn event_names(events: &[serde_json::Value]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| e["event"].as_str().map(str::to_string))
        .collect()
}

/// Temp config directory and temp folder to sync
pub struct TestEnv {
    pub config_dir: TempDir,
    pub folder: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            config_dir: tempfile::tempdir().expect("config tempdir"),
            folder: tempfile::tempdir().expect("folder tempdir"),
        }
    }

    pub fn folder_path(&self) -> &Path {
        self.folder.path()
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.path().join("config.toml")
    }

    pub fn write_config(&self, content: &str) {
        std::fs::write(self.config_file(), content).expect("write config");
    }

    /// Point the config at the temp folder with the given mode
    pub fn configure(&self, mode: &str) {
        let result = self.run(&[
            "config",
            "set",
            "--folder",
            self.folder_path().to_str().expect("utf-8 temp path"),
            "--remote",
            "testremote",
            "--mode",
            mode,
        ]);
        assert!(result.success, "config set failed: {}", result.combined_output());
    }

    pub fn command(&self, args: &[&str], env_vars: &[(&str, &str)]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_cloudsync"));
        cmd.args(args)
            .current_dir(self.config_dir.path())
            .env("CLOUDSYNC_CONFIG_DIR", self.config_dir.path())
            .stdin(Stdio::null());
        for var in OVERRIDE_VARS {
            cmd.env_remove(var);
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }
        cmd
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let output = self
            .command(args, env_vars)
            .output()
            .expect("failed to execute cloudsync");
        to_result(output)
    }

    /// Start a long-running command with piped output
    pub fn spawn(&self, args: &[&str], env_vars: &[(&str, &str)]) -> Child {
        self.command(args, env_vars)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("failed to spawn cloudsync")
    }
}

pub fn to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
