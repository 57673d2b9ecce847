//! Rclone sync tool
//!
//! Runs `rclone sync <folder> <remote:path>` as a child process. Rclone
//! decides what to transfer; we only look at the exit status.

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::domain::ports::SyncTool;
use crate::error::ToolFailure;

use super::config::ToolConfig;

/// Sync tool backed by the `rclone` binary
#[derive(Debug, Clone)]
pub struct RcloneTool {
    config: ToolConfig,
    quiet: bool,
}

impl RcloneTool {
    pub fn new(config: ToolConfig) -> Self {
        Self {
            config,
            quiet: false,
        }
    }

    /// Discard the child's stdout/stderr (JSON output mode)
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn program(&self) -> &str {
        &self.config.binary
    }

    /// Full argument list for one run
    pub fn args(&self, source: &Path, destination: &str) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "sync".into(),
            source.as_os_str().to_owned(),
            destination.into(),
        ];
        if self.config.fast_list {
            args.push("--fast-list".into());
        }
        args.push("--transfers".into());
        args.push(self.config.transfers.to_string().into());
        args.push("--checkers".into());
        args.push(self.config.checkers.to_string().into());
        args
    }

    /// Check if the binary is installed and runnable
    pub fn check_available(&self) -> bool {
        Command::new(&self.config.binary)
            .arg("version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }
}

impl SyncTool for RcloneTool {
    fn name(&self) -> &str {
        "rclone"
    }

    fn run(&self, source: &Path, destination: &str) -> Result<(), ToolFailure> {
        let args = self.args(source, destination);
        debug!(program = %self.config.binary, ?args, "spawning sync tool");

        let mut cmd = Command::new(&self.config.binary);
        cmd.args(&args).stdin(Stdio::null());
        if self.quiet {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        } else {
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        }

        let status = cmd.status().map_err(|e| ToolFailure::Spawn {
            program: self.config.binary.clone(),
            message: e.to_string(),
        })?;

        if !status.success() {
            return Err(ToolFailure::Exit {
                program: self.config.binary.clone(),
                code: status.code(),
            });
        }
        Ok(())
    }
}
