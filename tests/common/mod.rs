#![allow(dead_code)]

pub mod mock_api;
pub mod mock_data;

use std::process::{Command, Output};
use tempfile::TempDir;

/// Helper struct to run helpdesk commands in an isolated temp directory
pub struct HelpdeskTest {
    pub temp_dir: TempDir,
    api_base: Option<String>,
}

impl HelpdeskTest {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        HelpdeskTest {
            temp_dir,
            api_base: None,
        }
    }

    /// Point the binary at a server, e.g. a wiremock instance
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into());
        self
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_helpdesk"));
        cmd.args(args)
            .current_dir(self.temp_dir.path())
            .env("HELPDESK_ROOT", self.temp_dir.path().join(".helpdesk"))
            .env_remove("HELPDESK_API_BASE")
            .env_remove("HELPDESK_LOG");
        if let Some(base) = &self.api_base {
            cmd.env("HELPDESK_API_BASE", base);
        }
        cmd
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args)
            .output()
            .expect("Failed to execute helpdesk command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }

    /// Run on a blocking thread so an in-process mock server keeps serving
    pub async fn run_async(&self, args: &[&str]) -> Output {
        let mut cmd = self.command(args);
        tokio::task::spawn_blocking(move || cmd.output())
            .await
            .expect("command thread panicked")
            .expect("Failed to execute helpdesk command")
    }

    pub async fn run_success_async(&self, args: &[&str]) -> String {
        let output = self.run_async(args).await;
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub async fn run_failure_async(&self, args: &[&str]) -> String {
        let output = self.run_async(args).await;
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }
}
