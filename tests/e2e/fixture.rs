//! Shared harness for end-to-end scenarios.
//!
//! Each fixture owns a temp directory that doubles as `HOME` and
//! `XDG_CONFIG_HOME`, so scenarios never read the developer's config.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

use fillrank::library::Library;
use tempfile::TempDir;

/// Captured result of one binary invocation.
#[derive(Debug)]
pub struct CommandOutput {
    pub success: bool,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|err| panic!("stdout is not JSON ({err}): {}", self.stdout))
    }
}

pub struct E2EFixture {
    pub scenario: String,
    pub root: PathBuf,
    started: Instant,
    steps: Vec<String>,
    _temp_dir: TempDir,
}

impl E2EFixture {
    pub fn new(scenario: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        eprintln!("[E2E] scenario {scenario} in {}", root.display());
        Self {
            scenario: scenario.to_string(),
            root,
            started: Instant::now(),
            steps: Vec::new(),
            _temp_dir: temp_dir,
        }
    }

    pub fn log_step(&mut self, step: &str) {
        eprintln!("[E2E:{}] step {}: {step}", self.scenario, self.steps.len() + 1);
        self.steps.push(step.to_string());
    }

    pub fn write_library(&self, name: &str, library: &Library) -> PathBuf {
        let path = self.root.join(name);
        library.save(&path).expect("Failed to write library");
        path
    }

    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.join(name);
        std::fs::write(&path, content).expect("Failed to write fixture file");
        path
    }

    pub fn run(&self, args: &[&str]) -> CommandOutput {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env: &[(&str, &str)]) -> CommandOutput {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_fillrank"));
        cmd.args(args)
            .current_dir(&self.root)
            .env("HOME", &self.root)
            .env("XDG_CONFIG_HOME", &self.root)
            .env_remove("RUST_LOG");
        for key in [
            "FILLRANK_CONFIG",
            "FILLRANK_LIBRARY",
            "FILLRANK_MAX_SUGGESTIONS",
            "FILLRANK_TAG_BOOST",
            "FILLRANK_RECENCY_DECAY_MS",
            "FILLRANK_SCORING_BACKEND",
            "FILLRANK_MEMORY_LIMIT_BYTES",
            "FILLRANK_ROBOT_FORMAT",
        ] {
            cmd.env_remove(key);
        }
        for (key, value) in env {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to run fillrank");
        CommandOutput {
            success: output.status.success(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    pub fn assert_success(&self, output: &CommandOutput, label: &str) {
        assert!(
            output.success,
            "[{}] {label} failed with {:?}\nstdout: {}\nstderr: {}",
            self.scenario, output.exit_code, output.stdout, output.stderr
        );
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn arg(path: &Path) -> &str {
        path.to_str().expect("temp paths are UTF-8")
    }
}

impl Drop for E2EFixture {
    fn drop(&mut self) {
        eprintln!(
            "[E2E:{}] {} steps in {:?}",
            self.scenario,
            self.steps.len(),
            self.started.elapsed()
        );
    }
}
