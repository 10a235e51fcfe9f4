// tests/common/mod.rs
// Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempDir;

/// Flags that make an analysis deterministic and fast
pub const QUICK: &[&str] = &[
    "--latency-min-ms",
    "0",
    "--latency-max-ms",
    "0",
    "--malformed-rate",
    "0",
];

/// Run the loganizer binary and capture (stdout, stderr, exit code)
pub fn run_loganizer(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_loganizer"))
        .args(args)
        .env_remove("LOGANIZER_LOG")
        .env("NO_COLOR", "1")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to run loganizer");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

/// Run `analyze --config <config>` with quick engine settings plus `extra`
pub fn run_analyze(config: &Path, extra: &[&str]) -> (String, String, i32) {
    let config = config.to_str().expect("utf-8 temp path");
    let mut args = vec!["analyze", "--config", config];
    args.extend_from_slice(QUICK);
    args.extend_from_slice(extra);
    run_loganizer(&args)
}

/// Temporary directory holding log files and a descriptor config
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write a log file with `lines` entries and return its path
    pub fn log(&self, name: &str, lines: usize) -> String {
        let path = self.path(name);
        let content: String = (0..lines).map(|i| format!("entry {i}\n")).collect();
        fs::write(&path, content).expect("Failed to write log");
        path.to_string_lossy().into_owned()
    }

    /// Path of a log file that is never created
    pub fn missing(&self, name: &str) -> String {
        self.path(name).to_string_lossy().into_owned()
    }

    /// Write `config.json` from (id, path, type) triples
    pub fn config(&self, entries: &[(&str, &str, &str)]) -> PathBuf {
        let descriptors: Vec<serde_json::Value> = entries
            .iter()
            .map(|(id, path, log_type)| {
                serde_json::json!({"id": id, "path": path, "type": log_type})
            })
            .collect();
        self.raw_config(&serde_json::Value::Array(descriptors).to_string())
    }

    /// Write `config.json` verbatim
    pub fn raw_config(&self, content: &str) -> PathBuf {
        let path = self.path("config.json");
        fs::write(&path, content).expect("Failed to write config");
        path
    }
}
