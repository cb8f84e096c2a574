//! Shared helpers for the behavioral specs.
//!
//! Every run gets its own temp directory with an empty config file, so the
//! user's own `adpnet.toml` and `ADPN_LOG` never leak into a spec.

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const STAGED: &str =
    r#"JSON PACKET: {"Ingest Step":"staged","Ingest Title":"WPA Folder 01","Staged By":"alice","Staged To":"NodeA"}"#;

/// A scratch directory the binary runs in
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn empty() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("adpnet.toml"), "").unwrap();
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `rel`, creating parent directories
    pub fn file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    /// Replace the config file
    pub fn config(&self, toml: &str) {
        self.file("adpnet.toml", toml);
    }

    pub fn adpn(&self) -> CliBuilder {
        let mut cmd = Command::cargo_bin("adpn").unwrap();
        cmd.current_dir(self.path())
            .env("ADPN_CONFIG", self.path().join("adpnet.toml"))
            .env("USER", "operator")
            .env_remove("ADPN_LOG");
        CliBuilder { cmd }
    }
}

pub struct CliBuilder {
    cmd: Command,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn stdin(mut self, text: &str) -> Self {
        self.cmd.write_stdin(text.to_string());
        self
    }

    pub fn stdin_bytes(mut self, bytes: &[u8]) -> Self {
        self.cmd.write_stdin(bytes.to_vec());
        self
    }

    /// Run without expectations, for predicate checks
    pub fn run(mut self) -> assert_cmd::assert::Assert {
        self.cmd.assert()
    }

    /// Run and require exit status 0
    pub fn passes(mut self) -> RunAssert {
        RunAssert::new(self.cmd.assert().success())
    }

    /// Run and require a non-zero exit status
    pub fn fails(mut self) -> RunAssert {
        RunAssert::new(self.cmd.assert().failure())
    }

    /// Run and require exit status `code`
    pub fn exits(mut self, code: i32) -> RunAssert {
        RunAssert::new(self.cmd.assert().code(code))
    }
}

pub struct RunAssert {
    stdout: String,
    stderr: String,
}

impl RunAssert {
    fn new(assert: assert_cmd::assert::Assert) -> Self {
        let output = assert.get_output();
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout.as_str(), expected);
        self
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(
            self.stdout.contains(needle),
            "stdout missing {needle:?}:\n{}",
            self.stdout
        );
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(
            !self.stdout.contains(needle),
            "stdout unexpectedly has {needle:?}:\n{}",
            self.stdout
        );
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(
            self.stderr.contains(needle),
            "stderr missing {needle:?}:\n{}",
            self.stderr
        );
        self
    }
}
