// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Validation by running an external BagIt tool

use super::{is_bag, ValidateError, Validation, Validator};
use crate::scratch::ScratchFile;
use std::path::Path;
use std::process::{Command, Stdio};

/// Validator program used when none is configured
pub const DEFAULT_VALIDATOR: &str = "bagit.py";

/// Runs `<program> --validate <dir>`, buffering its output in a scratch file
#[derive(Debug, Clone)]
pub struct BagItValidator {
    program: String,
}

impl Default for BagItValidator {
    fn default() -> Self {
        Self::new(DEFAULT_VALIDATOR)
    }
}

impl BagItValidator {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Validator for BagItValidator {
    fn validate(&self, dir: &Path) -> Result<Validation, ValidateError> {
        if !is_bag(dir) {
            return Err(ValidateError::NotABag(dir.to_path_buf()));
        }

        let scratch = ScratchFile::new().map_err(ValidateError::Scratch)?;
        let stdout = scratch.writer().map_err(ValidateError::Scratch)?;
        let stderr = scratch.writer().map_err(ValidateError::Scratch)?;

        let status = Command::new(&self.program)
            .arg("--validate")
            .arg(dir)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr)
            .status()
            .map_err(|source| ValidateError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let output = scratch.read_to_string().map_err(ValidateError::Scratch)?;
        if status.success() {
            Ok(Validation { output })
        } else {
            // Killed by a signal: no exit status to pass through
            let code = status.code().unwrap_or(1);
            Err(ValidateError::Failed { code, output })
        }
    }
}

#[cfg(test)]
#[path = "bagit_tests.rs"]
mod tests;
