// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! BagIt validation adapters

mod bagit;

pub use bagit::{BagItValidator, DEFAULT_VALIDATOR};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeValidator, ValidateCall};

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from validation
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("not a BagIt bag (needs data/ and bagit.txt): {}", .0.display())]
    NotABag(PathBuf),
    #[error("BagIt validation failed with exit status {code}")]
    Failed { code: i32, output: String },
    #[error("failed to run validator `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to buffer validator output: {0}")]
    Scratch(#[source] std::io::Error),
}

impl ValidateError {
    /// Process exit code; the validator's own status passes through
    pub fn exit_code(&self) -> i32 {
        match self {
            ValidateError::NotABag(_) => 2,
            ValidateError::Failed { code, .. } => (*code).clamp(1, 254),
            ValidateError::Spawn { .. } | ValidateError::Scratch(_) => 1,
        }
    }

    /// Diagnostic text produced by the validator, if it ran
    pub fn output(&self) -> Option<&str> {
        match self {
            ValidateError::Failed { output, .. } => Some(output),
            _ => None,
        }
    }
}

/// A successful validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    /// Validator output, verbatim
    pub output: String,
}

/// Adapter for checking a BagIt bag
pub trait Validator: Clone + Send + Sync + 'static {
    fn validate(&self, dir: &Path) -> Result<Validation, ValidateError>;
}

/// True when `dir` has the `data/` directory and `bagit.txt` of a bag
pub fn is_bag(dir: &Path) -> bool {
    dir.join("data").is_dir() && dir.join("bagit.txt").is_file()
}
