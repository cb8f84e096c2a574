// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake validator for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ValidateError, Validation, Validator};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Recorded validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidateCall {
    pub dir: PathBuf,
}

#[derive(Default)]
struct FakeState {
    calls: Vec<ValidateCall>,
    failure: Option<(i32, String)>,
    output: String,
}

/// Fake validator: passes every directory unless told to fail
#[derive(Clone, Default)]
pub struct FakeValidator {
    state: Arc<Mutex<FakeState>>,
}

impl FakeValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Output reported by successful validations
    pub fn set_output(&self, output: impl Into<String>) {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).output = output.into();
    }

    /// Fail every validation with `code` and `output`
    pub fn set_failure(&self, code: i32, output: impl Into<String>) {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).failure = Some((code, output.into()));
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<ValidateCall> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }
}

impl Validator for FakeValidator {
    fn validate(&self, dir: &Path) -> Result<Validation, ValidateError> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.calls.push(ValidateCall {
            dir: dir.to_path_buf(),
        });
        match &state.failure {
            Some((code, output)) => Err(ValidateError::Failed {
                code: *code,
                output: output.clone(),
            }),
            None => Ok(Validation {
                output: state.output.clone(),
            }),
        }
    }
}
