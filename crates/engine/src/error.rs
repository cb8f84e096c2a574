// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for workflow commands

use adpn_adapters::{TicketError, ValidateError};
use adpn_core::{SelectError, TemplateError};
use thiserror::Error;

/// Errors that end a notify command
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error(transparent)]
    Select(#[from] SelectError),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Ticket(#[from] TicketError),
}

impl NotifyError {
    /// Process exit code; ticketing failures mirror the failed call
    pub fn exit_code(&self) -> i32 {
        match self {
            NotifyError::Select(SelectError::InvalidPick(_)) => 1,
            NotifyError::Select(_) => 4,
            NotifyError::Template(_) => 1,
            NotifyError::Ticket(e) => e.exit_code(),
        }
    }
}

/// Errors that end a verify command
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("no directory to verify: give a path or pipe a packet with `Local Path`")]
    NoDirectory,
    #[error(transparent)]
    Validate(#[from] ValidateError),
}

impl VerifyError {
    pub fn exit_code(&self) -> i32 {
        match self {
            VerifyError::NoDirectory => 1,
            VerifyError::Validate(e) => e.exit_code(),
        }
    }
}
