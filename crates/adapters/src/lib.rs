// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O

pub mod scratch;
pub mod ticket;
pub mod traced;
pub mod validate;

pub use scratch::ScratchFile;
pub use ticket::{
    CreatedIssue, GitLabAdapter, GitLabConfig, IssueRef, LabelChange, NewIssue,
    NoOpTicketAdapter, PostedNote, TicketAdapter, TicketError,
};
pub use traced::{TracedTicketAdapter, TracedValidator};
pub use validate::{BagItValidator, Validation, ValidateError, Validator};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use ticket::{FakeTicketAdapter, TicketCall};
#[cfg(any(test, feature = "test-support"))]
pub use validate::{FakeValidator, ValidateCall};
