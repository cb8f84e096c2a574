// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ADPN workflow orchestration: notifying and verifying

mod error;
mod notifier;
mod verify;

pub use error::{NotifyError, VerifyError};
pub use notifier::{Notifier, Outcome, Report, DEFAULT_SUBJECT_PREFIX};
pub use verify::{verify, Verified, BAGIT_VALIDATION};
