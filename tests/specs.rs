//! Behavioral specifications for the adpn CLI.
//!
//! These tests are black-box: they invoke the CLI binary and verify
//! stdout, stderr, and exit codes.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

// cli/
#[path = "specs/cli/errors.rs"]
mod cli_errors;
#[path = "specs/cli/help.rs"]
mod cli_help;

// notify/
#[path = "specs/notify/output.rs"]
mod notify_output;
#[path = "specs/notify/pipeline.rs"]
mod notify_pipeline;

// packet/
#[path = "specs/packet/select.rs"]
mod packet_select;
#[path = "specs/packet/switches.rs"]
mod packet_switches;

// verify/
#[path = "specs/verify/bagit.rs"]
mod verify_bagit;
