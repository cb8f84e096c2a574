// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `adpn verify`: run the BagIt validator over a staged directory

use super::{Invocation, Parse, WorkflowArgs};
use crate::error::CliError;
use crate::output;
use adpn_adapters::validate::DEFAULT_VALIDATOR;
use adpn_adapters::{BagItValidator, TracedValidator, ValidateError, Validator};
use adpn_engine::{verify, VerifyError};
use anyhow::Result;
use std::io::Write;

pub fn handle(args: WorkflowArgs) -> Result<()> {
    let inv = Invocation::load(&args, Parse::Lenient)?;
    let program = inv.settings.value("bagit").unwrap_or(DEFAULT_VALIDATOR).trim().to_string();
    let validator = TracedValidator::new(BagItValidator::new(program));
    run(&validator, &inv, &mut std::io::stdout().lock())?;
    Ok(())
}

/// Validate and write the validator's text, then the stamped packet.
///
/// A failing validator's text is still written before the error returns.
pub fn run<V: Validator>(validator: &V, inv: &Invocation, out: &mut impl Write) -> Result<(), CliError> {
    let write_failed =
        |e: std::io::Error| CliError::new(format!("Could not write output: {}", e)).with_source(e);

    match verify(validator, &inv.settings, &inv.batch) {
        Ok(verified) => {
            out.write_all(verified.output.as_bytes()).map_err(write_failed)?;
            writeln!(out, "{}", output::packet_text(&verified.packet, inv.format)).map_err(write_failed)?;
            Ok(())
        }
        Err(VerifyError::Validate(ValidateError::Failed { code, output })) => {
            out.write_all(output.as_bytes()).map_err(write_failed)?;
            Err(CliError::new("BagIt validation failed").with_exit_code(code.clamp(1, 254)))
        }
        Err(e) => Err(e.into()),
    }
}
