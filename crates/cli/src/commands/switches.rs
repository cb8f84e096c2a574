// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `adpn switches`: turn a piped packet back into command-line switches

use super::{Invocation, Parse, WorkflowArgs};
use crate::error::CliError;
use adpn_core::switches;
use anyhow::Result;
use std::io::Write;

pub fn handle(args: WorkflowArgs) -> Result<()> {
    let inv = Invocation::load(&args, Parse::Strict)?;
    run(&inv, &mut std::io::stdout().lock())?;
    Ok(())
}

/// One switch per line, for `$(...)` expansion into the next command
pub fn run(inv: &Invocation, out: &mut impl Write) -> Result<(), CliError> {
    for switch in switches::from_packet(&inv.batch.cascade()) {
        writeln!(out, "{switch}")
            .map_err(|e| CliError::new(format!("Could not write output: {}", e)).with_source(e))?;
    }
    Ok(())
}
