// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `adpn packet`: extract, select or re-emit piped packets

use super::{Invocation, Parse, WorkflowArgs};
use crate::error::CliError;
use crate::output::{self, OutputFormat};
use adpn_core::{select, FieldPath, Packet, Pick, Transition};
use anyhow::Result;
use std::io::Write;

pub fn handle(args: WorkflowArgs) -> Result<()> {
    let inv = Invocation::load(&args, Parse::Strict)?;
    run(&inv, &mut std::io::stdout().lock())?;
    Ok(())
}

/// Write the addressed packet, or one field of it, to `out`
pub fn run(inv: &Invocation, out: &mut impl Write) -> Result<(), CliError> {
    let packet = addressed(inv)?;

    let Some(key) = inv.settings.value("key") else {
        writeln!(out, "{}", output::packet_text(&packet, inv.format)).map_err(write_failed)?;
        return Ok(());
    };

    let path = FieldPath::parse(key.trim());
    let value = path.lookup(&inv.batch, Some(&packet)).ok_or_else(|| {
        CliError::new(format!("No field '{}' in the piped packet", key.trim()))
            .with_suggestion("List the packet's fields: adpn packet --output=pretty -")
    })?;

    match inv.format {
        // Bare text for `$(adpn packet --key=...)`
        OutputFormat::Text => write!(out, "{value}"),
        OutputFormat::Json | OutputFormat::Pretty => {
            writeln!(out, "{}", serde_json::Value::String(value))
        }
    }
    .map_err(write_failed)
}

/// The packet chosen by `--pipeline`, else `--index`, else the cascade
fn addressed(inv: &Invocation) -> Result<Packet, CliError> {
    if let Some(pipeline) = inv.settings.value("pipeline") {
        let transition = pipeline.parse::<Transition>().unwrap_or_default();
        let pick = inv
            .settings
            .value("pick")
            .map(str::parse::<Pick>)
            .transpose()?
            .unwrap_or_default();
        return Ok(select(&inv.batch, &transition, pick)?);
    }

    if let Some(index) = inv.settings.value("index") {
        let index: usize = index
            .trim()
            .parse()
            .map_err(|_| CliError::new(format!("Invalid packet index '{}'", index.trim())))?;
        return inv.batch.get(index).cloned().ok_or_else(|| {
            CliError::new(format!("No packet at index {}", index))
                .with_context(format!("{} packet(s) were piped in", inv.batch.len()))
        });
    }

    Ok(inv.batch.cascade())
}

fn write_failed(e: std::io::Error) -> CliError {
    CliError::new(format!("Could not write output: {}", e)).with_source(e)
}

#[cfg(test)]
#[path = "packet_tests.rs"]
mod tests;
