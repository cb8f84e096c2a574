// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use adpn_core::{Packet, Settings, PACKET_PROLOG};
use adpn_engine::{Outcome, Report};
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Pretty,
}

impl OutputFormat {
    /// Format named by the `output` switch. Unknown names fall back to text.
    pub fn from_settings(settings: &Settings) -> Self {
        match settings.value("output").map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "json" || v == "application/json" => OutputFormat::Json,
            Some(v) if v == "pretty" => OutputFormat::Pretty,
            Some(v) if v == "text" || v == "text/plain" => OutputFormat::Text,
            Some(other) => {
                tracing::warn!(output = %other, "unknown output format, using text/plain");
                OutputFormat::Text
            }
            None => OutputFormat::Text,
        }
    }
}

/// Format a packet for standard output
pub fn packet_text(packet: &Packet, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("{PACKET_PROLOG}{}", packet.to_compact()),
        OutputFormat::Json => packet.to_compact(),
        OutputFormat::Pretty => packet.to_pretty(),
    }
}

/// Write `body`, adding a final newline when it lacks one
pub fn write_body(out: &mut impl Write, body: &str) -> io::Result<()> {
    out.write_all(body.as_bytes())?;
    if !body.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    Ok(())
}

/// Write a notify or verify outcome.
///
/// Printed bodies always go to `out`. A report line goes to `out` in text mode
/// and to `err` otherwise, so JSON output carries nothing but the packet.
pub fn write_outcome(
    out: &mut impl Write,
    err: &mut impl Write,
    outcome: &Outcome,
    format: OutputFormat,
) -> io::Result<()> {
    match &outcome.report {
        Report::Printed { body } => write_body(out, body)?,
        report => match format {
            OutputFormat::Text => writeln!(out, "{report}")?,
            OutputFormat::Json | OutputFormat::Pretty => writeln!(err, "{report}")?,
        },
    }
    if let Some(packet) = &outcome.packet {
        writeln!(out, "{}", packet_text(packet, format))?;
    }
    Ok(())
}
