// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod notify;
pub mod packet;
pub mod switches;
pub mod verify;

use crate::error::CliError;
use crate::logging;
use crate::output::OutputFormat;
use adpn_core::settings::is_short_flag;
use adpn_core::{PacketBatch, Settings};
use clap::Args;
use std::io::Read;

/// Switches and positional arguments, passed through untouched
#[derive(Args, Debug, Default)]
pub struct WorkflowArgs {
    /// `--name=value` switches, positional paths, and `-` to read piped packets
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 0..)]
    pub args: Vec<String>,
}

/// Everything a command reads before it runs
#[derive(Debug)]
pub struct Invocation {
    pub settings: Settings,
    pub batch: PacketBatch,
    pub format: OutputFormat,
}

/// How piped input is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parse {
    /// Malformed input is an error
    Strict,
    /// Malformed input becomes one empty packet
    Lenient,
}

impl Invocation {
    /// Load settings, start logging, then read piped packets when `-` is given.
    pub fn load(args: &WorkflowArgs, parse: Parse) -> Result<Self, CliError> {
        let settings = Settings::load(&args.args)?;
        logging::setup(&settings);
        for flag in args.args.iter().filter(|a| is_short_flag(a)) {
            tracing::warn!(flag = %flag, "ignoring unrecognized flag, switches take the form --name=value");
        }

        let text = if settings.reads_stdin() {
            let mut bytes = Vec::new();
            std::io::stdin()
                .read_to_end(&mut bytes)
                .map_err(|e| CliError::new(format!("Could not read standard input: {}", e)).with_source(e))?;
            decode_input(bytes, parse)?
        } else {
            String::new()
        };

        Self::from_parts(settings, &text, parse)
    }

    pub fn from_parts(settings: Settings, text: &str, parse: Parse) -> Result<Self, CliError> {
        let batch = match parse {
            Parse::Strict => PacketBatch::parse(text)?,
            Parse::Lenient => PacketBatch::parse_lenient(text),
        };
        tracing::debug!(packets = batch.len(), structured = batch.is_structured(), "read piped input");
        let format = OutputFormat::from_settings(&settings);
        Ok(Self {
            settings,
            batch,
            format,
        })
    }
}

/// Piped bytes as text. Lenient reads replace invalid UTF-8 sequences.
fn decode_input(bytes: Vec<u8>, parse: Parse) -> Result<String, CliError> {
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) if parse == Parse::Lenient => {
            tracing::warn!(error = %e.utf8_error(), "standard input is not valid UTF-8, replacing invalid bytes");
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
        Err(e) => Err(CliError::new(format!("Standard input is not UTF-8 text: {}", e))
            .with_context("Packets are JSON and must be UTF-8 encoded")
            .with_source(e)),
    }
}
