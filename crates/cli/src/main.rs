// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! adpn - ADPN ingest workflow CLI

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod commands;
mod error;
mod logging;
mod output;
mod signal;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use commands::{notify, packet, switches, verify, WorkflowArgs};
use error::{CliError, UNKNOWN_VERB_EXIT};
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "adpn",
    version,
    about = "ADPN ingest workflow tools",
    after_help = "Switches take the form --name=value. Use - to read packets piped from the previous step."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a ticket, post a note or print a notice for a piped packet
    Notify(WorkflowArgs),
    /// Extract, select or re-emit piped packets
    Packet(WorkflowArgs),
    /// Convert a piped packet into command-line switches
    Switches(WorkflowArgs),
    /// Validate a BagIt directory and stamp the packet
    Verify(WorkflowArgs),
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.kind() == ErrorKind::InvalidSubcommand => {
            let _ = e.print();
            return ExitCode::from(UNKNOWN_VERB_EXIT);
        }
        Err(e) => e.exit(),
    };

    if let Err(e) = signal::install() {
        eprintln!("warning: could not install interrupt handler: {}", e);
    }

    let result = match cli.command {
        Commands::Notify(args) => notify::handle(args),
        Commands::Packet(args) => packet::handle(args),
        Commands::Switches(args) => switches::handle(args),
        Commands::Verify(args) => verify::handle(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<CliError>() {
                Some(cli_err) => eprint!("{}", cli_err),
                None => eprintln!("error: {:#}", e),
            }
            ExitCode::from(error::exit_code(&e))
        }
    }
}
