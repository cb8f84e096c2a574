// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.
//!
//! This module provides enhanced error types that include:
//! - What went wrong (message)
//! - Why it might have happened (context)
//! - How to fix it (suggestions)
//! - The process exit code that mirrors the failing collaborator

use adpn_adapters::TicketError;
use adpn_core::{PacketError, SelectError, SettingsError, TemplateError};
use adpn_engine::{NotifyError, VerifyError};
use std::fmt;

/// Exit code for an unrecognized verb
pub const UNKNOWN_VERB_EXIT: u8 = 255;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct CliError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
    /// Process exit status
    pub exit_code: u8,
    /// Original error if any
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl CliError {
    /// Create a new error with the given message and exit status 1.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            exit_code: 1,
            source: None,
        }
    }

    /// Add context about why this error might have happened.
    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    /// Add a suggestion for how to fix this error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Exit with `code`, clamped into the range a process can report.
    pub fn with_exit_code(mut self, code: i32) -> Self {
        self.exit_code = u8::try_from(code.clamp(1, 255)).unwrap_or(1);
        self
    }

    /// Set the source error that caused this error.
    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Common error builders for typical failure scenarios.
impl CliError {
    /// No packet in the piped batch sits at the transition's `from` step.
    pub fn no_matching_packet(from: &str, to: &str, candidates: usize) -> Self {
        let from = if from.is_empty() { "(any)" } else { from };
        CliError::new(format!("No packet to advance from '{}' to '{}'", from, to))
            .with_context(format!("{} packet(s) were piped in", candidates))
            .with_context("An earlier stage may have been skipped or misrouted")
            .with_suggestion("Inspect the piped packets: adpn packet --output=pretty -")
            .with_suggestion("Check the --pipeline=from:to tags against each packet's Ingest Step")
            .with_exit_code(4)
    }

    /// The ticketing service refused or garbled a request.
    pub fn ticket_failed(err: TicketError) -> Self {
        let code = err.exit_code();
        let mut cli = CliError::new(format!("Ticketing request failed: {}", err));
        if let Some(raw) = err.raw_response().filter(|r| !r.trim().is_empty()) {
            cli = cli.with_context(format!("Response: {}", raw.trim()));
        }
        cli = match &err {
            TicketError::Transport(_) => {
                cli.with_suggestion("Check the gitlab/api setting and network access")
            }
            TicketError::MissingProject => cli
                .with_suggestion("Set gitlab/project in the config file or pass --gitlab/project=<path>"),
            TicketError::Http {
                status: 401 | 403, ..
            } => {
                cli.with_suggestion("Check that gitlab/token is valid for the project")
            }
            _ => cli,
        };
        cli.with_exit_code(code).with_source(err)
    }

    /// The named template resource could not be used.
    pub fn template_failed(err: TemplateError) -> Self {
        CliError::new(err.to_string())
            .with_suggestion("Check the templates setting names a directory of <slug>.txt files")
            .with_source(err)
    }

    /// Strict packet parsing failed.
    pub fn malformed_packet(err: PacketError) -> Self {
        CliError::new(format!("Could not read piped packets: {}", err))
            .with_context("Each packet line must hold one JSON object, optionally after a label")
            .with_source(err)
    }

    pub fn settings_failed(err: SettingsError) -> Self {
        CliError::new(err.to_string())
            .with_suggestion("Pass --config=<path> or set ADPN_CONFIG to a readable TOML file")
            .with_source(err)
    }
}

impl From<SelectError> for CliError {
    fn from(err: SelectError) -> Self {
        let cli = match &err {
            SelectError::NoMatchingPacket {
                from,
                to,
                candidates,
            } => CliError::no_matching_packet(from, to, *candidates),
            SelectError::PickOutOfRange(_) => CliError::new(err.to_string()).with_exit_code(4),
            SelectError::InvalidPick(_) => CliError::new(err.to_string())
                .with_suggestion("Use --pick=first, --pick=last or a zero-based index"),
        };
        cli.with_source(err)
    }
}

impl From<NotifyError> for CliError {
    fn from(err: NotifyError) -> Self {
        match err {
            NotifyError::Select(e) => e.into(),
            NotifyError::Template(e) => CliError::template_failed(e),
            NotifyError::Ticket(e) => CliError::ticket_failed(e),
        }
    }
}

impl From<VerifyError> for CliError {
    fn from(err: VerifyError) -> Self {
        let code = err.exit_code();
        match err {
            VerifyError::NoDirectory => CliError::new(err.to_string())
                .with_suggestion("adpn verify /path/to/bag")
                .with_exit_code(code),
            VerifyError::Validate(e) => CliError::new(e.to_string())
                .with_exit_code(code)
                .with_source(e),
        }
    }
}

impl From<PacketError> for CliError {
    fn from(err: PacketError) -> Self {
        CliError::malformed_packet(err)
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        CliError::settings_failed(err)
    }
}

/// Exit status for any error a command returned
pub fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<CliError>().map_or(1, |e| e.exit_code)
}
