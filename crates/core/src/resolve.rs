// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ordered fallback resolution of parameter values
//!
//! Every derived value in a workflow command comes from a chain of sources
//! tried left to right: a command-line or config switch, a field of the piped
//! packets, or a literal. The first non-empty value wins; misses are never
//! errors, so a literal at the end of a chain guarantees a default.

use crate::field::FieldPath;
use crate::packet::{Packet, PacketBatch};
use crate::settings::Settings;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One candidate source for a value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// `switch:<name>`
    Switch(String),
    /// `json-path:<field>`
    Field(FieldPath),
    /// `literal:<value>`
    Literal(String),
}

impl Source {
    pub fn switch(name: impl Into<String>) -> Self {
        Source::Switch(name.into())
    }

    pub fn field(path: impl Into<FieldPath>) -> Self {
        Source::Field(path.into())
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Source::Literal(value.into())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid source reference `{0}`: expected switch:, json-path: or literal:")]
pub struct SourceParseError(pub String);

impl FromStr for Source {
    type Err = SourceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (tag, rest) = s
            .split_once(':')
            .ok_or_else(|| SourceParseError(s.to_string()))?;
        match tag {
            "switch" => Ok(Source::Switch(rest.to_string())),
            "json-path" => Ok(Source::Field(FieldPath::parse(rest))),
            "literal" => Ok(Source::Literal(rest.to_string())),
            _ => Err(SourceParseError(s.to_string())),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Switch(name) => write!(f, "switch:{name}"),
            Source::Field(path) => write!(f, "json-path:{path}"),
            Source::Literal(value) => write!(f, "literal:{value}"),
        }
    }
}

/// Parse a comma-separated chain such as `switch:to,json-path:Staged To`
pub fn parse_chain(text: &str) -> Result<Vec<Source>, SourceParseError> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}

/// Read-only resolution over already-loaded settings and packets
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    settings: &'a Settings,
    batch: &'a PacketBatch,
    focus: Option<&'a Packet>,
}

impl<'a> Resolver<'a> {
    pub fn new(settings: &'a Settings, batch: &'a PacketBatch) -> Self {
        Self {
            settings,
            batch,
            focus: None,
        }
    }

    /// Read unpinned field paths from `packet` instead of the batch cascade
    pub fn focused(self, packet: &'a Packet) -> Self {
        Self {
            focus: Some(packet),
            ..self
        }
    }

    pub fn settings(&self) -> &'a Settings {
        self.settings
    }

    pub fn batch(&self) -> &'a PacketBatch {
        self.batch
    }

    /// First non-empty value of the chain, or an empty string
    pub fn resolve(&self, sources: &[Source]) -> String {
        self.resolve_opt(sources).unwrap_or_default()
    }

    /// First non-empty value of the chain
    pub fn resolve_opt(&self, sources: &[Source]) -> Option<String> {
        let found = sources
            .iter()
            .find_map(|source| self.lookup(source).filter(|v| !v.trim().is_empty()));
        if found.is_none() {
            tracing::trace!(chain = ?sources, "no source yielded a value");
        }
        found
    }

    /// Value of a single source; a missing key is `None`
    pub fn lookup(&self, source: &Source) -> Option<String> {
        match source {
            Source::Switch(name) => self.settings.get(name).map(str::to_string),
            Source::Field(path) => path.lookup(self.batch, self.focus),
            Source::Literal(value) => Some(value.clone()),
        }
    }
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
