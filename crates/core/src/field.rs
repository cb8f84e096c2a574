// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Addressing fields inside a packet batch
//!
//! A path names either a packet field (`Staged By`) or an AU parameter
//! (`@subdirectory`), optionally pinned to one packet of the batch
//! (`[1]Staged By`). Unpinned paths read the focused packet when one is
//! given, otherwise the cascade of the whole batch.

use crate::packet::{Packet, PacketBatch};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKey {
    /// A top-level packet field
    Field(String),
    /// An entry of the packet's `parameters` pair list
    Parameter(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    packet: Option<usize>,
    key: FieldKey,
}

impl FieldPath {
    pub fn field(name: impl Into<String>) -> Self {
        Self {
            packet: None,
            key: FieldKey::Field(name.into()),
        }
    }

    pub fn parameter(name: impl Into<String>) -> Self {
        Self {
            packet: None,
            key: FieldKey::Parameter(name.into()),
        }
    }

    /// Pin this path to the packet at `index` in the batch
    pub fn at(mut self, index: usize) -> Self {
        self.packet = Some(index);
        self
    }

    /// Parse `[N]name`, `@name` or `name`
    pub fn parse(text: &str) -> Self {
        let (packet, rest) = split_index(text);
        let key = match rest.strip_prefix('@') {
            Some(param) if !param.is_empty() => FieldKey::Parameter(param.to_string()),
            _ => FieldKey::Field(rest.to_string()),
        };
        Self { packet, key }
    }

    pub fn packet_index(&self) -> Option<usize> {
        self.packet
    }

    pub fn key(&self) -> &FieldKey {
        &self.key
    }

    /// Read this path. Pinned paths that fall outside the batch are misses.
    pub fn lookup(&self, batch: &PacketBatch, focus: Option<&Packet>) -> Option<String> {
        match (self.packet, focus) {
            (Some(index), _) => {
                let found = batch.get(index);
                if found.is_none() {
                    tracing::debug!(path = %self, batches = batch.len(), "packet index out of range");
                }
                found.and_then(|packet| self.read(packet))
            }
            (None, Some(packet)) => self.read(packet),
            (None, None) => self.read(&batch.cascade()),
        }
    }

    /// Read this path's key from one packet, ignoring any pinned index
    pub fn read(&self, packet: &Packet) -> Option<String> {
        match &self.key {
            FieldKey::Field(name) => packet.text(name),
            FieldKey::Parameter(name) => packet.parameter(name),
        }
    }
}

impl From<&str> for FieldPath {
    fn from(text: &str) -> Self {
        FieldPath::parse(text)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(index) = self.packet {
            write!(f, "[{index}]")?;
        }
        match &self.key {
            FieldKey::Field(name) => write!(f, "{name}"),
            FieldKey::Parameter(name) => write!(f, "@{name}"),
        }
    }
}

fn split_index(text: &str) -> (Option<usize>, &str) {
    let Some(rest) = text.strip_prefix('[') else {
        return (None, text);
    };
    let Some((digits, tail)) = rest.split_once(']') else {
        return (None, text);
    };
    match digits.parse::<usize>() {
        Ok(index) => (Some(index), tail),
        Err(_) => (None, text),
    }
}

#[cfg(test)]
#[path = "field_tests.rs"]
mod tests;
