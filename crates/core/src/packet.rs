// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Packet model
//!
//! A packet is the structured status record one workflow stage hands to the
//! next. Packets travel as text: one JSON object per line, optionally prefixed
//! with a label such as `JSON PACKET: `, so they can be pasted into ticket
//! comments and piped between independently scheduled processes.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

/// Field recording which workflow step a packet represents
pub const INGEST_STEP: &str = "Ingest Step";

/// Field holding the plugin-specific AU parameters as `[key, value]` pairs
pub const PARAMETERS: &str = "parameters";

/// Prefix written before packets emitted for human-readable streams
pub const PACKET_PROLOG: &str = "JSON PACKET: ";

// `[Label words:] {json}` on a single line. A labelled line is a packet
// candidate from its opening brace to the end of the line, closed or not.
// Allow expect here as the regex is compile-time verified to be valid
#[allow(clippy::expect_used)]
static PACKET_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*((?:[A-Za-z0-9]+\s*)+:\s*)?(\{.*?)\s*$")
        .expect("constant regex pattern is valid")
});

/// Errors from parsing packet text
#[derive(Debug, Error)]
pub enum PacketError {
    #[error("malformed packet on line {line}: {source}")]
    Malformed {
        line: usize,
        text: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("packet must be a JSON object, got: {0}")]
    NotAnObject(String),
}

/// One workflow record: an ordered mapping of human-readable field labels
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Packet {
    fields: Map<String, Value>,
}

impl Packet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy of this packet with `name` set to a string value.
    ///
    /// An existing field keeps its position; a new one is appended.
    pub fn with(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_value(name, Value::String(value.into()))
    }

    pub fn with_value(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Return a copy carrying `parameters` as an ordered pair list
    pub fn with_parameters<K, V>(self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let list = pairs
            .into_iter()
            .map(|(k, v)| Value::Array(vec![Value::String(k.into()), Value::String(v.into())]))
            .collect();
        self.with_value(PARAMETERS, Value::Array(list))
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Field value as text. Strings are returned as-is, numbers and booleans
    /// in their JSON spelling, nested structures as compact JSON.
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields.get(name).and_then(value_text)
    }

    /// The packet's recorded workflow step, if any
    pub fn step(&self) -> Option<String> {
        self.text(INGEST_STEP)
    }

    /// AU parameters in recorded order. Malformed entries are skipped.
    pub fn parameters(&self) -> Vec<(String, String)> {
        let Some(Value::Array(list)) = self.fields.get(PARAMETERS) else {
            return Vec::new();
        };
        list.iter()
            .filter_map(|entry| match entry {
                Value::Array(pair) if pair.len() == 2 => {
                    Some((value_text(&pair[0])?, value_text(&pair[1])?))
                }
                _ => None,
            })
            .collect()
    }

    pub fn parameter(&self, key: &str) -> Option<String> {
        self.parameters()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// A copy of this packet stamped with a new workflow step
    pub fn restamped(&self, step: &str) -> Packet {
        self.clone().with(INGEST_STEP, step)
    }

    /// Cascade `overlay` onto this packet.
    ///
    /// Overlay values win on conflict. Fields keep this packet's order, with
    /// fields only the overlay carries appended in the overlay's order.
    pub fn merge(&self, overlay: &Packet) -> Packet {
        let mut fields = self.fields.clone();
        for (name, value) in &overlay.fields {
            fields.insert(name.clone(), value.clone());
        }
        Packet { fields }
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Single-line serialization; re-parses to an identical packet
    pub fn to_compact(&self) -> String {
        self.to_string()
    }

    /// Indented serialization for humans
    pub fn to_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.fields).unwrap_or_else(|_| self.to_compact())
    }
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(&self.fields).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl TryFrom<Value> for Packet {
    type Error = PacketError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Packet { fields }),
            other => Err(PacketError::NotAnObject(other.to_string())),
        }
    }
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        nested => Some(nested.to_string()),
    }
}

/// An ordered run of packets, as read from one piped input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PacketBatch {
    packets: Vec<Packet>,
    raw: String,
}

impl PacketBatch {
    pub fn new(packets: Vec<Packet>) -> Self {
        Self {
            packets,
            raw: String::new(),
        }
    }

    /// Parse piped text into a batch.
    ///
    /// Every line shaped like `[Label:] {...}` contributes one packet; other
    /// lines are ignored. Text with no such lines is tried as a whole JSON
    /// document (an object, or an array of objects). Plain text becomes a
    /// single packet with no fields; empty input becomes an empty batch.
    pub fn parse(text: &str) -> Result<PacketBatch, PacketError> {
        let raw = text.to_string();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(PacketBatch {
                packets: Vec::new(),
                raw,
            });
        }

        if let Some(packets) = parse_document(trimmed) {
            return Ok(PacketBatch { packets: packets?, raw });
        }

        let mut packets = Vec::new();
        for (index, line) in text.lines().enumerate() {
            let Some(caps) = PACKET_LINE.captures(line) else {
                continue;
            };
            let json = &caps[2];
            // Bare lines must close on the same line; `{` alone opens a pretty document
            if caps.get(1).is_none() && !json.ends_with('}') {
                continue;
            }
            let value: Value =
                serde_json::from_str(json).map_err(|source| PacketError::Malformed {
                    line: index + 1,
                    text: line.to_string(),
                    source,
                })?;
            packets.push(Packet::try_from(value)?);
        }

        if packets.is_empty() {
            if trimmed.starts_with('{') {
                // Looked like a JSON object but was not one
                let source = match serde_json::from_str::<Value>(trimmed) {
                    Err(source) => source,
                    Ok(value) => return Err(PacketError::NotAnObject(value.to_string())),
                };
                return Err(PacketError::Malformed {
                    line: 1,
                    text: trimmed.lines().next().unwrap_or_default().to_string(),
                    source,
                });
            }
            packets.push(Packet::new());
        }

        Ok(PacketBatch { packets, raw })
    }

    /// Parse piped text, degrading malformed input to one empty packet that
    /// still carries the raw text.
    pub fn parse_lenient(text: &str) -> PacketBatch {
        PacketBatch::parse(text).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "piped input is not a packet stream, treating it as plain text");
            PacketBatch {
                packets: vec![Packet::new()],
                raw: text.to_string(),
            }
        })
    }

    pub fn packets(&self) -> &[Packet] {
        &self.packets
    }

    pub fn get(&self, index: usize) -> Option<&Packet> {
        self.packets.get(index)
    }

    pub fn len(&self) -> usize {
        self.packets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }

    /// True when at least one packet carries fields
    pub fn is_structured(&self) -> bool {
        self.packets.iter().any(|p| !p.is_empty())
    }

    /// The text this batch was parsed from
    pub fn raw_text(&self) -> &str {
        &self.raw
    }

    /// Merge every packet in order, later packets winning
    pub fn cascade(&self) -> Packet {
        self.packets
            .iter()
            .fold(Packet::new(), |acc, packet| acc.merge(packet))
    }

    /// One compact packet per line
    pub fn to_compact(&self) -> String {
        self.packets
            .iter()
            .map(Packet::to_compact)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// A single pretty object, or a pretty array for several packets
    pub fn to_pretty(&self) -> String {
        match self.packets.as_slice() {
            [single] => single.to_pretty(),
            many => serde_json::to_string_pretty(many).unwrap_or_else(|_| self.to_compact()),
        }
    }
}

/// Whole-document coercion. `None` when the text is not one JSON value.
fn parse_document(text: &str) -> Option<Result<Vec<Packet>, PacketError>> {
    if !(text.starts_with('{') || text.starts_with('[')) {
        return None;
    }
    match serde_json::from_str::<Value>(text).ok()? {
        Value::Array(items) => Some(items.into_iter().map(Packet::try_from).collect()),
        object => Some(Packet::try_from(object).map(|p| vec![p])),
    }
}

#[cfg(test)]
#[path = "packet_tests.rs"]
mod tests;
