// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline stage selection
//!
//! A stage reads the packets its predecessor emitted, picks the one whose
//! recorded step matches `from`, and re-emits it stamped with `to`.

use crate::packet::{Packet, PacketBatch};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectError {
    #[error("no packet with step `{from}` to advance to `{to}` among {candidates} packet(s)")]
    NoMatchingPacket {
        from: String,
        to: String,
        candidates: usize,
    },
    #[error("pick `{0}` is out of range for the matching packets")]
    PickOutOfRange(Pick),
    #[error("invalid pick `{0}`: expected first, last or an index")]
    InvalidPick(String),
}

/// A `from:to` stage transition. An empty `from` accepts any step; an empty
/// `to` leaves the step unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    pub from: String,
    pub to: String,
}

impl Transition {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    fn accepts(&self, packet: &Packet) -> bool {
        let from = self.from.trim();
        if from.is_empty() {
            return true;
        }
        packet
            .step()
            .is_some_and(|step| step.trim().eq_ignore_ascii_case(from))
    }

    fn stamp(&self, packet: &Packet) -> Packet {
        let to = self.to.trim();
        if to.is_empty() {
            packet.clone()
        } else {
            packet.restamped(to)
        }
    }
}

impl FromStr for Transition {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.split_once(':') {
            Some((from, to)) => Transition::new(from.trim(), to.trim()),
            None => Transition::new(s.trim(), ""),
        })
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.from, self.to)
    }
}

/// Tie-break among several matching packets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Pick {
    #[default]
    First,
    Last,
    /// Zero-based position among the matches
    Index(usize),
}

impl FromStr for Pick {
    type Err = SelectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "first" => Ok(Pick::First),
            "last" => Ok(Pick::Last),
            other => other
                .parse()
                .map(Pick::Index)
                .map_err(|_| SelectError::InvalidPick(s.to_string())),
        }
    }
}

impl fmt::Display for Pick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pick::First => write!(f, "first"),
            Pick::Last => write!(f, "last"),
            Pick::Index(i) => write!(f, "{i}"),
        }
    }
}

/// Select the packet advancing through `transition`, stamped with its `to` step
pub fn select(
    batch: &PacketBatch,
    transition: &Transition,
    pick: Pick,
) -> Result<Packet, SelectError> {
    let matches: Vec<&Packet> = batch
        .packets()
        .iter()
        .filter(|p| transition.accepts(p))
        .collect();

    if matches.is_empty() {
        return Err(SelectError::NoMatchingPacket {
            from: transition.from.clone(),
            to: transition.to.clone(),
            candidates: batch.len(),
        });
    }

    let chosen = match pick {
        Pick::First => matches.first(),
        Pick::Last => matches.last(),
        Pick::Index(i) => matches.get(i),
    }
    .ok_or(SelectError::PickOutOfRange(pick))?;

    tracing::debug!(%transition, %pick, matches = matches.len(), "selected packet");
    Ok(transition.stamp(chosen))
}

#[cfg(test)]
#[path = "select_tests.rs"]
mod tests;
