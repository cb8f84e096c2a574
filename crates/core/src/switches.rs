// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Packet to command-line switches, for feeding a packet into tools that
//! take `--key=value` arguments

use crate::packet::Packet;

/// Switches describing the AU in `packet`, one `--key=value` per entry:
/// title, plugin JAR, plugin id (or name), `--remote=1` when a file size is
/// recorded, then every AU parameter in order.
pub fn from_packet(packet: &Packet) -> Vec<String> {
    let mut switches = Vec::new();

    if let Some(title) = packet.text("Ingest Title") {
        switches.push(format!("--au_title={title}"));
    }
    if let Some(jar) = packet.text("Plugin JAR") {
        switches.push(format!("--jar={jar}"));
    }
    if let Some(id) = packet.text("Plugin ID") {
        switches.push(format!("--plugin-id={id}"));
    } else if let Some(name) = packet.text("Plugin Name") {
        switches.push(format!("--plugin={name}"));
    }

    // Older packets carry the label with a trailing space
    if packet.contains("File Size") || packet.contains("File Size ") {
        switches.push("--remote=1".to_string());
    }

    switches.extend(
        packet
            .parameters()
            .into_iter()
            .map(|(key, value)| format!("--{key}={value}")),
    );
    switches
}

#[cfg(test)]
#[path = "switches_tests.rs"]
mod tests;
